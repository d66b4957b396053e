//! Task data model

use chrono::{DateTime, Local};
use std::fmt;

/// Format used for every timestamp the tracker prints or writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a local timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Task ID, assigned sequentially by the store starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u32);

impl TaskId {
    /// Get the numeric value
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task urgency, ordered `Low < Medium < High < Critical`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Urgency {
    /// All tiers, lowest first
    pub const ALL: [Urgency; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Upper-case label used in exports and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Numeric level, 1 (low) through 4 (critical)
    pub fn level(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Map a numeric level back to a tier. Out-of-range levels fall back to `Medium`.
    pub fn from_level(level: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|u| i64::from(u.level()) == level)
            .unwrap_or_default()
    }

    /// Parse a tier name or level ("high", "HIGH", "3"). Returns `None` when unrecognised.
    pub fn parse_strict(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|u| {
            u.label().eq_ignore_ascii_case(s) || s.parse::<u8>().is_ok_and(|n| n == u.level())
        })
    }

    /// Like [`Urgency::parse_strict`], but unrecognised input becomes `Medium`.
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse_strict(s).unwrap_or_default()
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique task ID
    pub id: TaskId,

    /// Free-text description
    pub description: String,

    /// Urgency tier
    pub urgency: Urgency,

    /// When the task was created
    pub created_at: DateTime<Local>,

    /// Completion flag. Only ever goes from false to true.
    completed: bool,
}

impl Task {
    /// Create a new pending task
    pub(crate) fn new(
        id: TaskId,
        description: impl Into<String>,
        urgency: Urgency,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            urgency,
            created_at,
            completed: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the task as done. Returns true if the flag changed.
    pub(crate) fn complete(&mut self) -> bool {
        let changed = !self.completed;
        self.completed = true;
        changed
    }

    /// `YYYY-MM-DD HH:MM:SS` creation time
    pub fn created_string(&self) -> String {
        format_timestamp(&self.created_at)
    }

    /// `COMPLETED` or `PENDING`, as written to exports
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "COMPLETED"
        } else {
            "PENDING"
        }
    }
}
