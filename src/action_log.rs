//! Append-only audit log of store actions.
//!
//! Each entry is one line, `[YYYY-MM-DD HH:MM:SS] message`. The file is opened and closed
//! for every entry, and write failures never reach the caller.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::task::format_timestamp;

#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    path: Option<PathBuf>,
}

impl ActionLog {
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A log that records nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Append one timestamped entry. Best effort.
    pub fn record(&self, message: &str) {
        let Some(path) = &self.path else {
            return;
        };

        let line = format!("[{}] {}", format_timestamp(&Local::now()), message);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{}", line));

        if let Err(e) = result {
            debug!("Failed to write action log {}: {}", path.display(), e);
        }
    }
}
