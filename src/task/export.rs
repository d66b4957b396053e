//! Flat-file exports: plain text, CSV and JSON.
//!
//! The layouts are fixed. With [`FieldQuoting::Verbatim`] (the default) descriptions are
//! written exactly as entered, so a description containing `"` produces a CSV row or JSON
//! document that other tools may reject. [`FieldQuoting::Escaped`] opts into proper
//! quoting for both formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::error::{Result, TaskError};
use super::model::{format_timestamp, Task};

const TEXT_HEADER_RULE: usize = 50;
const TEXT_TASK_RULE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension appended to user-supplied base names
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Menu number, 1 through 3
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Self::Text),
            2 => Some(Self::Csv),
            3 => Some(Self::Json),
            _ => None,
        }
    }

    /// Name used in the action log ("file", "CSV", "JSON")
    pub fn log_name(&self) -> &'static str {
        match self {
            Self::Text => "file",
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }

    pub fn render(
        &self,
        tasks: &[Task],
        exported_at: &DateTime<Local>,
        quoting: FieldQuoting,
    ) -> String {
        match self {
            Self::Text => render_text(tasks, exported_at),
            Self::Csv => render_csv(tasks, quoting),
            Self::Json => render_json(tasks, exported_at, quoting),
        }
    }
}

/// How string fields are quoted in CSV and JSON exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldQuoting {
    /// Wrap in quotes without escaping the contents
    #[default]
    Verbatim,
    /// Double embedded quotes in CSV, JSON-escape strings
    Escaped,
}

pub fn render_text(tasks: &[Task], exported_at: &DateTime<Local>) -> String {
    let mut out = format!("TODO APP EXPORT - {}\n", format_timestamp(exported_at));
    out.push_str(&"=".repeat(TEXT_HEADER_RULE));
    out.push('\n');

    for task in tasks {
        out.push_str(&format!("ID: {}\n", task.id));
        out.push_str(&format!("Description: {}\n", task.description));
        out.push_str(&format!("Urgency: {}\n", task.urgency.label()));
        out.push_str(&format!("Created: {}\n", task.created_string()));
        out.push_str(&format!("Status: {}\n", task.status_label()));
        out.push_str(&"-".repeat(TEXT_TASK_RULE));
        out.push('\n');
    }

    out
}

pub fn render_csv(tasks: &[Task], quoting: FieldQuoting) -> String {
    let mut out = String::from("ID,Description,Urgency,Created,Status\n");

    for task in tasks {
        let description = match quoting {
            FieldQuoting::Verbatim => format!("\"{}\"", task.description),
            FieldQuoting::Escaped => format!("\"{}\"", task.description.replace('"', "\"\"")),
        };
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            task.id,
            description,
            task.urgency.label(),
            task.created_string(),
            task.status_label()
        ));
    }

    out
}

pub fn render_json(
    tasks: &[Task],
    exported_at: &DateTime<Local>,
    quoting: FieldQuoting,
) -> String {
    let mut out = String::from("{\n  \"tasks\": [\n");

    for (i, task) in tasks.iter().enumerate() {
        out.push_str("    {\n");
        out.push_str(&format!("      \"id\": {},\n", task.id));
        out.push_str(&format!(
            "      \"description\": {},\n",
            json_string(&task.description, quoting)
        ));
        out.push_str(&format!("      \"urgency\": \"{}\",\n", task.urgency.label()));
        out.push_str(&format!("      \"created\": \"{}\",\n", task.created_string()));
        out.push_str(&format!("      \"completed\": {}\n", task.is_completed()));
        out.push_str("    }");
        if i + 1 < tasks.len() {
            out.push(',');
        }
        out.push('\n');
    }

    out.push_str("  ],\n");
    out.push_str(&format!(
        "  \"exported_at\": \"{}\"\n",
        format_timestamp(exported_at)
    ));
    out.push_str("}\n");
    out
}

fn json_string(value: &str, quoting: FieldQuoting) -> String {
    match quoting {
        FieldQuoting::Verbatim => format!("\"{}\"", value),
        // Serializing a &str cannot fail
        FieldQuoting::Escaped => {
            serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
        }
    }
}

/// Create (or truncate) `path` and write `content`. The file is closed before returning.
pub fn write_export(path: &Path, content: &str) -> Result<()> {
    let to_error = |source| TaskError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).map_err(to_error)?;
    writer.flush().map_err(to_error)?;
    Ok(())
}
