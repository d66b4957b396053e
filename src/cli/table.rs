//! Fixed-width task tables and the statistics report

use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

use crate::task::{Task, TaskCounts, Urgency, UrgencyBreakdown};

const TABLE_COL_ID: usize = 5;
const TABLE_COL_URGENCY: usize = 12;
const TABLE_COL_CREATED: usize = 20;
const TABLE_COL_STATUS: usize = 10;

/// Cut `s` to fewer than `width` display columns and pad it to exactly `width`.
pub fn fit_column(s: &str, width: usize) -> String {
    let limit = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;

    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        out.push(c);
        used += w;
    }

    out.push_str(&" ".repeat(width - used));
    out
}

fn status_cell(task: &Task) -> &'static str {
    if task.is_completed() {
        "DONE"
    } else {
        "PENDING"
    }
}

/// Table with ID, description, urgency, created and status columns
pub fn write_task_table<W: Write>(
    out: &mut W,
    title: &str,
    tasks: &[&Task],
    description_width: usize,
) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks available.");
    }

    writeln!(out, "\n=== {} ===", title)?;
    writeln!(
        out,
        "{:<id$}{}{:<urg$}{:<created$}{:<status$}",
        "ID",
        fit_column("Description", description_width),
        "Urgency",
        "Created",
        "Status",
        id = TABLE_COL_ID,
        urg = TABLE_COL_URGENCY,
        created = TABLE_COL_CREATED,
        status = TABLE_COL_STATUS
    )?;
    writeln!(
        out,
        "{}",
        "-".repeat(
            TABLE_COL_ID + description_width + TABLE_COL_URGENCY + TABLE_COL_CREATED + TABLE_COL_STATUS
        )
    )?;

    for task in tasks {
        writeln!(
            out,
            "{:<id$}{}{:<urg$}{:<created$}{:<status$}",
            task.id.to_string(),
            fit_column(&task.description, description_width),
            task.urgency.label(),
            task.created_string(),
            status_cell(task),
            id = TABLE_COL_ID,
            urg = TABLE_COL_URGENCY,
            created = TABLE_COL_CREATED,
            status = TABLE_COL_STATUS
        )?;
    }
    writeln!(out)
}

/// Table for a single urgency tier, so the urgency column is left out
pub fn write_urgency_table<W: Write>(
    out: &mut W,
    urgency: Urgency,
    tasks: &[&Task],
    description_width: usize,
) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks found with {} urgency.", urgency.label());
    }

    writeln!(out, "\n=== TASKS WITH {} URGENCY ===", urgency.label())?;
    writeln!(
        out,
        "{:<id$}{}{:<created$}{:<status$}",
        "ID",
        fit_column("Description", description_width),
        "Created",
        "Status",
        id = TABLE_COL_ID,
        created = TABLE_COL_CREATED,
        status = TABLE_COL_STATUS
    )?;
    writeln!(
        out,
        "{}",
        "-".repeat(TABLE_COL_ID + description_width + TABLE_COL_CREATED + TABLE_COL_STATUS)
    )?;

    for task in tasks {
        writeln!(
            out,
            "{:<id$}{}{:<created$}{:<status$}",
            task.id.to_string(),
            fit_column(&task.description, description_width),
            task.created_string(),
            status_cell(task),
            id = TABLE_COL_ID,
            created = TABLE_COL_CREATED,
            status = TABLE_COL_STATUS
        )?;
    }
    writeln!(out)
}

pub fn write_statistics<W: Write>(
    out: &mut W,
    counts: TaskCounts,
    pending: UrgencyBreakdown,
) -> io::Result<()> {
    writeln!(out, "\n=== STATISTICS ===")?;
    writeln!(out, "Total Tasks: {}", counts.total)?;
    writeln!(out, "Pending Tasks: {}", counts.pending)?;
    writeln!(out, "Completed Tasks: {}", counts.completed)?;

    writeln!(out, "\nPending Tasks by Urgency:")?;
    writeln!(out, "  Critical: {}", pending.critical)?;
    writeln!(out, "  High: {}", pending.high)?;
    writeln!(out, "  Medium: {}", pending.medium)?;
    writeln!(out, "  Low: {}", pending.low)?;
    writeln!(out)
}
