//! In-memory task store
//!
//! Owns the tasks, the next-id counter and the action log. Every mutation takes
//! `&mut self`.

use std::cmp::Reverse;
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use super::error::Result;
use super::export::{write_export, ExportFormat, FieldQuoting};
use super::model::{Task, TaskId, Urgency};
use crate::action_log::ActionLog;

/// Task totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Pending tasks per urgency tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrgencyBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl UrgencyBreakdown {
    pub fn get(&self, urgency: Urgency) -> usize {
        match urgency {
            Urgency::Critical => self.critical,
            Urgency::High => self.high,
            Urgency::Medium => self.medium,
            Urgency::Low => self.low,
        }
    }

    fn bump(&mut self, urgency: Urgency) {
        match urgency {
            Urgency::Critical => self.critical += 1,
            Urgency::High => self.high += 1,
            Urgency::Medium => self.medium += 1,
            Urgency::Low => self.low += 1,
        }
    }
}

#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u32,
    log: ActionLog,
    quoting: FieldQuoting,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(ActionLog::disabled())
    }
}

impl TaskStore {
    pub fn new(log: ActionLog) -> Self {
        log.record("Task store opened");
        Self {
            tasks: Vec::new(),
            next_id: 1,
            log,
            quoting: FieldQuoting::default(),
        }
    }

    pub fn set_field_quoting(&mut self, quoting: FieldQuoting) {
        self.quoting = quoting;
    }

    pub fn field_quoting(&self) -> FieldQuoting {
        self.quoting
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    /// ID the next added task will receive
    pub fn next_id(&self) -> TaskId {
        TaskId(self.next_id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Add a task stamped with the current time
    pub fn add(&mut self, description: impl Into<String>, urgency: Urgency) -> TaskId {
        self.add_at(description, urgency, Local::now())
    }

    fn add_at(
        &mut self,
        description: impl Into<String>,
        urgency: Urgency,
        created_at: DateTime<Local>,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let task = Task::new(id, description, urgency, created_at);
        debug!(id = id.number(), urgency = urgency.label(), "Adding task");
        self.log.record(&format!(
            "Added task [ID: {}] \"{}\" [{}]",
            id,
            task.description,
            urgency.label()
        ));
        self.tasks.push(task);
        id
    }

    /// Remove the task with `id`. Returns false if there is none.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id = id.number(), "Remove: task not found");
            return false;
        };

        let task = self.tasks.remove(pos);
        self.log.record(&format!(
            "Removed task [ID: {}] \"{}\"",
            id, task.description
        ));
        true
    }

    /// Mark the task with `id` as completed. Returns false if there is none.
    pub fn complete(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id = id.number(), "Complete: task not found");
            return false;
        };

        if !task.complete() {
            debug!(id = id.number(), "Task already completed");
        }
        let message = format!("Completed task [ID: {}] \"{}\"", id, task.description);
        self.log.record(&message);
        true
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks in insertion order
    pub fn all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Most urgent first; within a tier, oldest first. Stored order is untouched.
    pub fn sorted_by_urgency(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        // sort_by_key is stable, so equal keys keep insertion order
        sorted.sort_by_key(|t| (Reverse(t.urgency), t.created_at));
        sorted
    }

    pub fn by_urgency(&self, urgency: Urgency) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.urgency == urgency).collect()
    }

    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_completed()).collect()
    }

    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.is_completed()).collect()
    }

    /// Drop every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.is_completed());
        let removed = before - self.tasks.len();

        if removed > 0 {
            self.log
                .record(&format!("Cleared {} completed tasks", removed));
        }
        debug!(removed, "Cleared completed tasks");
        removed
    }

    pub fn counts(&self) -> TaskCounts {
        let completed = self.tasks.iter().filter(|t| t.is_completed()).count();
        TaskCounts {
            total: self.tasks.len(),
            pending: self.tasks.len() - completed,
            completed,
        }
    }

    pub fn pending_by_urgency(&self) -> UrgencyBreakdown {
        let mut breakdown = UrgencyBreakdown::default();
        for task in self.tasks.iter().filter(|t| !t.is_completed()) {
            breakdown.bump(task.urgency);
        }
        breakdown
    }

    /// Write every task to `path` in `format`.
    pub fn export(&self, format: ExportFormat, path: &Path) -> Result<()> {
        let content = format.render(&self.tasks, &Local::now(), self.quoting);

        if let Err(e) = write_export(path, &content) {
            warn!("Export failed: {}", e);
            return Err(e);
        }

        self.log.record(&format!(
            "Exported tasks to {}: {}",
            format.log_name(),
            path.display()
        ));
        debug!(path = %path.display(), tasks = self.tasks.len(), "Exported tasks");
        Ok(())
    }

    pub fn export_text(&self, path: &Path) -> Result<()> {
        self.export(ExportFormat::Text, path)
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        self.export(ExportFormat::Csv, path)
    }

    pub fn export_json(&self, path: &Path) -> Result<()> {
        self.export(ExportFormat::Json, path)
    }
}

impl Drop for TaskStore {
    fn drop(&mut self) {
        self.log.record("Task store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::fs;
    use tempfile::tempdir;

    fn base_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
    }

    fn ids(tasks: &[&Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id.number()).collect()
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut store = TaskStore::default();
        let a = store.add("a", Urgency::Low);
        let b = store.add("b", Urgency::Low);
        let c = store.add("c", Urgency::Low);
        assert_eq!((a, b, c), (TaskId(1), TaskId(2), TaskId(3)));
        assert_eq!(store.next_id(), TaskId(4));
    }

    #[test]
    fn test_ids_never_reused_after_remove() {
        let mut store = TaskStore::default();
        store.add("a", Urgency::Low);
        let b = store.add("b", Urgency::Low);
        assert!(store.remove(b));

        let c = store.add("c", Urgency::Low);
        assert_eq!(c, TaskId(3));
        assert_eq!(store.find(TaskId(1)).map(|t| t.description.as_str()), Some("a"));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = TaskStore::default();
        store.add("a", Urgency::High);
        assert!(!store.remove(TaskId(99)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_complete() {
        let mut store = TaskStore::default();
        let id = store.add("a", Urgency::High);
        assert!(store.complete(id));
        assert!(store.complete(id));
        assert!(!store.complete(TaskId(42)));
        assert!(store.find(id).is_some_and(Task::is_completed));
    }

    #[test]
    fn test_complete_logs_every_hit() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let log_path = temp.path().join("todo_log.txt");
        let mut store = TaskStore::new(ActionLog::to_file(&log_path));
        let id = store.add("Water plants", Urgency::Low);

        assert!(store.complete(id));
        assert!(store.complete(id));
        assert!(!store.complete(TaskId(5)));

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(
            content
                .matches("Completed task [ID: 1] \"Water plants\"")
                .count(),
            2
        );
        assert!(store.find(id).is_some_and(Task::is_completed));
        assert_eq!(store.counts().completed, 1);
        Ok(())
    }

    #[test]
    fn test_sort_urgency_then_age() {
        let mut store = TaskStore::default();
        let t0 = base_time();
        store.add_at("low", Urgency::Low, t0);
        store.add_at("high later", Urgency::High, t0 + Duration::minutes(5));
        store.add_at("critical", Urgency::Critical, t0 + Duration::minutes(1));
        store.add_at("high earlier", Urgency::High, t0 + Duration::minutes(2));
        store.add_at("medium", Urgency::Medium, t0 + Duration::minutes(3));

        assert_eq!(ids(&store.sorted_by_urgency()), vec![3, 4, 2, 5, 1]);
        // stored order unchanged
        let stored: Vec<u32> = store.all_tasks().iter().map(|t| t.id.number()).collect();
        assert_eq!(stored, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_is_stable_for_identical_timestamps() {
        let mut store = TaskStore::default();
        let t0 = base_time();
        store.add_at("first", Urgency::Medium, t0);
        store.add_at("second", Urgency::Medium, t0);
        store.add_at("third", Urgency::Medium, t0);

        assert_eq!(ids(&store.sorted_by_urgency()), vec![1, 2, 3]);
    }

    #[test]
    fn test_filters_preserve_insertion_order() {
        let mut store = TaskStore::default();
        store.add("a", Urgency::High);
        store.add("b", Urgency::Low);
        store.add("c", Urgency::High);
        store.add("d", Urgency::Low);
        store.complete(TaskId(2));
        store.complete(TaskId(3));

        assert_eq!(ids(&store.by_urgency(Urgency::High)), vec![1, 3]);
        assert_eq!(ids(&store.by_urgency(Urgency::Critical)), Vec::<u32>::new());
        assert_eq!(ids(&store.completed_tasks()), vec![2, 3]);
        assert_eq!(ids(&store.pending_tasks()), vec![1, 4]);
    }

    #[test]
    fn test_clear_completed() {
        let mut store = TaskStore::default();
        for i in 0..5 {
            store.add(format!("task {}", i), Urgency::Medium);
        }
        store.complete(TaskId(1));
        store.complete(TaskId(4));
        let pending_before = store.counts().pending;

        assert_eq!(store.clear_completed(), 2);
        assert_eq!(store.len(), pending_before);
        assert!(store.completed_tasks().is_empty());
        assert_eq!(store.clear_completed(), 0);
    }

    #[test]
    fn test_counts_and_breakdown() {
        let mut store = TaskStore::default();
        store.add("a", Urgency::Critical);
        store.add("b", Urgency::Low);
        store.add("c", Urgency::Low);
        store.complete(TaskId(1));

        assert_eq!(
            store.counts(),
            TaskCounts {
                total: 3,
                pending: 2,
                completed: 1
            }
        );
        let breakdown = store.pending_by_urgency();
        assert_eq!(breakdown.get(Urgency::Critical), 0);
        assert_eq!(breakdown.get(Urgency::Low), 2);
        assert_eq!(breakdown.high + breakdown.medium, 0);
    }

    #[test]
    fn test_action_log_entries() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let log_path = temp.path().join("todo_log.txt");
        {
            let mut store = TaskStore::new(ActionLog::to_file(&log_path));
            let id = store.add("Buy milk", Urgency::Medium);
            store.complete(id);
            store.complete(id);
            store.remove(TaskId(7));
            store.clear_completed();
            store.export_csv(&temp.path().join("out.csv"))?;
        }

        let content = fs::read_to_string(&log_path)?;
        let messages: Vec<&str> = content
            .lines()
            .filter_map(|l| l.split_once("] ").map(|(_, m)| m))
            .collect();
        assert_eq!(
            messages,
            vec![
                "Task store opened".to_string(),
                "Added task [ID: 1] \"Buy milk\" [MEDIUM]".to_string(),
                "Completed task [ID: 1] \"Buy milk\"".to_string(),
                "Completed task [ID: 1] \"Buy milk\"".to_string(),
                "Cleared 1 completed tasks".to_string(),
                format!(
                    "Exported tasks to CSV: {}",
                    temp.path().join("out.csv").display()
                ),
                "Task store closed".to_string(),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_failed_export_is_not_logged() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let log_path = temp.path().join("todo_log.txt");
        let store = TaskStore::new(ActionLog::to_file(&log_path));

        let result = store.export_json(&temp.path().join("missing").join("out.json"));
        assert!(result.is_err());

        let content = fs::read_to_string(&log_path)?;
        assert!(!content.contains("Exported"));
        Ok(())
    }
}
