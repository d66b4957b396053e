//! Scripted runs of the interactive menu

use std::fs;
use std::io::Cursor;

use todo_tracker::action_log::ActionLog;
use todo_tracker::cli::MenuSession;
use todo_tracker::config::Config;
use todo_tracker::task::{TaskStore, Urgency};

fn config_in(dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.export.directory = dir.to_path_buf();
    config
}

fn run(script: &str, store: TaskStore, config: Config) -> (String, TaskStore) {
    let mut out = Vec::new();
    let mut session = MenuSession::new(store, config, Cursor::new(script.to_string()), &mut out);
    session.run().expect("session should not fail on in-memory I/O");
    let store = session.into_store();
    (String::from_utf8(out).expect("utf-8 output"), store)
}

#[test]
fn test_add_sort_and_export_csv() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let script = "\
1\nBuy milk\n1\n\n\
1\nPay rent\n4\n\n\
1\nCall plumber\n3\n\n\
3\n\n\
7\n2\nweekly\n\n\
0\n";

    let (out, store) = run(script, TaskStore::default(), config_in(temp.path()));

    let sorted_at = out.find("=== TASKS SORTED BY URGENCY ===").expect("sorted view");
    let sorted = &out[sorted_at..];
    let rent = sorted.find("Pay rent").expect("rent row");
    let plumber = sorted.find("Call plumber").expect("plumber row");
    let milk = sorted.find("Buy milk").expect("milk row");
    assert!(rent < plumber && plumber < milk);

    let csv_path = temp.path().join("weekly.csv");
    assert!(out.contains(&format!(
        "Tasks exported successfully to CSV: {}",
        csv_path.display()
    )));
    let csv = fs::read_to_string(&csv_path)?;
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains(",\"Pay rent\",CRITICAL,"));
    assert_eq!(store.len(), 3);
    Ok(())
}

#[test]
fn test_export_uses_default_basename() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let script = "1\nStretch\n2\n\n7\n3\n\n\n0\n";

    run(script, TaskStore::default(), config_in(temp.path()));

    let json = fs::read_to_string(temp.path().join("todo_export.json"))?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["tasks"][0]["urgency"], "MEDIUM");
    Ok(())
}

#[test]
fn test_export_failure_is_reported() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let missing = temp.path().join("gone");
    let script = "1\nStretch\n2\n\n7\n1\nout\n\n0\n";

    let (out, _) = run(script, TaskStore::default(), config_in(&missing));

    assert!(out.contains("Export failed!"));
    assert!(out.ends_with("Goodbye!\n"));
    Ok(())
}

#[test]
fn test_session_writes_action_log() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let log_path = temp.path().join("todo_log.txt");
    let store = TaskStore::new(ActionLog::to_file(&log_path));
    let script = "1\nRead book\nlow\n\n4\n1\n\n8\n\n0\n";

    let (out, store) = run(script, store, config_in(temp.path()));
    assert!(out.contains(&format!(
        "Your tasks will be logged to '{}'",
        log_path.display()
    )));
    assert!(store.is_empty());
    drop(store);

    let log = fs::read_to_string(&log_path)?;
    assert!(log.contains("Added task [ID: 1] \"Read book\" [LOW]"));
    assert!(log.contains("Completed task [ID: 1] \"Read book\""));
    assert!(log.contains("Cleared 1 completed tasks"));
    assert!(log.trim_end().ends_with("Task store closed"));
    Ok(())
}

#[test]
fn test_prepopulated_store_statistics() {
    let mut store = TaskStore::default();
    store.add("a", Urgency::Critical);
    store.add("b", Urgency::Critical);
    store.add("c", Urgency::Medium);

    let (out, _) = run("6\n\n0\n", store, Config::default());

    assert!(out.contains("Total Tasks: 3"));
    assert!(out.contains("  Critical: 2"));
    assert!(out.contains("  Medium: 1"));
}

#[test]
fn test_truncated_input_mid_prompt_ends_cleanly() {
    // input stops while the urgency prompt is waiting
    let (out, store) = run("1\nUnfinished\n", TaskStore::default(), Config::default());
    assert!(store.is_empty());
    assert!(out.ends_with("Goodbye!\n"));
}
