//! Interactive menu session
//!
//! Reads choices from any `BufRead` and writes to any `Write`, so the whole loop can be
//! driven from a script. Bad input is re-prompted; end of input ends the session.

use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::task::{ExportFormat, Task, TaskId, TaskStore, Urgency};

use super::table;

enum Step {
    Continue,
    Quit,
}

pub struct MenuSession<R, W> {
    store: TaskStore,
    config: Config,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> MenuSession<R, W> {
    pub fn new(store: TaskStore, config: Config, input: R, out: W) -> Self {
        Self {
            store,
            config,
            input,
            out,
        }
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "=== Welcome to Interactive TODO App ===")?;
        if let Some(path) = self.store.action_log().path() {
            writeln!(self.out, "Your tasks will be logged to '{}'", path.display())?;
        }

        loop {
            self.show_main_menu()?;
            let Some(choice) = self.read_number()? else {
                break;
            };

            let step = match choice {
                1 => self.handle_add()?,
                2 => self.show_all()?,
                3 => self.show_sorted()?,
                4 => self.handle_complete()?,
                5 => self.handle_remove()?,
                6 => self.show_statistics()?,
                7 => self.handle_export()?,
                8 => self.handle_clear_completed()?,
                9 => self.handle_filter()?,
                0 => Step::Quit,
                _ => {
                    writeln!(self.out, "Invalid choice! Please select 0-9.")?;
                    Step::Continue
                }
            };

            if let Step::Quit = step {
                break;
            }

            self.prompt("\nPress Enter to continue...")?;
            if self.read_line()?.is_none() {
                break;
            }
        }

        writeln!(self.out, "Thank you for using TODO App! Goodbye!")?;
        self.out.flush()
    }

    fn show_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== TODO APP MENU ===")?;
        writeln!(self.out, "1. Add Task")?;
        writeln!(self.out, "2. View All Tasks")?;
        writeln!(self.out, "3. View Tasks Sorted by Urgency")?;
        writeln!(self.out, "4. Mark Task as Completed")?;
        writeln!(self.out, "5. Remove Task")?;
        writeln!(self.out, "6. View Statistics")?;
        writeln!(self.out, "7. Export Tasks")?;
        writeln!(self.out, "8. Clear Completed Tasks")?;
        writeln!(self.out, "9. Filter Tasks by Urgency")?;
        writeln!(self.out, "0. Exit")?;
        self.prompt("Enter your choice: ")
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// One line without its terminator, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_number(&mut self) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => self.prompt("Invalid input! Please enter a number: ")?,
            }
        }
    }

    fn read_urgency(&mut self) -> io::Result<Option<Urgency>> {
        loop {
            writeln!(self.out, "\nSelect urgency level:")?;
            writeln!(self.out, "1. Low")?;
            writeln!(self.out, "2. Medium")?;
            writeln!(self.out, "3. High")?;
            writeln!(self.out, "4. Critical")?;
            self.prompt("Enter urgency (1-4): ")?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match Urgency::parse_strict(&line) {
                Some(urgency) => return Ok(Some(urgency)),
                None => writeln!(
                    self.out,
                    "Invalid input! Please enter a number between 1-4."
                )?,
            }
        }
    }

    fn handle_add(&mut self) -> io::Result<Step> {
        self.prompt("Enter task description: ")?;
        let Some(description) = self.read_line()? else {
            return Ok(Step::Quit);
        };
        if description.trim().is_empty() {
            writeln!(self.out, "Task description cannot be empty!")?;
            return Ok(Step::Continue);
        }

        let Some(urgency) = self.read_urgency()? else {
            return Ok(Step::Quit);
        };
        let id = self.store.add(description, urgency);
        writeln!(self.out, "Task added successfully! ID: {}", id)?;
        Ok(Step::Continue)
    }

    fn show_all(&mut self) -> io::Result<Step> {
        let tasks: Vec<&Task> = self.store.all_tasks().iter().collect();
        table::write_task_table(
            &mut self.out,
            "ALL TASKS",
            &tasks,
            self.config.display.description_width,
        )?;
        Ok(Step::Continue)
    }

    fn show_sorted(&mut self) -> io::Result<Step> {
        let tasks = self.store.sorted_by_urgency();
        table::write_task_table(
            &mut self.out,
            "TASKS SORTED BY URGENCY",
            &tasks,
            self.config.display.description_width,
        )?;
        Ok(Step::Continue)
    }

    fn show_statistics(&mut self) -> io::Result<Step> {
        table::write_statistics(
            &mut self.out,
            self.store.counts(),
            self.store.pending_by_urgency(),
        )?;
        Ok(Step::Continue)
    }

    /// Show the task list and read an ID. `Ok(None)` means end of input.
    fn pick_task(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        self.show_all()?;
        self.prompt(prompt)?;
        self.read_number()
    }

    fn handle_complete(&mut self) -> io::Result<Step> {
        if self.store.is_empty() {
            writeln!(self.out, "No tasks available!")?;
            return Ok(Step::Continue);
        }

        let Some(raw) = self.pick_task("Enter task ID to mark as completed: ")? else {
            return Ok(Step::Quit);
        };
        let found = to_task_id(raw).is_some_and(|id| self.store.complete(id));
        if found {
            writeln!(self.out, "Task marked as completed!")?;
        } else {
            writeln!(self.out, "Task with ID {} not found!", raw)?;
        }
        Ok(Step::Continue)
    }

    fn handle_remove(&mut self) -> io::Result<Step> {
        if self.store.is_empty() {
            writeln!(self.out, "No tasks available!")?;
            return Ok(Step::Continue);
        }

        let Some(raw) = self.pick_task("Enter task ID to remove: ")? else {
            return Ok(Step::Quit);
        };
        let found = to_task_id(raw).is_some_and(|id| self.store.remove(id));
        if found {
            writeln!(self.out, "Task removed successfully!")?;
        } else {
            writeln!(self.out, "Task with ID {} not found!", raw)?;
        }
        Ok(Step::Continue)
    }

    fn handle_export(&mut self) -> io::Result<Step> {
        if self.store.is_empty() {
            writeln!(self.out, "No tasks to export!")?;
            return Ok(Step::Continue);
        }

        writeln!(self.out, "\nSelect export format:")?;
        writeln!(self.out, "1. Text file (.txt)")?;
        writeln!(self.out, "2. CSV file (.csv)")?;
        writeln!(self.out, "3. JSON file (.json)")?;
        self.prompt("Enter format (1-3): ")?;
        let Some(choice) = self.read_number()? else {
            return Ok(Step::Quit);
        };

        self.prompt("Enter filename (without extension): ")?;
        let Some(basename) = self.read_line()? else {
            return Ok(Step::Quit);
        };

        let Some(format) = ExportFormat::from_choice(choice) else {
            writeln!(self.out, "Invalid choice!")?;
            return Ok(Step::Continue);
        };

        let path = self.config.export.path_for(&basename, format.extension());
        match self.store.export(format, &path) {
            Ok(()) => {
                let target = match format {
                    ExportFormat::Text => path.display().to_string(),
                    _ => format!("{}: {}", format.log_name(), path.display()),
                };
                writeln!(self.out, "Tasks exported successfully to {}", target)?;
            }
            Err(e) => {
                writeln!(self.out, "Error: {}", e)?;
                writeln!(self.out, "Export failed!")?;
            }
        }
        Ok(Step::Continue)
    }

    fn handle_clear_completed(&mut self) -> io::Result<Step> {
        let removed = self.store.clear_completed();
        if removed > 0 {
            writeln!(self.out, "Cleared {} completed tasks.", removed)?;
        } else {
            writeln!(self.out, "No completed tasks to clear.")?;
        }
        Ok(Step::Continue)
    }

    fn handle_filter(&mut self) -> io::Result<Step> {
        if self.store.is_empty() {
            writeln!(self.out, "No tasks available!")?;
            return Ok(Step::Continue);
        }

        let Some(urgency) = self.read_urgency()? else {
            return Ok(Step::Quit);
        };
        let tasks = self.store.by_urgency(urgency);
        table::write_urgency_table(
            &mut self.out,
            urgency,
            &tasks,
            self.config.display.description_width,
        )?;
        Ok(Step::Continue)
    }
}

fn to_task_id(raw: i64) -> Option<TaskId> {
    u32::try_from(raw).ok().filter(|n| *n > 0).map(TaskId)
}
