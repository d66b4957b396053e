//! todo-tracker library - task store, exports and the interactive menu

pub mod action_log;
pub mod cli;
pub mod config;
pub mod task;
