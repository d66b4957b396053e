//! Task management module
//!
//! - Task model with urgency tiers
//! - In-memory store with sequential IDs and an action log
//! - Plain text, CSV and JSON export

pub mod error;
pub mod export;
pub mod model;
pub mod store;

pub use error::TaskError;
pub use export::{ExportFormat, FieldQuoting};
pub use model::{format_timestamp, Task, TaskId, Urgency};
pub use store::{TaskCounts, TaskStore, UrgencyBreakdown};
