//! SQLite storage layer.
//!
//! - [`history`] - generic trigger-driven undo/redo engine
//! - [`schema`] - domain DDL and trigger installation
//! - [`migrations`] - embedded schema migrations
//! - [`sqlite`] - the [`DrillFile`](sqlite::DrillFile) connection wrapper

pub mod history;
pub mod migrations;
pub mod schema;
pub mod sqlite;

pub use history::{HistoryResponse, HistoryStats};
pub use sqlite::DrillFile;
