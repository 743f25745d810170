//! Snapshot history for rewind.
//!
//! This crate provides in-memory state history that enables:
//! - Undo/redo over a linear list of immutable snapshots
//! - Discarding the redo branch when a new state is saved after an undo
//! - Optional retention limits
//! - A plain last-in first-out stack for restore-only use
//!
//! # Example
//!
//! ```
//! use rewind_history::{HistoryManager, Originator};
//!
//! #[derive(Default)]
//! struct Counter {
//!     value: u32,
//! }
//!
//! impl Originator for Counter {
//!     type Snapshot = u32;
//!
//!     fn snapshot(&self) -> u32 {
//!         self.value
//!     }
//!
//!     fn restore(&mut self, snapshot: &u32) {
//!         self.value = *snapshot;
//!     }
//! }
//!
//! let mut counter = Counter::default();
//! let mut history = HistoryManager::new();
//! history.checkpoint(&counter);
//!
//! counter.value = 5;
//! history.checkpoint(&counter);
//!
//! assert!(history.undo_into(&mut counter));
//! assert_eq!(counter.value, 0);
//! ```

mod config;
mod error;
mod history;
mod stack;
mod subject;

pub use config::{HistoryConfig, CONFIG_CONTENT_ENV};
pub use error::{ConfigError, HistoryError, HistoryResult};
pub use history::{HistoryEntry, HistoryManager};
pub use stack::SnapshotStack;
pub use subject::Originator;
