//! Shared utilities for rewind.
//!
//! Currently this is the logging setup shared by the CLI and tests.

pub mod log;

pub use log::LogConfig;
