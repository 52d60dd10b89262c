//! Data models for the test booter
//!
//! This module contains all data structures used throughout the application.

mod entry;
mod outcome;

pub use entry::{TestEntry, TestSuite};
pub use outcome::{EntryRecord, EntryStatus, RunSummary};
