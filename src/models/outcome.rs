//! Collected child outcomes
//!
//! The booter collects each child's exit status but never branches on it;
//! these types exist for logging and for tests that observe a run.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::models::TestEntry;

/// How an entry's child process ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    /// Child ran and exited with the given code
    Exited(i32),
    /// Child was terminated by a signal before exiting
    Signaled,
    /// The executable image could not be loaded; no test ran
    ExecFailed,
}

impl EntryStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            EntryStatus::Exited(0) => "✓",
            EntryStatus::Exited(_) => "✗",
            EntryStatus::Signaled => "✗",
            EntryStatus::ExecFailed => "!",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Exited(code) => write!(f, "exited({code})"),
            EntryStatus::Signaled => write!(f, "signaled"),
            EntryStatus::ExecFailed => write!(f, "exec failed"),
        }
    }
}

/// One entry's collected outcome
#[derive(Clone, Debug)]
pub struct EntryRecord {
    pub entry: TestEntry,
    pub status: EntryStatus,
    pub duration_ms: u64,
}

impl EntryRecord {
    pub fn new(entry: TestEntry, status: EntryStatus, duration_ms: u64) -> Self {
        Self {
            entry,
            status,
            duration_ms,
        }
    }
}

impl fmt::Display for EntryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms] - {}",
            self.status.symbol(),
            self.entry,
            self.duration_ms,
            self.status
        )
    }
}

/// Summary of a completed run
///
/// In-memory only; the booter never persists or exports results.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub suite: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub records: Vec<EntryRecord>,
}

impl RunSummary {
    pub fn new(
        suite: impl Into<String>,
        started_at: DateTime<Utc>,
        records: Vec<EntryRecord>,
    ) -> Self {
        Self {
            suite: suite.into(),
            started_at,
            total: records.len(),
            records,
        }
    }

    /// Number of children actually spawned (exec failures never produce one)
    pub fn spawned(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status != EntryStatus::ExecFailed)
            .count()
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.records.iter().map(|r| r.duration_ms).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Suite {} - {} entries", self.suite, self.total)?;
        for record in &self.records {
            writeln!(f, "  {record}")?;
        }
        write!(
            f,
            "Spawned: {}/{} | Elapsed: {}ms",
            self.spawned(),
            self.total,
            self.total_duration_ms()
        )
    }
}
