//! Sequential test execution
//!
//! Boots each entry of a suite in order: spawn the child, wait for it,
//! record the status, move on.

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

use crate::models::{EntryRecord, EntryStatus, RunSummary, TestEntry, TestSuite};

/// Fatal runner errors
///
/// A child's own failure is never fatal; only the inability to create or
/// wait on a process aborts the run.
#[derive(Error, Debug)]
pub enum BootError {
    /// Process creation failed for a reason other than a bad executable image
    #[error("Failed to create a process for '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Waiting on a spawned child failed
    #[error("Failed to wait for '{name}': {source}")]
    Wait {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Test hook: fails process creation for chosen entries
#[cfg(test)]
type SpawnHook = fn(&TestEntry) -> io::Result<()>;

/// Runs a suite's entries strictly one at a time
pub struct SequentialRunner {
    suite: TestSuite,
    work_dir: Option<PathBuf>,
    #[cfg(test)]
    spawn_hook: Option<SpawnHook>,
}

impl SequentialRunner {
    /// Create a runner for the given suite
    pub fn new(suite: TestSuite) -> Self {
        Self {
            suite,
            work_dir: None,
            #[cfg(test)]
            spawn_hook: None,
        }
    }

    #[cfg(test)]
    fn with_spawn_hook(mut self, hook: SpawnHook) -> Self {
        self.spawn_hook = Some(hook);
        self
    }

    /// Set the working directory children are spawned in
    ///
    /// Entries with relative names are resolved against this directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Run every entry in list order
    ///
    /// At most one child is outstanding at any time: the next entry is not
    /// spawned until the previous child has terminated. Child exit statuses
    /// are collected into the summary but never alter control flow.
    pub async fn run_all(&self) -> Result<RunSummary, BootError> {
        let started_at = Utc::now();
        let start = Instant::now();

        info!("Booting suite {}", self.suite);

        let mut records = Vec::with_capacity(self.suite.len());
        for entry in self.suite.entries() {
            info!("Running {}", entry);
            let record = self.run_entry(entry).await?;
            info!("  {}", record);
            records.push(record);
        }

        let summary = RunSummary::new(self.suite.name.as_str(), started_at, records);

        info!(
            "Suite {} completed in {}ms - spawned {}/{}",
            summary.suite,
            start.elapsed().as_millis(),
            summary.spawned(),
            summary.total
        );

        Ok(summary)
    }

    /// Spawn one entry's child and wait for it to terminate
    async fn run_entry(&self, entry: &TestEntry) -> Result<EntryRecord, BootError> {
        let start = Instant::now();

        let mut command = Command::new(&entry.name);
        command.args(&entry.args);
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        // Stdio is inherited; the booter captures nothing.
        let mut child = match self.try_spawn(entry, &mut command) {
            Ok(child) => child,
            Err(e) if is_creation_failure(&e) => {
                return Err(BootError::Spawn {
                    name: entry.name.clone(),
                    source: e,
                })
            }
            Err(e) => {
                // The image could not be loaded. The child would exit with
                // an exec error the parent never inspects; record it and
                // keep going.
                warn!("{}: exec failed: {}", entry, e);
                return Ok(EntryRecord::new(
                    entry.clone(),
                    EntryStatus::ExecFailed,
                    start.elapsed().as_millis() as u64,
                ));
            }
        };

        let status = child.wait().await.map_err(|e| BootError::Wait {
            name: entry.name.clone(),
            source: e,
        })?;

        let status = match status.code() {
            Some(code) => EntryStatus::Exited(code),
            None => EntryStatus::Signaled,
        };

        Ok(EntryRecord::new(
            entry.clone(),
            status,
            start.elapsed().as_millis() as u64,
        ))
    }

    #[cfg_attr(not(test), allow(unused_variables))]
    fn try_spawn(
        &self,
        entry: &TestEntry,
        command: &mut Command,
    ) -> io::Result<tokio::process::Child> {
        #[cfg(test)]
        if let Some(hook) = self.spawn_hook {
            hook(entry)?;
        }
        command.spawn()
    }
}

/// Spawn errors that are genuine process-creation failures
///
/// Only resource exhaustion at creation time (EAGAIN, ENOMEM) aborts the
/// run. Every other spawn error is the child's exec failing to load the
/// image: missing binary, file as a path component, wrong executable
/// format, oversized argument list. Those children never ran a test; the
/// booter records them and keeps going.
fn is_creation_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_creation_failure_classification() {
        assert!(is_creation_failure(&io::Error::from(
            io::ErrorKind::WouldBlock
        )));
        assert!(is_creation_failure(&io::Error::from(
            io::ErrorKind::OutOfMemory
        )));
        assert!(!is_creation_failure(&io::Error::from(
            io::ErrorKind::NotFound
        )));
        assert!(!is_creation_failure(&io::Error::from(
            io::ErrorKind::PermissionDenied
        )));
    }

    #[tokio::test]
    async fn test_bad_path_component_is_recorded_not_fatal() {
        // A regular file used as a directory makes exec fail with ENOTDIR,
        // which is neither NotFound nor PermissionDenied. The run must
        // still reach the following entry.
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        fs::write(&plain, "not a directory").unwrap();

        let bogus = plain.join("child");
        let suite = TestSuite::new(
            "enotdir",
            vec![
                TestEntry::new(bogus.to_str().unwrap()),
                TestEntry::new("true"),
            ],
        );

        let summary = SequentialRunner::new(suite).run_all().await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.records[0].status, EntryStatus::ExecFailed);
        assert_eq!(summary.records[1].status, EntryStatus::Exited(0));
    }

    #[tokio::test]
    async fn test_creation_failure_aborts_run() {
        // The entry after the fatal one would leave a marker file; a
        // process-creation failure must stop the run before it can.
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran.txt");
        let later = dir.path().join("later");
        fs::write(
            &later,
            format!("#!/bin/sh\ntouch \"{}\"\n", marker.display()),
        )
        .unwrap();
        fs::set_permissions(&later, fs::Permissions::from_mode(0o755)).unwrap();

        let suite = TestSuite::new(
            "abort",
            vec![
                TestEntry::new("fatal"),
                TestEntry::new(later.to_str().unwrap()),
            ],
        );
        let runner = SequentialRunner::new(suite).with_spawn_hook(|entry| {
            if entry.name == "fatal" {
                Err(io::Error::from(io::ErrorKind::WouldBlock))
            } else {
                Ok(())
            }
        });

        let err = runner.run_all().await.unwrap_err();
        assert!(matches!(err, BootError::Spawn { .. }));
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_missing_binary_is_recorded_not_fatal() {
        let suite = TestSuite::new(
            "missing",
            vec![TestEntry::new("./definitely-not-a-real-binary")],
        );
        let summary = SequentialRunner::new(suite).run_all().await.unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.records[0].status, EntryStatus::ExecFailed);
        assert_eq!(summary.spawned(), 0);
    }

    #[tokio::test]
    async fn test_exit_status_collected() {
        let suite = TestSuite::new(
            "truth",
            vec![TestEntry::new("true"), TestEntry::new("false")],
        );
        let summary = SequentialRunner::new(suite).run_all().await.unwrap();
        assert_eq!(summary.records[0].status, EntryStatus::Exited(0));
        assert_eq!(summary.records[1].status, EntryStatus::Exited(1));
        assert_eq!(summary.spawned(), 2);
    }
}
