//! Test entries and suites
//!
//! Defines the ordered list of external test binaries the booter runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Syscall-test binaries in their boot order.
const SYSCALL_TESTS: &[&str] = &[
    "brk",
    "chdir",
    "clone",
    "close",
    "dup",
    "dup2",
    "execve",
    "exit",
    "fork",
    "fstat",
    "getcwd",
    "getdents",
    "getpid",
    "getppid",
    "gettimeofday",
    "mkdir_",
    "mmap",
    "mount",
    "munmap",
    "open",
    "openat",
    "pipe",
    "read",
    "sleep",
    "test_echo",
    "times",
    "umount",
    "uname",
    "unlink",
    "wait",
    "waitpid",
    "write",
    "yield",
];

/// A single test entry: an executable name plus fixed arguments
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestEntry {
    /// Executable name, resolved relative to the runner's working directory
    pub name: String,

    /// Arguments passed after the program name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl TestEntry {
    /// Create an entry with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create an entry with arguments
    pub fn with_args<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// An immutable ordered sequence of test entries
///
/// Construction fixes the list; execution order is list order and no entry
/// is added, changed, or removed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    entries: Vec<TestEntry>,
}

impl TestSuite {
    /// Create a suite from an ordered entry list
    pub fn new(name: impl Into<String>, entries: Vec<TestEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// The built-in syscall-test suite (33 binaries, fixed order)
    pub fn syscalls() -> Self {
        Self::new(
            "syscalls",
            SYSCALL_TESTS.iter().copied().map(TestEntry::new).collect(),
        )
    }

    /// The built-in shell suite: boots `./busybox sh` once
    pub fn shell() -> Self {
        Self::new("shell", vec![TestEntry::with_args("./busybox", ["sh"])])
    }

    /// Look up a built-in suite by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "syscalls" => Some(Self::syscalls()),
            "shell" => Some(Self::shell()),
            _ => None,
        }
    }

    /// Names of the built-in suites
    pub fn builtin_names() -> &'static [&'static str] {
        &["syscalls", "shell"]
    }

    /// Entries in execution order
    pub fn entries(&self) -> &[TestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for TestSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} entries)", self.name, self.entries.len())
    }
}
