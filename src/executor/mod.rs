//! Test execution engine
//!
//! Provides strictly sequential execution of a test suite.

mod runner;

pub use runner::{BootError, SequentialRunner};
