//! testboot - Sequential test booter
//!
//! A CLI tool that boots a fixed ordered list of external test binaries:
//! each entry is spawned as a child process and awaited before the next one
//! starts. Child exit statuses are collected but never stop the run.
//!
//! ## Usage
//!
//! ```bash
//! # Boot the built-in syscall-test suite from the current directory
//! testboot run
//!
//! # Boot the shell suite from a test image directory
//! testboot run --suite shell --dir /srv/tests
//!
//! # Boot a custom suite definition
//! testboot run --file suite.yaml
//!
//! # Show the entries of a suite
//! testboot list --suite syscalls --detailed
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod executor;
mod models;
mod utils;

use cli::Args;
use config::SuiteConfig;
use executor::SequentialRunner;
use models::TestSuite;
use utils::{init_logger, level_from_env};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(level_from_env(args.verbose));

    match args.command {
        cli::Command::Run(run_args) => {
            run_suite(run_args).await?;
        }
        cli::Command::List(list_args) => {
            list_suite(list_args)?;
        }
    }

    Ok(())
}

/// Execute the selected suite sequentially
async fn run_suite(args: cli::RunArgs) -> Result<()> {
    let suite = resolve_suite(&args.suite, args.file.as_deref())?;

    let mut runner = SequentialRunner::new(suite);
    if let Some(dir) = args.dir {
        runner = runner.with_work_dir(dir);
    }

    // Fatal only on process creation or wait failure; child outcomes do
    // not affect the exit code.
    runner.run_all().await?;

    Ok(())
}

/// Print the entries of the selected suite in execution order
fn list_suite(args: cli::ListArgs) -> Result<()> {
    let suite = resolve_suite(&args.suite, args.file.as_deref())?;

    println!("Suite: {}", suite);
    if suite.is_empty() {
        println!("  (no entries)");
        return Ok(());
    }
    for (i, entry) in suite.entries().iter().enumerate() {
        if args.detailed {
            println!("  {:>2}. {}", i + 1, entry);
        } else {
            println!("  {:>2}. {}", i + 1, entry.name);
        }
    }

    Ok(())
}

/// Resolve a suite from a file, a built-in name, or the user suite file
fn resolve_suite(suite: &str, file: Option<&str>) -> Result<TestSuite> {
    if let Some(path) = file {
        return Ok(SuiteConfig::load(path)?.into_suite());
    }

    if let Some(builtin) = TestSuite::builtin(suite) {
        return Ok(builtin);
    }

    // Not a built-in: the user suite file may define it.
    if let Some(path) = SuiteConfig::default_path().filter(|p| p.exists()) {
        let config = SuiteConfig::load(&path)?;
        if config.name == suite {
            return Ok(config.into_suite());
        }
    }

    anyhow::bail!(
        "Unknown suite '{}'. Built-in suites: {}",
        suite,
        TestSuite::builtin_names().join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin_suite() {
        let suite = resolve_suite("shell", None).unwrap();
        assert_eq!(suite.name, "shell");
    }

    #[test]
    fn test_resolve_unknown_suite_fails() {
        let err = resolve_suite("no-such-suite", None).unwrap_err();
        assert!(err.to_string().contains("Built-in suites"));
    }

    #[test]
    fn test_resolve_suite_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        SuiteConfig::from(TestSuite::shell()).save(&path).unwrap();

        let suite = resolve_suite("ignored", Some(path.to_str().unwrap())).unwrap();
        assert_eq!(suite.name, "shell");
        assert_eq!(suite.len(), 1);
    }
}
