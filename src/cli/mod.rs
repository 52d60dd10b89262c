//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Sequential test booter for external test binaries
#[derive(Parser, Debug)]
#[command(name = "testboot")]
#[command(version = "0.1.0")]
#[command(about = "Boot a fixed list of test binaries, one at a time")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a test suite
    Run(RunArgs),

    /// List the entries of a suite
    List(ListArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Built-in suite to run (syscalls, shell)
    #[arg(short, long, default_value = "syscalls")]
    pub suite: String,

    /// Load the suite from a JSON or YAML file instead
    #[arg(short, long)]
    pub file: Option<String>,

    /// Working directory the test binaries are resolved in
    #[arg(short, long)]
    pub dir: Option<String>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Built-in suite to list (syscalls, shell)
    #[arg(short, long, default_value = "syscalls")]
    pub suite: String,

    /// Load the suite from a JSON or YAML file instead
    #[arg(short, long)]
    pub file: Option<String>,

    /// Show entry arguments as well
    #[arg(short, long)]
    pub detailed: bool,
}
