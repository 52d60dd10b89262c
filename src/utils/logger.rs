//! Logging setup
//!
//! Picks the booter's log level and installs the tracing subscriber.
//! The `TESTBOOT_LOG` variable overrides the `--verbose` flag.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TESTBOOT_LOG";

/// Verbosity of the booter's own logging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level '{s}'")),
        }
    }
}

/// Level from `TESTBOOT_LOG`, falling back to the verbose flag
///
/// An unset or unparseable variable falls back silently; logging is not
/// up yet at this point, so there is nowhere to complain to.
pub fn level_from_env(verbose: bool) -> LogLevel {
    let fallback = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    match std::env::var(LOG_ENV_VAR) {
        Ok(value) => value.parse().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// Install the subscriber at the given level
pub fn init_logger(level: LogLevel) {
    let filter = EnvFilter::new(format!("testboot={}", level.as_tracing_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
