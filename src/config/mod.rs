//! Configuration module
//!
//! Handles loading suite definitions from files.

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{TestEntry, TestSuite};

/// A suite definition as stored on disk
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Suite name
    pub name: String,

    /// Entries in execution order
    pub entries: Vec<TestEntry>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::from(TestSuite::syscalls())
    }
}

impl SuiteConfig {
    /// Load a suite from file
    ///
    /// YAML for `.yaml`/`.yml` extensions, JSON otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read suite file")?;

        let config: Self = if is_yaml(path.as_ref()) {
            serde_yaml::from_str(&content).context("Failed to parse YAML suite")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON suite")?
        };

        Ok(config)
    }

    /// Save a suite to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = if is_yaml(path.as_ref()) {
            serde_yaml::to_string(self).context("Failed to serialize suite")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize suite")?
        };

        std::fs::write(path, content).context("Failed to write suite file")?;
        Ok(())
    }

    /// Default suite file location in the user config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("testboot").join("suite.yaml"))
    }

    /// Turn the on-disk form into the immutable runtime suite
    pub fn into_suite(self) -> TestSuite {
        TestSuite::new(self.name, self.entries)
    }
}

impl From<TestSuite> for SuiteConfig {
    fn from(suite: TestSuite) -> Self {
        Self {
            entries: suite.entries().to_vec(),
            name: suite.name,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SuiteConfig::default();
        assert_eq!(config.name, "syscalls");
        assert_eq!(config.entries.len(), 33);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.json");

        let config = SuiteConfig::from(TestSuite::shell());
        config.save(&path).unwrap();

        let loaded = SuiteConfig::load(&path).unwrap();
        assert_eq!(loaded.name, "shell");
        assert_eq!(loaded.entries, config.entries);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.yaml");

        let config = SuiteConfig::default();
        config.save(&path).unwrap();

        let loaded = SuiteConfig::load(&path).unwrap();
        assert_eq!(loaded.entries.len(), 33);
        assert_eq!(loaded.into_suite().entries()[0].name, "brk");
    }
}
