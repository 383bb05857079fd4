//! Configuration for OneTable
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{OneTableError, Result};

/// Main configuration for a OneTable instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory holding the two logs
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── data.ot          (append-only value bytes)
    ///     └── index.ot         (append-only `key,offset,length` records)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: how often to fsync the logs
    pub sync_strategy: SyncStrategy,
}

/// Log sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync the data log before its index record, and the index log after it
    EveryWrite,

    /// fsync both logs after N appended records
    EveryNEntries { count: usize },

    /// Never fsync explicitly, leave flushing to the OS page cache
    OsBuffered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./onetable_data"),
            sync_strategy: SyncStrategy::EveryNEntries { count: 100 },
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration can be used to open an engine
    pub fn validate(&self) -> Result<()> {
        if let SyncStrategy::EveryNEntries { count: 0 } = self.sync_strategy {
            return Err(OneTableError::Config(
                "sync interval must be at least one entry".to_string(),
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(OneTableError::Config("data directory is empty".to_string()));
        }

        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(OneTableError::Config(format!(
                "{} is not a directory",
                self.data_dir.display()
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for both logs)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the log sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
