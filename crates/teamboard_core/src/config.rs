//! Runtime configuration for opening a workspace.
//!
//! # Invariants
//! - `db_path = None` selects a private in-memory database.
//! - Logging stays disabled unless `log_dir` is set.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, LoggingError};
use rusqlite::Connection;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// SQLite file holding the store slots.
    pub db_path: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
    /// Start never-written stores from demo data instead of empty.
    pub seed_mock_data: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            seed_mock_data: true,
        }
    }
}

impl WorkspaceConfig {
    /// Starts file logging when a directory is configured.
    ///
    /// Returns whether logging is active after the call.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        init_logging(&self.log_level, &log_dir.to_string_lossy())?;
        Ok(true)
    }

    /// Opens and migrates the configured database.
    pub fn open_connection(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WorkspaceConfig;

    #[test]
    fn default_config_is_in_memory_without_logging() {
        let config = WorkspaceConfig::default();
        assert!(config.db_path.is_none());
        assert!(config.seed_mock_data);
        assert!(!config.init_logging().unwrap());
        assert!(config.open_connection().is_ok());
    }
}
