//! Path management for course-cashflow
//!
//! ## Path Resolution Order
//!
//! 1. `CASHFLOW_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/course-cashflow` on Linux)

use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::CashflowError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV_VAR: &str = "CASHFLOW_CONFIG_DIR";

/// Manages all paths used by course-cashflow
#[derive(Debug, Clone)]
pub struct CashflowPaths {
    base_dir: PathBuf,
}

impl CashflowPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CashflowError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV_VAR) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "course-cashflow")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CashflowError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the configuration directory
    pub fn config_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), CashflowError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            CashflowError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check whether a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
