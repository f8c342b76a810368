//! Path management
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGER_DATA_DIR` environment variable (if set)
//! 2. The platform data directory from `directories::ProjectDirs`
//!    (e.g. `~/.local/share/monthly-ledger` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "LEDGER_DATA_DIR";

/// Locates the settings and ledger files
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no platform data directory can be determined and
    /// the override variable is unset.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the ledger snapshot
    pub fn ledger_file(&self) -> PathBuf {
        self.base_dir.join("ledger.json")
    }

    /// Create the base directory if it is missing
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// Whether settings have been written before
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    ProjectDirs::from("org", "monthly-ledger", "monthly-ledger")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| LedgerError::Config("Could not determine platform data directory".into()))
}
