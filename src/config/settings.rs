//! User settings
//!
//! Preferences applied when the command line leaves a value unspecified.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::Currency;
use crate::storage::write_json_atomic;

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency used by `add` when none is given
    #[serde(default)]
    pub default_currency: Currency,

    /// Date format for rendered views (strftime format, date fields only)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: Currency::default(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            debug!(path = %settings_path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Check values that cannot be expressed in the type
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_date_format(&self.date_format)
    }
}

/// A date format must parse and must render a date without time fields
pub fn check_date_format(format: &str) -> Result<(), LedgerError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LedgerError::Config(format!(
            "Invalid date format '{}': unknown specifier",
            format
        )));
    }

    let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
        .ok_or_else(|| LedgerError::Config("Failed to build sample date".into()))?;
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).map_err(|_| {
        LedgerError::Config(format!(
            "Invalid date format '{}': only date fields are allowed",
            format
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_currency, Currency::Usd);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_currency: Currency::Inr,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        assert_eq!(Settings::load_or_create(&paths).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_date_format_checked_on_load_and_save() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        for bad in ["%H:%M", "%Q"] {
            let settings = Settings {
                date_format: bad.to_string(),
                ..Settings::default()
            };
            assert!(matches!(settings.save(&paths), Err(LedgerError::Config(_))));

            std::fs::write(
                paths.settings_file(),
                format!(r#"{{"date_format": "{}"}}"#, bad),
            )
            .unwrap();
            let err = Settings::load_or_create(&paths).unwrap_err();
            assert!(matches!(err, LedgerError::Config(_)));
        }

        assert!(check_date_format("%d/%m/%Y").is_ok());
        assert!(check_date_format("%B %e, %Y").is_ok());
    }

    #[test]
    fn test_save_is_atomic_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().join("fresh"));

        Settings::default().save(&paths).unwrap();

        assert!(paths.settings_file().exists());
        assert!(!paths.settings_file().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ nope").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }
}
