//! Configuration module
//!
//! Path resolution for the data directory and persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{check_date_format, Settings};
