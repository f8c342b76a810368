//! CLI command handlers
//!
//! Bridges clap argument parsing with the store and the view pipeline.
//! Handlers print their results and report failures as `LedgerError`.

pub mod category;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Month};

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(value: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", value))
    })
}

/// Parse an amount argument such as "-50.00" or "1000"
pub(crate) fn parse_amount(value: &str) -> LedgerResult<Money> {
    Money::parse(value).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '-50.00' or '100'. Error: {}",
            value, e
        ))
    })
}

/// Parse a `YYYY-MM` month argument
pub(crate) fn parse_month(value: &str) -> LedgerResult<Month> {
    Month::parse(value).map_err(|e| LedgerError::Validation(format!("Invalid month: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            parse_date("2024-03-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert!(parse_date("05/03/2024").unwrap_err().is_validation());

        assert_eq!(parse_amount("-5").unwrap(), Money::from_units(-5));
        assert!(parse_amount("five").unwrap_err().is_validation());

        assert_eq!(parse_month("2024-03").unwrap(), Month::new(2024, 3).unwrap());
        assert!(parse_month("2024-13").unwrap_err().is_validation());
    }
}
