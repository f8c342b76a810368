//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; printing is left to the caller.

pub mod category;
pub mod transaction;

pub use category::format_category_list;
pub use transaction::{
    format_date, format_day_header, format_ledger_view, format_totals,
    format_transaction_details, format_transaction_row,
};

/// Pad or truncate to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
