//! Transaction display formatting
//!
//! Renders a derived month view: a header with the month totals, then one
//! block per day with that day's sub-totals and its records.

use std::fmt::Write;

use chrono::NaiveDate;

use super::truncate;
use crate::models::{TransactionRecord, TransactionType};
use crate::services::{LedgerView, Totals};

/// Format one record as a list row
pub fn format_transaction_row(record: &TransactionRecord) -> String {
    let sign = match record.kind {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    let note = if record.note.is_empty() {
        String::new()
    } else {
        format!("  ({})", record.note)
    };

    format!(
        "  {:13} {} {:14} {:20} {:>12} {}{}",
        record.id.short(),
        sign,
        truncate(&record.category, 14),
        truncate(&record.title, 20),
        record.amount,
        record.currency,
        note
    )
}

/// "Total Income: x | Total Expense: y"
pub fn format_totals(totals: &Totals) -> String {
    format!(
        "Total Income: {} | Total Expense: {}",
        totals.income, totals.expense
    )
}

/// Date format used when the configured one cannot render a date
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render `date` with `date_format`, or ISO form if the format is unusable
/// for a date (unknown specifiers, time fields)
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut output = String::new();
    match write!(output, "{}", date.format(date_format)) {
        Ok(()) => output,
        Err(_) => date.format(FALLBACK_DATE_FORMAT).to_string(),
    }
}

/// Header line for one day block
pub fn format_day_header(date: NaiveDate, totals: &Totals, date_format: &str) -> String {
    format!("{} - {}", format_date(date, date_format), format_totals(totals))
}

/// Format a whole month view
pub fn format_ledger_view(view: &LedgerView, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", view.month.label()));
    output.push_str(&format!("{}\n", format_totals(&view.totals)));
    output.push_str(&format!("Net: {}\n", view.totals.net()));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    if view.is_empty() {
        output.push_str("No transactions found.\n");
        return output;
    }

    for group in &view.groups {
        output.push_str(&format_day_header(group.date, &group.totals, date_format));
        output.push('\n');
        for record in &group.records {
            output.push_str(&format_transaction_row(record));
            output.push('\n');
        }
    }

    output
}

/// Format record details for display
pub fn format_transaction_details(record: &TransactionRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", record.id));
    output.push_str(&format!("Type:        {}\n", record.kind));
    output.push_str(&format!("Date:        {}\n", record.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {} {}\n", record.amount, record.currency));
    output.push_str(&format!("Category:    {}\n", record.category));
    output.push_str(&format!("Title:       {}\n", record.title));

    if !record.note.is_empty() {
        output.push_str(&format!("Note:        {}\n", record.note));
    }

    if !record.amount.is_positive() {
        output.push_str("             (not counted in totals)\n");
    }

    output
}
