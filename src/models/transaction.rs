//! Transaction record model
//!
//! A record is one income or expense entry. Its `kind` and the sign of its
//! amount are independent fields: a record only counts toward a type's totals
//! when the kind matches and the amount is strictly positive (sign-gating).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::ids::TransactionId;
use super::money::Money;
use crate::error::LedgerError;

/// Whether a record is income or an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(LedgerError::Validation(format!(
                "Unknown transaction type '{}'. Use 'income' or 'expense'",
                s
            ))),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier, immutable after creation
    pub id: TransactionId,

    /// Calendar date of the event
    pub date: NaiveDate,

    /// Signed amount, stored as provided
    pub amount: Money,

    /// Predefined or user-added category name
    pub category: String,

    pub currency: Currency,

    pub title: String,

    #[serde(default)]
    pub note: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl TransactionRecord {
    /// Create a record with an empty note
    pub fn new(
        id: TransactionId,
        kind: TransactionType,
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        currency: Currency,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            amount,
            category: category.into(),
            currency,
            title: title.into(),
            note: String::new(),
            kind,
        }
    }

    /// Set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Check whether the record counts toward the totals of `kind`
    pub fn contributes_to(&self, kind: TransactionType) -> bool {
        self.kind == kind && self.amount.is_positive()
    }

    /// Amount counted as income, zero unless sign-gated in
    pub fn income_contribution(&self) -> Money {
        if self.contributes_to(TransactionType::Income) {
            self.amount
        } else {
            Money::zero()
        }
    }

    /// Amount counted as expense, zero unless sign-gated in
    pub fn expense_contribution(&self) -> Money {
        if self.contributes_to(TransactionType::Expense) {
            self.amount
        } else {
            Money::zero()
        }
    }

    /// Validate the fields an entry form requires
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.title.trim().is_empty() {
            return Err(LedgerError::Validation("Title cannot be empty".into()));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::Validation("Category cannot be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount,
            self.currency
        )
    }
}

/// Partial field set merged into an existing record by an edit
///
/// The id is deliberately absent: identifiers never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Check if the patch carries no fields
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge the supplied fields into `record`, leaving the rest untouched
    pub fn apply_to(&self, record: &mut TransactionRecord) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(category) = &self.category {
            record.category = category.clone();
        }
        if let Some(currency) = self.currency {
            record.currency = currency;
        }
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(note) = &self.note {
            record.note = note.clone();
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
    }
}
