//! Category taxonomy
//!
//! Every transaction type has one canonical list of predefined categories.
//! Users can extend a type's list with their own custom categories; records
//! still store the category as a plain string.

use serde::{Deserialize, Serialize};

use super::transaction::TransactionType;

/// Predefined income categories, in menu order
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Investment", "Bonus", "Other"];

/// Predefined expense categories, in menu order
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Travel",
    "Shopping",
    "Rent",
    "Utilities",
    "Entertainment",
];

/// The predefined categories for a transaction type
pub fn predefined_categories(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// User-added categories, kept per transaction type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    #[serde(default)]
    income: Vec<String>,
    #[serde(default)]
    expense: Vec<String>,
}

impl CategoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom category for `kind`
    ///
    /// Returns `false` when the trimmed name is empty or already offered for
    /// that type (predefined or custom). Comparison is case-sensitive.
    pub fn add_custom(&mut self, kind: TransactionType, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(kind, name) {
            return false;
        }
        self.custom_mut(kind).push(name.to_string());
        true
    }

    /// Custom categories for `kind`, in insertion order
    pub fn custom(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    /// Predefined followed by custom categories for `kind`
    pub fn categories_for(&self, kind: TransactionType) -> Vec<String> {
        predefined_categories(kind)
            .iter()
            .map(|c| c.to_string())
            .chain(self.custom(kind).iter().cloned())
            .collect()
    }

    /// Check whether `name` is offered for `kind`
    pub fn contains(&self, kind: TransactionType, name: &str) -> bool {
        predefined_categories(kind).contains(&name) || self.custom(kind).iter().any(|c| c == name)
    }

    fn custom_mut(&mut self, kind: TransactionType) -> &mut Vec<String> {
        match kind {
            TransactionType::Income => &mut self.income,
            TransactionType::Expense => &mut self.expense,
        }
    }
}
