//! Core data models for the ledger
//!
//! This module contains the data structures that describe a ledger entry and
//! the values used to select and aggregate entries.

pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use category::{predefined_categories, CategoryCatalog};
pub use currency::Currency;
pub use ids::TransactionId;
pub use money::Money;
pub use month::Month;
pub use transaction::{TransactionPatch, TransactionRecord, TransactionType};
