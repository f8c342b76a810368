//! Monthly ledger - personal income and expense tracking
//!
//! The library owns an ordered collection of income and expense records and
//! derives month views from it: records filtered by month, title, type,
//! category and currency, sign-gated income/expense totals, and a grouping
//! by calendar day with per-day sub-totals.
//!
//! # Architecture
//!
//! - `models`: records, ids, money, currencies, months, categories
//! - `storage`: the `LedgerStore` plus JSON snapshot persistence
//! - `services`: the view derivation pipeline
//! - `config`: data directory and settings
//! - `display`: plain-text rendering
//! - `cli`: command handlers used by the `ledger` binary
//! - `error`: `LedgerError`
//!
//! # Example
//!
//! ```rust,ignore
//! use monthly_ledger::{derive_view, LedgerStore, Month, ViewParams};
//!
//! let store = LedgerStore::new();
//! let view = derive_view(&store.records()?, &ViewParams::for_month(Month::current()));
//! println!("{}", view.totals.income);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use models::{
    Currency, Money, Month, TransactionId, TransactionPatch, TransactionRecord, TransactionType,
};
pub use services::{derive_view, DayGroup, LedgerView, Totals, TypeFilter, ViewCache, ViewParams};
pub use storage::{LedgerFile, LedgerStore};
