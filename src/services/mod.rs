//! Service layer
//!
//! Read-side logic on top of the storage layer. Views are derived from a
//! snapshot of the record collection and never write back to it.

pub mod view;

pub use view::{derive_view, group_by_day, DayGroup, LedgerView, Totals, TypeFilter, ViewCache, ViewParams};
