//! View derivation
//!
//! Pure functions that turn the record collection and a set of view
//! parameters into the filtered records, income/expense totals and a
//! per-day grouping. Nothing here mutates the collection.
//!
//! Stages run in a fixed order:
//!
//! 1. month selection (calendar month of `date`)
//! 2. title / category / currency filters; totals are taken here
//! 3. type filter (sign-gated)
//! 4. day grouping of what is left

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Currency, Money, Month, TransactionRecord, TransactionType};
use crate::storage::LedgerStore;

/// Restricts a view to records that contribute to one type's totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    Income,
    Expense,
}

impl TypeFilter {
    /// A record passes only if its type matches and its amount is positive
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        record.contributes_to(self.transaction_type())
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Income => TransactionType::Income,
            Self::Expense => TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<TransactionType>().map(Self::from)
    }
}

/// Selection and filter inputs for a view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewParams {
    /// Calendar month to show
    pub month: Month,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    pub kind: Option<TypeFilter>,
    /// Exact category name
    pub category: Option<String>,
    pub currency: Option<Currency>,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self::for_month(Month::current())
    }
}

impl ViewParams {
    /// Parameters showing every record of `month`
    pub fn for_month(month: Month) -> Self {
        Self {
            month,
            title: None,
            kind: None,
            category: None,
            currency: None,
        }
    }

    /// Filter by title; an empty string clears the filter
    pub fn title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.is_empty() { None } else { Some(title) };
        self
    }

    pub fn kind(mut self, kind: TypeFilter) -> Self {
        self.kind = Some(kind);
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

    /// Same filters, one month later
    pub fn next_month(mut self) -> Self {
        self.month = self.month.next();
        self
    }

    /// Same filters, one month earlier
    pub fn prev_month(mut self) -> Self {
        self.month = self.month.prev();
        self
    }

    fn matches_scope(&self, record: &TransactionRecord) -> bool {
        if !self.month.contains(record.date) {
            return false;
        }
        if let Some(title) = &self.title {
            if !record.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &record.category != category {
                return false;
            }
        }
        if let Some(currency) = self.currency {
            if record.currency != currency {
                return false;
            }
        }
        true
    }

    fn matches_kind(&self, record: &TransactionRecord) -> bool {
        self.kind.map_or(true, |kind| kind.matches(record))
    }
}

/// Sign-gated income and expense sums
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    /// Sum the contributions of `records`
    pub fn of<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Self {
        let mut totals = Self::default();
        for record in records {
            totals.add(record);
        }
        totals
    }

    /// Count a record; non-contributing records change nothing
    pub fn add(&mut self, record: &TransactionRecord) {
        self.income += record.income_contribution();
        self.expense += record.expense_contribution();
    }

    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Records sharing one calendar date, with their sub-totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// Records of this date in collection order
    pub records: Vec<TransactionRecord>,
    pub totals: Totals,
}

impl DayGroup {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            records: Vec::new(),
            totals: Totals::default(),
        }
    }

    /// ISO date key, e.g. "2024-03-05"
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Everything a month screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    pub month: Month,
    /// Records passing every filter, in collection order
    pub records: Vec<TransactionRecord>,
    /// Totals over the month, title, category and currency filtered set
    ///
    /// The type filter does not apply here.
    pub totals: Totals,
    /// Day groups in order of first occurrence
    pub groups: Vec<DayGroup>,
}

impl LedgerView {
    /// Look up the group for a date
    pub fn group(&self, date: NaiveDate) -> Option<&DayGroup> {
        self.groups.iter().find(|g| g.date == date)
    }

    /// Totals over the fully filtered records, equal to the sum of all group
    /// sub-totals
    pub fn filtered_totals(&self) -> Totals {
        Totals::of(&self.records)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Group records by calendar date, keeping first-occurrence order
pub fn group_by_day<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.date).or_insert_with(|| {
            groups.push(DayGroup::new(record.date));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.totals.add(record);
        group.records.push(record.clone());
    }

    groups
}

/// Derive a view from the collection
pub fn derive_view(records: &[TransactionRecord], params: &ViewParams) -> LedgerView {
    let scoped: Vec<&TransactionRecord> =
        records.iter().filter(|r| params.matches_scope(r)).collect();

    let totals = Totals::of(scoped.iter().copied());

    let filtered: Vec<TransactionRecord> = scoped
        .into_iter()
        .filter(|r| params.matches_kind(r))
        .cloned()
        .collect();

    let groups = group_by_day(&filtered);

    debug!(
        month = %params.month,
        total = records.len(),
        shown = filtered.len(),
        days = groups.len(),
        "derived ledger view"
    );

    LedgerView {
        month: params.month,
        records: filtered,
        totals,
        groups,
    }
}

/// Identifies the exact collection state a view was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    store: u64,
    version: u64,
}

/// Memoizes the most recent view, keyed on store identity, store version
/// and parameters
#[derive(Debug, Default)]
pub struct ViewCache {
    entry: Option<(CacheKey, ViewParams, LedgerView)>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view when neither the store nor the parameters
    /// changed, otherwise derive and cache a fresh one
    pub fn view(&mut self, store: &LedgerStore, params: &ViewParams) -> LedgerResult<&LedgerView> {
        let key = CacheKey {
            store: store.instance_id(),
            version: store.version()?,
        };
        let fresh = matches!(&self.entry, Some((k, p, _)) if *k == key && p == params);

        if fresh {
            trace!(store = key.store, version = key.version, "ledger view cache hit");
        } else {
            let (version, records) = store.snapshot()?;
            let view = derive_view(&records, params);
            let key = CacheKey {
                store: key.store,
                version,
            };
            self.entry = Some((key, params.clone(), view));
        }

        match &self.entry {
            Some((_, _, view)) => Ok(view),
            None => Err(LedgerError::Storage("view cache is empty".into())),
        }
    }

    /// Drop the cached view
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
