//! Ledger store
//!
//! Owns the canonical, insertion-ordered collection of transaction records.
//! `add`, `edit` and `remove` are the only ways to change it. Writers are
//! serialized through the lock, and each mutation either applies completely
//! or leaves the collection untouched.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{TransactionId, TransactionPatch, TransactionRecord};

#[derive(Debug, Default)]
struct LedgerState {
    records: Vec<TransactionRecord>,
    /// Bumped on every effective mutation
    version: u64,
}

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

fn next_instance() -> u64 {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

/// The authoritative ordered collection of records
#[derive(Debug)]
pub struct LedgerStore {
    /// Distinct for every store created in this process
    instance: u64,
    state: RwLock<LedgerState>,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self {
            instance: next_instance(),
            state: RwLock::new(LedgerState::default()),
        }
    }
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an existing ordered collection
    ///
    /// Fails if two records share an id.
    pub fn from_records(records: Vec<TransactionRecord>) -> LedgerResult<Self> {
        for (i, record) in records.iter().enumerate() {
            if records[..i].iter().any(|r| r.id == record.id) {
                return Err(LedgerError::duplicate_transaction(record.id.to_string()));
            }
        }

        Ok(Self {
            instance: next_instance(),
            state: RwLock::new(LedgerState {
                records,
                version: 0,
            }),
        })
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Append a record to the end of the collection
    ///
    /// A record whose id is already present is rejected with
    /// `LedgerError::Duplicate`; the collection is left unchanged.
    pub fn add(&self, record: TransactionRecord) -> LedgerResult<()> {
        let mut state = self.write()?;

        if state.records.iter().any(|r| r.id == record.id) {
            return Err(LedgerError::duplicate_transaction(record.id.to_string()));
        }

        debug!(id = %record.id, date = %record.date, "adding transaction");
        state.records.push(record);
        state.version += 1;
        Ok(())
    }

    /// Merge `patch` into the record with `id`, keeping its position
    ///
    /// Returns the updated record, or `None` (and changes nothing) when no
    /// record has that id.
    pub fn edit(
        &self,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> LedgerResult<Option<TransactionRecord>> {
        let mut state = self.write()?;

        let Some(index) = state.records.iter().position(|r| r.id == id) else {
            debug!(%id, "edit target not found, ignoring");
            return Ok(None);
        };

        let mut updated = state.records[index].clone();
        patch.apply_to(&mut updated);
        state.records[index] = updated.clone();
        state.version += 1;

        debug!(%id, index, "edited transaction");
        Ok(Some(updated))
    }

    /// Delete the record with `id`, keeping the order of the rest
    ///
    /// Returns the removed record, or `None` (and changes nothing) when no
    /// record has that id.
    pub fn remove(&self, id: TransactionId) -> LedgerResult<Option<TransactionRecord>> {
        let mut state = self.write()?;

        let Some(index) = state.records.iter().position(|r| r.id == id) else {
            debug!(%id, "remove target not found, ignoring");
            return Ok(None);
        };

        let removed = state.records.remove(index);
        state.version += 1;

        debug!(%id, index, "removed transaction");
        Ok(Some(removed))
    }

    /// Snapshot of the full collection in insertion order
    pub fn records(&self) -> LedgerResult<Vec<TransactionRecord>> {
        Ok(self.read()?.records.clone())
    }

    /// Snapshot of the collection together with the version it was taken at
    pub fn snapshot(&self) -> LedgerResult<(u64, Vec<TransactionRecord>)> {
        let state = self.read()?;
        Ok((state.version, state.records.clone()))
    }

    /// Get a record by id
    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<TransactionRecord>> {
        Ok(self.read()?.records.iter().find(|r| r.id == id).cloned())
    }

    /// Resolve a user-typed reference (full id, `txn-` short form or prefix)
    ///
    /// Fails with `NotFound` when nothing matches and with `Validation` when
    /// the reference is ambiguous.
    pub fn resolve(&self, reference: &str) -> LedgerResult<TransactionId> {
        let state = self.read()?;
        let mut matches = state
            .records
            .iter()
            .map(|r| r.id)
            .filter(|id| id.matches_prefix(reference));

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(LedgerError::Validation(format!(
                "Transaction reference '{}' is ambiguous",
                reference
            ))),
            (None, _) => Err(LedgerError::transaction_not_found(reference)),
        }
    }

    /// Number of records
    pub fn len(&self) -> LedgerResult<usize> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.read()?.records.is_empty())
    }

    /// Mutation counter, usable as a memoization key
    ///
    /// Versions of different stores are unrelated; pair this with
    /// `instance_id` when comparing across stores.
    pub fn version(&self) -> LedgerResult<u64> {
        Ok(self.read()?.version)
    }

    /// Identity of this store within the process
    pub fn instance_id(&self) -> u64 {
        self.instance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Money, TransactionType};
    use chrono::NaiveDate;

    fn record(title: &str) -> TransactionRecord {
        TransactionRecord::new(
            TransactionId::new(),
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            Money::from_units(10),
            "Food",
            Currency::Usd,
            title,
        )
    }

    fn store_with(records: &[TransactionRecord]) -> LedgerStore {
        let store = LedgerStore::new();
        for r in records {
            store.add(r.clone()).unwrap();
        }
        store
    }

    #[test]
    fn test_add_appends() {
        let a = record("a");
        let b = record("b");
        let store = store_with(&[a.clone()]);

        store.add(b.clone()).unwrap();

        let records = store.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.last(), Some(&b));
        assert_eq!(records[0], a);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let a = record("a");
        let store = store_with(&[a.clone()]);
        let version = store.version().unwrap();

        let mut clash = record("other");
        clash.id = a.id;
        let err = store.add(clash).unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(store.records().unwrap(), vec![a]);
        assert_eq!(store.version().unwrap(), version);
    }

    #[test]
    fn test_edit_preserves_position_and_merges() {
        let (a, b, c) = (record("a"), record("b"), record("c"));
        let store = store_with(&[a.clone(), b.clone(), c.clone()]);

        let updated = store
            .edit(b.id, &TransactionPatch::new().title("x"))
            .unwrap()
            .unwrap();

        let mut expected = b.clone();
        expected.title = "x".into();
        assert_eq!(updated, expected);
        assert_eq!(store.records().unwrap(), vec![a, expected, c]);
    }

    #[test]
    fn test_edit_missing_is_noop() {
        let a = record("a");
        let store = store_with(&[a.clone()]);
        let version = store.version().unwrap();

        let result = store
            .edit(TransactionId::new(), &TransactionPatch::new().title("x"))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.records().unwrap(), vec![a]);
        assert_eq!(store.version().unwrap(), version);
    }

    #[test]
    fn test_remove_keeps_order() {
        let (a, b, c) = (record("a"), record("b"), record("c"));
        let store = store_with(&[a.clone(), b.clone(), c.clone()]);

        let removed = store.remove(b.id).unwrap();

        assert_eq!(removed, Some(b));
        assert_eq!(store.records().unwrap(), vec![a, c]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (a, b) = (record("a"), record("b"));
        let store = store_with(&[a.clone(), b.clone()]);

        assert!(store.remove(TransactionId::new()).unwrap().is_none());
        assert_eq!(store.records().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let a = record("a");
        let result = LedgerStore::from_records(vec![a.clone(), record("b"), a]);
        assert!(result.unwrap_err().is_duplicate());

        let store = LedgerStore::from_records(vec![record("a"), record("b")]).unwrap();
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.version().unwrap(), 0);
    }

    #[test]
    fn test_version_tracks_effective_mutations() {
        let a = record("a");
        let store = LedgerStore::new();
        assert!(store.is_empty().unwrap());

        store.add(a.clone()).unwrap();
        store.edit(a.id, &TransactionPatch::new().note("n")).unwrap();
        store.remove(TransactionId::new()).unwrap();
        assert_eq!(store.version().unwrap(), 2);

        store.remove(a.id).unwrap();
        let (version, records) = store.snapshot().unwrap();
        assert_eq!(version, 3);
        assert!(records.is_empty());
    }

    #[test]
    fn test_instance_ids_are_distinct() {
        let a = LedgerStore::new();
        let b = LedgerStore::new();
        let c = LedgerStore::from_records(vec![record("c")]).unwrap();

        assert_ne!(a.instance_id(), b.instance_id());
        assert_ne!(a.instance_id(), c.instance_id());
        assert_ne!(b.instance_id(), c.instance_id());
        assert_eq!(a.version().unwrap(), b.version().unwrap());
    }

    #[test]
    fn test_resolve_reference() {
        let a = record("a");
        let store = store_with(&[a.clone()]);

        assert_eq!(store.resolve(&a.id.to_string()).unwrap(), a.id);
        assert_eq!(store.resolve(&a.id.short()).unwrap(), a.id);
        assert!(store
            .resolve("ffffffff-ffff-ffff-ffff-ffffffffffff")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_concurrent_adds_are_serialized() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(LedgerStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.add(record(&format!("t{}", i))).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 8);
        assert_eq!(store.version().unwrap(), 8);
    }
}
