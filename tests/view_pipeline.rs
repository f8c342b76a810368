use chrono::NaiveDate;
use monthly_ledger::models::{Currency, Money, Month, TransactionId, TransactionPatch, TransactionRecord, TransactionType};
use monthly_ledger::services::{derive_view, TypeFilter, ViewCache, ViewParams};
use monthly_ledger::storage::{LedgerFile, LedgerStore};
use uuid::Uuid;

fn id(n: u128) -> TransactionId {
    TransactionId::from_uuid(Uuid::from_u128(n))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn march_ledger() -> LedgerStore {
    let store = LedgerStore::new();
    store
        .add(TransactionRecord::new(
            id(1),
            TransactionType::Income,
            date(2024, 3, 5),
            Money::from_units(1000),
            "Salary",
            Currency::Usd,
            "Paycheck",
        ))
        .unwrap();
    store
        .add(TransactionRecord::new(
            id(2),
            TransactionType::Expense,
            date(2024, 3, 5),
            Money::from_units(50),
            "Food",
            Currency::Usd,
            "Lunch",
        ))
        .unwrap();
    store
        .add(TransactionRecord::new(
            id(3),
            TransactionType::Expense,
            date(2024, 4, 1),
            Money::from_units(20),
            "Food",
            Currency::Usd,
            "Snack",
        ))
        .unwrap();
    store
}

#[test]
fn march_view_end_to_end() {
    let store = march_ledger();
    let params = ViewParams::for_month(Month::new(2024, 3).unwrap());

    let view = derive_view(&store.records().unwrap(), &params);

    let ids: Vec<_> = view.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![id(1), id(2)]);
    assert_eq!(view.totals.income, Money::from_units(1000));
    assert_eq!(view.totals.expense, Money::from_units(50));

    assert_eq!(view.groups.len(), 1);
    let group = &view.groups[0];
    assert_eq!(group.key(), "2024-03-05");
    assert_eq!(group.records, view.records);
    assert_eq!(group.totals.income, Money::from_units(1000));
    assert_eq!(group.totals.expense, Money::from_units(50));
}

#[test]
fn next_month_shows_only_april() {
    let store = march_ledger();
    let params = ViewParams::for_month(Month::new(2024, 3).unwrap()).next_month();

    let view = derive_view(&store.records().unwrap(), &params);

    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].title, "Snack");
    assert_eq!(view.totals.income, Money::zero());
    assert_eq!(view.totals.expense, Money::from_units(20));
}

#[test]
fn edits_are_visible_through_the_cache() {
    let store = march_ledger();
    let mut cache = ViewCache::new();
    let params = ViewParams::for_month(Month::new(2024, 3).unwrap()).kind(TypeFilter::Expense);

    let before = cache.view(&store, &params).unwrap().clone();
    assert_eq!(before.records.len(), 1);

    // Moving the snack into March makes it visible under the same params
    store
        .edit(id(3), &TransactionPatch::new().date(date(2024, 3, 6)))
        .unwrap();
    let after = cache.view(&store, &params).unwrap();

    assert_eq!(after.records.len(), 2);
    assert_eq!(after.totals.expense, Money::from_units(70));
    assert_eq!(after.groups.len(), 2);

    // Position in the collection is kept
    let titles: Vec<_> = store.records().unwrap().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, ["Paycheck", "Lunch", "Snack"]);
}

#[test]
fn snapshot_survives_reload() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("ledger.json");
    let store = march_ledger();
    store.remove(id(2)).unwrap();

    LedgerFile::capture(&store, &Default::default())
        .unwrap()
        .save(&path)
        .unwrap();
    let (reloaded, _) = LedgerFile::load(&path).unwrap().into_parts().unwrap();

    assert_eq!(reloaded.records().unwrap(), store.records().unwrap());
    let view = derive_view(
        &reloaded.records().unwrap(),
        &ViewParams::for_month(Month::new(2024, 3).unwrap()),
    );
    assert_eq!(view.totals.expense, Money::zero());
}
