//! Integration tests for hearth-core
//!
//! These tests exercise the full record → aggregate → reconcile workflow
//! across the persistence layer and the pure aggregation modules.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hearth_core::{
    db::Database,
    edit::{validate_debt_field, DebtField},
    ledger::{cash_totals_by_fund, FundActivity},
    models::{
        BalanceEntry, CategoryRef, DebtDirection, EntryKind, FundLevel, FundType,
        NewCashTransaction, NewDebt, NewFund, NewSnapshot,
    },
    networth, SessionConfig,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn envelope(name: &str, level: FundLevel, amount: f64, spent: Option<f64>) -> NewFund {
    NewFund {
        name: name.to_string(),
        fund_type: FundType::Monthly,
        level,
        amount,
        spent,
        include_in_budget: true,
        color: None,
        categories: vec![],
    }
}

// =============================================================================
// Envelope Reconciliation Workflow
// =============================================================================

#[test]
fn test_month_reconciliation_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");

    let year_id = db
        .create_budget_year("2024-2025", date(2024, 9, 1), date(2025, 8, 31))
        .unwrap();
    db.activate_budget_year(year_id).unwrap();

    let cash_id = db
        .create_fund(&envelope("Daily cash", FundLevel::Cash, 500.0, None))
        .unwrap();
    let tracked_id = db
        .create_fund(&envelope("Annual budget", FundLevel::Tracked, 1200.0, Some(450.0)))
        .unwrap();
    db.create_fund(&envelope("Bonus", FundLevel::Flat, 800.0, None))
        .unwrap();

    // User entries for March: two deposits and two corrections, entered
    // through the kind-selecting form (stored sign is derived, not typed)
    let entries = [
        (EntryKind::Deposit, 200.0),
        (EntryKind::Deposit, 250.0),
        (EntryKind::Withdrawal, 50.0),
        (EntryKind::Withdrawal, 49.0),
    ];
    for (kind, magnitude) in entries {
        db.create_cash_transaction(&NewCashTransaction {
            fund_id: cash_id,
            budget_year_id: Some(year_id),
            date: date(2025, 3, 1),
            amount: kind.signed_amount(magnitude),
            description: None,
            month: 3,
            year: 2025,
        })
        .unwrap();
    }

    let march = db.list_cash_transactions(Some(3), Some(year_id)).unwrap();
    let totals = cash_totals_by_fund(&march);

    let funds = db.list_funds().unwrap();
    assert_eq!(funds.len(), 3);

    for fund in &funds {
        let activity = FundActivity::for_fund(fund, totals.get(&fund.id).copied());
        match (fund.id, activity) {
            (id, FundActivity::Cash { actual, remaining, .. }) if id == cash_id => {
                assert_eq!(actual, 351.0);
                assert_eq!(remaining, 149.0);
            }
            (id, FundActivity::Tracked { spent, remaining, .. }) if id == tracked_id => {
                assert_eq!(spent, 450.0);
                assert_eq!(remaining, 750.0);
            }
            (_, FundActivity::Flat { amount }) => assert_eq!(amount, 800.0),
            (id, other) => panic!("unexpected activity for fund {}: {:?}", id, other),
        }
    }

    // The included-budget total counts every fund flagged include_in_budget
    let included: f64 = funds
        .iter()
        .filter(|f| f.include_in_budget)
        .map(|f| f.amount)
        .sum();
    assert_eq!(included, 2500.0);
}

// =============================================================================
// Debt Edit Workflow
// =============================================================================

#[test]
fn test_debt_edit_workflow() {
    let db = Database::in_memory().unwrap();
    let id = db
        .create_debt(&NewDebt {
            amount: 300.0,
            description: "Car loan".to_string(),
            note: None,
            direction: DebtDirection::IOwe,
        })
        .unwrap();

    // An invalid pending amount is discarded before any request is made
    assert!(validate_debt_field(DebtField::Amount, "-5").is_none());
    let debt = db.get_debt(id).unwrap().unwrap();
    assert_eq!(debt.amount, 300.0);

    // A valid commit produces the patch that the persistence layer applies
    let patch = validate_debt_field(DebtField::Amount, "275").unwrap();
    db.update_debt_field(id, &patch).unwrap();
    assert_eq!(db.get_debt(id).unwrap().unwrap().amount, 275.0);
}

// =============================================================================
// Net-Worth History Workflow
// =============================================================================

#[test]
fn test_networth_history_workflow() {
    let db = Database::in_memory().unwrap();

    let balances = |amount: f64| -> BTreeMap<String, BalanceEntry> {
        let mut map = BTreeMap::new();
        map.insert("pension".to_string(), BalanceEntry { amount });
        map
    };

    for (day, assets, liabilities) in [(1, 4000.0, 4000.0), (15, 5000.0, 3800.0)] {
        db.create_snapshot(&NewSnapshot {
            taken_on: date(2025, 6, day),
            assets: balances(assets),
            liabilities: balances(liabilities),
            note: None,
        })
        .unwrap();
    }

    let rows = networth::history(db.list_snapshots().unwrap());
    assert_eq!(rows.len(), 2);

    // Newest row compares against the older one, whose net worth is zero:
    // the change is shown but no percentage is
    let newest = &rows[0];
    assert_eq!(newest.totals.net_worth, 1200.0);
    assert_eq!(newest.change.unwrap().net_worth_change, 1200.0);
    assert!(newest.change.unwrap().improved());
    assert!(newest.percent_change.is_none());

    // Oldest row has no comparison at all
    assert!(rows[1].change.is_none());
}

// =============================================================================
// Session Configuration
// =============================================================================

#[test]
fn test_session_config_reload_after_write() {
    let db = Database::in_memory().unwrap();

    let config = SessionConfig::load(&db).unwrap();
    assert_eq!(config.tithe_percentage, 10.0);

    db.update_setting(
        "tithe_percentage",
        "12.5",
        hearth_core::models::SettingValueType::Number,
    )
    .unwrap();

    // Still the old value until the owner reloads explicitly
    assert_eq!(config.tithe_percentage, 10.0);
    let reloaded = SessionConfig::load(&db).unwrap();
    assert_eq!(reloaded.tithe_percentage, 12.5);
}

// =============================================================================
// Category Normalization
// =============================================================================

#[test]
fn test_category_references_normalize_to_ids() {
    let db = Database::in_memory().unwrap();
    let groceries = db.create_category("Groceries", None).unwrap();

    let mut fund = envelope("Food", FundLevel::Tracked, 900.0, Some(0.0));
    fund.categories = vec![CategoryRef::Name("Groceries".to_string())];
    let id = db.create_fund(&fund).unwrap();

    // The stored relation is id-based regardless of how the reference arrived
    let stored = db.get_fund(id).unwrap().unwrap();
    assert_eq!(stored.categories, vec![groceries]);
}
