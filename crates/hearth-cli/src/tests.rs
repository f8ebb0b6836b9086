//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use hearth_core::db::Database;
use hearth_core::models::{DebtDirection, FundLevel, NewDebt};

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn create_cash_fund(db: &Database, name: &str, amount: f64) -> i64 {
    commands::cmd_funds_add(db, name, amount, "monthly", 1, true, None, &[]).unwrap();
    db.list_funds()
        .unwrap()
        .into_iter()
        .find(|f| f.name == name)
        .unwrap()
        .id
}

// ========== Funds Command Tests ==========

#[test]
fn test_cmd_funds_add_and_list() {
    let db = setup_test_db();
    let result = commands::cmd_funds_add(&db, "Groceries", 500.0, "monthly", 1, true, None, &[]);
    assert!(result.is_ok());

    let funds = db.list_funds().unwrap();
    assert_eq!(funds.len(), 1);
    assert_eq!(funds[0].level, FundLevel::Cash);

    assert!(commands::cmd_funds_list(&db).is_ok());
}

#[test]
fn test_cmd_funds_add_invalid_level() {
    let db = setup_test_db();
    let result = commands::cmd_funds_add(&db, "Broken", 100.0, "monthly", 7, true, None, &[]);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Level"));
}

#[test]
fn test_cmd_funds_add_with_category_by_name() {
    let db = setup_test_db();
    commands::cmd_categories_add(&db, "Food", None).unwrap();

    let categories = vec!["Food".to_string()];
    commands::cmd_funds_add(&db, "Envelope", 300.0, "monthly", 1, true, None, &categories)
        .unwrap();

    let fund = &db.list_funds().unwrap()[0];
    assert_eq!(fund.categories.len(), 1);
}

#[test]
fn test_cmd_funds_update_partial() {
    let db = setup_test_db();
    let id = create_cash_fund(&db, "Cash", 500.0);

    commands::cmd_funds_update(&db, id, Some(650.0), None, None).unwrap();

    let fund = db.get_fund(id).unwrap().unwrap();
    assert_eq!(fund.amount, 650.0);
    assert_eq!(fund.name, "Cash");
}

#[test]
fn test_cmd_funds_delete_with_yes() {
    let db = setup_test_db();
    let id = create_cash_fund(&db, "Cash", 500.0);

    commands::cmd_funds_delete(&db, id, true).unwrap();
    assert!(db.get_fund(id).unwrap().is_none());
}

// ========== Cash Command Tests ==========

#[test]
fn test_cmd_cash_add_signed_quick_entry() {
    let db = setup_test_db();
    let fund_id = create_cash_fund(&db, "Cash", 500.0);

    commands::cmd_cash_add(&db, fund_id, "200", None, Some(3)).unwrap();
    commands::cmd_cash_add(&db, fund_id, "-50", Some("correction"), Some(3)).unwrap();

    let transactions = db.list_cash_transactions(Some(3), None).unwrap();
    assert_eq!(transactions.len(), 2);
    let amounts: Vec<f64> = transactions.iter().map(|t| t.amount).collect();
    assert!(amounts.contains(&200.0));
    assert!(amounts.contains(&-50.0));
}

#[test]
fn test_cmd_cash_add_zero_or_garbage_is_noop() {
    let db = setup_test_db();
    let fund_id = create_cash_fund(&db, "Cash", 500.0);

    // No request is made and no error surfaces
    commands::cmd_cash_add(&db, fund_id, "", None, Some(3)).unwrap();
    commands::cmd_cash_add(&db, fund_id, "abc", None, Some(3)).unwrap();
    commands::cmd_cash_add(&db, fund_id, "0", None, Some(3)).unwrap();

    assert!(db.list_cash_transactions(None, None).unwrap().is_empty());
}

#[test]
fn test_cmd_cash_add_grouped_amount() {
    let db = setup_test_db();
    let fund_id = create_cash_fund(&db, "Cash", 5000.0);

    commands::cmd_cash_add(&db, fund_id, "1,234.5", None, Some(3)).unwrap();

    let transactions = db.list_cash_transactions(Some(3), None).unwrap();
    assert_eq!(transactions[0].amount, 1234.5);
}

#[test]
fn test_cmd_cash_add_rejects_flat_fund() {
    let db = setup_test_db();
    commands::cmd_funds_add(&db, "Bonus", 800.0, "savings", 3, false, None, &[]).unwrap();
    let fund_id = db.list_funds().unwrap()[0].id;

    let result = commands::cmd_cash_add(&db, fund_id, "100", None, Some(3));
    assert!(result.is_err());
}

#[test]
fn test_cmd_cash_list_and_totals() {
    let db = setup_test_db();
    let fund_id = create_cash_fund(&db, "Cash", 500.0);
    commands::cmd_cash_add(&db, fund_id, "100", None, Some(3)).unwrap();

    assert!(commands::cmd_cash_list(&db, Some(3)).is_ok());
    assert!(commands::cmd_cash_totals(&db, Some(3)).is_ok());
}

// ========== Debts Command Tests ==========

#[test]
fn test_cmd_debts_add_and_partition() {
    let db = setup_test_db();
    commands::cmd_debts_add(&db, "150", "Neighbor", None, true).unwrap();
    commands::cmd_debts_add(&db, "80", "Bank", Some("monthly"), false).unwrap();

    let debts = db.list_debts().unwrap();
    assert_eq!(debts.len(), 2);
    assert_eq!(
        debts
            .iter()
            .filter(|d| d.direction == DebtDirection::OwedToMe)
            .count(),
        1
    );

    assert!(commands::cmd_debts_list(&db).is_ok());
}

#[test]
fn test_cmd_debts_add_rejects_blank_description() {
    let db = setup_test_db();
    let result = commands::cmd_debts_add(&db, "100", "   ", None, false);
    assert!(result.is_err());
    assert!(db.list_debts().unwrap().is_empty());
}

#[test]
fn test_cmd_debts_edit_discards_invalid_amount() {
    let db = setup_test_db();
    let id = db
        .create_debt(&NewDebt {
            amount: 300.0,
            description: "Loan".to_string(),
            note: None,
            direction: DebtDirection::IOwe,
        })
        .unwrap();

    // Discarded silently: command succeeds, value unchanged
    commands::cmd_debts_edit(&db, id, "amount", "-5").unwrap();
    assert_eq!(db.get_debt(id).unwrap().unwrap().amount, 300.0);

    commands::cmd_debts_edit(&db, id, "amount", "275").unwrap();
    assert_eq!(db.get_debt(id).unwrap().unwrap().amount, 275.0);
}

#[test]
fn test_cmd_debts_edit_note_clears_on_empty() {
    let db = setup_test_db();
    let id = db
        .create_debt(&NewDebt {
            amount: 50.0,
            description: "Dentist".to_string(),
            note: Some("call first".to_string()),
            direction: DebtDirection::OwedToMe,
        })
        .unwrap();

    commands::cmd_debts_edit(&db, id, "note", "").unwrap();
    assert!(db.get_debt(id).unwrap().unwrap().note.is_none());
}

#[test]
fn test_cmd_debts_edit_unknown_field() {
    let db = setup_test_db();
    let id = db
        .create_debt(&NewDebt {
            amount: 50.0,
            description: "X".to_string(),
            note: None,
            direction: DebtDirection::IOwe,
        })
        .unwrap();

    let result = commands::cmd_debts_edit(&db, id, "color", "red");
    assert!(result.is_err());
}

#[test]
fn test_cmd_debts_delete_with_yes() {
    let db = setup_test_db();
    let id = db
        .create_debt(&NewDebt {
            amount: 50.0,
            description: "Gone".to_string(),
            note: None,
            direction: DebtDirection::IOwe,
        })
        .unwrap();

    commands::cmd_debts_delete(&db, id, true).unwrap();
    assert!(db.get_debt(id).unwrap().is_none());
}

// ========== Tasks Command Tests ==========

#[test]
fn test_cmd_tasks_add_star_edit() {
    let db = setup_test_db();
    commands::cmd_tasks_add(&db, "Pay water bill", false).unwrap();
    let id = db.list_open_tasks().unwrap()[0].id;

    commands::cmd_tasks_star(&db, id, true).unwrap();
    assert!(db.get_task(id).unwrap().unwrap().important);

    commands::cmd_tasks_edit(&db, id, "Pay water and gas bills").unwrap();
    assert_eq!(
        db.get_task(id).unwrap().unwrap().title,
        "Pay water and gas bills"
    );

    // Blank edit is discarded, not an error
    commands::cmd_tasks_edit(&db, id, "   ").unwrap();
    assert_eq!(
        db.get_task(id).unwrap().unwrap().title,
        "Pay water and gas bills"
    );
}

#[test]
fn test_cmd_tasks_delete_with_yes() {
    let db = setup_test_db();
    commands::cmd_tasks_add(&db, "Chore", false).unwrap();
    let id = db.list_open_tasks().unwrap()[0].id;

    commands::cmd_tasks_delete(&db, id, true).unwrap();
    assert!(db.get_task(id).unwrap().is_none());
}

// ========== Networth Command Tests ==========

#[test]
fn test_cmd_networth_add_and_list() {
    let db = setup_test_db();
    let assets = vec!["pension=5,000".to_string(), "stale=0".to_string()];
    let liabilities = vec!["mortgage=3000".to_string()];

    commands::cmd_networth_add(&db, Some("2025-06-01"), &assets, &liabilities, None).unwrap();

    let snapshots = db.list_snapshots().unwrap();
    assert_eq!(snapshots.len(), 1);
    // Grouped amounts parse; zero entries are filed away
    assert_eq!(snapshots[0].assets.len(), 1);
    assert_eq!(snapshots[0].assets["pension"].amount, 5000.0);

    assert!(commands::cmd_networth_list(&db).is_ok());
}

#[test]
fn test_cmd_networth_add_rejects_empty() {
    let db = setup_test_db();
    let result = commands::cmd_networth_add(&db, Some("2025-06-01"), &[], &[], None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_networth_malformed_balance() {
    let db = setup_test_db();
    let assets = vec!["pension".to_string()];
    let result = commands::cmd_networth_add(&db, None, &assets, &[], None);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("key=amount"));
}

// ========== Years / Categories / Settings Command Tests ==========

#[test]
fn test_cmd_years_add_activate() {
    let db = setup_test_db();
    commands::cmd_years_add(&db, "2024-09-01", "2025-08-31", None).unwrap();
    commands::cmd_years_add(&db, "2025-09-01", "2026-08-31", Some("Next")).unwrap();

    let years = db.list_budget_years().unwrap();
    assert_eq!(years.len(), 2);
    // Default name comes from the period
    assert!(years.iter().any(|y| y.name == "2024-2025"));

    let next = years.iter().find(|y| y.name == "Next").unwrap();
    commands::cmd_years_activate(&db, next.id).unwrap();
    assert_eq!(db.active_budget_year().unwrap().unwrap().id, next.id);
}

#[test]
fn test_cmd_settings_set_and_show() {
    let db = setup_test_db();

    commands::cmd_settings_set(&db, "tithe_percentage", "12.5").unwrap();
    assert_eq!(db.tithe_percentage().unwrap(), 12.5);

    commands::cmd_settings_set(&db, "default_currency", "usd").unwrap();
    assert_eq!(
        db.default_currency().unwrap(),
        hearth_core::models::Currency::Usd
    );

    commands::cmd_settings_set(
        &db,
        "included_funds",
        r#"{"daily":true,"annual":false,"extended":true,"bonus":true}"#,
    )
    .unwrap();
    assert!(!db.included_funds().unwrap().annual);

    assert!(commands::cmd_settings_set(&db, "nope", "1").is_err());
    assert!(commands::cmd_settings_set(&db, "tithe_percentage", "150").is_err());

    assert!(commands::cmd_settings_show(&db).is_ok());
}

// ========== Shared Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a rather long description", 10), "a rathe...");
}
