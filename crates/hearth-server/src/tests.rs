//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use hearth_core::db::Database;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let app = create_router(db.clone(), None, ServerConfig::default());
    (app, db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create_cash_fund(app: &Router, name: &str, amount: f64) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "fund_type": "monthly",
        "level": 1,
        "amount": amount,
        "spent": null,
        "include_in_budget": true,
        "color": null,
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/funds", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    get_body_json(response).await["id"].as_i64().unwrap()
}

// ========== Fund API Tests ==========

#[tokio::test]
async fn test_create_and_get_fund() {
    let (app, _db) = setup_test_app();

    let id = create_cash_fund(&app, "Groceries", 500.0).await;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/funds/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["name"], "Groceries");
    assert_eq!(json["level"], 1);
    assert_eq!(json["amount"], 500.0);
}

#[tokio::test]
async fn test_get_fund_not_found() {
    let (app, _db) = setup_test_app();

    let response = app.oneshot(get_request("/api/funds/99999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_fund_blank_name_rejected() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "name": "  ",
        "fund_type": "annual",
        "level": 2,
        "amount": 100.0,
        "include_in_budget": true,
    });
    let response = app
        .oneshot(json_request("POST", "/api/funds", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fund_category_reference_by_name() {
    let (app, _db) = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/categories",
            serde_json::json!({"name": "Food", "color": "#10b981"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let category_id = get_body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "name": "Envelope",
        "fund_type": "monthly",
        "level": 1,
        "amount": 300.0,
        "include_in_budget": true,
        "categories": ["Food"],
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/funds", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["categories"], serde_json::json!([category_id]));
}

// ========== Cash Transaction API Tests ==========

#[tokio::test]
async fn test_withdrawal_stores_negative_amount() {
    let (app, _db) = setup_test_app();
    let fund_id = create_cash_fund(&app, "Cash", 500.0).await;

    let body = serde_json::json!({
        "fund_id": fund_id,
        "date": "2025-03-01",
        "amount": 50.0,
        "kind": "withdrawal",
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/cash-transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["amount"], -50.0);
    assert_eq!(json["month"], 3);
}

#[tokio::test]
async fn test_quick_entry_sign_selects_kind() {
    let (app, _db) = setup_test_app();
    let fund_id = create_cash_fund(&app, "Cash", 500.0).await;

    // No kind given: a negative raw amount is a withdrawal
    let body = serde_json::json!({
        "fund_id": fund_id,
        "date": "2025-03-01",
        "amount": -75.5,
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/cash-transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["amount"], -75.5);
}

#[tokio::test]
async fn test_zero_amount_transaction_rejected() {
    let (app, _db) = setup_test_app();
    let fund_id = create_cash_fund(&app, "Cash", 500.0).await;

    let body = serde_json::json!({
        "fund_id": fund_id,
        "date": "2025-03-01",
        "amount": 0.0,
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/cash-transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ledger_rejects_non_cash_fund() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "name": "Annual",
        "fund_type": "annual",
        "level": 2,
        "amount": 1200.0,
        "spent": 100.0,
        "include_in_budget": true,
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/funds", body))
        .await
        .unwrap();
    let fund_id = get_body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "fund_id": fund_id,
        "date": "2025-03-01",
        "amount": 10.0,
        "kind": "deposit",
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/cash-transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_totals_echo_period_and_sum_by_fund() {
    let (app, _db) = setup_test_app();
    let fund_id = create_cash_fund(&app, "Cash", 500.0).await;

    for (amount, kind) in [(200.0, "deposit"), (250.0, "deposit"), (50.0, "withdrawal"), (49.0, "withdrawal")] {
        let body = serde_json::json!({
            "fund_id": fund_id,
            "date": "2025-03-01",
            "amount": amount,
            "kind": kind,
            "month": 3,
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/cash-transactions", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/cash-transactions/totals?month=3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    // The response names the period it answers for, so a client that has
    // already switched months can discard it
    assert_eq!(json["month"], 3);
    assert_eq!(json["totals"][fund_id.to_string()], 351.0);

    // Another month is empty, not stale
    let response = app
        .clone()
        .oneshot(get_request("/api/cash-transactions/totals?month=4"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["month"], 4);
    assert!(json["totals"].as_object().unwrap().is_empty());
}

// ========== Debt API Tests ==========

#[tokio::test]
async fn test_debt_create_and_partition() {
    let (app, db) = setup_test_app();

    for (desc, direction) in [("Neighbor", "owed_to_me"), ("Bank", "i_owe")] {
        let body = serde_json::json!({
            "amount": 100.0,
            "description": desc,
            "direction": direction,
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/debts", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // A legacy row with no direction lands in the i_owe partition
    let conn = db.conn().unwrap();
    conn.execute(
        "INSERT INTO debts (amount, description) VALUES (55.0, 'Legacy')",
        [],
    )
    .unwrap();
    drop(conn);

    let response = app.clone().oneshot(get_request("/api/debts")).await.unwrap();
    let json = get_body_json(response).await;
    let debts = json.as_array().unwrap();
    assert_eq!(debts.len(), 3);
    let i_owe: Vec<_> = debts
        .iter()
        .filter(|d| d["direction"] == "i_owe")
        .collect();
    assert_eq!(i_owe.len(), 2);
}

#[tokio::test]
async fn test_debt_whitespace_description_rejected() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "amount": 100.0,
        "description": "   ",
        "direction": "i_owe",
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/debts", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get_request("/api/debts")).await.unwrap();
    assert!(get_body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_debt_invalid_amount_edit_leaves_value_unchanged() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "amount": 300.0,
        "description": "Loan",
        "direction": "i_owe",
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/debts", body))
        .await
        .unwrap();
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/debts/{}", id),
            serde_json::json!({"amount": -5.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(get_request("/api/debts")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json[0]["amount"], 300.0);
}

#[tokio::test]
async fn test_debt_note_edit_clears_on_empty() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "amount": 80.0,
        "description": "Dentist",
        "note": "call first",
        "direction": "owed_to_me",
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/debts", body))
        .await
        .unwrap();
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/debts/{}", id),
            serde_json::json!({"note": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["note"].is_null());
}

#[tokio::test]
async fn test_debt_delete() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "amount": 10.0,
        "description": "Tiny",
        "direction": "i_owe",
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/debts", body))
        .await
        .unwrap();
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/debts/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/debts/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Task API Tests ==========

#[tokio::test]
async fn test_task_list_excludes_completed() {
    let (app, db) = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            serde_json::json!({"title": "Pay water bill"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["important"], false);

    // Mark a second task completed behind the API's back
    let done_id = db.create_task("Done chore", false).unwrap();
    let conn = db.conn().unwrap();
    conn.execute(
        "UPDATE tasks SET completed = 1 WHERE id = ?",
        rusqlite::params![done_id],
    )
    .unwrap();
    drop(conn);

    let response = app.oneshot(get_request("/api/tasks")).await.unwrap();
    let json = get_body_json(response).await;
    let tasks = json.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Pay water bill");
}

#[tokio::test]
async fn test_task_toggle_important_and_title_edit() {
    let (app, _db) = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            serde_json::json!({"title": "Draft budget"}),
        ))
        .await
        .unwrap();
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/tasks/{}", id),
            serde_json::json!({"important": true}),
        ))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["important"], true);
    assert_eq!(json["title"], "Draft budget");

    // Blank title edit is rejected; the stored title stays
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/tasks/{}", id),
            serde_json::json!({"title": "   "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get_request("/api/tasks")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json[0]["title"], "Draft budget");
}

// ========== Snapshot API Tests ==========

#[tokio::test]
async fn test_snapshot_history_with_deltas() {
    let (app, _db) = setup_test_app();

    // Older snapshot with zero net worth, then a newer one
    let older = serde_json::json!({
        "taken_on": "2025-05-01",
        "assets": {"pension": {"amount": 4000.0}},
        "liabilities": {"mortgage": {"amount": 4000.0}},
    });
    let newer = serde_json::json!({
        "taken_on": "2025-06-01",
        "assets": {"pension": {"amount": 5000.0}},
        "liabilities": {"mortgage": {"amount": 3800.0}},
    });
    for body in [older, newer] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/snapshots", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get_request("/api/snapshots")).await.unwrap();
    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // Newest first; its change is present but the zero-net-worth baseline
    // yields no percentage
    assert_eq!(rows[0]["taken_on"], "2025-06-01");
    assert_eq!(rows[0]["totals"]["net_worth"], 1200.0);
    assert_eq!(rows[0]["change"]["net_worth_change"], 1200.0);
    assert!(rows[0]["percent_change"].is_null());

    // Oldest has no comparison
    assert!(rows[1]["change"].is_null());
}

#[tokio::test]
async fn test_snapshot_rejects_empty_and_filters_nonpositive() {
    let (app, _db) = setup_test_app();

    // Only zero/negative balances: nothing survives the entry filter
    let body = serde_json::json!({
        "taken_on": "2025-06-01",
        "assets": {"pension": {"amount": 0.0}},
        "liabilities": {},
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/snapshots", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({
        "taken_on": "2025-06-01",
        "assets": {"pension": {"amount": 1000.0}, "stale": {"amount": 0.0}},
        "liabilities": {},
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/snapshots", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["assets"].get("stale").is_none());
}

#[tokio::test]
async fn test_snapshot_delete_by_id() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "taken_on": "2025-06-01",
        "assets": {"cash": {"amount": 10.0}},
        "liabilities": {},
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/snapshots", body))
        .await
        .unwrap();
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/snapshots/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get_request("/api/snapshots")).await.unwrap();
    assert!(get_body_json(response).await.as_array().unwrap().is_empty());
}

// ========== Budget Year API Tests ==========

#[tokio::test]
async fn test_budget_year_activation_is_exclusive() {
    let (app, _db) = setup_test_app();

    let mut ids = vec![];
    for (start, end) in [("2024-09-01", "2025-08-31"), ("2025-09-01", "2026-08-31")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/budget-years",
                serde_json::json!({"start_date": start, "end_date": end}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_body_json(response).await;
        ids.push(json["id"].as_i64().unwrap());
    }

    for id in &ids {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/budget-years/{}/activate", id),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get_request("/api/budget-years")).await.unwrap();
    let json = get_body_json(response).await;
    let active: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .filter(|y| y["is_active"] == true)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], ids[1]);
    // Name was defaulted from the period
    assert_eq!(active[0]["name"], "2025-2026");
}

// ========== Settings API Tests ==========

#[tokio::test]
async fn test_settings_defaults_and_update_reload() {
    let (app, _db) = setup_test_app();

    let response = app.clone().oneshot(get_request("/api/settings")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["tithe_percentage"], 10.0);
    assert_eq!(json["default_currency"], "ILS");
    assert_eq!(json["included_funds"]["bonus"], false);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/settings/tithe_percentage",
            serde_json::json!({"value": 12.5, "value_type": "number"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // The write returns the freshly reloaded configuration
    let json = get_body_json(response).await;
    assert_eq!(json["tithe_percentage"], 12.5);

    let response = app.oneshot(get_request("/api/settings")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["tithe_percentage"], 12.5);
}

#[tokio::test]
async fn test_settings_reject_unknown_key_and_bad_shape() {
    let (app, _db) = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/settings/favorite_color",
            serde_json::json!({"value": "green", "value_type": "string"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Declared type must match the key
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/settings/tithe_percentage",
            serde_json::json!({"value": 10, "value_type": "string"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/settings/tithe_percentage",
            serde_json::json!({"value": 150, "value_type": "number"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Dashboard API Tests ==========

#[tokio::test]
async fn test_dashboard_reconciles_funds_by_level() {
    let (app, db) = setup_test_app();

    let cash_id = create_cash_fund(&app, "Daily cash", 500.0).await;
    let tracked_body = serde_json::json!({
        "name": "Annual budget",
        "fund_type": "annual",
        "level": 2,
        "amount": 1200.0,
        "spent": 450.0,
        "include_in_budget": true,
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/funds", tracked_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let flat_body = serde_json::json!({
        "name": "Bonus",
        "fund_type": "savings",
        "level": 3,
        "amount": 800.0,
        "include_in_budget": false,
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/funds", flat_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for (amount, kind) in [(200.0, "deposit"), (250.0, "deposit"), (50.0, "withdrawal"), (49.0, "withdrawal")] {
        let body = serde_json::json!({
            "fund_id": cash_id,
            "date": "2025-03-01",
            "amount": amount,
            "kind": kind,
            "month": 3,
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/cash-transactions", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    db.create_debt(&hearth_core::models::NewDebt {
        amount: 90.0,
        description: "Neighbor".to_string(),
        note: None,
        direction: hearth_core::models::DebtDirection::OwedToMe,
    })
    .unwrap();
    db.create_task("Pay water bill", true).unwrap();

    let response = app
        .oneshot(get_request("/api/dashboard?month=3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], 3);
    assert_eq!(json["currency"], "ILS");
    assert_eq!(json["open_tasks"], 1);
    assert_eq!(json["debts"]["owed_to_me_count"], 1);
    assert_eq!(json["debts"]["owed_to_me_total"], 90.0);
    // Flat fund is excluded from the budget total by its own flag
    assert_eq!(json["included_budget_total"], 1700.0);

    let funds = json["funds"].as_array().unwrap();
    assert_eq!(funds.len(), 3);
    let cash = funds
        .iter()
        .find(|f| f["activity"]["kind"] == "cash")
        .unwrap();
    assert_eq!(cash["activity"]["actual"], 351.0);
    assert_eq!(cash["activity"]["remaining"], 149.0);
    let tracked = funds
        .iter()
        .find(|f| f["activity"]["kind"] == "tracked")
        .unwrap();
    assert_eq!(tracked["activity"]["remaining"], 750.0);
    let flat = funds
        .iter()
        .find(|f| f["activity"]["kind"] == "flat")
        .unwrap();
    assert_eq!(flat["activity"]["amount"], 800.0);
}

#[tokio::test]
async fn test_dashboard_month_out_of_range_rejected() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(get_request("/api/dashboard?month=13"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
