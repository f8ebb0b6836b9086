//! System settings handlers
//!
//! Writes validate the value against the key's declared shape, persist it,
//! then reload the session configuration so every subsequent consumer sees
//! the fresh values.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use hearth_core::db::{DEFAULT_CURRENCY, INCLUDED_FUNDS, SURPLUS_FUND, TITHE_PERCENTAGE};
use hearth_core::models::{Currency, IncludedFunds, SettingValueType, SurplusFund};
use hearth_core::SessionConfig;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    pub value: serde_json::Value,
    pub value_type: SettingValueType,
}

/// GET /api/settings - The current session configuration
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SessionConfig> {
    Json(state.session_snapshot())
}

/// PUT /api/settings/:key - Update one recognized setting
pub async fn update_setting(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(body): Json<UpdateSettingRequest>,
) -> Result<Json<SessionConfig>, AppError> {
    let stored = match key.as_str() {
        TITHE_PERCENTAGE => {
            if body.value_type != SettingValueType::Number {
                return Err(AppError::bad_request("tithe_percentage is a number setting"));
            }
            let value = body
                .value
                .as_f64()
                .ok_or_else(|| AppError::bad_request("tithe_percentage must be a number"))?;
            if !(0.0..=100.0).contains(&value) {
                return Err(AppError::bad_request(
                    "tithe_percentage must be between 0 and 100",
                ));
            }
            value.to_string()
        }
        DEFAULT_CURRENCY => {
            if body.value_type != SettingValueType::String {
                return Err(AppError::bad_request("default_currency is a string setting"));
            }
            let raw = body
                .value
                .as_str()
                .ok_or_else(|| AppError::bad_request("default_currency must be a string"))?;
            let currency: Currency = raw
                .parse()
                .map_err(|e: String| AppError::bad_request(&e))?;
            currency.as_str().to_string()
        }
        SURPLUS_FUND => {
            if body.value_type != SettingValueType::String {
                return Err(AppError::bad_request("surplus_fund is a string setting"));
            }
            let raw = body
                .value
                .as_str()
                .ok_or_else(|| AppError::bad_request("surplus_fund must be a string"))?;
            let surplus: SurplusFund = raw
                .parse()
                .map_err(|e: String| AppError::bad_request(&e))?;
            surplus.as_str().to_string()
        }
        INCLUDED_FUNDS => {
            if body.value_type != SettingValueType::Json {
                return Err(AppError::bad_request("included_funds is a json setting"));
            }
            let flags: IncludedFunds = serde_json::from_value(body.value)
                .map_err(|_| AppError::bad_request("included_funds must map fund groups to booleans"))?;
            serde_json::to_string(&flags)?
        }
        _ => return Err(AppError::bad_request("Unknown setting key")),
    };

    state
        .db
        .update_setting(&key, &stored, body.value_type)
        .map_err(AppError::from_core)?;

    // Explicit reload: consumers read the fresh config, not stale state
    let fresh = state.reload_session()?;
    Ok(Json(fresh))
}
