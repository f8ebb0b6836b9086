//! Hearth Web Server
//!
//! Axum-based REST API for the Hearth household budgeting service.
//!
//! Authentication is an external concern (the service is expected to sit
//! behind a trusted reverse proxy); the server's own hardening is limited
//! to a restrictive CORS policy, security headers, input validation, and
//! sanitized error responses. Each dashboard section degrades on its own
//! fetch failure instead of failing the whole response.

use std::sync::{Arc, RwLock};

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use hearth_core::db::Database;
use hearth_core::SessionConfig;

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// Session configuration: loaded once at startup, reloaded explicitly
    /// after any settings write
    pub session: RwLock<SessionConfig>,
}

impl AppState {
    /// Reload the session configuration from stored settings
    pub fn reload_session(&self) -> Result<SessionConfig, AppError> {
        let fresh = SessionConfig::load(&self.db).map_err(AppError::from_core)?;
        let mut session = self
            .session
            .write()
            .map_err(|_| AppError::internal("Session configuration lock poisoned"))?;
        *session = fresh.clone();
        Ok(fresh)
    }

    /// A point-in-time copy of the session configuration
    pub fn session_snapshot(&self) -> SessionConfig {
        self.session
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let session = match SessionConfig::load(&db) {
        Ok(session) => session,
        Err(e) => {
            warn!("Failed to load session configuration, using defaults: {}", e);
            SessionConfig::default()
        }
    };

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        session: RwLock::new(session),
    });

    let api_routes = Router::new()
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        // Funds
        .route(
            "/funds",
            get(handlers::list_funds).post(handlers::create_fund),
        )
        .route(
            "/funds/:id",
            get(handlers::get_fund)
                .put(handlers::update_fund)
                .delete(handlers::delete_fund),
        )
        // Cash envelope ledger
        .route(
            "/cash-transactions",
            get(handlers::list_cash_transactions).post(handlers::create_cash_transaction),
        )
        .route(
            "/cash-transactions/totals",
            get(handlers::cash_transaction_totals),
        )
        // Debts
        .route(
            "/debts",
            get(handlers::list_debts).post(handlers::create_debt),
        )
        .route(
            "/debts/:id",
            axum::routing::patch(handlers::update_debt).delete(handlers::delete_debt),
        )
        // Tasks
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/:id",
            axum::routing::patch(handlers::update_task).delete(handlers::delete_task),
        )
        // Net-worth snapshots
        .route(
            "/snapshots",
            get(handlers::list_snapshots).post(handlers::create_snapshot),
        )
        .route("/snapshots/:id", delete(handlers::delete_snapshot))
        // Balance types
        .route(
            "/balance-types",
            get(handlers::list_balance_types).post(handlers::create_balance_type),
        )
        .route(
            "/balance-types/:id",
            put(handlers::update_balance_type).delete(handlers::delete_balance_type),
        )
        // Budget years
        .route(
            "/budget-years",
            get(handlers::list_budget_years).post(handlers::create_budget_year),
        )
        .route("/budget-years/:id", delete(handlers::delete_budget_year))
        .route(
            "/budget-years/:id/activate",
            post(handlers::activate_budget_year),
        )
        // Categories
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        // System settings
        .route("/settings", get(handlers::get_settings))
        .route("/settings/:key", put(handlers::update_setting));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    };

    // Security headers
    // CSP: restrict scripts to same-origin, allow inline styles (Tailwind)
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' blob: data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error onto its HTTP status. Validation failures surface
    /// as 400 and missing records as 404; everything else stays a sanitized
    /// 500 with the detail in the log.
    pub fn from_core(err: hearth_core::Error) -> Self {
        match err {
            hearth_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            hearth_core::Error::NotFound(msg) => Self::not_found(&msg),
            other => Self::from(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
