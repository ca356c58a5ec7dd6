//! API handlers for ACSP REST endpoints

pub mod dashboard;
pub mod equipment;
pub mod health;
pub mod history;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppResult, models::maintenance::parse_date, AppState};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Equipment registry
        .route("/equipment", get(equipment::list_equipment))
        .route("/equipment/:id", get(equipment::get_equipment))
        .route("/equipment/:id/history", get(equipment::list_equipment_history))
        .route("/equipment/:id/maintenance", post(equipment::complete_maintenance))
        // Maintenance ledger
        .route(
            "/maintenance/history",
            get(history::records_on_date)
                .post(history::add_record)
                .put(history::edit_record)
                .delete(history::delete_record),
        )
        .route("/maintenance/calendar", get(history::calendar))
        // Dashboard
        .route("/dashboard", get(dashboard::summary))
        .route("/dashboard/elapsed", get(dashboard::elapsed_series))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Evaluation day from an optional `as_of` parameter, today otherwise
fn as_of(raw: Option<&str>) -> AppResult<NaiveDate> {
    match raw {
        Some(s) if !s.trim().is_empty() => parse_date(s, "as_of"),
        _ => Ok(crate::today()),
    }
}
