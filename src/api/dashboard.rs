//! Dashboard endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        dashboard::{ElapsedEntry, ElapsedQuery, EquipmentSummary, StatusFilter, SummaryQuery},
        equipment::parse_class_filter,
    },
};

use super::as_of;

/// Status counts and unit list for one class
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Dashboard summary", body = EquipmentSummary),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn summary(
    State(state): State<crate::AppState>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<EquipmentSummary>> {
    let class = parse_class_filter(query.class.as_deref())?;
    let status: StatusFilter = query
        .status
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(AppError::Validation)?;

    let sort = query.sorting()?;

    let today = as_of(query.as_of.as_deref())?;
    let summary = state
        .services
        .dashboard
        .summary_counts(class, status, sort, today)
        .await?;
    Ok(Json(summary))
}

/// Days since last maintenance per unit, for the chart view
#[utoipa::path(
    get,
    path = "/dashboard/elapsed",
    tag = "dashboard",
    params(ElapsedQuery),
    responses(
        (status = 200, description = "Elapsed days by unit", body = Vec<ElapsedEntry>),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn elapsed_series(
    State(state): State<crate::AppState>,
    Query(query): Query<ElapsedQuery>,
) -> AppResult<Json<Vec<ElapsedEntry>>> {
    let class = parse_class_filter(query.class.as_deref())?;
    let today = as_of(query.as_of.as_deref())?;
    let series = state.services.dashboard.elapsed_series(class, today).await?;
    Ok(Json(series))
}
