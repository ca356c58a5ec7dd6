//! Maintenance history API endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Duration;

use crate::{
    error::AppResult,
    models::maintenance::{
        parse_date, CalendarDay, CalendarQuery, CreateRecord, DatedRecord, DeleteRecordQuery,
        EditRecord, LedgerChange, RecordOutcome, RecordsOnDateQuery,
    },
    services::history::CALENDAR_WINDOW_DAYS,
};

/// Records of one day, joined with the unit class
#[utoipa::path(
    get,
    path = "/maintenance/history",
    tag = "maintenance",
    params(RecordsOnDateQuery),
    responses(
        (status = 200, description = "Records of the day", body = Vec<DatedRecord>),
        (status = 400, description = "Malformed date", body = crate::error::ErrorResponse)
    )
)]
pub async fn records_on_date(
    State(state): State<crate::AppState>,
    Query(query): Query<RecordsOnDateQuery>,
) -> AppResult<Json<Vec<DatedRecord>>> {
    let records = state.services.history.history_for_date(&query.date).await?;
    Ok(Json(records))
}

/// Add a maintenance record
#[utoipa::path(
    post,
    path = "/maintenance/history",
    tag = "maintenance",
    request_body = CreateRecord,
    responses(
        (status = 201, description = "Record added", body = RecordOutcome),
        (status = 400, description = "Malformed date", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown unit", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_record(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateRecord>,
) -> AppResult<(StatusCode, Json<RecordOutcome>)> {
    let outcome = state
        .services
        .history
        .add_record(data.equipment_id, &data.date)
        .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Move the records of one unit on one date to another unit
#[utoipa::path(
    put,
    path = "/maintenance/history",
    tag = "maintenance",
    request_body = EditRecord,
    responses(
        (status = 200, description = "Records moved", body = LedgerChange),
        (status = 400, description = "Malformed date", body = crate::error::ErrorResponse),
        (status = 404, description = "No matching record or unknown unit", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_record(
    State(state): State<crate::AppState>,
    Json(data): Json<EditRecord>,
) -> AppResult<Json<LedgerChange>> {
    let change = state
        .services
        .history
        .edit_record(data.old_equipment_id, data.new_equipment_id, &data.date)
        .await?;
    Ok(Json(change))
}

/// Delete the records of one unit on one date
#[utoipa::path(
    delete,
    path = "/maintenance/history",
    tag = "maintenance",
    params(DeleteRecordQuery),
    responses(
        (status = 200, description = "Records deleted", body = LedgerChange),
        (status = 400, description = "Malformed date", body = crate::error::ErrorResponse),
        (status = 404, description = "No matching record", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_record(
    State(state): State<crate::AppState>,
    Query(query): Query<DeleteRecordQuery>,
) -> AppResult<Json<LedgerChange>> {
    let change = state
        .services
        .history
        .delete_record(query.equipment_id, &query.date)
        .await?;
    Ok(Json(change))
}

/// Maintained units per day and class, for the calendar view
#[utoipa::path(
    get,
    path = "/maintenance/calendar",
    tag = "maintenance",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Calendar days", body = Vec<CalendarDay>),
        (status = 400, description = "Malformed date", body = crate::error::ErrorResponse)
    )
)]
pub async fn calendar(
    State(state): State<crate::AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<CalendarDay>>> {
    let since = match query.since.as_deref() {
        Some(raw) => parse_date(raw, "since")?,
        None => crate::today() - Duration::days(CALENDAR_WINDOW_DAYS),
    };
    let days = state.services.history.history_by_date(since).await?;
    Ok(Json(days))
}
