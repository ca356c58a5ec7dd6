//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        equipment::{parse_class_filter, Equipment, EquipmentQuery},
        maintenance::{CompleteMaintenance, MaintenanceRecord, RecordOutcome},
    },
};

/// List equipment with current derived dates
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>),
        (status = 400, description = "Unknown class", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let class = parse_class_filter(query.class.as_deref())?;
    let equipment = state.services.equipment.list(class).await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Unknown unit", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Maintenance history of one unit, newest first
#[utoipa::path(
    get,
    path = "/equipment/{id}/history",
    tag = "equipment",
    params(("id" = i32, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Maintenance records", body = Vec<MaintenanceRecord>),
        (status = 404, description = "Unknown unit", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_equipment_history(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MaintenanceRecord>>> {
    let records = state.services.history.list_records(id).await?;
    Ok(Json(records))
}

/// Record a completed maintenance on a unit
#[utoipa::path(
    post,
    path = "/equipment/{id}/maintenance",
    tag = "equipment",
    params(("id" = i32, Path, description = "Unit ID")),
    request_body = CompleteMaintenance,
    responses(
        (status = 201, description = "Maintenance recorded", body = RecordOutcome),
        (status = 400, description = "Malformed date", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown unit", body = crate::error::ErrorResponse)
    )
)]
pub async fn complete_maintenance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CompleteMaintenance>,
) -> AppResult<(StatusCode, Json<RecordOutcome>)> {
    let outcome = state.services.history.add_record(id, &data.date).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
