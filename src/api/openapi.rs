//! OpenAPI documentation

use axum::Json;
use utoipa::OpenApi;

use crate::api::{dashboard, equipment, health, history};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ACSP API",
        version = "1.0.0",
        description = "Crane maintenance scheduler REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::list_equipment_history,
        equipment::complete_maintenance,
        // Maintenance ledger
        history::records_on_date,
        history::add_record,
        history::edit_record,
        history::delete_record,
        history::calendar,
        // Dashboard
        dashboard::summary,
        dashboard::elapsed_series,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentClass,
            crate::models::equipment::EquipmentQuery,
            crate::models::equipment::SeedReport,
            // Maintenance
            crate::models::maintenance::MaintenanceRecord,
            crate::models::maintenance::DatedRecord,
            crate::models::maintenance::CreateRecord,
            crate::models::maintenance::CompleteMaintenance,
            crate::models::maintenance::EditRecord,
            crate::models::maintenance::RecordOutcome,
            crate::models::maintenance::LedgerChange,
            crate::models::maintenance::CalendarDay,
            crate::models::maintenance::ClassGroup,
            // Dashboard
            crate::models::dashboard::EquipmentSummary,
            crate::models::dashboard::EquipmentStatus,
            crate::models::dashboard::ElapsedEntry,
            crate::status::MaintenanceStatus,
            // Import
            crate::models::import_report::ImportReport,
            crate::models::import_report::SyncReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment registry"),
        (name = "maintenance", description = "Maintenance history ledger"),
        (name = "dashboard", description = "Status summaries and charts")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
