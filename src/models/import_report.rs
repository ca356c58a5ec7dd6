//! Report models for the legacy ledger bridge.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A maintenance history row read from the legacy store.
///
/// Dates are kept as raw text: the legacy store does not guarantee
/// well-formed values, and a malformed row must be rejected on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LegacyHistoryRow {
    pub equipment_id: i32,
    pub maintenance_date: String,
}

/// An equipment row read from the legacy store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LegacyEquipmentRow {
    pub id: i32,
    pub last_maintenance_date: Option<String>,
    pub next_maintenance_date: Option<String>,
}

/// A legacy history row that passed date validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportCandidate {
    pub equipment_id: i32,
    pub maintenance_date: NaiveDate,
}

/// Outcome of a history import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    /// Rows copied into the local ledger
    pub imported: u64,
    /// Rows already present locally with the same (unit, date)
    pub skipped: u64,
    /// Rows refused (malformed date or unknown unit)
    pub rejected: u64,
    /// Units whose derived dates were recomputed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recomputed: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Outcome of an equipment date sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncReport {
    pub updated: u64,
    pub skipped: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Overview of a legacy store, for inspection before an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyOverview {
    pub tables: Vec<String>,
    pub equipment_count: Option<i64>,
    pub history_count: Option<i64>,
    /// Newest history rows
    pub recent_history: Vec<LegacyHistoryRow>,
}
