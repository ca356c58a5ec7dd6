//! Maintenance history models

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::equipment::{Equipment, EquipmentClass};
use crate::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date in `YYYY-MM-DD` form.
///
/// Only four-digit years are accepted: dates are stored as text and must
/// order correctly as text.
pub fn parse_date(raw: &str, field: &str) -> AppResult<NaiveDate> {
    let invalid = || AppError::Validation(format!("Invalid {} '{}', expected YYYY-MM-DD", field, raw));
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?;
    if !(1..=9999).contains(&date.year()) {
        return Err(invalid());
    }
    Ok(date)
}

/// A completed maintenance event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub equipment_id: i32,
    /// Date on which the maintenance was completed
    pub maintenance_date: NaiveDate,
    /// When the record was entered (audit only)
    #[sqlx(rename = "created_at")]
    pub recorded_at: NaiveDateTime,
}

/// A record joined with the class of its unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DatedRecord {
    #[sqlx(rename = "type")]
    pub class: EquipmentClass,
    pub equipment_id: i32,
    pub maintenance_date: NaiveDate,
}

/// Record maintenance request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRecord {
    pub equipment_id: i32,
    /// Date of the maintenance (YYYY-MM-DD)
    pub date: String,
}

/// Complete maintenance on a unit (unit taken from the path)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteMaintenance {
    /// Date of the maintenance (YYYY-MM-DD)
    pub date: String,
}

/// Re-target the records of one unit on one date to another unit
#[derive(Debug, Deserialize, ToSchema)]
pub struct EditRecord {
    pub old_equipment_id: i32,
    pub new_equipment_id: i32,
    /// Date of the records to move (YYYY-MM-DD)
    pub date: String,
}

/// Delete the records of one unit on one date
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DeleteRecordQuery {
    pub equipment_id: i32,
    /// Date of the records to delete (YYYY-MM-DD)
    pub date: String,
}

/// A newly recorded event and the unit it refreshed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordOutcome {
    pub record: MaintenanceRecord,
    pub equipment: Equipment,
}

/// Result of an edit or delete
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LedgerChange {
    /// Number of history rows touched
    pub affected: u64,
    /// Units whose derived dates were recomputed, after recomputation
    pub equipment: Vec<Equipment>,
}

/// Query for records on a single day
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RecordsOnDateQuery {
    /// Day to list (YYYY-MM-DD)
    pub date: String,
}

/// Query for the calendar view
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CalendarQuery {
    /// First day included (YYYY-MM-DD). Defaults to 60 days ago.
    pub since: Option<String>,
}

/// Units maintained on one day, for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClassGroup {
    pub class: EquipmentClass,
    pub unit_ids: Vec<i32>,
}

/// One annotated calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub groups: Vec<ClassGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-15", "date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
        assert!(matches!(parse_date("2024-02-30", "date"), Err(AppError::Validation(_))));
        assert!(matches!(parse_date("15/02/2024", "date"), Err(AppError::Validation(_))));
        assert!(matches!(parse_date("", "date"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_date_rejects_years_outside_four_digits() {
        assert!(matches!(parse_date("+10000-01-01", "date"), Err(AppError::Validation(_))));
        assert!(matches!(parse_date("-0001-01-01", "date"), Err(AppError::Validation(_))));
        assert!(matches!(parse_date("0000-01-01", "date"), Err(AppError::Validation(_))));
        assert!(parse_date("9999-12-31", "date").is_ok());
        assert!(parse_date("0001-01-01", "date").is_ok());
    }
}
