//! Maintenance status classification.
//!
//! Status is never stored: it is derived from a unit's last maintenance date
//! and the day it is evaluated on, so a unit moves from good to warning to
//! overdue purely as days pass.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Length of the maintenance cycle in days
pub const MAINTENANCE_INTERVAL_DAYS: i64 = 45;

/// Units with fewer days remaining than this are flagged as warning
pub const WARNING_THRESHOLD_DAYS: i64 = 10;

/// Status band of a unit. Ordered by severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Good,
    Warning,
    Overdue,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Good => "good",
            MaintenanceStatus::Warning => "warning",
            MaintenanceStatus::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of one unit on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusSnapshot {
    pub days_passed: i64,
    pub days_remaining: i64,
    pub status: MaintenanceStatus,
}

/// Next due date for a maintenance completed on `last`.
pub fn next_due(last: NaiveDate) -> NaiveDate {
    last + Duration::days(MAINTENANCE_INTERVAL_DAYS)
}

/// Classify a unit last maintained on `last` as seen on `today`.
pub fn classify(last: NaiveDate, today: NaiveDate) -> StatusSnapshot {
    let days_passed = (today - last).num_days();
    let days_remaining = MAINTENANCE_INTERVAL_DAYS - days_passed;

    let status = if days_remaining < 0 {
        MaintenanceStatus::Overdue
    } else if days_remaining < WARNING_THRESHOLD_DAYS {
        MaintenanceStatus::Warning
    } else {
        MaintenanceStatus::Good
    };

    StatusSnapshot {
        days_passed,
        days_remaining,
        status,
    }
}
