//! Dashboard and chart views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::equipment::{Equipment, EquipmentClass};
use crate::{
    error::{AppError, AppResult},
    status::{MaintenanceStatus, StatusSnapshot},
};

/// Status filter applied to the dashboard list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Good,
    Warning,
    Overdue,
}

impl StatusFilter {
    pub fn admits(&self, status: MaintenanceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Good => status == MaintenanceStatus::Good,
            StatusFilter::Warning => status == MaintenanceStatus::Warning,
            StatusFilter::Overdue => status == MaintenanceStatus::Overdue,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "good" => Ok(StatusFilter::Good),
            "warning" => Ok(StatusFilter::Warning),
            "overdue" => Ok(StatusFilter::Overdue),
            _ => Err(format!("Invalid status filter: {}", s)),
        }
    }
}

/// Column the dashboard list is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Id,
    /// Last maintenance date
    Date,
    Status,
    DaysPassed,
    DaysRemaining,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "id" => Ok(SortKey::Id),
            "date" | "last_maintenance_date" => Ok(SortKey::Date),
            "status" => Ok(SortKey::Status),
            "days_passed" => Ok(SortKey::DaysPassed),
            "days_remaining" => Ok(SortKey::DaysRemaining),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Query parameters for the dashboard summary
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    /// Equipment class (ARMGC, QC). All classes when omitted.
    pub class: Option<String>,
    /// all (default), good, warning, overdue
    pub status: Option<String>,
    /// id (default), date, status, days_passed, days_remaining
    pub sort: Option<String>,
    /// asc (default) or desc
    pub order: Option<String>,
    /// Evaluate as of this day (YYYY-MM-DD) instead of today
    pub as_of: Option<String>,
}

impl SummaryQuery {
    /// Requested ordering of the unit list. An `order` without `sort` applies to the id.
    pub fn sorting(&self) -> AppResult<Option<(SortKey, SortOrder)>> {
        if self.sort.is_none() && self.order.is_none() {
            return Ok(None);
        }
        let key: SortKey = self
            .sort
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(AppError::Validation)?;
        let order: SortOrder = self
            .order
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(AppError::Validation)?;
        Ok(Some((key, order)))
    }
}

/// Query parameters for the elapsed-days chart
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ElapsedQuery {
    /// Equipment class (ARMGC, QC). All classes when omitted.
    pub class: Option<String>,
    /// Evaluate as of this day (YYYY-MM-DD) instead of today
    pub as_of: Option<String>,
}

/// One dashboard line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EquipmentStatus {
    pub id: i32,
    /// 3-digit unit code
    pub code: String,
    pub class: EquipmentClass,
    pub last_maintenance_date: NaiveDate,
    pub next_maintenance_date: NaiveDate,
    pub status: MaintenanceStatus,
    pub days_passed: i64,
    pub days_remaining: i64,
}

impl EquipmentStatus {
    pub fn new(equipment: &Equipment, snapshot: StatusSnapshot) -> Self {
        Self {
            id: equipment.id,
            code: equipment.code(),
            class: equipment.class,
            last_maintenance_date: equipment.last_maintenance_date,
            next_maintenance_date: equipment.next_maintenance_date,
            status: snapshot.status,
            days_passed: snapshot.days_passed,
            days_remaining: snapshot.days_remaining,
        }
    }
}

/// Dashboard summary: counts over the whole class plus the filtered list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentSummary {
    pub class: Option<EquipmentClass>,
    pub as_of: NaiveDate,
    pub total: usize,
    pub good: usize,
    pub warning: usize,
    pub overdue: usize,
    pub units: Vec<EquipmentStatus>,
}

/// One bar of the elapsed-days chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ElapsedEntry {
    pub id: i32,
    pub days_passed: i64,
    /// Days beyond the maintenance interval, 0 when not overdue
    pub overdue_days: i64,
}
