//! Dashboard aggregation service
//!
//! Read-only: classification is recomputed on every call from the stored
//! last maintenance date and the evaluation day.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{
        dashboard::{ElapsedEntry, EquipmentStatus, EquipmentSummary, SortKey, SortOrder, StatusFilter},
        equipment::{Equipment, EquipmentClass},
    },
    repository::Repository,
    status::{classify, MaintenanceStatus, MAINTENANCE_INTERVAL_DAYS},
};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Status counts for a class and the (optionally filtered and sorted) unit list
    pub async fn summary_counts(
        &self,
        class: Option<EquipmentClass>,
        status: StatusFilter,
        sort: Option<(SortKey, SortOrder)>,
        today: NaiveDate,
    ) -> AppResult<EquipmentSummary> {
        let units = self.repository.equipment.list(class).await?;
        Ok(summarize(class, &units, status, sort, today))
    }

    /// Days since last maintenance for every unit of a class, by id
    pub async fn elapsed_series(
        &self,
        class: Option<EquipmentClass>,
        today: NaiveDate,
    ) -> AppResult<Vec<ElapsedEntry>> {
        let units = self.repository.equipment.list(class).await?;
        Ok(elapsed(&units, today))
    }
}

/// Classify `units` as of `today`, count every band, then filter and sort.
pub fn summarize(
    class: Option<EquipmentClass>,
    units: &[Equipment],
    filter: StatusFilter,
    sort: Option<(SortKey, SortOrder)>,
    today: NaiveDate,
) -> EquipmentSummary {
    let rows: Vec<EquipmentStatus> = units
        .iter()
        .map(|unit| EquipmentStatus::new(unit, classify(unit.last_maintenance_date, today)))
        .collect();

    let count = |band: MaintenanceStatus| rows.iter().filter(|r| r.status == band).count();
    let good = count(MaintenanceStatus::Good);
    let warning = count(MaintenanceStatus::Warning);
    let overdue = count(MaintenanceStatus::Overdue);
    let total = rows.len();

    let mut units: Vec<EquipmentStatus> = rows.into_iter().filter(|r| filter.admits(r.status)).collect();
    if let Some((key, order)) = sort {
        // sort_by is stable: ties keep their relative order in both directions
        units.sort_by(|a, b| {
            let ord = compare(key, a, b);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    EquipmentSummary {
        class,
        as_of: today,
        total,
        good,
        warning,
        overdue,
        units,
    }
}

fn compare(key: SortKey, a: &EquipmentStatus, b: &EquipmentStatus) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Date => a.last_maintenance_date.cmp(&b.last_maintenance_date),
        SortKey::Status => a.status.cmp(&b.status),
        SortKey::DaysPassed => a.days_passed.cmp(&b.days_passed),
        SortKey::DaysRemaining => a.days_remaining.cmp(&b.days_remaining),
    }
}

/// Elapsed-days series, ordered by unit id.
pub fn elapsed(units: &[Equipment], today: NaiveDate) -> Vec<ElapsedEntry> {
    let mut series: Vec<ElapsedEntry> = units
        .iter()
        .map(|unit| {
            let days_passed = classify(unit.last_maintenance_date, today).days_passed;
            ElapsedEntry {
                id: unit.id,
                days_passed,
                overdue_days: (days_passed - MAINTENANCE_INTERVAL_DAYS).max(0),
            }
        })
        .collect();
    series.sort_by_key(|e| e.id);
    series
}
