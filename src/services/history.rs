//! Maintenance history service

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{
        equipment::EquipmentClass,
        maintenance::{
            parse_date, CalendarDay, ClassGroup, DatedRecord, LedgerChange, MaintenanceRecord,
            RecordOutcome,
        },
    },
    repository::Repository,
};

/// Default look-back window of the calendar view
pub const CALENDAR_WINDOW_DAYS: i64 = 60;

#[derive(Clone)]
pub struct HistoryService {
    repository: Repository,
}

impl HistoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record a completed maintenance
    pub async fn add_record(&self, equipment_id: i32, date: &str) -> AppResult<RecordOutcome> {
        let date = parse_date(date, "maintenance date")?;
        let outcome = self.repository.history.add(equipment_id, date).await?;
        tracing::info!(
            "Maintenance recorded for unit {} on {} (next due {})",
            equipment_id,
            date,
            outcome.equipment.next_maintenance_date
        );
        Ok(outcome)
    }

    /// Move the records of `old_equipment_id` on `date` to `new_equipment_id`
    pub async fn edit_record(
        &self,
        old_equipment_id: i32,
        new_equipment_id: i32,
        date: &str,
    ) -> AppResult<LedgerChange> {
        let date = parse_date(date, "maintenance date")?;
        let change = self
            .repository
            .history
            .retarget(old_equipment_id, new_equipment_id, date)
            .await?;
        tracing::info!(
            "Moved {} record(s) of {} from unit {} to unit {}",
            change.affected,
            date,
            old_equipment_id,
            new_equipment_id
        );
        Ok(change)
    }

    /// Remove the records of `equipment_id` on `date`
    pub async fn delete_record(&self, equipment_id: i32, date: &str) -> AppResult<LedgerChange> {
        let date = parse_date(date, "maintenance date")?;
        let change = self.repository.history.delete(equipment_id, date).await?;
        tracing::info!(
            "Deleted {} record(s) of unit {} on {}",
            change.affected,
            equipment_id,
            date
        );
        Ok(change)
    }

    /// Full history of one unit, newest first
    pub async fn list_records(&self, equipment_id: i32) -> AppResult<Vec<MaintenanceRecord>> {
        // Unknown units are an error rather than an empty list
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.history.list_for_equipment(equipment_id).await
    }

    /// Units maintained on each day since `since`, grouped by class
    pub async fn history_by_date(&self, since: NaiveDate) -> AppResult<Vec<CalendarDay>> {
        let rows = self.repository.history.since(since).await?;
        Ok(group_by_date(rows))
    }

    /// Every record of one day, by class descending then unit id
    pub async fn history_for_date(&self, date: &str) -> AppResult<Vec<DatedRecord>> {
        let date = parse_date(date, "date")?;
        self.repository.history.on_date(date).await
    }
}

/// Group dated records into calendar days, one group per class.
///
/// Unit ids are unique and ascending within a group.
pub fn group_by_date(rows: Vec<DatedRecord>) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, BTreeMap<EquipmentClass, BTreeSet<i32>>> = BTreeMap::new();

    for row in rows {
        days.entry(row.maintenance_date)
            .or_default()
            .entry(row.class)
            .or_default()
            .insert(row.equipment_id);
    }

    days.into_iter()
        .map(|(date, groups)| CalendarDay {
            date,
            groups: groups
                .into_iter()
                .map(|(class, ids)| ClassGroup {
                    class,
                    unit_ids: ids.into_iter().collect(),
                })
                .collect(),
        })
        .collect()
}
