//! Maintenance history ledger repository
//!
//! Every mutation runs in one transaction together with the recomputation of
//! the derived dates of each unit whose record set changed.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use super::equipment::EquipmentRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        import_report::{ImportCandidate, ImportReport},
        maintenance::{DatedRecord, LedgerChange, MaintenanceRecord, RecordOutcome},
    },
};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: Pool<Sqlite>,
}

impl HistoryRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Append a record and refresh the unit's dates
    pub async fn add(&self, equipment_id: i32, date: NaiveDate) -> AppResult<RecordOutcome> {
        let mut tx = self.pool.begin().await?;

        if !EquipmentRepository::exists(&mut *tx, equipment_id).await? {
            return Err(AppError::EquipmentNotFound(equipment_id));
        }

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_history (equipment_id, maintenance_date)
            VALUES (?, ?)
            RETURNING *
            "#,
        )
        .bind(equipment_id)
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        EquipmentRepository::recompute_dates(&mut *tx, equipment_id).await?;
        let equipment = EquipmentRepository::fetch(&mut *tx, equipment_id).await?;

        tx.commit().await?;
        Ok(RecordOutcome { record, equipment })
    }

    /// Move every record of `old_id` on `date` to `new_id`
    pub async fn retarget(&self, old_id: i32, new_id: i32, date: NaiveDate) -> AppResult<LedgerChange> {
        let mut tx = self.pool.begin().await?;

        if !EquipmentRepository::exists(&mut *tx, new_id).await? {
            return Err(AppError::EquipmentNotFound(new_id));
        }

        let result = sqlx::query(
            r#"
            UPDATE maintenance_history
            SET equipment_id = ?
            WHERE equipment_id = ? AND maintenance_date = ?
            "#,
        )
        .bind(new_id)
        .bind(old_id)
        .bind(date)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No maintenance record for equipment {} on {}",
                old_id, date
            )));
        }

        let mut equipment = Vec::new();
        for id in BTreeSet::from([old_id, new_id]) {
            EquipmentRepository::recompute_dates(&mut *tx, id).await?;
            equipment.push(EquipmentRepository::fetch(&mut *tx, id).await?);
        }

        tx.commit().await?;
        Ok(LedgerChange {
            affected: result.rows_affected(),
            equipment,
        })
    }

    /// Remove every record of `equipment_id` on `date`
    pub async fn delete(&self, equipment_id: i32, date: NaiveDate) -> AppResult<LedgerChange> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM maintenance_history WHERE equipment_id = ? AND maintenance_date = ?",
        )
        .bind(equipment_id)
        .bind(date)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No maintenance record for equipment {} on {}",
                equipment_id, date
            )));
        }

        EquipmentRepository::recompute_dates(&mut *tx, equipment_id).await?;
        let equipment = EquipmentRepository::fetch(&mut *tx, equipment_id).await?;

        tx.commit().await?;
        Ok(LedgerChange {
            affected: result.rows_affected(),
            equipment: vec![equipment],
        })
    }

    /// All records of one unit, newest first
    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<MaintenanceRecord>> {
        let rows = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_history
            WHERE equipment_id = ?
            ORDER BY maintenance_date DESC, id DESC
            "#,
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Records dated on or after `since`, joined with the unit class
    pub async fn since(&self, since: NaiveDate) -> AppResult<Vec<DatedRecord>> {
        let rows = sqlx::query_as::<_, DatedRecord>(
            r#"
            SELECT e.type, m.equipment_id, m.maintenance_date
            FROM maintenance_history m
            JOIN equipment e ON m.equipment_id = e.id
            WHERE m.maintenance_date >= ?
            ORDER BY m.maintenance_date, e.type, m.equipment_id
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Records of exactly one day, by class descending then unit id
    pub async fn on_date(&self, date: NaiveDate) -> AppResult<Vec<DatedRecord>> {
        let rows = sqlx::query_as::<_, DatedRecord>(
            r#"
            SELECT e.type, m.equipment_id, m.maintenance_date
            FROM maintenance_history m
            JOIN equipment e ON m.equipment_id = e.id
            WHERE m.maintenance_date = ?
            ORDER BY e.type DESC, m.equipment_id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Total number of rows in the ledger
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_history")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Copy a batch of external records into the ledger.
    ///
    /// A record already present for the same (unit, date) is skipped, one
    /// for an unregistered unit is rejected. Each affected unit is
    /// recomputed once, after the whole batch, and the batch commits as one.
    pub async fn import_batch(&self, candidates: &[ImportCandidate]) -> AppResult<ImportReport> {
        let mut tx = self.pool.begin().await?;
        let mut report = ImportReport::default();
        let mut affected = BTreeSet::new();

        for candidate in candidates {
            if !EquipmentRepository::exists(&mut *tx, candidate.equipment_id).await? {
                tracing::warn!(
                    "Import: equipment {} is not registered, record of {} rejected",
                    candidate.equipment_id,
                    candidate.maintenance_date
                );
                report.rejected += 1;
                report.warnings.push(format!(
                    "Unknown equipment {} ({})",
                    candidate.equipment_id, candidate.maintenance_date
                ));
                continue;
            }

            let duplicates: i64 = sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM maintenance_history
                WHERE equipment_id = ? AND maintenance_date = ?
                "#,
            )
            .bind(candidate.equipment_id)
            .bind(candidate.maintenance_date)
            .fetch_one(&mut *tx)
            .await?;

            if duplicates > 0 {
                report.skipped += 1;
                continue;
            }

            sqlx::query("INSERT INTO maintenance_history (equipment_id, maintenance_date) VALUES (?, ?)")
                .bind(candidate.equipment_id)
                .bind(candidate.maintenance_date)
                .execute(&mut *tx)
                .await?;
            report.imported += 1;
            affected.insert(candidate.equipment_id);
        }

        for &id in &affected {
            EquipmentRepository::recompute_dates(&mut *tx, id).await?;
        }

        tx.commit().await?;
        report.recomputed = affected.into_iter().collect();
        Ok(report)
    }
}
