//! Equipment registry repository

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CatalogEntry, Equipment, EquipmentClass, SeedReport},
        import_report::SyncReport,
    },
    status::next_due,
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Sqlite>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List units, optionally restricted to one class, ordered by id
    pub async fn list(&self, class: Option<EquipmentClass>) -> AppResult<Vec<Equipment>> {
        let rows = match class {
            Some(class) => {
                sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE type = ? ORDER BY id")
                    .bind(class)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Get a unit by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch(&mut conn, id).await
    }

    pub(crate) async fn fetch(conn: &mut SqliteConnection, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(AppError::EquipmentNotFound(id))
    }

    pub(crate) async fn exists(conn: &mut SqliteConnection, id: i32) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(count > 0)
    }

    /// Re-derive a unit's dates from its newest remaining record.
    ///
    /// Without any remaining record the stored dates are left as they are.
    pub(crate) async fn recompute_dates(
        conn: &mut SqliteConnection,
        id: i32,
    ) -> AppResult<Option<NaiveDate>> {
        let latest: Option<NaiveDate> = sqlx::query_scalar(
            "SELECT MAX(maintenance_date) FROM maintenance_history WHERE equipment_id = ?",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

        match latest {
            Some(last) => {
                sqlx::query(
                    r#"
                    UPDATE equipment
                    SET last_maintenance_date = ?, next_maintenance_date = ?
                    WHERE id = ?
                    "#,
                )
                .bind(last)
                .bind(next_due(last))
                .bind(id)
                .execute(&mut *conn)
                .await?;
                tracing::debug!("Equipment {} recomputed: last={} next={}", id, last, next_due(last));
            }
            None => {
                tracing::debug!("Equipment {} has no history left, dates kept", id);
            }
        }

        Ok(latest)
    }

    /// Provision missing catalog units and correct drifted classes.
    ///
    /// New units start as maintained on `today`. Dates of existing units are
    /// never touched.
    pub async fn seed(&self, catalog: &[CatalogEntry], today: NaiveDate) -> AppResult<SeedReport> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment")
            .fetch_all(&mut *tx)
            .await?;
        let mut classes: HashMap<i32, EquipmentClass> =
            existing.into_iter().map(|e| (e.id, e.class)).collect();

        let mut report = SeedReport::default();

        for entry in catalog {
            match classes.get(&entry.id) {
                None => {
                    sqlx::query(
                        r#"
                        INSERT INTO equipment (id, last_maintenance_date, next_maintenance_date, type)
                        VALUES (?, ?, ?, ?)
                        "#,
                    )
                    .bind(entry.id)
                    .bind(today)
                    .bind(next_due(today))
                    .bind(entry.class)
                    .execute(&mut *tx)
                    .await?;
                    report.inserted += 1;
                }
                Some(class) if *class != entry.class => {
                    sqlx::query("UPDATE equipment SET type = ? WHERE id = ?")
                        .bind(entry.class)
                        .bind(entry.id)
                        .execute(&mut *tx)
                        .await?;
                    report.reclassified += 1;
                }
                Some(_) => continue,
            }
            classes.insert(entry.id, entry.class);
        }

        tx.commit().await?;
        Ok(report)
    }

    /// Adopt legacy last-maintenance dates for units with no local history.
    pub async fn adopt_legacy_dates(&self, dates: &[(i32, NaiveDate)]) -> AppResult<SyncReport> {
        let mut tx = self.pool.begin().await?;
        let mut report = SyncReport::default();

        for &(id, last) in dates {
            let history: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_history WHERE equipment_id = ?")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
            if history > 0 {
                report.skipped += 1;
                report
                    .warnings
                    .push(format!("Equipment {} has local history, dates kept", id));
                continue;
            }

            let result = sqlx::query(
                r#"
                UPDATE equipment
                SET last_maintenance_date = ?, next_maintenance_date = ?
                WHERE id = ?
                "#,
            )
            .bind(last)
            .bind(next_due(last))
            .bind(id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() > 0 {
                report.updated += 1;
            } else {
                report.skipped += 1;
                report.warnings.push(format!("Equipment {} is not registered", id));
            }
        }

        tx.commit().await?;
        Ok(report)
    }
}
