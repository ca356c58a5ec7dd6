//! Legacy ledger bridge
//!
//! Reconciles an external store shaped like ours (an `equipment` and a
//! `maintenance_history` table) into the local ledger.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        import_report::{
            ImportCandidate, ImportReport, LegacyEquipmentRow, LegacyHistoryRow, LegacyOverview,
            SyncReport,
        },
        maintenance::parse_date,
    },
    repository::Repository,
};

/// Read access to the external ledger
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LegacySource: Send + Sync {
    async fn fetch_history(&self) -> AppResult<Vec<LegacyHistoryRow>>;

    async fn fetch_equipment(&self) -> AppResult<Vec<LegacyEquipmentRow>>;
}

/// Legacy store kept in a SQLite file, opened read-only
pub struct SqliteLegacySource {
    pool: Pool<Sqlite>,
}

impl SqliteLegacySource {
    /// Open the legacy store. An unreachable or missing file is `SourceUnavailable`.
    pub async fn open(url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::SourceUnavailable(format!("{}: {}", url, e)))?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| AppError::SourceUnavailable(format!("{}: {}", url, e)))?;

        Ok(Self { pool })
    }

    /// Tables, row counts and newest history rows of the legacy store
    pub async fn overview(&self) -> AppResult<LegacyOverview> {
        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(unavailable)?;

        let mut overview = LegacyOverview {
            tables,
            ..Default::default()
        };

        if overview.tables.iter().any(|t| t == "equipment") {
            overview.equipment_count = Some(
                sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(unavailable)?,
            );
        }

        if overview.tables.iter().any(|t| t == "maintenance_history") {
            overview.history_count = Some(
                sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_history")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(unavailable)?,
            );
            overview.recent_history = sqlx::query_as::<_, LegacyHistoryRow>(
                r#"
                SELECT equipment_id, CAST(maintenance_date AS TEXT) AS maintenance_date
                FROM maintenance_history
                WHERE equipment_id IS NOT NULL AND maintenance_date IS NOT NULL
                ORDER BY rowid DESC
                LIMIT 5
                "#,
            )
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;
        }

        Ok(overview)
    }
}

fn unavailable(e: sqlx::Error) -> AppError {
    AppError::SourceUnavailable(e.to_string())
}

#[async_trait]
impl LegacySource for SqliteLegacySource {
    async fn fetch_history(&self) -> AppResult<Vec<LegacyHistoryRow>> {
        sqlx::query_as::<_, LegacyHistoryRow>(
            r#"
            SELECT equipment_id, CAST(maintenance_date AS TEXT) AS maintenance_date
            FROM maintenance_history
            WHERE equipment_id IS NOT NULL AND maintenance_date IS NOT NULL
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)
    }

    async fn fetch_equipment(&self) -> AppResult<Vec<LegacyEquipmentRow>> {
        sqlx::query_as::<_, LegacyEquipmentRow>(
            r#"
            SELECT id,
                   CAST(last_maintenance_date AS TEXT) AS last_maintenance_date,
                   CAST(next_maintenance_date AS TEXT) AS next_maintenance_date
            FROM equipment
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)
    }
}

#[derive(Clone)]
pub struct LegacyService {
    repository: Repository,
}

impl LegacyService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Import every legacy history record not already in the local ledger.
    pub async fn import_history(&self, source: &dyn LegacySource) -> AppResult<ImportReport> {
        let rows = source.fetch_history().await?;
        tracing::info!("Legacy history: {} record(s) found", rows.len());

        let mut candidates = Vec::with_capacity(rows.len());
        let mut warnings = Vec::new();
        for row in rows {
            match parse_date(&row.maintenance_date, "maintenance date") {
                Ok(maintenance_date) => candidates.push(ImportCandidate {
                    equipment_id: row.equipment_id,
                    maintenance_date,
                }),
                Err(e) => {
                    tracing::warn!("Import: record of unit {} rejected: {}", row.equipment_id, e);
                    warnings.push(format!("Unit {}: {}", row.equipment_id, e));
                }
            }
        }

        let mut report = self.repository.history.import_batch(&candidates).await?;
        report.rejected += warnings.len() as u64;
        report.warnings.extend(warnings);

        tracing::info!(
            "Legacy import complete: {} imported, {} skipped, {} rejected",
            report.imported,
            report.skipped,
            report.rejected
        );
        Ok(report)
    }

    /// Adopt legacy maintenance dates for units that have no local history yet.
    pub async fn sync_equipment(&self, source: &dyn LegacySource) -> AppResult<SyncReport> {
        let rows = source.fetch_equipment().await?;

        let mut dates = Vec::with_capacity(rows.len());
        let mut malformed = SyncReport::default();
        for row in rows {
            let parsed = row
                .last_maintenance_date
                .as_deref()
                .map(|raw| parse_date(raw, "last maintenance date"));
            match parsed {
                Some(Ok(last)) => dates.push((row.id, last)),
                Some(Err(e)) => {
                    malformed.skipped += 1;
                    malformed.warnings.push(format!("Unit {}: {}", row.id, e));
                }
                None => {
                    malformed.skipped += 1;
                    malformed
                        .warnings
                        .push(format!("Unit {}: no last maintenance date", row.id));
                }
            }
        }

        let mut report = self.repository.equipment.adopt_legacy_dates(&dates).await?;
        report.skipped += malformed.skipped;
        report.warnings.extend(malformed.warnings);

        tracing::info!(
            "Legacy sync complete: {} updated, {} skipped",
            report.updated,
            report.skipped
        );
        Ok(report)
    }
}
