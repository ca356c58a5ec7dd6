//! Repository layer for database operations

pub mod equipment;
pub mod history;

use sqlx::{Pool, Sqlite};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub equipment: equipment::EquipmentRepository,
    pub history: history::HistoryRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            history: history::HistoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
