//! Equipment registry service

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::equipment::{CatalogEntry, Equipment, EquipmentClass, SeedReport},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Units of one class (all classes when `None`) with their current dates
    pub async fn list(&self, class: Option<EquipmentClass>) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(class).await
    }

    /// Single unit, used for class lookup
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Provision the fixed catalog. Running it again with the same catalog changes nothing.
    pub async fn seed_catalog(&self, catalog: &[CatalogEntry], today: NaiveDate) -> AppResult<SeedReport> {
        let report = self.repository.equipment.seed(catalog, today).await?;
        if report.inserted > 0 || report.reclassified > 0 {
            tracing::info!(
                "Catalog seeded: {} unit(s) provisioned, {} reclassified",
                report.inserted,
                report.reclassified
            );
        }
        Ok(report)
    }
}
