//! Business logic services

pub mod dashboard;
pub mod equipment;
pub mod history;
pub mod legacy;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub history: history::HistoryService,
    pub dashboard: dashboard::DashboardService,
    pub legacy: legacy::LegacyService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            history: history::HistoryService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            legacy: legacy::LegacyService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
