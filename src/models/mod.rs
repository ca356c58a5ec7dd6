//! Data models for ACSP

pub mod dashboard;
pub mod equipment;
pub mod import_report;
pub mod maintenance;

// Re-export commonly used types
pub use dashboard::{ElapsedEntry, EquipmentStatus, EquipmentSummary, SortKey, SortOrder, StatusFilter};
pub use equipment::{CatalogEntry, Equipment, EquipmentClass, SeedReport};
pub use import_report::{ImportReport, SyncReport};
pub use maintenance::{CalendarDay, ClassGroup, DatedRecord, LedgerChange, MaintenanceRecord};
