//! Configuration management for the ACSP server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::equipment::{CatalogEntry, EquipmentClass};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Inclusive range of unit ids sharing one class
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogGroup {
    pub class: EquipmentClass,
    pub first: i32,
    pub last: i32,
}

/// The fixed fleet catalog
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub groups: Vec<CatalogGroup>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LegacyConfig {
    /// URL of the legacy SQLite store
    pub database_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub legacy: LegacyConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. ACSP_SERVER__PORT=9000)
            .add_source(
                Environment::with_prefix("ACSP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("legacy.database_url", env::var("LEGACY_DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl CatalogConfig {
    /// Expand the configured groups into (unit id, class) pairs
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.groups
            .iter()
            .flat_map(|group| {
                (group.first..=group.last).map(move |id| CatalogEntry {
                    id,
                    class: group.class,
                })
            })
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://acsp.db".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let armgc_blocks = [211, 221, 231, 241, 251, 261];
        let mut groups: Vec<CatalogGroup> = armgc_blocks
            .iter()
            .map(|&first| CatalogGroup {
                class: EquipmentClass::Armgc,
                first,
                last: first + 5,
            })
            .collect();
        groups.push(CatalogGroup {
            class: EquipmentClass::Qc,
            first: 271,
            last: 272,
        });
        Self { groups }
    }
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://pms.db".to_string(),
        }
    }
}
