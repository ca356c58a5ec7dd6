//! Adopt legacy maintenance dates for units without local history.
//!
//! No arguments. Exits non-zero only when the legacy store cannot be reached.

use std::process::ExitCode;

use anyhow::Context;

use acsp_server::{
    config::AppConfig,
    db, logging,
    repository::Repository,
    services::{legacy::SqliteLegacySource, Services},
    today, AppError,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging);

    println!("Syncing equipment data from: {}", config.legacy.database_url);
    let source = match SqliteLegacySource::open(&config.legacy.database_url).await {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot access legacy store ({}).", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let pool = db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    db::migrate(&pool).await.context("Failed to run database migrations")?;
    let services = Services::new(Repository::new(pool));
    services
        .equipment
        .seed_catalog(&config.catalog.entries(), today())
        .await
        .context("Failed to seed equipment catalog")?;

    let report = match services.legacy.sync_equipment(&source).await {
        Ok(report) => report,
        Err(AppError::SourceUnavailable(e)) => {
            eprintln!("Error reading legacy store: {}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("Sync failed"),
    };

    println!("{}", "-".repeat(30));
    println!("Sync Complete.");
    println!("Updated: {} equipment records", report.updated);
    println!("Skipped: {}", report.skipped);
    for warning in &report.warnings {
        println!("  - {}", warning);
    }
    println!("{}", "-".repeat(30));

    Ok(ExitCode::SUCCESS)
}
