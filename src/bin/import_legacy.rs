//! Import maintenance history from the legacy store.
//!
//! No arguments: the legacy store URL comes from `legacy.database_url`
//! (or `LEGACY_DATABASE_URL`). Exits non-zero only when the legacy store
//! cannot be reached.

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

    println!("Checking access to: {}", config.legacy.database_url);
    let source = match SqliteLegacySource::open(&config.legacy.database_url).await {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot open legacy store ({}). Check network connection or path.", e);
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

    let report = match services.legacy.import_history(&source).await {
        Ok(report) => report,
        Err(AppError::SourceUnavailable(e)) => {
            eprintln!("Error reading legacy store: {}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("Import failed"),
    };

    println!("{}", "-".repeat(30));
    println!("Import Complete.");
    println!("Imported: {}", report.imported);
    println!("Skipped (Duplicate): {}", report.skipped);
    println!("Rejected: {}", report.rejected);
    println!("Recalculated units: {}", report.recomputed.len());
    for warning in &report.warnings {
        println!("  - {}", warning);
    }
    println!("{}", "-".repeat(30));

    Ok(ExitCode::SUCCESS)
}
