//! ACSP Server - Crane Maintenance Scheduler
//!
//! Serves the maintenance ledger and status views as a REST API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use acsp_server::{
    api,
    config::AppConfig,
    db, logging,
    repository::Repository,
    services::Services,
    today, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    logging::init(&config.logging);

    tracing::info!("Starting ACSP Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    db::migrate(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Provision the fleet catalog (no-op when already in place)
    let report = services
        .equipment
        .seed_catalog(&config.catalog.entries(), today())
        .await
        .context("Failed to seed equipment catalog")?;
    tracing::info!(
        "Equipment catalog ready ({} inserted, {} reclassified)",
        report.inserted,
        report.reclassified
    );

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        services: Arc::new(services),
    };

    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
