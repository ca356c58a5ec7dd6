//! Print the layout and newest rows of the legacy store.
//!
//! No arguments. Exits non-zero only when the legacy store cannot be reached.

use std::process::ExitCode;

use anyhow::Context;

use acsp_server::{config::AppConfig, logging, services::legacy::SqliteLegacySource};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging);

    let overview = match SqliteLegacySource::open(&config.legacy.database_url).await {
        Ok(source) => source.overview().await,
        Err(e) => Err(e),
    };
    let overview = match overview {
        Ok(overview) => overview,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("=== Tables ===");
    for table in &overview.tables {
        println!("- {}", table);
    }

    match overview.equipment_count {
        Some(count) => println!("\nequipment: {} row(s)", count),
        None => println!("\nTable 'equipment' not found!"),
    }

    match overview.history_count {
        Some(count) => {
            println!("maintenance_history: {} row(s)", count);
            println!("\n=== Newest maintenance_history rows ===");
            for row in &overview.recent_history {
                println!("{:03}  {}", row.equipment_id, row.maintenance_date);
            }
        }
        None => println!("Table 'maintenance_history' not found!"),
    }

    Ok(ExitCode::SUCCESS)
}
