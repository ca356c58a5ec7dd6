//! ACSP crane maintenance scheduler
//!
//! Tracks periodic maintenance of a fixed crane fleet: a ledger of completed
//! maintenance events, the derived last/next dates of every unit, and status
//! views served as a REST JSON API.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;
pub mod status;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

/// Calendar day at the site, used as "today" for classification and seeding
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
