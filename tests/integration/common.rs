//! Shared helpers for integration tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use acsp_server::{
    api,
    db,
    models::equipment::{CatalogEntry, EquipmentClass},
    repository::Repository,
    services::Services,
    AppState,
};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry { id: 211, class: EquipmentClass::Armgc },
        CatalogEntry { id: 212, class: EquipmentClass::Armgc },
        CatalogEntry { id: 213, class: EquipmentClass::Armgc },
        CatalogEntry { id: 271, class: EquipmentClass::Qc },
    ]
}

/// Services over a fresh store seeded on 2024-01-01
pub async fn services() -> Services {
    let pool = db::memory_pool().await.expect("in-memory store");
    let services = Services::new(Repository::new(pool));
    services
        .equipment
        .seed_catalog(&catalog(), day(2024, 1, 1))
        .await
        .expect("seed catalog");
    services
}

pub async fn app() -> (Router, Services) {
    let services = services().await;
    let state = AppState {
        services: Arc::new(services.clone()),
    };
    (api::router(state), services)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}
