//! API integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{app, day};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = app().await;

    let (status, body) = send_get(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send_get(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_list_equipment_by_class() {
    let (app, _) = app().await;

    let (status, body) = send_get(&app, "/api/v1/equipment?class=QC").await;
    assert_eq!(status, StatusCode::OK);
    let units = body.as_array().unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0]["id"], 271);
    assert_eq!(units[0]["class"], "QC");
    assert_eq!(units[0]["last_maintenance_date"], "2024-01-01");
    assert_eq!(units[0]["next_maintenance_date"], "2024-02-15");

    let (status, body) = send_get(&app, "/api/v1/equipment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_unknown_class_is_validation_error() {
    let (app, _) = app().await;

    let (status, body) = send_get(&app, "/api/v1/equipment?class=RTG").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, _) = send_get(&app, "/api/v1/dashboard?class=RTG").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_equipment() {
    let (app, _) = app().await;

    let (status, body) = send_get(&app, "/api/v1/equipment/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchEquipment");
}

#[tokio::test]
async fn test_add_record() {
    let (app, _) = app().await;

    let (status, body) = crate::common::send(
        &app,
        Method::POST,
        "/api/v1/maintenance/history",
        Some(json!({ "equipment_id": 211, "date": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["record"]["equipment_id"], 211);
    assert_eq!(body["equipment"]["last_maintenance_date"], "2024-01-01");
    assert_eq!(body["equipment"]["next_maintenance_date"], "2024-02-15");
}

#[tokio::test]
async fn test_complete_maintenance_on_unit() {
    let (app, services) = app().await;

    let (status, body) = crate::common::send(
        &app,
        Method::POST,
        "/api/v1/equipment/212/maintenance",
        Some(json!({ "date": "2024-01-20" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["equipment"]["next_maintenance_date"], "2024-03-05");

    let (status, body) = send_get(&app, "/api/v1/equipment/212/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(
        services.equipment.get_by_id(212).await.unwrap().last_maintenance_date,
        day(2024, 1, 20)
    );
}

#[tokio::test]
async fn test_malformed_date_rejected() {
    let (app, services) = app().await;

    let (status, body) = crate::common::send(
        &app,
        Method::POST,
        "/api/v1/maintenance/history",
        Some(json!({ "equipment_id": 211, "date": "01/02/2024" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert!(services.history.list_records(211).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_then_list_day() {
    let (app, _) = app().await;
    crate::common::send(
        &app,
        Method::POST,
        "/api/v1/maintenance/history",
        Some(json!({ "equipment_id": 211, "date": "2024-01-01" })),
    )
    .await;

    let (status, body) = crate::common::send(
        &app,
        Method::PUT,
        "/api/v1/maintenance/history",
        Some(json!({ "old_equipment_id": 211, "new_equipment_id": 212, "date": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);
    assert_eq!(body["equipment"].as_array().unwrap().len(), 2);

    let (status, body) = send_get(&app, "/api/v1/maintenance/history?date=2024-01-01").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["equipment_id"], 212);
    assert_eq!(rows[0]["class"], "ARMGC");
}

#[tokio::test]
async fn test_edit_missing_record_is_not_found() {
    let (app, _) = app().await;

    let (status, body) = crate::common::send(
        &app,
        Method::PUT,
        "/api/v1/maintenance/history",
        Some(json!({ "old_equipment_id": 211, "new_equipment_id": 212, "date": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
async fn test_delete_record() {
    let (app, _) = app().await;
    for date in ["2024-01-01", "2024-02-01"] {
        crate::common::send(
            &app,
            Method::POST,
            "/api/v1/maintenance/history",
            Some(json!({ "equipment_id": 211, "date": date })),
        )
        .await;
    }

    let (status, body) = crate::common::send(
        &app,
        Method::DELETE,
        "/api/v1/maintenance/history?equipment_id=211&date=2024-02-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["equipment"][0]["last_maintenance_date"], "2024-01-01");
    assert_eq!(body["equipment"][0]["next_maintenance_date"], "2024-02-15");

    let (status, _) = crate::common::send(
        &app,
        Method::DELETE,
        "/api/v1/maintenance/history?equipment_id=211&date=2024-02-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let (app, _) = app().await;
    crate::common::send(
        &app,
        Method::POST,
        "/api/v1/maintenance/history",
        Some(json!({ "equipment_id": 211, "date": "2024-02-20" })),
    )
    .await;

    let (status, body) = send_get(
        &app,
        "/api/v1/dashboard?class=ARMGC&status=overdue&as_of=2024-03-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["overdue"], 2);
    assert_eq!(body["warning"], 0);
    let units = body["units"].as_array().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0]["code"], "212");
    assert_eq!(units[0]["status"], "overdue");
    assert_eq!(units[0]["days_passed"], 60);
    assert_eq!(units[0]["days_remaining"], -15);

    let (status, body) = send_get(
        &app,
        "/api/v1/dashboard?sort=days_remaining&order=desc&as_of=2024-03-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["units"][0]["id"], 211);

    let (status, body) = send_get(&app, "/api/v1/dashboard?order=desc&as_of=2024-03-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["units"][0]["id"], 271);
    assert_eq!(body["units"][3]["id"], 211);

    let (status, _) = send_get(&app, "/api/v1/dashboard?sort=name").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_get(&app, "/api/v1/dashboard?order=down").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_elapsed_series() {
    let (app, _) = app().await;

    let (status, body) = send_get(&app, "/api/v1/dashboard/elapsed?class=ARMGC&as_of=2024-01-31").await;
    assert_eq!(status, StatusCode::OK);
    let series = body.as_array().unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0]["id"], 211);
    assert_eq!(series[0]["days_passed"], 30);
    assert_eq!(series[0]["overdue_days"], 0);
}

#[tokio::test]
async fn test_calendar() {
    let (app, _) = app().await;
    for (id, date) in [(211, "2024-01-05"), (271, "2024-01-05"), (212, "2024-01-09")] {
        crate::common::send(
            &app,
            Method::POST,
            "/api/v1/maintenance/history",
            Some(json!({ "equipment_id": id, "date": date })),
        )
        .await;
    }

    let (status, body) = send_get(&app, "/api/v1/maintenance/calendar?since=2024-01-01").await;
    assert_eq!(status, StatusCode::OK);
    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-01-05");
    assert_eq!(days[0]["groups"][0]["class"], "ARMGC");
    assert_eq!(days[0]["groups"][0]["unit_ids"], json!([211]));
    assert_eq!(days[0]["groups"][1]["class"], "QC");
    assert_eq!(days[0]["groups"][1]["unit_ids"], json!([271]));
}

#[tokio::test]
async fn test_openapi_document() {
    let (app, _) = app().await;

    let (status, body) = send_get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/dashboard"].is_object());
}

async fn send_get(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    crate::common::send(app, Method::GET, uri, None).await
}
