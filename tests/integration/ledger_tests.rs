//! Ledger scenarios through the service layer

use acsp_server::{
    models::{
        dashboard::{SortKey, SortOrder, StatusFilter},
        equipment::EquipmentClass,
    },
    status::{next_due, MaintenanceStatus},
    AppError,
};

use crate::common::{catalog, day, services};

#[tokio::test]
async fn test_add_record_on_seed_day() {
    let services = services().await;

    let outcome = services.history.add_record(211, "2024-01-01").await.unwrap();
    assert_eq!(outcome.equipment.last_maintenance_date, day(2024, 1, 1));
    assert_eq!(outcome.equipment.next_maintenance_date, day(2024, 2, 15));
}

#[tokio::test]
async fn test_delete_recomputes_from_remaining_max() {
    let services = services().await;
    services.history.add_record(211, "2024-01-01").await.unwrap();
    services.history.add_record(211, "2024-02-01").await.unwrap();
    assert_eq!(
        services.equipment.get_by_id(211).await.unwrap().last_maintenance_date,
        day(2024, 2, 1)
    );

    services.history.delete_record(211, "2024-02-01").await.unwrap();

    let unit = services.equipment.get_by_id(211).await.unwrap();
    assert_eq!(unit.last_maintenance_date, day(2024, 1, 1));
    assert_eq!(unit.next_maintenance_date, day(2024, 2, 15));
}

#[tokio::test]
async fn test_edit_moves_record_between_units() {
    let services = services().await;
    services.history.add_record(211, "2024-01-01").await.unwrap();
    services.history.add_record(211, "2023-12-01").await.unwrap();
    services.history.add_record(212, "2023-12-10").await.unwrap();

    let change = services.history.edit_record(211, 212, "2024-01-01").await.unwrap();
    assert_eq!(change.affected, 1);

    let on_day = services.history.history_for_date("2024-01-01").await.unwrap();
    let ids: Vec<i32> = on_day.iter().map(|r| r.equipment_id).collect();
    assert_eq!(ids, vec![212]);

    let old = services.equipment.get_by_id(211).await.unwrap();
    assert_eq!(old.last_maintenance_date, day(2023, 12, 1));
    assert_eq!(old.next_maintenance_date, next_due(day(2023, 12, 1)));

    let new = services.equipment.get_by_id(212).await.unwrap();
    assert_eq!(new.last_maintenance_date, day(2024, 1, 1));
    assert_eq!(new.next_maintenance_date, day(2024, 2, 15));
}

#[tokio::test]
async fn test_missing_targets_are_not_found() {
    let services = services().await;
    services.history.add_record(211, "2024-01-01").await.unwrap();

    assert!(matches!(
        services.history.edit_record(213, 212, "2024-01-01").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        services.history.delete_record(211, "2024-01-02").await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(services.history.list_records(211).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invariants_after_mixed_mutations() {
    let services = services().await;
    services.history.add_record(211, "2024-01-05").await.unwrap();
    services.history.add_record(211, "2024-03-02").await.unwrap();
    services.history.add_record(212, "2024-02-10").await.unwrap();
    services.history.add_record(271, "2024-02-10").await.unwrap();
    services.history.edit_record(211, 213, "2024-03-02").await.unwrap();
    services.history.delete_record(212, "2024-02-10").await.unwrap();
    services.history.add_record(212, "2024-01-20").await.unwrap();

    for unit in services.equipment.list(None).await.unwrap() {
        assert_eq!(unit.next_maintenance_date, next_due(unit.last_maintenance_date));

        let records = services.history.list_records(unit.id).await.unwrap();
        if let Some(max) = records.iter().map(|r| r.maintenance_date).max() {
            assert_eq!(unit.last_maintenance_date, max, "unit {}", unit.id);
        }
    }
}

#[tokio::test]
async fn test_seed_twice_is_noop() {
    let services = services().await;
    services.history.add_record(211, "2024-01-10").await.unwrap();
    let before = services.equipment.list(None).await.unwrap();

    let report = services
        .equipment
        .seed_catalog(&catalog(), day(2024, 6, 1))
        .await
        .unwrap();
    assert_eq!(report.inserted, 0);
    assert_eq!(report.reclassified, 0);
    assert_eq!(services.equipment.list(None).await.unwrap(), before);
}

#[tokio::test]
async fn test_summary_and_series_by_class() {
    let services = services().await;
    services.history.add_record(211, "2024-02-20").await.unwrap();
    services.history.add_record(212, "2024-01-20").await.unwrap();

    let summary = services
        .dashboard
        .summary_counts(
            Some(EquipmentClass::Armgc),
            StatusFilter::All,
            Some((SortKey::DaysPassed, SortOrder::Desc)),
            day(2024, 3, 1),
        )
        .await
        .unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.good, 1);
    assert_eq!(summary.warning, 1);
    assert_eq!(summary.overdue, 1);

    let order: Vec<(i32, MaintenanceStatus)> =
        summary.units.iter().map(|u| (u.id, u.status)).collect();
    assert_eq!(
        order,
        vec![
            (213, MaintenanceStatus::Overdue),
            (212, MaintenanceStatus::Warning),
            (211, MaintenanceStatus::Good),
        ]
    );

    let series = services
        .dashboard
        .elapsed_series(Some(EquipmentClass::Qc), day(2024, 3, 1))
        .await
        .unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].id, 271);
    assert_eq!(series[0].days_passed, 60);
    assert_eq!(series[0].overdue_days, 15);
}

#[tokio::test]
async fn test_calendar_groups_by_class() {
    let services = services().await;
    services.history.add_record(212, "2024-01-01").await.unwrap();
    services.history.add_record(271, "2024-01-01").await.unwrap();
    services.history.add_record(211, "2024-01-01").await.unwrap();
    services.history.add_record(213, "2023-11-01").await.unwrap();

    let days = services.history.history_by_date(day(2023, 12, 1)).await.unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date, day(2024, 1, 1));
    assert_eq!(days[0].groups.len(), 2);
    assert_eq!(days[0].groups[0].class, EquipmentClass::Armgc);
    assert_eq!(days[0].groups[0].unit_ids, vec![211, 212]);
    assert_eq!(days[0].groups[1].class, EquipmentClass::Qc);
    assert_eq!(days[0].groups[1].unit_ids, vec![271]);
}
