// End-to-end checks of the status rules and the record store file format

use action_plan_engine::{
    derive_alert, derive_status, most_overdue, progress_curve, AlertLevel, ActionItem, ItemEdit,
    RecordStore, Status, StatusEngine, Summary,
};
use chrono::{Duration, NaiveDate};
use std::fs;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn reference() -> NaiveDate {
    d(2024, 2, 1)
}

#[test]
fn scenario_a_open_ended_past_start_is_late() {
    assert_eq!(derive_status(reference(), Some(d(2024, 1, 1)), None, None, None), Status::Late);
}

#[test]
fn scenario_b_open_ended_future_start_is_scheduled() {
    assert_eq!(derive_status(reference(), Some(d(2024, 3, 1)), None, None, None), Status::Scheduled);
}

#[test]
fn scenario_c_finished_late_is_completed() {
    let status = derive_status(reference(), Some(d(2024, 1, 1)), Some(d(2024, 1, 15)), None, Some(d(2024, 1, 20)));
    assert_eq!(status, Status::Completed);
}

#[test]
fn scenario_d_unfinished_past_end_is_late() {
    let status = derive_status(reference(), Some(d(2024, 1, 1)), Some(d(2024, 1, 15)), None, None);
    assert_eq!(status, Status::Late);
}

#[test]
fn scenario_e_started_within_window_is_in_progress() {
    let status = derive_status(reference(), Some(d(2024, 1, 1)), Some(d(2024, 6, 1)), Some(d(2024, 1, 5)), None);
    assert_eq!(status, Status::InProgress);
}

#[test]
fn scenario_f_due_in_two_days_alerts() {
    let planned_end = reference() + Duration::days(2);
    assert_eq!(derive_alert(Status::Scheduled, Some(planned_end), reference(), 3), AlertLevel::DueSoon);
}

#[test]
fn malformed_dates_in_store_file_degrade_to_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    fs::write(
        &path,
        r#"{
            "next_id": 3,
            "items": [
                {"id": 1, "area": "Transporte", "planned_start": "01/01/2024", "planned_end": "2024-02-31"},
                {"id": 2, "area": "Backlog", "planned_start": "garbage", "actual_end": "2024-01-10"}
            ]
        }"#,
    )
    .unwrap();

    let mut store = RecordStore::load(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(1).unwrap().planned_end, None);

    store.refresh(reference());
    // Bad planned end: falls back to the open-ended rule
    assert_eq!(store.get(1).unwrap().status, Status::Late);
    // Bad planned start: nothing to classify against
    assert_eq!(store.get(2).unwrap().status, Status::Undetermined);
}

#[test]
fn store_round_trip_preserves_items_and_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("records.json");

    let mut store = RecordStore::new();
    store.insert(
        ActionItem::new("Ventilação")
            .with_planned(Some(d(2024, 1, 1)), Some(d(2024, 1, 15)))
            .with_rescheduled(None, Some(d(2024, 2, 10))),
        reference(),
    );
    store.insert(ActionItem::new("Backlog").with_override(Status::Completed), reference());
    store.save(&path).unwrap();

    let mut loaded = RecordStore::load(&path).unwrap();
    assert_eq!(loaded.items(), store.items());

    let id = loaded.insert(ActionItem::new("Caldeiraria"), reference());
    assert_eq!(id, 3);
}

#[test]
fn missing_store_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::load(&dir.path().join("absent.json")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn dashboard_flow_over_a_week() {
    let engine = StatusEngine::new();
    let mut store = RecordStore::new();
    let day_one = d(2024, 1, 10);

    let pump = store.insert(
        ActionItem::new("Infraestrutura").with_planned(Some(d(2024, 1, 8)), Some(d(2024, 1, 12))),
        day_one,
    );
    let fan = store.insert(
        ActionItem::new("Ventilação")
            .with_planned(Some(d(2024, 1, 15)), Some(d(2024, 1, 19)))
            .with_impact("Restrição de acesso ao nível 12"),
        day_one,
    );

    assert_eq!(store.get(pump).unwrap().status, Status::InProgress);
    assert_eq!(engine.alert_of(store.get(pump).unwrap(), day_one), AlertLevel::DueSoon);
    assert_eq!(store.get(fan).unwrap().status, Status::Scheduled);

    // A week later nothing has been finished
    let day_eight = d(2024, 1, 17);
    assert_eq!(store.refresh(day_eight), 2);
    assert_eq!(store.get(pump).unwrap().status, Status::Late);
    assert_eq!(store.get(fan).unwrap().status, Status::InProgress);

    let overdue: Vec<_> = most_overdue(store.items(), engine.config().overdue_limit)
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(overdue, vec![pump]);

    store
        .update(
            pump,
            ItemEdit {
                actual_end: Some(Some(d(2024, 1, 16))),
                ..ItemEdit::default()
            },
            day_eight,
        )
        .unwrap();

    let summary = Summary::from_items(store.items());
    assert_eq!(summary.completed_pct, 50.0);
    assert_eq!(summary.late_pct, 0.0);
    assert_eq!(summary.with_impact_pct, 50.0);

    let curve = progress_curve(store.items(), day_eight).unwrap();
    assert_eq!(curve.dates.first(), Some(&d(2024, 1, 8)));
    assert_eq!(curve.dates.last(), Some(&d(2024, 1, 19)));
    assert_eq!(curve.actual.last(), Some(&1));
    assert_eq!(curve.planned.last(), Some(&2));
    assert_eq!(curve.planned_at_reference, 1);
}
