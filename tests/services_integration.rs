//! End-to-end service-layer tests over the in-memory repository:
//! roster import, conflict sweep, validation sweep, shift lifecycle.

use carehome_rust::api::{ShiftStatus, StaffId};
use carehome_rust::db::repositories::LocalRepository;
use carehome_rust::db::services;
use carehome_rust::models::shift::parse_roster_json_str;
use carehome_rust::services::conflicts::Conflict;

const WEEK_ROSTER: &str = r#"{
    "name": "Tuần 4 tháng 1",
    "staff": [
        {"id": "S1", "full_name": "Nguyễn Văn An", "max_hours_per_week": 40.0, "current_week_hours": 35.0},
        {"id": "S2", "full_name": "Trần Thị Bình", "max_hours_per_week": 40.0, "current_week_hours": 0.0}
    ],
    "assignments": [
        {"staff_id": "S1", "date": "2024-01-22", "start_time": "08:00", "end_time": "16:00"},
        {"staff_id": "S2", "date": "2024-01-22", "start_time": "08:00", "end_time": "16:00"},
        {"staff_id": "S2", "date": "2024-01-22", "start_time": "15:00", "end_time": "23:00"}
    ]
}"#;

#[tokio::test]
async fn test_import_then_conflict_sweep() {
    let repo = LocalRepository::new();

    let roster = parse_roster_json_str(WEEK_ROSTER).unwrap();
    let info = services::import_roster(&repo, &roster).await.unwrap();
    assert_eq!(info.staff_count, 2);
    assert_eq!(info.assignment_count, 3);

    let report = services::conflict_report(&repo).await.unwrap();
    assert_eq!(report.total_assignments, 3);
    assert_eq!(report.staff_count, 2);
    assert_eq!(report.conflicts.len(), 2);

    // S1: 35 committed + 8 new = 43 > 40
    assert!(report.messages.contains(&"Nguyễn Văn An: Vượt quá giờ làm tối đa (40h/tuần)".to_string()));
    // S2: 08:00-16:00 and 15:00-23:00 intersect
    assert!(report.messages.contains(&"Trần Thị Bình: Trùng lịch ngày 2024-01-22".to_string()));
}

#[tokio::test]
async fn test_reimport_is_idempotent() {
    let repo = LocalRepository::new();

    let roster = parse_roster_json_str(WEEK_ROSTER).unwrap();
    let first = services::import_roster(&repo, &roster).await.unwrap();

    // Parsing the same JSON again yields the same checksum, so nothing new
    // is stored.
    let reparsed = parse_roster_json_str(WEEK_ROSTER).unwrap();
    let second = services::import_roster(&repo, &reparsed).await.unwrap();

    assert_eq!(first.roster_id, second.roster_id);
    let report = services::conflict_report(&repo).await.unwrap();
    assert_eq!(report.total_assignments, 3);
}

#[tokio::test]
async fn test_cancellation_resolves_overlap() {
    let repo = LocalRepository::new();
    let roster = parse_roster_json_str(WEEK_ROSTER).unwrap();
    services::import_roster(&repo, &roster).await.unwrap();

    // Find S2's late shift and cancel it
    let overlap_ids = {
        let report = services::conflict_report(&repo).await.unwrap();
        report
            .conflicts
            .iter()
            .find_map(|c| match c {
                Conflict::Overlap { assignment_ids, .. } => Some(assignment_ids.clone()),
                _ => None,
            })
            .expect("overlap conflict expected")
    };

    services::update_assignment_status(&repo, overlap_ids[1], ShiftStatus::Cancelled)
        .await
        .unwrap();

    let report = services::conflict_report(&repo).await.unwrap();
    assert!(!report
        .conflicts
        .iter()
        .any(|c| matches!(c, Conflict::Overlap { .. })));
    // The overtime conflict for S1 is unaffected
    assert!(report
        .conflicts
        .iter()
        .any(|c| matches!(c, Conflict::Overtime { .. })));
}

#[tokio::test]
async fn test_validation_sweep_after_import() {
    let repo = LocalRepository::new();

    // One assignment references staff outside the roster, one carries a
    // stored duration disagreeing with its clock times.
    let roster_json = r#"{
        "name": "Tuần lỗi",
        "staff": [
            {"id": "S1", "full_name": "Nguyễn Văn An", "max_hours_per_week": 40.0, "current_week_hours": 0.0}
        ],
        "assignments": [
            {"staff_id": "S1", "date": "2024-01-22", "start_time": "08:00", "end_time": "16:00", "total_hours": 12.0},
            {"staff_id": "S9", "staff_name": "Phạm Văn Cường", "date": "2024-01-22", "start_time": "08:00", "end_time": "16:00"}
        ]
    }"#;
    let roster = parse_roster_json_str(roster_json).unwrap();
    services::import_roster(&repo, &roster).await.unwrap();

    let report = services::validation_report(&repo).await.unwrap();
    assert_eq!(report.total_assignments, 2);
    assert_eq!(report.valid_assignments, 0);
    assert_eq!(report.warnings.len(), 2);

    // Neither data-quality problem surfaces as a scheduling conflict
    let conflicts = services::conflict_report(&repo).await.unwrap();
    assert!(conflicts.is_empty());
}

#[tokio::test]
async fn test_week_hours_update_changes_overtime_result() {
    let repo = LocalRepository::new();
    let roster = parse_roster_json_str(WEEK_ROSTER).unwrap();
    services::import_roster(&repo, &roster).await.unwrap();

    // Lowering S1's committed hours clears the overtime conflict
    services::set_week_hours(&repo, &StaffId::new("S1"), 30.0)
        .await
        .unwrap();

    let report = services::conflict_report(&repo).await.unwrap();
    assert!(!report
        .conflicts
        .iter()
        .any(|c| matches!(c, Conflict::Overtime { .. })));
}
