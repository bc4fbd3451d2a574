use crate::api::{
    AssignmentFilter, NewShiftAssignment, ShiftAssignment, ShiftId, ShiftStatus, StaffId,
    StaffMember,
};
use chrono::NaiveDate;

fn sample_assignment() -> ShiftAssignment {
    ShiftAssignment {
        id: ShiftId(1),
        staff_id: StaffId::new("S1"),
        staff_name: "Nguyễn Văn An".to_string(),
        date: "2024-01-22".parse::<NaiveDate>().unwrap(),
        start_time: "08:00".parse().unwrap(),
        end_time: "16:00".parse().unwrap(),
        total_hours: 8.0,
        status: ShiftStatus::Scheduled,
    }
}

#[test]
fn test_id_newtypes() {
    let staff_id = StaffId::new("S1");
    assert_eq!(staff_id.value(), "S1");
    assert_eq!(staff_id.to_string(), "S1");

    let shift_id = ShiftId::new(7);
    assert_eq!(shift_id.value(), 7);
    assert_eq!(i64::from(shift_id), 7);
    assert_eq!(shift_id.to_string(), "7");
}

#[test]
fn test_status_serde_lowercase() {
    assert_eq!(
        serde_json::to_string(&ShiftStatus::Scheduled).unwrap(),
        "\"scheduled\""
    );
    let status: ShiftStatus = serde_json::from_str("\"cancelled\"").unwrap();
    assert_eq!(status, ShiftStatus::Cancelled);
    assert_eq!(ShiftStatus::Confirmed.as_str(), "confirmed");
}

#[test]
fn test_status_transition_table() {
    use ShiftStatus::*;

    assert!(Scheduled.can_transition_to(Confirmed));
    assert!(Scheduled.can_transition_to(Cancelled));
    assert!(Confirmed.can_transition_to(Completed));
    assert!(Confirmed.can_transition_to(Cancelled));

    assert!(!Scheduled.can_transition_to(Completed));
    assert!(!Completed.can_transition_to(Scheduled));
    assert!(!Cancelled.can_transition_to(Confirmed));
    assert!(!Confirmed.can_transition_to(Scheduled));
}

#[test]
fn test_assignment_filter_matching() {
    let assignment = sample_assignment();

    assert!(AssignmentFilter::default().matches(&assignment));
    assert!(AssignmentFilter {
        staff_id: Some(StaffId::new("S1")),
        date: None,
    }
    .matches(&assignment));
    assert!(!AssignmentFilter {
        staff_id: Some(StaffId::new("S2")),
        date: None,
    }
    .matches(&assignment));
    assert!(!AssignmentFilter {
        staff_id: None,
        date: Some("2024-01-23".parse().unwrap()),
    }
    .matches(&assignment));
}

#[test]
fn test_assignment_json_round_trip() {
    let assignment = sample_assignment();
    let json = serde_json::to_string(&assignment).unwrap();

    assert!(json.contains("\"start_time\":\"08:00\""));
    assert!(json.contains("\"date\":\"2024-01-22\""));

    let back: ShiftAssignment = serde_json::from_str(&json).unwrap();
    assert_eq!(back, assignment);
}

#[test]
fn test_new_assignment_defaults() {
    let json = r#"{
        "staff_id": "S1",
        "date": "2024-01-22",
        "start_time": "08:00",
        "end_time": "16:00"
    }"#;

    let new: NewShiftAssignment = serde_json::from_str(json).unwrap();
    assert_eq!(new.staff_name, "");
    assert_eq!(new.total_hours, None);
    assert_eq!(new.status, ShiftStatus::Scheduled);
}

#[test]
fn test_staff_member_json_shape() {
    let member = StaffMember {
        id: StaffId::new("S1"),
        full_name: "Nguyễn Văn An".to_string(),
        max_hours_per_week: 40.0,
        current_week_hours: 32.0,
    };

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["id"], "S1");
    assert_eq!(json["max_hours_per_week"], 40.0);
}
