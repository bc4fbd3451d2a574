//! Data-quality validation for rosters.
//!
//! The conflict detector deliberately absorbs bad data (unknown staff ids,
//! malformed durations) without raising; this module surfaces those
//! problems as a report instead so the frontend can show them next to the
//! conflict list.
//!
//! Validation rules include:
//! - Referential checks (assignment pointing at a missing staff record)
//! - Time range checks (zero-length shifts)
//! - Hours checks (negative or inconsistent `total_hours`)
//! - Weekly ceiling checks (non-positive or already exceeded ceilings)

use serde::{Deserialize, Serialize};

use crate::api::{ShiftAssignment, ShiftId, StaffId, StaffMember};
use crate::models::shift::derived_total_hours;

/// Validation status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Error,
    Warning,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Error => "error",
            ValidationStatus::Warning => "warning",
        }
    }
}

/// Criticality level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Low => "Low",
            Criticality::Medium => "Medium",
            Criticality::High => "High",
            Criticality::Critical => "Critical",
        }
    }
}

/// Issue category for grouping validation problems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    StaffReference,
    TimeRange,
    Hours,
    WeeklyCeiling,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::StaffReference => "staff_reference",
            IssueCategory::TimeRange => "time_range",
            IssueCategory::Hours => "hours",
            IssueCategory::WeeklyCeiling => "weekly_ceiling",
        }
    }
}

/// A single validation issue found in a roster snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentIssue {
    /// Offending assignment; `None` for staff-record issues.
    pub shift_id: Option<ShiftId>,
    pub staff_id: StaffId,
    pub status: ValidationStatus,
    pub issue_type: String,
    pub category: IssueCategory,
    pub criticality: Criticality,
    pub field_name: Option<String>,
    pub current_value: Option<String>,
    pub expected_value: Option<String>,
    pub description: String,
}

impl AssignmentIssue {
    /// Create a validation error issue
    #[allow(clippy::too_many_arguments)]
    pub fn error(
        shift_id: Option<ShiftId>,
        staff_id: StaffId,
        issue_type: impl Into<String>,
        category: IssueCategory,
        criticality: Criticality,
        description: impl Into<String>,
        field_name: Option<String>,
        current_value: Option<String>,
        expected_value: Option<String>,
    ) -> Self {
        Self {
            shift_id,
            staff_id,
            status: ValidationStatus::Error,
            issue_type: issue_type.into(),
            category,
            criticality,
            field_name,
            current_value,
            expected_value,
            description: description.into(),
        }
    }

    /// Create a validation warning issue
    #[allow(clippy::too_many_arguments)]
    pub fn warning(
        shift_id: Option<ShiftId>,
        staff_id: StaffId,
        issue_type: impl Into<String>,
        category: IssueCategory,
        criticality: Criticality,
        description: impl Into<String>,
        field_name: Option<String>,
        current_value: Option<String>,
    ) -> Self {
        Self {
            shift_id,
            staff_id,
            status: ValidationStatus::Warning,
            issue_type: issue_type.into(),
            category,
            criticality,
            field_name,
            current_value,
            expected_value: None,
            description: description.into(),
        }
    }
}

/// Validation report over a roster snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_assignments: usize,
    /// Assignments with no issues at all.
    pub valid_assignments: usize,
    pub errors: Vec<AssignmentIssue>,
    pub warnings: Vec<AssignmentIssue>,
}

/// Tolerance when comparing stored `total_hours` against the duration
/// derived from the clock times (36 seconds).
const HOURS_TOLERANCE: f64 = 0.01;

/// Validate a single shift assignment against the staff snapshot.
///
/// Returns a vector of issues (may be multiple issues per assignment).
pub fn validate_assignment(
    assignment: &ShiftAssignment,
    staff: &[StaffMember],
) -> Vec<AssignmentIssue> {
    let mut issues = Vec::new();

    // Check 1: assignment referencing a missing staff record. The conflict
    // detector skips these silently, so surface them here.
    if !staff.iter().any(|s| s.id == assignment.staff_id) {
        issues.push(AssignmentIssue::warning(
            Some(assignment.id),
            assignment.staff_id.clone(),
            "Unknown staff reference",
            IssueCategory::StaffReference,
            Criticality::High,
            "Assignment references a staff member that is not in the roster; it is invisible to conflict checks",
            Some("staff_id".to_string()),
            Some(assignment.staff_id.to_string()),
        ));
    }

    // Check 2: zero-length shift (identical start and end times).
    if assignment.start_time == assignment.end_time {
        issues.push(AssignmentIssue::error(
            Some(assignment.id),
            assignment.staff_id.clone(),
            "Zero-length shift",
            IssueCategory::TimeRange,
            Criticality::High,
            "Shift start and end times are identical",
            Some("end_time".to_string()),
            Some(assignment.end_time.to_string()),
            Some(format!("!= {}", assignment.start_time)),
        ));
    }

    // Check 3: negative stored duration.
    if assignment.total_hours < 0.0 {
        issues.push(AssignmentIssue::error(
            Some(assignment.id),
            assignment.staff_id.clone(),
            "Negative total hours",
            IssueCategory::Hours,
            Criticality::High,
            "Shift duration must be non-negative",
            Some("total_hours".to_string()),
            Some(format!("{:.2}", assignment.total_hours)),
            Some(">= 0".to_string()),
        ));
    }
    // Check 4: stored duration disagreeing with the clock times.
    else {
        let derived = derived_total_hours(assignment.start_time, assignment.end_time);
        if (assignment.total_hours - derived).abs() > HOURS_TOLERANCE {
            issues.push(AssignmentIssue::warning(
                Some(assignment.id),
                assignment.staff_id.clone(),
                "Inconsistent total hours",
                IssueCategory::Hours,
                Criticality::Medium,
                format!(
                    "Stored duration {:.2}h disagrees with {:.2}h derived from {}-{}",
                    assignment.total_hours, derived, assignment.start_time, assignment.end_time
                ),
                Some("total_hours".to_string()),
                Some(format!("{:.2}", assignment.total_hours)),
            ));
        }
    }

    issues
}

/// Validate a single staff record.
pub fn validate_staff_member(member: &StaffMember) -> Vec<AssignmentIssue> {
    let mut issues = Vec::new();

    // Check 5: non-positive weekly ceiling makes every shift overtime.
    if member.max_hours_per_week <= 0.0 {
        issues.push(AssignmentIssue::error(
            None,
            member.id.clone(),
            "Non-positive weekly ceiling",
            IssueCategory::WeeklyCeiling,
            Criticality::High,
            "Maximum weekly hours must be positive",
            Some("max_hours_per_week".to_string()),
            Some(format!("{:.2}", member.max_hours_per_week)),
            Some("> 0".to_string()),
        ));
    }

    // Check 6: negative committed hours.
    if member.current_week_hours < 0.0 {
        issues.push(AssignmentIssue::error(
            None,
            member.id.clone(),
            "Negative committed hours",
            IssueCategory::WeeklyCeiling,
            Criticality::Medium,
            "Committed weekly hours must be non-negative",
            Some("current_week_hours".to_string()),
            Some(format!("{:.2}", member.current_week_hours)),
            Some(">= 0".to_string()),
        ));
    }
    // Check 7: ceiling already exhausted before any new assignment.
    else if member.max_hours_per_week > 0.0 && member.current_week_hours > member.max_hours_per_week
    {
        issues.push(AssignmentIssue::warning(
            None,
            member.id.clone(),
            "Weekly ceiling already exceeded",
            IssueCategory::WeeklyCeiling,
            Criticality::Low,
            format!(
                "Committed hours {:.2}h already exceed the {:.2}h/week ceiling",
                member.current_week_hours, member.max_hours_per_week
            ),
            Some("current_week_hours".to_string()),
            Some(format!("{:.2}", member.current_week_hours)),
        ));
    }

    issues
}

/// Validate a roster snapshot and assemble the report.
pub fn validate_assignments(
    assignments: &[ShiftAssignment],
    staff: &[StaffMember],
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut valid_assignments = 0;

    for assignment in assignments {
        let issues = validate_assignment(assignment, staff);
        if issues.is_empty() {
            valid_assignments += 1;
        }
        for issue in issues {
            match issue.status {
                ValidationStatus::Error => errors.push(issue),
                ValidationStatus::Warning => warnings.push(issue),
                ValidationStatus::Valid => {}
            }
        }
    }

    for member in staff {
        for issue in validate_staff_member(member) {
            match issue.status {
                ValidationStatus::Error => errors.push(issue),
                ValidationStatus::Warning => warnings.push(issue),
                ValidationStatus::Valid => {}
            }
        }
    }

    ValidationReport {
        total_assignments: assignments.len(),
        valid_assignments,
        errors,
        warnings,
    }
}
