//! Public API surface for the Rust backend.
//!
//! This file consolidates the core domain types shared by the repository,
//! service, and HTTP layers. All types derive Serialize/Deserialize for
//! JSON serialization.

pub use crate::models::shift::ClockTime;
pub use crate::services::conflicts::{Conflict, ConflictReport};
pub use crate::services::validation::{
    AssignmentIssue, Criticality, IssueCategory, ValidationReport, ValidationStatus,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Staff member identifier.
///
/// Staff ids are opaque codes assigned by the care home ("S1", "NV-012"),
/// referenced by value from shift assignments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(pub String);

/// Shift assignment identifier (repository primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(pub i64);

impl StaffId {
    pub fn new(value: impl Into<String>) -> Self {
        StaffId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ShiftId {
    pub fn new(value: i64) -> Self {
        ShiftId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StaffId {
    fn from(s: &str) -> Self {
        StaffId(s.to_string())
    }
}

impl From<ShiftId> for i64 {
    fn from(id: ShiftId) -> Self {
        id.0
    }
}

/// A member of the care-home staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    /// Display name shown in rosters and conflict messages.
    pub full_name: String,
    /// Configured weekly hours ceiling.
    pub max_hours_per_week: f64,
    /// Hours already committed for the current week.
    ///
    /// Maintained by the caller, not recomputed from the assignment list.
    /// Precondition for conflict checks: this total covers hours committed
    /// *before* the assignment set being checked and must not include any
    /// assignment in that set, otherwise the overtime check double-counts.
    pub current_week_hours: f64,
}

/// Lifecycle status of a shift assignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Scheduled => "scheduled",
            ShiftStatus::Confirmed => "confirmed",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a direct transition to `next` is allowed.
    ///
    /// `scheduled → confirmed | cancelled`, `confirmed → completed | cancelled`;
    /// `completed` and `cancelled` are terminal.
    pub fn can_transition_to(&self, next: ShiftStatus) -> bool {
        use ShiftStatus::*;
        matches!(
            (self, next),
            (Scheduled, Confirmed) | (Scheduled, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled block of work time for one staff member on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: ShiftId,
    /// Owning staff member, referenced by value.
    pub staff_id: StaffId,
    /// Denormalized display name, used when rendering conflict messages.
    pub staff_name: String,
    /// Calendar day of the shift.
    pub date: NaiveDate,
    /// Wall-clock start of the shift.
    pub start_time: ClockTime,
    /// Wall-clock end of the shift. `end_time < start_time` means the
    /// shift crosses midnight and ends on the following day.
    pub end_time: ClockTime,
    /// Duration in hours, derived from the clock times at creation and
    /// stored; not re-derived afterward.
    pub total_hours: f64,
    pub status: ShiftStatus,
}

/// Input for creating a shift assignment (id assigned by the repository).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShiftAssignment {
    pub staff_id: StaffId,
    /// Optional; filled from the staff record when blank.
    #[serde(default)]
    pub staff_name: String,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// Optional; derived from the clock times when absent.
    #[serde(default)]
    pub total_hours: Option<f64>,
    #[serde(default = "default_status")]
    pub status: ShiftStatus,
}

fn default_status() -> ShiftStatus {
    ShiftStatus::Scheduled
}

/// A named roster import unit: staff plus their assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub staff: Vec<StaffMember>,
    pub assignments: Vec<NewShiftAssignment>,
    /// SHA-256 over the roster JSON content, hex-encoded. Used to
    /// deduplicate repeated imports of the same roster.
    pub checksum: String,
}

/// Lightweight roster metadata for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterInfo {
    pub roster_id: i64,
    pub roster_name: String,
    pub checksum: String,
    pub staff_count: usize,
    pub assignment_count: usize,
}

/// Filter for assignment listings. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentFilter {
    #[serde(default)]
    pub staff_id: Option<StaffId>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl AssignmentFilter {
    pub fn matches(&self, assignment: &ShiftAssignment) -> bool {
        if let Some(staff_id) = &self.staff_id {
            if &assignment.staff_id != staff_id {
                return false;
            }
        }
        if let Some(date) = &self.date {
            if &assignment.date != date {
                return false;
            }
        }
        true
    }
}
