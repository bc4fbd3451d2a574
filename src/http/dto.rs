//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The domain and report types already derive Serialize/Deserialize and are
//! re-exported from the api module.

use serde::{Deserialize, Serialize};

// Re-export existing types that are already serializable
pub use crate::api::{
    // Conflicts
    Conflict,
    ConflictReport,
    // Domain
    AssignmentFilter,
    NewShiftAssignment,
    RosterInfo,
    ShiftAssignment,
    ShiftStatus,
    StaffMember,
    // Validation
    AssignmentIssue,
    ValidationReport,
};

/// Request body for creating a staff member.
pub type CreateStaffRequest = StaffMember;

/// Request body for updating an assignment's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status for the transition
    pub status: ShiftStatus,
}

/// Request body for importing a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRosterRequest {
    /// Name for the roster
    pub name: String,
    /// Roster JSON data: `{ staff: [...], assignments: [...] }`
    pub roster_json: serde_json::Value,
}

/// Response for roster import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRosterResponse {
    /// Job ID for tracking the async processing
    pub job_id: String,
    /// Message about the operation
    pub message: String,
}

/// Job status response for async processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID
    pub job_id: String,
    /// Job status
    pub status: String,
    /// Log entries
    pub logs: Vec<crate::services::job_tracker::LogEntry>,
    /// Result if completed
    pub result: Option<serde_json::Value>,
}

/// Query parameters for assignment listings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssignmentQuery {
    /// Filter by staff member
    #[serde(default)]
    pub staff_id: Option<String>,
    /// Filter by shift date (ISO 8601)
    #[serde(default)]
    pub date: Option<chrono::NaiveDate>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub database: String,
}

/// Staff list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffListResponse {
    /// List of staff members
    pub staff: Vec<StaffMember>,
    /// Total count
    pub total: usize,
}

/// Assignment list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentListResponse {
    /// List of shift assignments
    pub assignments: Vec<ShiftAssignment>,
    /// Total count
    pub total: usize,
}

/// Roster list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterListResponse {
    /// List of imported rosters
    pub rosters: Vec<RosterInfo>,
    /// Total count
    pub total: usize,
}
