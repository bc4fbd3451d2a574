//! Repository traits for abstracting storage operations.
//!
//! These traits define the interface for all storage operations, allowing
//! different implementations (in-memory, database-backed) to be swapped via
//! dependency injection.

use async_trait::async_trait;

use crate::api::{
    AssignmentFilter, NewShiftAssignment, Roster, RosterInfo, ShiftAssignment, ShiftId,
    ShiftStatus, StaffId, StaffMember,
};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::InternalError(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::InternalError(s.to_string())
    }
}

/// Repository trait for staff records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust and allow
/// sharing across threads.
///
/// # Error Handling
/// All methods return `RepositoryResult<T>` which wraps either the expected
/// return type or a `RepositoryError` describing what went wrong.
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Check if the storage backend is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the backend is healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a staff member. Replaces an existing record with the same id.
    async fn add_staff_member(&self, member: &StaffMember) -> RepositoryResult<StaffMember>;

    /// Retrieve a staff member by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no such staff member exists
    async fn get_staff_member(&self, staff_id: &StaffId) -> RepositoryResult<StaffMember>;

    /// List all staff members, ordered by id.
    async fn list_staff(&self) -> RepositoryResult<Vec<StaffMember>>;

    /// Overwrite a staff member's committed weekly hours.
    ///
    /// # Returns
    /// The updated staff record, or `NotFound`.
    async fn set_week_hours(&self, staff_id: &StaffId, hours: f64)
        -> RepositoryResult<StaffMember>;
}

/// Repository trait for shift assignments.
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Store a new shift assignment and assign it an id.
    async fn add_assignment(&self, new: &NewShiftAssignment) -> RepositoryResult<ShiftAssignment>;

    /// Retrieve a single assignment by id.
    async fn get_assignment(&self, shift_id: ShiftId) -> RepositoryResult<ShiftAssignment>;

    /// List assignments matching the filter, ordered by id.
    async fn list_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> RepositoryResult<Vec<ShiftAssignment>>;

    /// Overwrite an assignment's status.
    ///
    /// Transition legality is the service layer's concern; the repository
    /// stores whatever it is given.
    async fn update_assignment_status(
        &self,
        shift_id: ShiftId,
        status: ShiftStatus,
    ) -> RepositoryResult<ShiftAssignment>;

    /// Delete an assignment.
    ///
    /// # Returns
    /// Number of records removed (0 or 1).
    async fn delete_assignment(&self, shift_id: ShiftId) -> RepositoryResult<usize>;
}

/// Repository trait for roster import records.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Look up a previously imported roster by content checksum.
    async fn find_roster_by_checksum(
        &self,
        checksum: &str,
    ) -> RepositoryResult<Option<RosterInfo>>;

    /// Record a roster import and assign it an id.
    async fn store_roster(&self, roster: &Roster) -> RepositoryResult<RosterInfo>;

    /// List all imported rosters, ordered by id.
    async fn list_rosters(&self) -> RepositoryResult<Vec<RosterInfo>>;
}

/// Combined repository trait used throughout the application.
pub trait FullRepository: StaffRepository + ShiftRepository + RosterRepository {}

impl<T> FullRepository for T where T: StaffRepository + ShiftRepository + RosterRepository {}
