//! High-level database service layer.
//!
//! This module provides repository-agnostic operations that work with any
//! implementation of the repository traits. These functions contain
//! business logic such as status-transition rules, checksum deduplication,
//! and referential checks that should be consistent regardless of the
//! storage backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, background jobs)          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! │  - Status transition rules                               │
//! │  - Roster checksum deduplication                         │
//! │  - Conflict and validation reports                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository.rs) - Abstract Interface │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

use log::{info, warn};

use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::api::{
    AssignmentFilter, NewShiftAssignment, Roster, RosterInfo, ShiftAssignment, ShiftId,
    ShiftStatus, StaffId, StaffMember, ValidationReport,
};
use crate::services::conflicts::{detect_conflicts, ConflictReport};
use crate::services::validation;

// ==================== Health & Connection ====================

/// Check if the storage backend is healthy.
///
/// This is a simple pass-through to the repository's health check.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Staff Operations ====================

/// Store a staff member.
pub async fn add_staff_member<R: FullRepository + ?Sized>(
    repo: &R,
    member: &StaffMember,
) -> RepositoryResult<StaffMember> {
    info!(
        "Service layer: storing staff member {} ({})",
        member.id, member.full_name
    );
    repo.add_staff_member(member).await
}

/// Retrieve a staff member by id.
pub async fn get_staff_member<R: FullRepository + ?Sized>(
    repo: &R,
    staff_id: &StaffId,
) -> RepositoryResult<StaffMember> {
    repo.get_staff_member(staff_id).await
}

/// List all staff members.
pub async fn list_staff<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<StaffMember>> {
    repo.list_staff().await
}

/// Overwrite a staff member's committed weekly hours.
pub async fn set_week_hours<R: FullRepository + ?Sized>(
    repo: &R,
    staff_id: &StaffId,
    hours: f64,
) -> RepositoryResult<StaffMember> {
    if hours < 0.0 {
        return Err(RepositoryError::ValidationError(format!(
            "Committed weekly hours must be non-negative, got {}",
            hours
        )));
    }
    repo.set_week_hours(staff_id, hours).await
}

// ==================== Assignment Operations ====================

/// Create a shift assignment with full business logic.
///
/// Rejects assignments referencing unknown staff, fills the denormalized
/// `staff_name` from the staff record when the caller leaves it blank, and
/// leaves `total_hours` derivation to the repository when absent.
pub async fn create_assignment<R: FullRepository + ?Sized>(
    repo: &R,
    new: &NewShiftAssignment,
) -> RepositoryResult<ShiftAssignment> {
    let member = repo.get_staff_member(&new.staff_id).await.map_err(|e| {
        if matches!(e, RepositoryError::NotFound(_)) {
            RepositoryError::ValidationError(format!(
                "Assignment references unknown staff member {}",
                new.staff_id
            ))
        } else {
            e
        }
    })?;

    let mut new = new.clone();
    if new.staff_name.is_empty() {
        new.staff_name = member.full_name.clone();
    }

    info!(
        "Service layer: creating assignment for {} on {} ({}-{})",
        new.staff_id, new.date, new.start_time, new.end_time
    );
    repo.add_assignment(&new).await
}

/// Retrieve a single assignment by id.
pub async fn get_assignment<R: FullRepository + ?Sized>(
    repo: &R,
    shift_id: ShiftId,
) -> RepositoryResult<ShiftAssignment> {
    repo.get_assignment(shift_id).await
}

/// List assignments matching the filter.
pub async fn list_assignments<R: FullRepository + ?Sized>(
    repo: &R,
    filter: &AssignmentFilter,
) -> RepositoryResult<Vec<ShiftAssignment>> {
    repo.list_assignments(filter).await
}

/// Apply a status transition to an assignment.
///
/// Enforces the lifecycle rules: `scheduled → confirmed | cancelled`,
/// `confirmed → completed | cancelled`; `completed` and `cancelled` are
/// terminal. Illegal transitions fail with `ValidationError` and leave the
/// assignment untouched.
pub async fn update_assignment_status<R: FullRepository + ?Sized>(
    repo: &R,
    shift_id: ShiftId,
    status: ShiftStatus,
) -> RepositoryResult<ShiftAssignment> {
    let current = repo.get_assignment(shift_id).await?;

    if !current.status.can_transition_to(status) {
        return Err(RepositoryError::ValidationError(format!(
            "Illegal status transition {} -> {} for assignment {}",
            current.status, status, shift_id
        )));
    }

    info!(
        "Service layer: assignment {} status {} -> {}",
        shift_id, current.status, status
    );
    repo.update_assignment_status(shift_id, status).await
}

/// Delete an assignment.
pub async fn delete_assignment<R: FullRepository + ?Sized>(
    repo: &R,
    shift_id: ShiftId,
) -> RepositoryResult<usize> {
    let deleted = repo.delete_assignment(shift_id).await?;
    if deleted == 0 {
        return Err(RepositoryError::NotFound(format!(
            "Assignment {} not found",
            shift_id
        )));
    }
    Ok(deleted)
}

// ==================== Reports ====================

/// Run the conflict sweep over the stored schedule.
///
/// Cancelled assignments are excluded from the snapshot: a cancelled shift
/// no longer occupies schedule time. The detector itself never consults
/// `status`.
pub async fn conflict_report<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<ConflictReport> {
    let staff = repo.list_staff().await?;
    let assignments: Vec<ShiftAssignment> = repo
        .list_assignments(&AssignmentFilter::default())
        .await?
        .into_iter()
        .filter(|a| a.status != ShiftStatus::Cancelled)
        .collect();

    let conflicts = detect_conflicts(&assignments, &staff);
    if !conflicts.is_empty() {
        warn!(
            "Service layer: conflict sweep found {} conflicts over {} assignments",
            conflicts.len(),
            assignments.len()
        );
    }

    Ok(ConflictReport::new(
        conflicts,
        assignments.len(),
        staff.len(),
    ))
}

/// Run the data-quality sweep over the stored schedule.
///
/// Unlike the conflict snapshot, all stored assignments are inspected
/// regardless of status.
pub async fn validation_report<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<ValidationReport> {
    let staff = repo.list_staff().await?;
    let assignments = repo.list_assignments(&AssignmentFilter::default()).await?;

    Ok(validation::validate_assignments(&assignments, &staff))
}

/// Validate a roster before it is stored.
///
/// Not-yet-stored assignments have no repository ids; they are numbered by
/// their position in the roster so issues can still point at a row.
pub fn validate_roster(roster: &Roster) -> ValidationReport {
    let assignments: Vec<ShiftAssignment> = roster
        .assignments
        .iter()
        .enumerate()
        .map(|(idx, a)| ShiftAssignment {
            id: ShiftId(idx as i64 + 1),
            staff_id: a.staff_id.clone(),
            staff_name: a.staff_name.clone(),
            date: a.date,
            start_time: a.start_time,
            end_time: a.end_time,
            total_hours: a
                .total_hours
                .unwrap_or_else(|| crate::models::shift::derived_total_hours(a.start_time, a.end_time)),
            status: a.status,
        })
        .collect();

    validation::validate_assignments(&assignments, &roster.staff)
}

// ==================== Roster Import ====================

/// Import a roster with checksum deduplication.
///
/// This function orchestrates the complete import:
/// 1. Check if a roster with the same checksum was already imported
/// 2. If so, return the existing metadata without storing anything
/// 3. If new, store all staff records, then all assignments, then the
///    roster metadata
pub async fn import_roster<R: FullRepository + ?Sized>(
    repo: &R,
    roster: &Roster,
) -> RepositoryResult<RosterInfo> {
    info!(
        "Service layer: importing roster '{}' (checksum {}, {} staff, {} assignments)",
        roster.name,
        roster.checksum,
        roster.staff.len(),
        roster.assignments.len()
    );

    if let Some(existing) = repo.find_roster_by_checksum(&roster.checksum).await? {
        info!(
            "Service layer: roster checksum {} already imported as ID {}, skipping",
            roster.checksum, existing.roster_id
        );
        return Ok(existing);
    }

    for member in &roster.staff {
        repo.add_staff_member(member).await?;
    }

    for assignment in &roster.assignments {
        // Roster rows referencing staff outside the roster are stored as-is;
        // the validation report surfaces them.
        repo.add_assignment(assignment).await?;
    }

    repo.store_roster(roster).await
}

/// List all imported rosters.
pub async fn list_rosters<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<RosterInfo>> {
    repo.list_rosters().await
}
