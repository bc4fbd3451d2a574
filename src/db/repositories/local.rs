//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap and Vec structures, providing fast, deterministic,
//! and isolated execution.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::api::{
    AssignmentFilter, NewShiftAssignment, Roster, RosterInfo, ShiftAssignment, ShiftId,
    ShiftStatus, StaffId, StaffMember,
};
use crate::db::repository::*;
use crate::models::shift::derived_total_hours;

/// In-memory local repository.
///
/// This implementation stores all data in memory using HashMaps, making it
/// ideal for unit tests and local development that need isolation and speed.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    staff: HashMap<StaffId, StaffMember>,
    assignments: HashMap<ShiftId, ShiftAssignment>,
    rosters: HashMap<i64, RosterInfo>,

    // ID counters
    next_shift_id: i64,
    next_roster_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            staff: HashMap::new(),
            assignments: HashMap::new(),
            rosters: HashMap::new(),
            next_shift_id: 1,
            next_roster_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of staff members stored.
    pub fn staff_count(&self) -> usize {
        self.data.read().unwrap().staff.len()
    }

    /// Get the number of assignments stored.
    pub fn assignment_count(&self) -> usize {
        self.data.read().unwrap().assignments.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Repository is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StaffRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn add_staff_member(&self, member: &StaffMember) -> RepositoryResult<StaffMember> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        data.staff.insert(member.id.clone(), member.clone());
        Ok(member.clone())
    }

    async fn get_staff_member(&self, staff_id: &StaffId) -> RepositoryResult<StaffMember> {
        let data = self.data.read().unwrap();
        data.staff.get(staff_id).cloned().ok_or_else(|| {
            RepositoryError::NotFound(format!("Staff member {} not found", staff_id))
        })
    }

    async fn list_staff(&self) -> RepositoryResult<Vec<StaffMember>> {
        let data = self.data.read().unwrap();

        let mut staff: Vec<StaffMember> = data.staff.values().cloned().collect();
        staff.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(staff)
    }

    async fn set_week_hours(
        &self,
        staff_id: &StaffId,
        hours: f64,
    ) -> RepositoryResult<StaffMember> {
        let mut data = self.data.write().unwrap();
        let member = data.staff.get_mut(staff_id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Staff member {} not found", staff_id))
        })?;
        member.current_week_hours = hours;
        Ok(member.clone())
    }
}

#[async_trait]
impl ShiftRepository for LocalRepository {
    async fn add_assignment(&self, new: &NewShiftAssignment) -> RepositoryResult<ShiftAssignment> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let shift_id = ShiftId(data.next_shift_id);
        data.next_shift_id += 1;

        let assignment = ShiftAssignment {
            id: shift_id,
            staff_id: new.staff_id.clone(),
            staff_name: new.staff_name.clone(),
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            total_hours: new
                .total_hours
                .unwrap_or_else(|| derived_total_hours(new.start_time, new.end_time)),
            status: new.status,
        };

        data.assignments.insert(shift_id, assignment.clone());
        Ok(assignment)
    }

    async fn get_assignment(&self, shift_id: ShiftId) -> RepositoryResult<ShiftAssignment> {
        let data = self.data.read().unwrap();

        data.assignments.get(&shift_id).cloned().ok_or_else(|| {
            RepositoryError::NotFound(format!("Assignment {} not found", shift_id))
        })
    }

    async fn list_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> RepositoryResult<Vec<ShiftAssignment>> {
        let data = self.data.read().unwrap();

        let mut assignments: Vec<ShiftAssignment> = data
            .assignments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.id);
        Ok(assignments)
    }

    async fn update_assignment_status(
        &self,
        shift_id: ShiftId,
        status: ShiftStatus,
    ) -> RepositoryResult<ShiftAssignment> {
        let mut data = self.data.write().unwrap();
        let assignment = data.assignments.get_mut(&shift_id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Assignment {} not found", shift_id))
        })?;
        assignment.status = status;
        Ok(assignment.clone())
    }

    async fn delete_assignment(&self, shift_id: ShiftId) -> RepositoryResult<usize> {
        let mut data = self.data.write().unwrap();
        Ok(if data.assignments.remove(&shift_id).is_some() {
            1
        } else {
            0
        })
    }
}

#[async_trait]
impl RosterRepository for LocalRepository {
    async fn find_roster_by_checksum(
        &self,
        checksum: &str,
    ) -> RepositoryResult<Option<RosterInfo>> {
        let data = self.data.read().unwrap();
        Ok(data
            .rosters
            .values()
            .find(|r| r.checksum == checksum)
            .cloned())
    }

    async fn store_roster(&self, roster: &Roster) -> RepositoryResult<RosterInfo> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let roster_id = data.next_roster_id;
        data.next_roster_id += 1;

        let info = RosterInfo {
            roster_id,
            roster_name: roster.name.clone(),
            checksum: roster.checksum.clone(),
            staff_count: roster.staff.len(),
            assignment_count: roster.assignments.len(),
        };
        data.rosters.insert(roster_id, info.clone());
        Ok(info)
    }

    async fn list_rosters(&self) -> RepositoryResult<Vec<RosterInfo>> {
        let data = self.data.read().unwrap();

        let mut rosters: Vec<RosterInfo> = data.rosters.values().cloned().collect();
        rosters.sort_by_key(|r| r.roster_id);
        Ok(rosters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn member(id: &str) -> StaffMember {
        StaffMember {
            id: StaffId::new(id),
            full_name: format!("Staff {}", id),
            max_hours_per_week: 40.0,
            current_week_hours: 0.0,
        }
    }

    fn new_assignment(staff_id: &str, date: &str, start: &str, end: &str) -> NewShiftAssignment {
        NewShiftAssignment {
            staff_id: StaffId::new(staff_id),
            staff_name: format!("Staff {}", staff_id),
            date: date.parse::<NaiveDate>().unwrap(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            total_hours: None,
            status: ShiftStatus::Scheduled,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_store_and_retrieve_staff() {
        let repo = LocalRepository::new();

        repo.add_staff_member(&member("S1")).await.unwrap();
        let retrieved = repo.get_staff_member(&StaffId::new("S1")).await.unwrap();
        assert_eq!(retrieved.full_name, "Staff S1");
        assert_eq!(repo.staff_count(), 1);
    }

    #[tokio::test]
    async fn test_list_staff_sorted() {
        let repo = LocalRepository::new();

        repo.add_staff_member(&member("S2")).await.unwrap();
        repo.add_staff_member(&member("S1")).await.unwrap();

        let staff = repo.list_staff().await.unwrap();
        assert_eq!(staff.len(), 2);
        assert_eq!(staff[0].id, StaffId::new("S1"));
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let repo = LocalRepository::new();

        let result = repo.get_staff_member(&StaffId::new("missing")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));

        let result = repo.get_assignment(ShiftId(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_assignment_ids_and_derived_hours() {
        let repo = LocalRepository::new();

        let a = repo
            .add_assignment(&new_assignment("S1", "2024-01-22", "08:00", "16:00"))
            .await
            .unwrap();
        let b = repo
            .add_assignment(&new_assignment("S1", "2024-01-23", "16:00", "23:00"))
            .await
            .unwrap();

        assert_eq!(a.id, ShiftId(1));
        assert_eq!(b.id, ShiftId(2));
        assert_eq!(a.total_hours, 8.0);
        assert_eq!(b.total_hours, 7.0);
    }

    #[tokio::test]
    async fn test_list_assignments_filtered() {
        let repo = LocalRepository::new();

        repo.add_assignment(&new_assignment("S1", "2024-01-22", "08:00", "16:00"))
            .await
            .unwrap();
        repo.add_assignment(&new_assignment("S2", "2024-01-22", "08:00", "16:00"))
            .await
            .unwrap();
        repo.add_assignment(&new_assignment("S1", "2024-01-23", "08:00", "16:00"))
            .await
            .unwrap();

        let all = repo
            .list_assignments(&AssignmentFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let s1 = repo
            .list_assignments(&AssignmentFilter {
                staff_id: Some(StaffId::new("S1")),
                date: None,
            })
            .await
            .unwrap();
        assert_eq!(s1.len(), 2);

        let s1_monday = repo
            .list_assignments(&AssignmentFilter {
                staff_id: Some(StaffId::new("S1")),
                date: Some("2024-01-22".parse().unwrap()),
            })
            .await
            .unwrap();
        assert_eq!(s1_monday.len(), 1);
    }

    #[tokio::test]
    async fn test_update_status_and_delete() {
        let repo = LocalRepository::new();

        let a = repo
            .add_assignment(&new_assignment("S1", "2024-01-22", "08:00", "16:00"))
            .await
            .unwrap();

        let updated = repo
            .update_assignment_status(a.id, ShiftStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(updated.status, ShiftStatus::Confirmed);

        assert_eq!(repo.delete_assignment(a.id).await.unwrap(), 1);
        assert_eq!(repo.delete_assignment(a.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_roster_checksum_lookup() {
        let repo = LocalRepository::new();

        let roster = Roster {
            name: "Tuần 4".to_string(),
            staff: vec![member("S1")],
            assignments: vec![new_assignment("S1", "2024-01-22", "08:00", "16:00")],
            checksum: "abc123".to_string(),
        };

        assert!(repo
            .find_roster_by_checksum("abc123")
            .await
            .unwrap()
            .is_none());

        let info = repo.store_roster(&roster).await.unwrap();
        assert_eq!(info.staff_count, 1);
        assert_eq!(info.assignment_count, 1);

        let found = repo.find_roster_by_checksum("abc123").await.unwrap();
        assert_eq!(found.unwrap().roster_id, info.roster_id);
    }

    #[tokio::test]
    async fn test_unhealthy_repository_rejects_writes() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let result = repo.add_staff_member(&member("S1")).await;
        assert!(matches!(result, Err(RepositoryError::ConnectionError(_))));
    }
}
