//! Schedule conflict detection.
//!
//! Flags two kinds of conflicts over a snapshot of staff and their shift
//! assignments:
//!
//! 1. **Overtime**: a staff member's committed weekly hours plus a new
//!    assignment exceed their configured ceiling
//! 2. **Overlap**: two assignments for the same staff member on the same
//!    date with intersecting time ranges (half-open rule, so back-to-back
//!    shifts do not conflict)
//!
//! The detector is a pure function over its two inputs: no mutation, no
//! I/O, deterministic output. Assignments referencing a staff member that
//! is not in the snapshot are skipped; data-quality problems are the
//! validation service's concern, not a conflict.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{ShiftAssignment, ShiftId, StaffId, StaffMember};
use crate::models::shift::ShiftInterval;

/// A detected scheduling conflict.
///
/// Conflicts are deduplicated: one `Overtime` per staff member and one
/// `Overlap` per staff member and date, regardless of how many assignments
/// trip the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// Weekly hours ceiling exceeded.
    Overtime {
        staff_id: StaffId,
        staff_name: String,
        max_hours_per_week: f64,
        /// Hours committed before the checked assignment set.
        committed_hours: f64,
        /// Largest single-assignment excess over the ceiling.
        excess_hours: f64,
    },
    /// Intersecting shift assignments on one date.
    Overlap {
        staff_id: StaffId,
        staff_name: String,
        date: NaiveDate,
        /// Every assignment on this staff/date involved in at least one
        /// pairwise overlap, in ascending id order.
        assignment_ids: Vec<ShiftId>,
    },
}

impl Conflict {
    /// Human-readable conflict message shown in the frontend (Vietnamese).
    pub fn message(&self) -> String {
        match self {
            Conflict::Overtime {
                staff_name,
                max_hours_per_week,
                ..
            } => format!(
                "{}: Vượt quá giờ làm tối đa ({}h/tuần)",
                staff_name, max_hours_per_week
            ),
            Conflict::Overlap {
                staff_name, date, ..
            } => format!("{}: Trùng lịch ngày {}", staff_name, date),
        }
    }
}

/// Conflict report over one schedule snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub total_assignments: usize,
    pub staff_count: usize,
    pub conflicts: Vec<Conflict>,
    /// Rendered messages, index-aligned with `conflicts`.
    pub messages: Vec<String>,
}

impl ConflictReport {
    pub fn new(conflicts: Vec<Conflict>, total_assignments: usize, staff_count: usize) -> Self {
        let messages = conflicts.iter().map(Conflict::message).collect();
        Self {
            total_assignments,
            staff_count,
            conflicts,
            messages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Detect scheduling conflicts in a snapshot of assignments and staff.
///
/// For every assignment the owning staff member is looked up by id; when
/// the staff record is absent the assignment is skipped. The overtime check
/// compares `current_week_hours + total_hours` against the staff member's
/// ceiling; callers must ensure `current_week_hours` does not already
/// include the assignments passed here (see [`StaffMember`]). The overlap
/// check compares same-staff, same-date assignment pairs after resolving
/// each one's clock times into a half-open interval, so overnight shifts
/// compare correctly against later shifts on the same date.
///
/// Runs in O(n²) over the assignment count, which is fine for the roster
/// sizes a single care home produces.
pub fn detect_conflicts(assignments: &[ShiftAssignment], staff: &[StaffMember]) -> Vec<Conflict> {
    let staff_by_id: HashMap<&StaffId, &StaffMember> =
        staff.iter().map(|s| (&s.id, s)).collect();

    let mut conflicts = Vec::new();
    let mut overtime_index: HashMap<StaffId, usize> = HashMap::new();
    let mut overlap_index: HashMap<(StaffId, NaiveDate), usize> = HashMap::new();

    for assignment in assignments {
        let member = match staff_by_id.get(&assignment.staff_id) {
            Some(member) => member,
            None => continue,
        };

        // Overtime: committed hours plus this assignment over the ceiling.
        let projected = member.current_week_hours + assignment.total_hours;
        if projected > member.max_hours_per_week {
            let excess = projected - member.max_hours_per_week;
            match overtime_index.get(&assignment.staff_id) {
                Some(&idx) => {
                    if let Conflict::Overtime { excess_hours, .. } = &mut conflicts[idx] {
                        if excess > *excess_hours {
                            *excess_hours = excess;
                        }
                    }
                }
                None => {
                    overtime_index.insert(assignment.staff_id.clone(), conflicts.len());
                    conflicts.push(Conflict::Overtime {
                        staff_id: assignment.staff_id.clone(),
                        staff_name: assignment.staff_name.clone(),
                        max_hours_per_week: member.max_hours_per_week,
                        committed_hours: member.current_week_hours,
                        excess_hours: excess,
                    });
                }
            }
        }

        // Overlap: pairwise against other assignments on the same staff/date.
        let interval = ShiftInterval::resolve(assignment.start_time, assignment.end_time);
        let mut involved: HashSet<ShiftId> = HashSet::new();
        for other in assignments {
            if other.id == assignment.id
                || other.staff_id != assignment.staff_id
                || other.date != assignment.date
            {
                continue;
            }
            let other_interval = ShiftInterval::resolve(other.start_time, other.end_time);
            if interval.overlaps(&other_interval) {
                involved.insert(assignment.id);
                involved.insert(other.id);
            }
        }

        if !involved.is_empty() {
            let key = (assignment.staff_id.clone(), assignment.date);
            match overlap_index.get(&key) {
                Some(&idx) => {
                    if let Conflict::Overlap { assignment_ids, .. } = &mut conflicts[idx] {
                        for id in involved {
                            if !assignment_ids.contains(&id) {
                                assignment_ids.push(id);
                            }
                        }
                        assignment_ids.sort();
                    }
                }
                None => {
                    let mut assignment_ids: Vec<ShiftId> = involved.into_iter().collect();
                    assignment_ids.sort();
                    overlap_index.insert(key, conflicts.len());
                    conflicts.push(Conflict::Overlap {
                        staff_id: assignment.staff_id.clone(),
                        staff_name: assignment.staff_name.clone(),
                        date: assignment.date,
                        assignment_ids,
                    });
                }
            }
        }
    }

    conflicts
}

/// Convenience wrapper returning only the rendered messages.
pub fn detect_conflict_messages(
    assignments: &[ShiftAssignment],
    staff: &[StaffMember],
) -> Vec<String> {
    detect_conflicts(assignments, staff)
        .iter()
        .map(Conflict::message)
        .collect()
}
