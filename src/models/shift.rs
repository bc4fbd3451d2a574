//! Wall-clock shift times and roster JSON parsing.
//!
//! Shift times arrive from the frontend as `HH:MM` strings (24-hour).
//! [`ClockTime`] stores them as minutes since midnight; comparisons between
//! shifts resolve the two clock times into a half-open minute interval
//! anchored at the shift date's midnight, wrapping overnight shifts onto
//! the following day.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::api::{self, ShiftStatus};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Wall-clock time of day, minute resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Build from minutes since midnight. Values of 24h or more are invalid.
    pub fn from_minutes(minutes: u32) -> Result<Self, String> {
        if minutes >= MINUTES_PER_DAY {
            return Err(format!("Clock time out of range: {} minutes", minutes));
        }
        Ok(ClockTime(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0 / 60
    }

    pub fn minute(&self) -> u32 {
        self.0 % 60
    }
}

impl FromStr for ClockTime {
    type Err = String;

    /// Parse an `HH:MM` string, 24-hour clock.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hh, mm) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid time '{}': expected HH:MM", s))?;
        let hours: u32 = hh
            .parse()
            .map_err(|_| format!("Invalid hours in '{}'", s))?;
        let minutes: u32 = mm
            .parse()
            .map_err(|_| format!("Invalid minutes in '{}'", s))?;
        if hours >= 24 || minutes >= 60 {
            return Err(format!("Time '{}' out of range", s));
        }
        Ok(ClockTime(hours * 60 + minutes))
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Half-open minute interval `[start, end)` anchored at a shift date's
/// midnight. `end` may exceed 24h for shifts crossing midnight.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShiftInterval {
    pub start: u32,
    pub end: u32,
}

impl ShiftInterval {
    /// Resolve two clock times into an interval. `end < start` means the
    /// shift crosses midnight and ends on the following day; identical
    /// times resolve to a zero-length interval.
    pub fn resolve(start: ClockTime, end: ClockTime) -> Self {
        let start_min = start.minutes();
        let mut end_min = end.minutes();
        if end_min < start_min {
            end_min += MINUTES_PER_DAY;
        }
        ShiftInterval {
            start: start_min,
            end: end_min,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }

    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / 60.0
    }

    /// Half-open overlap rule: `[s1,e1)` and `[s2,e2)` overlap iff
    /// `s1 < e2 && s2 < e1`. Touching endpoints do not overlap, and a
    /// zero-length interval overlaps nothing.
    pub fn overlaps(&self, other: &ShiftInterval) -> bool {
        self.start < other.end
            && other.start < self.end
            && self.start < self.end
            && other.start < other.end
    }
}

/// Derive a shift's duration in hours from its clock times (overnight-aware).
///
/// This is the creation-time derivation for `total_hours`; stored
/// assignments keep the value they were created with.
pub fn derived_total_hours(start: ClockTime, end: ClockTime) -> f64 {
    ShiftInterval::resolve(start, end).duration_hours()
}

#[derive(Deserialize)]
struct RosterInput {
    #[serde(default)]
    name: String,
    #[serde(default)]
    staff: Vec<api::StaffMember>,
    #[serde(default)]
    assignments: Vec<AssignmentInput>,
}

#[derive(Deserialize)]
struct AssignmentInput {
    staff_id: api::StaffId,
    #[serde(default)]
    staff_name: String,
    date: chrono::NaiveDate,
    start_time: ClockTime,
    end_time: ClockTime,
    #[serde(default)]
    total_hours: Option<f64>,
    #[serde(default)]
    status: Option<ShiftStatus>,
}

/// Parse a roster from a JSON string.
///
/// Deserializes the roster payload, fills each assignment's `staff_name`
/// from the matching staff record when the payload leaves it blank, derives
/// `total_hours` from the clock times when absent, and computes the roster
/// checksum over the raw JSON content.
///
/// # Arguments
///
/// * `roster_json` - Roster JSON: `{ name, staff: [...], assignments: [...] }`
///
/// # Returns
///
/// A fully populated `Roster` with derived hours and computed checksum.
pub fn parse_roster_json_str(roster_json: &str) -> Result<api::Roster> {
    let input: RosterInput =
        serde_json::from_str(roster_json).context("Invalid roster JSON")?;

    let assignments: Vec<api::NewShiftAssignment> = input
        .assignments
        .into_iter()
        .map(|a| {
            let staff_name = if a.staff_name.is_empty() {
                input
                    .staff
                    .iter()
                    .find(|s| s.id == a.staff_id)
                    .map(|s| s.full_name.clone())
                    .unwrap_or_default()
            } else {
                a.staff_name
            };
            let total_hours = a
                .total_hours
                .unwrap_or_else(|| derived_total_hours(a.start_time, a.end_time));
            api::NewShiftAssignment {
                staff_id: a.staff_id,
                staff_name,
                date: a.date,
                start_time: a.start_time,
                end_time: a.end_time,
                total_hours: Some(total_hours),
                status: a.status.unwrap_or(ShiftStatus::Scheduled),
            }
        })
        .collect();

    Ok(api::Roster {
        name: input.name,
        staff: input.staff,
        assignments,
        checksum: crate::db::calculate_checksum(roster_json),
    })
}
