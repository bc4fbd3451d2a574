//! Async roster processing service.
//!
//! Handles roster import (parsing, data-quality validation, storage,
//! conflict sweep) in the background, emitting progress logs.

use crate::api::RosterInfo;
use crate::db::repository::FullRepository;
use crate::db::services as db_services;
use crate::models;
use crate::services::job_tracker::{JobTracker, LogLevel};
use std::sync::Arc;

/// Process a roster asynchronously: parse, validate, store, and run the
/// conflict sweep.
///
/// This function is designed to be spawned as a background task. It logs
/// progress to the job tracker so users can see what's happening via SSE.
///
/// # Arguments
/// * `job_id` - The job ID for tracking progress
/// * `tracker` - Job tracker for logging
/// * `repo` - Repository for storing the roster
/// * `roster_name` - Name for the roster
/// * `roster_json` - JSON string of the roster
///
/// # Returns
/// * Roster info on success, or error message on failure
pub async fn process_roster_async(
    job_id: String,
    tracker: JobTracker,
    repo: Arc<dyn FullRepository>,
    roster_name: String,
    roster_json: String,
) -> Result<RosterInfo, String> {
    tracker.log(&job_id, LogLevel::Info, "Starting roster processing...");

    // Step 1: Parse roster JSON
    tracker.log(&job_id, LogLevel::Info, "Parsing roster JSON...");
    let roster = match tokio::task::spawn_blocking({
        let roster_json = roster_json.clone();
        let roster_name = roster_name.clone();
        move || {
            models::shift::parse_roster_json_str(&roster_json).map(|mut r| {
                if r.name.is_empty() {
                    r.name = roster_name;
                }
                r
            })
        }
    })
    .await
    {
        Ok(Ok(roster)) => {
            tracker.log(
                &job_id,
                LogLevel::Success,
                format!(
                    "✓ Parsed roster with {} staff and {} assignments",
                    roster.staff.len(),
                    roster.assignments.len()
                ),
            );
            roster
        }
        Ok(Err(e)) => {
            let msg = format!("Failed to parse roster: {}", e);
            tracker.fail_job(&job_id, &msg);
            return Err(msg);
        }
        Err(e) => {
            let msg = format!("Parse task panic: {}", e);
            tracker.fail_job(&job_id, &msg);
            return Err(msg);
        }
    };

    // Step 2: Data-quality sweep before anything is stored
    let report = db_services::validate_roster(&roster);
    if report.errors.is_empty() && report.warnings.is_empty() {
        tracker.log(&job_id, LogLevel::Success, "✓ Roster passed validation");
    } else {
        for issue in report.errors.iter().chain(report.warnings.iter()) {
            let level = match issue.status {
                crate::api::ValidationStatus::Error => LogLevel::Warning,
                _ => LogLevel::Info,
            };
            tracker.log(&job_id, level, format!("{}: {}", issue.staff_id, issue.description));
        }
        tracker.log(
            &job_id,
            LogLevel::Warning,
            format!(
                "Validation found {} errors and {} warnings; importing anyway",
                report.errors.len(),
                report.warnings.len()
            ),
        );
    }

    // Step 3: Store roster (checksum-deduplicated)
    tracker.log(&job_id, LogLevel::Info, "Storing roster in repository...");
    let info = match db_services::import_roster(repo.as_ref(), &roster).await {
        Ok(info) => {
            tracker.log(
                &job_id,
                LogLevel::Success,
                format!("✓ Stored roster (ID: {})", info.roster_id),
            );
            info
        }
        Err(e) => {
            let msg = format!("Failed to store roster: {}", e);
            tracker.fail_job(&job_id, &msg);
            return Err(msg);
        }
    };

    // Step 4: Conflict sweep over the stored schedule
    match db_services::conflict_report(repo.as_ref()).await {
        Ok(conflicts) if conflicts.is_empty() => {
            tracker.log(&job_id, LogLevel::Success, "✓ No scheduling conflicts");
        }
        Ok(conflicts) => {
            for message in &conflicts.messages {
                tracker.log(&job_id, LogLevel::Warning, message.clone());
            }
            tracker.log(
                &job_id,
                LogLevel::Warning,
                format!("Detected {} scheduling conflicts", conflicts.conflicts.len()),
            );
        }
        Err(e) => {
            tracker.log(
                &job_id,
                LogLevel::Warning,
                format!("Conflict sweep failed: {}", e),
            );
        }
    }

    // Mark job as complete
    tracker.log(
        &job_id,
        LogLevel::Success,
        format!("✅ Roster processing complete! ID: {}", info.roster_id),
    );

    let result = serde_json::json!({
        "roster_id": info.roster_id,
        "roster_name": info.roster_name,
        "staff_count": info.staff_count,
        "assignment_count": info.assignment_count,
    });
    tracker.complete_job(&job_id, Some(result));

    Ok(info)
}
