//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    AssignmentListResponse, AssignmentQuery, CreateStaffRequest, HealthResponse,
    ImportRosterRequest, ImportRosterResponse, JobStatusResponse, RosterListResponse,
    StaffListResponse, UpdateStatusRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    AssignmentFilter, ConflictReport, NewShiftAssignment, ShiftAssignment, ShiftId, StaffId,
    StaffMember, ValidationReport,
};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the storage
/// backend is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Staff
// =============================================================================

/// GET /v1/staff
///
/// List all staff members.
pub async fn list_staff(State(state): State<AppState>) -> HandlerResult<StaffListResponse> {
    let staff = db_services::list_staff(state.repository.as_ref()).await?;
    let total = staff.len();

    Ok(Json(StaffListResponse { staff, total }))
}

/// POST /v1/staff
///
/// Create (or replace) a staff member.
pub async fn create_staff(
    State(state): State<AppState>,
    Json(request): Json<CreateStaffRequest>,
) -> Result<(axum::http::StatusCode, Json<StaffMember>), AppError> {
    if request.id.value().is_empty() {
        return Err(AppError::BadRequest("Staff id must not be empty".to_string()));
    }

    let member = db_services::add_staff_member(state.repository.as_ref(), &request).await?;
    Ok((axum::http::StatusCode::CREATED, Json(member)))
}

/// GET /v1/staff/{staff_id}
///
/// Fetch a single staff member.
pub async fn get_staff_member(
    State(state): State<AppState>,
    Path(staff_id): Path<String>,
) -> HandlerResult<StaffMember> {
    let member =
        db_services::get_staff_member(state.repository.as_ref(), &StaffId::new(staff_id)).await?;
    Ok(Json(member))
}

// =============================================================================
// Assignments
// =============================================================================

/// GET /v1/assignments
///
/// List shift assignments, optionally filtered by staff member and date.
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<AssignmentQuery>,
) -> HandlerResult<AssignmentListResponse> {
    let filter = AssignmentFilter {
        staff_id: query.staff_id.map(StaffId::new),
        date: query.date,
    };
    let assignments = db_services::list_assignments(state.repository.as_ref(), &filter).await?;
    let total = assignments.len();

    Ok(Json(AssignmentListResponse { assignments, total }))
}

/// POST /v1/assignments
///
/// Create a shift assignment.
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(request): Json<NewShiftAssignment>,
) -> Result<(axum::http::StatusCode, Json<ShiftAssignment>), AppError> {
    let assignment = db_services::create_assignment(state.repository.as_ref(), &request).await?;
    Ok((axum::http::StatusCode::CREATED, Json(assignment)))
}

/// PATCH /v1/assignments/{shift_id}/status
///
/// Apply a status transition to an assignment.
pub async fn update_assignment_status(
    State(state): State<AppState>,
    Path(shift_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> HandlerResult<ShiftAssignment> {
    let assignment = db_services::update_assignment_status(
        state.repository.as_ref(),
        ShiftId::new(shift_id),
        request.status,
    )
    .await?;
    Ok(Json(assignment))
}

/// DELETE /v1/assignments/{shift_id}
///
/// Delete an assignment.
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<axum::http::StatusCode, AppError> {
    db_services::delete_assignment(state.repository.as_ref(), ShiftId::new(shift_id)).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

// =============================================================================
// Reports
// =============================================================================

/// GET /v1/conflicts
///
/// Run the conflict sweep over the stored schedule.
pub async fn get_conflict_report(State(state): State<AppState>) -> HandlerResult<ConflictReport> {
    let report = db_services::conflict_report(state.repository.as_ref()).await?;
    Ok(Json(report))
}

/// GET /v1/validation-report
///
/// Run the data-quality sweep over the stored schedule.
pub async fn get_validation_report(
    State(state): State<AppState>,
) -> HandlerResult<ValidationReport> {
    let report = db_services::validation_report(state.repository.as_ref()).await?;
    Ok(Json(report))
}

// =============================================================================
// Rosters
// =============================================================================

/// GET /v1/rosters
///
/// List imported rosters.
pub async fn list_rosters(State(state): State<AppState>) -> HandlerResult<RosterListResponse> {
    let rosters = db_services::list_rosters(state.repository.as_ref()).await?;
    let total = rosters.len();

    Ok(Json(RosterListResponse { rosters, total }))
}

/// POST /v1/rosters
///
/// Import a roster asynchronously. Returns a job ID for tracking progress.
pub async fn import_roster(
    State(state): State<AppState>,
    Json(request): Json<ImportRosterRequest>,
) -> Result<(axum::http::StatusCode, Json<ImportRosterResponse>), AppError> {
    // Convert JSON values to strings for the processing pipeline
    let roster_json_str = serde_json::to_string(&request.roster_json)
        .map_err(|e| AppError::BadRequest(format!("Invalid roster JSON: {}", e)))?;

    // Create a job for tracking progress
    let job_id = state.job_tracker.create_job();
    let response_job_id = job_id.clone();

    // Spawn background task to process the roster
    let tracker = state.job_tracker.clone();
    let repo = state.repository.clone();
    let roster_name = request.name.clone();

    tokio::spawn(async move {
        let _ = crate::services::roster_processor::process_roster_async(
            job_id,
            tracker,
            repo,
            roster_name,
            roster_json_str,
        )
        .await;
    });

    Ok((
        axum::http::StatusCode::ACCEPTED,
        Json(ImportRosterResponse {
            job_id: response_job_id.clone(),
            message: format!(
                "Roster import started. Track progress at /v1/jobs/{}/logs",
                response_job_id
            ),
        }),
    ))
}

// =============================================================================
// Async Job Management
// =============================================================================

/// GET /v1/jobs/{job_id}
///
/// Get the current status and logs of a background job.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> HandlerResult<JobStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

    Ok(Json(JobStatusResponse {
        job_id: job.job_id,
        status: format!("{:?}", job.status).to_lowercase(),
        logs: job.logs,
        result: job.result,
    }))
}

/// GET /v1/jobs/{job_id}/logs
///
/// Stream job logs via Server-Sent Events (SSE).
pub async fn stream_job_logs(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    // Verify job exists
    if state.job_tracker.get_job(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", job_id)));
    }

    let tracker = state.job_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            // Get current logs
            let logs = tracker.get_logs(&job_id);

            // Send new logs since last check
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            // Check if job is complete
            if let Some(job) = tracker.get_job(&job_id) {
                if job.status != crate::services::job_tracker::JobStatus::Running {
                    // Send final status event. Use serde serialization instead
                    // of Debug formatting to ensure consistent lowercase status
                    // values ("completed", "failed").
                    let final_event = serde_json::json!({
                        "status": job.status,
                        "result": job.result,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            // Wait before checking again
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
