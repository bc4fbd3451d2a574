//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Staff
        .route("/staff", get(handlers::list_staff))
        .route("/staff", post(handlers::create_staff))
        .route("/staff/{staff_id}", get(handlers::get_staff_member))
        // Shift assignments
        .route("/assignments", get(handlers::list_assignments))
        .route("/assignments", post(handlers::create_assignment))
        .route(
            "/assignments/{shift_id}/status",
            patch(handlers::update_assignment_status),
        )
        .route("/assignments/{shift_id}", delete(handlers::delete_assignment))
        // Reports
        .route("/conflicts", get(handlers::get_conflict_report))
        .route("/validation-report", get(handlers::get_validation_report))
        // Roster import
        .route("/rosters", get(handlers::list_rosters))
        .route("/rosters", post(handlers::import_roster))
        // Job management
        .route("/jobs/{job_id}", get(handlers::get_job_status))
        .route("/jobs/{job_id}/logs", get(handlers::stream_job_logs));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Allow large roster payloads during imports.
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
