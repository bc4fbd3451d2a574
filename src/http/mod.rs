//! Axum-based HTTP server for the REST API.
//!
//! This module is only available with the `http-server` feature.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
