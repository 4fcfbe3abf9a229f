//! API route modules
//!
//! - [`health`] - health checks
//! - [`employees`] - employee directory CRUD

pub mod employees;
pub mod health;

use axum::Router;

use crate::core::ServerState;

/// Assemble all API routes
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(employees::router())
}
