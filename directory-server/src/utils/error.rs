//! Unified Error Handling
//!
//! Provides the application-level error type and response structures:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API error envelope
//! - [`FieldError`] - a single field-level validation failure
//!
//! # Error code table
//!
//! | Code | Status | Meaning |
//! |-------|--------|------------------------------|
//! | E0002 | 400 | Validation failed |
//! | E0003 | 404 | Resource not found |
//! | E0004 | 409 | Resource conflict |
//! | E0006 | 400 | Invalid request |
//! | E9001 | 500 | Internal server error |
//! | E9002 | 500 | Database error |
//! | E9003 | 500 | Email generation exhausted |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Unified API error envelope
///
/// ```json
/// {
///   "code": "E0002",
///   "message": "Validation failed",
///   "data": [{ "field": "first_name", "message": "..." }]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Optional payload (field errors for validation failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// A single violated validation rule, tagged with the offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "this field is required")
    }
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid request: {0}")]
    Invalid(String),

    // ========== System Errors ==========
    #[error("No unique email address available")]
    EmailExhausted,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        AppError::Validation(errors)
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::Invalid(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(anyhow::anyhow!(msg.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, data) = match self {
            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg, None),

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg, None),

            // Validation (400) - carries every violated rule
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "E0002",
                "Validation failed".to_string(),
                Some(errors),
            ),

            // Invalid request (400)
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg, None),

            // Email generation exhausted (500) - data anomaly, not bad input
            AppError::EmailExhausted => {
                error!(target: "email", "Unique email candidate space exhausted");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9003",
                    "Could not generate a unique email address".to_string(),
                    None,
                )
            }

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                    None,
                )
            }

            // Internal errors (500)
            AppError::Internal(err) => {
                error!(target: "internal", error = ?err, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(AppResponse::<Vec<FieldError>> {
            code: code.to_string(),
            message,
            data,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
