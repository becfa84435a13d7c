//! Error types for revu-server
//!
//! Every failure is turned into a JSON body of the form
//! `{"error": "<message>", "issues": {...}?}` at the request boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use revu_common::ValidationIssues;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Structural payload violations (400)
    #[error("Invalid payload: {0}")]
    MalformedPayload(ValidationIssues),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Selections do not fit the product (400)
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Missing or expired admin session (401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Login with unknown email, wrong password or non-admin role (401)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Product missing or inactive on the public side (404)
    #[error("Product not available")]
    ProductUnavailable,

    /// Conflict (409), e.g. duplicate slug
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<revu_common::Error> for ApiError {
    fn from(err: revu_common::Error) -> Self {
        use revu_common::Error;
        match err {
            Error::MalformedPayload(issues) => ApiError::MalformedPayload(issues),
            Error::InvalidSelection(msg) => ApiError::InvalidSelection(msg),
            Error::ProductUnavailable => ApiError::ProductUnavailable,
            Error::ConflictingSlug(_) => ApiError::Conflict("Slug already exists".to_string()),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::Unauthorized => ApiError::Unauthorized,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationIssues> for ApiError {
    fn from(issues: ValidationIssues) -> Self {
        ApiError::MalformedPayload(issues)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(format!("Database error: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedPayload(issues) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid payload", "issues": issues }),
            ),
            ApiError::BadRequest(msg) | ApiError::InvalidSelection(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" })),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Invalid credentials" }),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::ProductUnavailable => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Product not available" }),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            ApiError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
