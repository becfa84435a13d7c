//! Common error types for revu

use thiserror::Error;

use crate::validation::ValidationIssues;

/// Common result type for revu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the core and the HTTP service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload failed structural validation; carries every violated field
    #[error("Invalid payload: {0}")]
    MalformedPayload(ValidationIssues),

    /// Selected options do not fit the product's category tree
    #[error("{0}")]
    InvalidSelection(String),

    /// Product is missing or inactive; callers cannot tell which
    #[error("Product not available")]
    ProductUnavailable,

    /// Another product already uses this slug
    #[error("Slug already exists: {0}")]
    ConflictingSlug(String),

    /// Missing or invalid admin credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationIssues> for Error {
    fn from(issues: ValidationIssues) -> Self {
        Error::MalformedPayload(issues)
    }
}
