//! # revu Common Library
//!
//! Shared code for the revu review service:
//! - Domain model (products, category groups, options, reviews)
//! - Payload validation with exhaustive field-level issues
//! - Option membership checks for review submissions
//! - Review aggregation and CSV export
//! - Configuration loading and database initialization
//! - Password hashing and session token helpers

pub mod aggregate;
pub mod auth;
pub mod config;
pub mod csv_export;
pub mod db;
pub mod error;
pub mod membership;
pub mod model;
pub mod slug;
pub mod validation;

pub use error::{Error, Result};
pub use validation::ValidationIssues;
