//! Database access layer for revu-server
//!
//! Repositories return `revu_common::Result` so handlers can map domain
//! errors (slug conflicts, missing rows) onto HTTP statuses.

use chrono::{DateTime, SecondsFormat, Utc};
use revu_common::{Error, Result};
use sqlx::SqlitePool;
use std::path::Path;

pub mod products;
pub mod reviews;
pub mod sessions;
pub mod users;

/// Open the service database, creating schema as needed
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    revu_common::db::init_database(db_path).await
}

/// Storage format for timestamps: fixed-width UTC RFC 3339, so string order
/// equals chronological order
pub(crate) fn to_db_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn from_db_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Bad timestamp '{}': {}", value, e)))
}

/// True when a sqlx error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
