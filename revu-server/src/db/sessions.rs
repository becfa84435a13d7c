//! Admin session tokens
//!
//! A session is an opaque random token mapped to a user with an expiry.
//! Expired rows are ignored on lookup and purged opportunistically.

use chrono::{DateTime, Duration, Utc};
use revu_common::auth::generate_session_token;
use revu_common::Result;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::{from_db_timestamp, to_db_timestamp};

/// A live admin session
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Issue a new session token for `user_id`, valid for `ttl_hours`
pub async fn create_session(
    pool: &SqlitePool,
    user_id: &str,
    ttl_hours: i64,
) -> Result<(String, DateTime<Utc>)> {
    let token = generate_session_token();
    let now = Utc::now();
    let expires_at = now + Duration::hours(ttl_hours);

    sqlx::query(
        "INSERT INTO admin_sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&token)
    .bind(user_id)
    .bind(to_db_timestamp(now))
    .bind(to_db_timestamp(expires_at))
    .execute(pool)
    .await?;

    Ok((token, expires_at))
}

/// Resolve a token to its session, if present and unexpired
pub async fn find_active_session(pool: &SqlitePool, token: &str) -> Result<Option<SessionRecord>> {
    let row = sqlx::query(
        r#"
        SELECT s.token, s.user_id, s.expires_at, u.email
        FROM admin_sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ? AND s.expires_at > ? AND u.role = 'ADMIN'
        "#,
    )
    .bind(token)
    .bind(to_db_timestamp(Utc::now()))
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let expires_at: String = row.try_get("expires_at")?;
            Ok(Some(SessionRecord {
                token: row.try_get("token")?,
                user_id: row.try_get("user_id")?,
                email: row.try_get("email")?,
                expires_at: from_db_timestamp(&expires_at)?,
            }))
        }
        None => Ok(None),
    }
}

/// Delete a session; returns true when a row was removed
pub async fn revoke_session(pool: &SqlitePool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM admin_sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove expired sessions; returns the number removed
pub async fn purge_expired(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= ?")
        .bind(to_db_timestamp(Utc::now()))
        .execute(pool)
        .await?;
    if result.rows_affected() > 0 {
        debug!("Purged {} expired admin sessions", result.rows_affected());
    }
    Ok(result.rows_affected())
}
