//! Admin user accounts

use chrono::Utc;
use revu_common::auth::{generate_salt, hash_password, ADMIN_ROLE};
use revu_common::Result;
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use super::to_db_timestamp;

/// Stored user credentials
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub role: String,
}

impl AdminUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Look up a user by email (case-insensitive)
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<AdminUser>> {
    let row = sqlx::query(
        "SELECT id, email, password_hash, password_salt, role FROM users WHERE email = ? COLLATE NOCASE",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(AdminUser {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            password_salt: row.try_get("password_salt")?,
            role: row.try_get("role")?,
        })),
        None => Ok(None),
    }
}

/// Create an admin account, or reset the password of an existing one
///
/// Returns the user id.
pub async fn upsert_admin(pool: &SqlitePool, email: &str, password: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let salt = generate_salt();
    let hash = hash_password(password, &salt);

    if let Some(existing) = find_by_email(pool, &email).await? {
        sqlx::query("UPDATE users SET password_hash = ?, password_salt = ?, role = ? WHERE id = ?")
            .bind(&hash)
            .bind(&salt)
            .bind(ADMIN_ROLE)
            .bind(&existing.id)
            .execute(pool)
            .await?;
        info!(user_id = %existing.id, "Admin password reset");
        return Ok(existing.id);
    }

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, password_salt, role, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&email)
    .bind(&hash)
    .bind(&salt)
    .bind(ADMIN_ROLE)
    .bind(to_db_timestamp(Utc::now()))
    .execute(pool)
    .await?;

    info!(user_id = %id, email = %email, "Admin account created");
    Ok(id)
}

/// Create an admin account only when no user with that email exists
///
/// Returns true when an account was created.
pub async fn ensure_admin(pool: &SqlitePool, email: &str, password: &str) -> Result<bool> {
    if find_by_email(pool, email).await?.is_some() {
        return Ok(false);
    }
    upsert_admin(pool, email, password).await?;
    Ok(true)
}
