//! Admin login, logout and the session middleware
//!
//! Protected routes sit behind [`auth_middleware`], which resolves the
//! `Authorization: Bearer <token>` header to a live session and inserts an
//! [`AdminSession`] into the request extensions. Handlers take it through
//! `Extension<AdminSession>`; holding one is the proof of authorization.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    routing::post,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use revu_common::auth::verify_password;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{OkResponse, Payload};
use crate::db::{sessions, users};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Authenticated admin, inserted by [`auth_middleware`]
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user_id: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub ok: bool,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Extract the token from an `Authorization: Bearer` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Session middleware for admin routes; 401 when no live session matches
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    let session = sessions::find_active_session(&state.db, &token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(AdminSession {
        user_id: session.user_id,
        email: session.email,
        token: session.token,
    });

    Ok(next.run(request).await)
}

/// POST /api/admin/login
///
/// **Request:** `{"email": "...", "password": "..."}`
/// **Response:** `{"ok": true, "token": "...", "expiresAt": "..."}`
///
/// Unknown email, wrong password and non-admin role all give the same 401.
pub async fn login(
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> ApiResult<Json<LoginResponse>> {
    let request: LoginRequest = serde_json::from_value(payload)
        .map_err(|_| ApiError::BadRequest("Email and password are required".to_string()))?;

    let user = users::find_by_email(&state.db, &request.email)
        .await?
        .filter(|u| u.is_admin())
        .filter(|u| verify_password(&request.password, &u.password_salt, &u.password_hash));

    let Some(user) = user else {
        warn!("Rejected admin login");
        return Err(ApiError::InvalidCredentials);
    };

    sessions::purge_expired(&state.db).await?;
    let (token, expires_at) =
        sessions::create_session(&state.db, &user.id, state.session_ttl_hours).await?;

    info!(user_id = %user.id, "Admin logged in");

    Ok(Json(LoginResponse {
        ok: true,
        token,
        expires_at,
    }))
}

/// POST /api/admin/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> ApiResult<Json<OkResponse>> {
    sessions::revoke_session(&state.db, &session.token).await?;
    info!(user_id = %session.user_id, "Admin logged out");
    Ok(OkResponse::ok())
}

/// Login route (public)
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/api/admin/login", post(login))
}

/// Logout route (requires a session)
pub fn logout_routes() -> Router<AppState> {
    Router::new().route("/api/admin/logout", post(logout))
}
