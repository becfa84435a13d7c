//! HTTP API handlers for revu-server

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

pub mod auth;
pub mod catalog;
pub mod export;
pub mod health;
pub mod products;
pub mod results;
pub mod reviews;

pub use auth::{auth_middleware, AdminSession};
pub use health::health_routes;

/// Untyped JSON request body
///
/// Bodies are validated field by field after extraction, so this only
/// rejects requests that are not JSON at all.
#[derive(Debug)]
pub struct Payload(pub Value);

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// `{"ok": true}`
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { ok: true })
    }
}
