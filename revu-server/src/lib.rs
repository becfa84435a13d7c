//! revu-server library - product review service
//!
//! Public routes serve the catalog, review forms and review submission.
//! Admin routes require a session token obtained from `/api/admin/login`.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod seed;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Lifetime of newly issued admin sessions
    pub session_ttl_hours: i64,
}

impl AppState {
    pub fn new(db: SqlitePool, session_ttl_hours: i64) -> Self {
        Self {
            db,
            session_ttl_hours,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;

    // Admin routes (require a session)
    let protected = Router::new()
        .merge(api::products::product_routes())
        .merge(api::results::results_routes())
        .merge(api::export::export_routes())
        .merge(api::auth::logout_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes
    let public = Router::new()
        .merge(api::health_routes())
        .merge(api::auth::login_routes())
        .merge(api::catalog::catalog_routes())
        .merge(api::reviews::review_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
