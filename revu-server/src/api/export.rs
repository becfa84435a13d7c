//! CSV export endpoint

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use revu_common::csv_export::{export_filename, export_reviews};
use tracing::info;

use super::products::product_not_found;
use super::AdminSession;
use crate::db::{products, reviews};
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/admin/products/:id/export
///
/// Reviews newest first, served as a CSV attachment.
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if products::load_product(&state.db, &id).await?.is_none() {
        return Err(product_not_found(&id));
    }

    let reviews = reviews::load_reviews(&state.db, &id).await?;
    let csv = export_reviews(&reviews)?;

    info!(product_id = %id, admin = %session.email, rows = reviews.len(), "Exported reviews");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", export_filename(&id)),
            ),
        ],
        csv,
    ))
}

/// Build export routes
pub fn export_routes() -> Router<AppState> {
    Router::new().route("/api/admin/products/:id/export", get(export_csv))
}
