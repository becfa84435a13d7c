//! Admin product management endpoints
//!
//! All handlers here sit behind the session middleware and take the
//! [`AdminSession`] capability as an extractor.

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Extension, Json, Router,
};
use revu_common::model::{Product, UpdateOutcome, STRUCTURE_LOCKED_WARNING};
use revu_common::validation::{validate_product, validate_product_update, validate_toggle};
use serde::Serialize;
use tracing::info;

use super::{AdminSession, OkResponse, Payload};
use crate::db::products::{self, ProductSummary};
use crate::db::reviews;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateProductResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Product with its full tree, for the edit form
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub review_count: i64,
    /// True once reviews exist; categories and options can no longer change
    pub structure_locked: bool,
}

pub(crate) fn product_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Product {} not found", id))
}

/// GET /api/admin/products
pub async fn list_products(
    State(state): State<AppState>,
    Extension(_session): Extension<AdminSession>,
) -> ApiResult<Json<Vec<ProductSummary>>> {
    Ok(Json(products::list_products(&state.db).await?))
}

/// POST /api/admin/products
///
/// **Response:** `{"ok": true, "id": "..."}`; 409 when the slug is taken
pub async fn create_product(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Payload(payload): Payload,
) -> ApiResult<Json<CreateProductResponse>> {
    let draft = validate_product(&payload)?;
    let id = products::create_product(&state.db, &draft).await?;

    info!(product_id = %id, admin = %session.email, "Admin created product");

    Ok(Json(CreateProductResponse { ok: true, id }))
}

/// GET /api/admin/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Extension(_session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductDetail>> {
    let product = products::load_product(&state.db, &id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    let review_count = reviews::count_reviews(&state.db, &id).await?;

    Ok(Json(ProductDetail {
        product,
        review_count,
        structure_locked: review_count > 0,
    }))
}

/// PUT /api/admin/products/:id
///
/// Scalar fields are always applied. Categories and options are replaced
/// only while the product has no reviews; otherwise the response carries a
/// warning and the stored structure is kept.
pub async fn update_product(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    Payload(payload): Payload,
) -> ApiResult<Json<UpdateProductResponse>> {
    let update = validate_product_update(&payload)?;
    if update.id != id {
        return Err(ApiError::BadRequest("Mismatched product id".to_string()));
    }

    let outcome = products::update_product(&state.db, &id, &update.product).await?;

    info!(product_id = %id, admin = %session.email, ?outcome, "Admin updated product");

    let warning = match outcome {
        UpdateOutcome::Applied => None,
        UpdateOutcome::StructureLocked => Some(STRUCTURE_LOCKED_WARNING.to_string()),
    };
    Ok(Json(UpdateProductResponse { ok: true, warning }))
}

/// PATCH /api/admin/products/:id/toggle
///
/// **Request:** `{"isActive": bool}`
pub async fn toggle_product(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    Payload(payload): Payload,
) -> ApiResult<Json<OkResponse>> {
    let is_active = validate_toggle(&payload)?;

    if !products::set_active(&state.db, &id, is_active).await? {
        return Err(product_not_found(&id));
    }

    info!(product_id = %id, admin = %session.email, is_active, "Admin toggled product");
    Ok(OkResponse::ok())
}

/// Build admin product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/products",
            get(list_products).post(create_product),
        )
        .route(
            "/api/admin/products/:id",
            get(get_product).put(update_product),
        )
        .route("/api/admin/products/:id/toggle", patch(toggle_product))
}
