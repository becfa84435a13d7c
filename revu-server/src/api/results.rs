//! Admin results views

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use revu_common::aggregate::{review_details, summarize, ProductResults, ReviewDetail};
use revu_common::model::Product;
use serde::Serialize;

use super::products::product_not_found;
use super::AdminSession;
use crate::db::{products, reviews};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Product fields shown above the results
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductHeader {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub image: Option<String>,
    pub is_active: bool,
}

impl From<&Product> for ProductHeader {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            is_active: product.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub product: ProductHeader,
    #[serde(flatten)]
    pub results: ProductResults,
    /// Newest first
    pub reviews: Vec<ReviewDetail>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub product: ProductHeader,
    #[serde(flatten)]
    pub results: ProductResults,
}

/// GET /api/admin/products/:id/results
pub async fn get_results(
    State(state): State<AppState>,
    Extension(_session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> ApiResult<Json<ResultsResponse>> {
    let product = products::load_product(&state.db, &id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    let reviews = reviews::load_reviews(&state.db, &id).await?;

    Ok(Json(ResultsResponse {
        product: ProductHeader::from(&product),
        results: summarize(&product.categories, &reviews),
        reviews: review_details(&product.categories, &reviews),
    }))
}

/// GET /api/admin/summaries/:slug
///
/// Aggregates only; no per-review rows.
pub async fn get_summary_by_slug(
    State(state): State<AppState>,
    Extension(_session): Extension<AdminSession>,
    Path(slug): Path<String>,
) -> ApiResult<Json<SummaryResponse>> {
    let product = products::load_product_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product '{}' not found", slug)))?;
    let reviews = reviews::load_reviews(&state.db, &product.id).await?;

    Ok(Json(SummaryResponse {
        product: ProductHeader::from(&product),
        results: summarize(&product.categories, &reviews),
    }))
}

/// Build results routes
pub fn results_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/products/:id/results", get(get_results))
        .route("/api/admin/summaries/:slug", get(get_summary_by_slug))
}
