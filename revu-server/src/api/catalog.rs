//! Public catalog and review form endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use revu_common::model::Product;
use serde::Serialize;

use crate::db::products::{self, CatalogEntry};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Review form for one active product
///
/// Selection counts are admin data and are left out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub categories: Vec<FormCategory>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCategory {
    pub id: String,
    pub name: String,
    pub options: Vec<FormOption>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOption {
    pub id: String,
    pub label: String,
}

impl From<Product> for ReviewForm {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            image: product.image,
            category: product.category,
            categories: product
                .categories
                .into_iter()
                .map(|c| FormCategory {
                    id: c.id,
                    name: c.name,
                    options: c
                        .options
                        .into_iter()
                        .map(|o| FormOption {
                            id: o.id,
                            label: o.label,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// GET /api/products
pub async fn list_catalog(State(state): State<AppState>) -> ApiResult<Json<Vec<CatalogEntry>>> {
    Ok(Json(products::list_active_products(&state.db).await?))
}

/// GET /api/products/:slug
///
/// Missing and inactive products both answer 404 "Product not available".
pub async fn get_review_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<ReviewForm>> {
    match products::load_product_by_slug(&state.db, &slug).await? {
        Some(product) if product.is_active => Ok(Json(ReviewForm::from(product))),
        _ => Err(ApiError::ProductUnavailable),
    }
}

/// Build catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_catalog))
        .route("/api/products/:slug", get(get_review_form))
}
