//! Public review submission
//!
//! Pipeline: schema validation, then one write transaction that checks
//! availability and membership against the product's current category tree
//! and stores the review.

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use revu_common::validation::validate_review;
use serde::Serialize;
use tracing::debug;

use super::Payload;
use crate::db::reviews;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    pub ok: bool,
    pub review_id: String,
}

/// POST /api/reviews
///
/// **Request:** `{"productId", "reviewerName"?, "starRating", "feedback"?, "selectedOptionIds"}`
/// **Response:** `{"ok": true, "reviewId": "..."}`
///
/// **Errors:**
/// - 400 `Invalid payload` with issues, or an invalid selection message
/// - 404 `Product not available`
pub async fn submit_review(
    State(state): State<AppState>,
    Payload(payload): Payload,
) -> ApiResult<Json<SubmitReviewResponse>> {
    let submission = validate_review(&payload)?;

    debug!(product_id = %submission.product_id, "Review passed schema validation");

    let review_id = reviews::insert_review(&state.db, &submission, Utc::now()).await?;

    Ok(Json(SubmitReviewResponse {
        ok: true,
        review_id,
    }))
}

/// Build review submission routes
pub fn review_routes() -> Router<AppState> {
    Router::new().route("/api/reviews", post(submit_review))
}
