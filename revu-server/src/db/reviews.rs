//! Review persistence

use chrono::{DateTime, Utc};
use revu_common::membership::check_submission;
use revu_common::model::{Review, Selection};
use revu_common::validation::ReviewSubmission;
use revu_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use super::products::fetch_product;
use super::{from_db_timestamp, to_db_timestamp};

/// Check a review against the product's current tree and store it with its
/// selections atomically; returns the review id
///
/// The availability and membership checks run inside the write transaction.
/// A no-op UPDATE on the product row is the first statement, so the
/// transaction holds SQLite's write lock before the product is read and an
/// admin edit or deactivation cannot land between the check and the insert.
/// Selections are stored with their submission position so exports can
/// reproduce the reviewer's order.
pub async fn insert_review(
    pool: &SqlitePool,
    submission: &ReviewSubmission,
    submitted_at: DateTime<Utc>,
) -> Result<String> {
    let mut tx = pool.begin().await?;

    let locked = sqlx::query("UPDATE products SET updated_at = updated_at WHERE id = ?")
        .bind(&submission.product_id)
        .execute(&mut *tx)
        .await?;
    if locked.rows_affected() == 0 {
        return Err(Error::ProductUnavailable);
    }

    let product = fetch_product(&mut tx, &submission.product_id).await?;
    check_submission(product.as_ref(), &submission.selected_option_ids)?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO reviews (id, product_id, reviewer_name, star_rating, feedback, submitted_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&submission.product_id)
    .bind(&submission.reviewer_name)
    .bind(i64::from(submission.star_rating))
    .bind(&submission.feedback)
    .bind(to_db_timestamp(submitted_at))
    .execute(&mut *tx)
    .await?;

    for (position, option_id) in submission.selected_option_ids.iter().enumerate() {
        sqlx::query(
            "INSERT INTO review_selections (review_id, option_id, position) VALUES (?, ?, ?)",
        )
        .bind(&id)
        .bind(option_id)
        .bind(position as i64)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        review_id = %id,
        product_id = %submission.product_id,
        rating = submission.star_rating,
        selections = submission.selected_option_ids.len(),
        "Review stored"
    );
    Ok(id)
}

/// Number of reviews recorded for a product
pub async fn count_reviews(pool: &SqlitePool, product_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE product_id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// All reviews for a product, newest first, with resolved selections
pub async fn load_reviews(pool: &SqlitePool, product_id: &str) -> Result<Vec<Review>> {
    let rows = sqlx::query(
        r#"
        SELECT id, reviewer_name, star_rating, feedback, submitted_at
        FROM reviews
        WHERE product_id = ?
        ORDER BY submitted_at DESC, rowid DESC
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    let selection_rows = sqlx::query(
        r#"
        SELECT s.review_id, s.option_id, o.label AS option_label, c.name AS category_name
        FROM review_selections s
        JOIN reviews r ON r.id = s.review_id
        JOIN category_options o ON o.id = s.option_id
        JOIN review_categories c ON c.id = o.category_id
        WHERE r.product_id = ?
        ORDER BY s.review_id, s.position
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    let mut selections: HashMap<String, Vec<Selection>> = HashMap::new();
    for row in selection_rows {
        let review_id: String = row.try_get("review_id")?;
        selections.entry(review_id).or_default().push(Selection {
            option_id: row.try_get("option_id")?,
            category_name: row.try_get("category_name")?,
            option_label: row.try_get("option_label")?,
        });
    }

    rows.iter()
        .map(|row| -> Result<Review> {
            let id: String = row.try_get("id")?;
            let rating: i64 = row.try_get("star_rating")?;
            let submitted_at: String = row.try_get("submitted_at")?;
            Ok(Review {
                product_id: product_id.to_string(),
                reviewer_name: row.try_get("reviewer_name")?,
                star_rating: u8::try_from(rating)
                    .map_err(|_| Error::Internal(format!("Bad star rating {}", rating)))?,
                feedback: row.try_get("feedback")?,
                submitted_at: from_db_timestamp(&submitted_at)?,
                selections: selections.remove(&id).unwrap_or_default(),
                id,
            })
        })
        .collect()
}
