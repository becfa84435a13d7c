//! Product persistence
//!
//! Products are written together with their category tree in one
//! transaction. Updates honor the structure lock: once a product has
//! reviews its categories and options are left untouched.

use chrono::Utc;
use revu_common::aggregate::average_rating;
use revu_common::model::{CategoryGroup, CategoryOption, Product, UpdateOutcome};
use revu_common::validation::{CategoryDraft, ProductDraft};
use revu_common::{Error, Result};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use super::{from_db_timestamp, is_unique_violation, to_db_timestamp};

/// Dashboard row: product plus review statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub review_count: usize,
    pub average_rating: f64,
}

/// Public catalog entry (active products only)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
}

const PRODUCT_COLUMNS: &str =
    "id, name, slug, description, image, category, is_active, created_at";

fn product_from_row(row: &SqliteRow) -> Result<Product> {
    let created_at: String = row.try_get("created_at")?;
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        description: row.try_get("description")?,
        image: row.try_get("image")?,
        category: row.try_get("category")?,
        is_active: row.try_get("is_active")?,
        created_at: from_db_timestamp(&created_at)?,
        categories: Vec::new(),
    })
}

/// Load a product with its ordered, selection-annotated category tree
pub async fn load_product(pool: &SqlitePool, id: &str) -> Result<Option<Product>> {
    let mut conn = pool.acquire().await?;
    fetch_product(&mut conn, id).await
}

/// Load a product and its tree on an open connection or transaction
pub async fn fetch_product(conn: &mut SqliteConnection, id: &str) -> Result<Option<Product>> {
    let sql = format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await?;
    with_tree(conn, row).await
}

/// Load a product by slug with its category tree
pub async fn load_product_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Product>> {
    let mut conn = pool.acquire().await?;
    let sql = format!("SELECT {} FROM products WHERE slug = ?", PRODUCT_COLUMNS);
    let row = sqlx::query(&sql).bind(slug).fetch_optional(&mut *conn).await?;
    with_tree(&mut conn, row).await
}

async fn with_tree(conn: &mut SqliteConnection, row: Option<SqliteRow>) -> Result<Option<Product>> {
    match row {
        Some(row) => {
            let mut product = product_from_row(&row)?;
            product.categories = load_category_tree(conn, &product.id).await?;
            Ok(Some(product))
        }
        None => Ok(None),
    }
}

/// Category groups in display order, options in display order, each option
/// annotated with its current selection count
async fn load_category_tree(
    conn: &mut SqliteConnection,
    product_id: &str,
) -> Result<Vec<CategoryGroup>> {
    let rows = sqlx::query(
        r#"
        SELECT c.id AS category_id,
               c.name AS category_name,
               c.display_order AS category_order,
               o.id AS option_id,
               o.label AS option_label,
               o.display_order AS option_order,
               (SELECT COUNT(*) FROM review_selections s WHERE s.option_id = o.id) AS selection_count
        FROM review_categories c
        LEFT JOIN category_options o ON o.category_id = c.id
        WHERE c.product_id = ?
        ORDER BY c.display_order, c.rowid, o.display_order, o.rowid
        "#,
    )
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut categories: Vec<CategoryGroup> = Vec::new();
    for row in rows {
        let category_id: String = row.try_get("category_id")?;
        if categories.last().map(|c| c.id.as_str()) != Some(category_id.as_str()) {
            categories.push(CategoryGroup {
                id: category_id.clone(),
                product_id: product_id.to_string(),
                name: row.try_get("category_name")?,
                display_order: row.try_get("category_order")?,
                options: Vec::new(),
            });
        }

        let option_id: Option<String> = row.try_get("option_id")?;
        if let (Some(option_id), Some(category)) = (option_id, categories.last_mut()) {
            category.options.push(CategoryOption {
                id: option_id,
                category_id,
                label: row.try_get("option_label")?,
                display_order: row.try_get("option_order")?,
                selection_count: row.try_get("selection_count")?,
            });
        }
    }

    Ok(categories)
}

async fn insert_categories(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: &str,
    categories: &[CategoryDraft],
) -> Result<()> {
    for category in categories {
        let category_id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO review_categories (id, product_id, name, display_order) VALUES (?, ?, ?, ?)",
        )
        .bind(&category_id)
        .bind(product_id)
        .bind(&category.name)
        .bind(category.display_order)
        .execute(&mut **tx)
        .await?;

        for option in &category.options {
            sqlx::query(
                "INSERT INTO category_options (id, category_id, label, display_order) VALUES (?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&category_id)
            .bind(&option.label)
            .bind(option.display_order)
            .execute(&mut **tx)
            .await?;
        }
    }
    Ok(())
}

fn map_slug_conflict(err: sqlx::Error, slug: &str) -> Error {
    if is_unique_violation(&err) {
        Error::ConflictingSlug(slug.to_string())
    } else {
        Error::Database(err)
    }
}

/// Create a product and its category tree; returns the new product id
///
/// Fails with `ConflictingSlug` when the slug is already in use.
pub async fn create_product(pool: &SqlitePool, draft: &ProductDraft) -> Result<String> {
    let mut tx = pool.begin().await?;

    let id = Uuid::new_v4().to_string();
    let now = to_db_timestamp(Utc::now());

    sqlx::query(
        r#"
        INSERT INTO products (id, name, slug, description, image, category, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&draft.name)
    .bind(&draft.slug)
    .bind(&draft.description)
    .bind(&draft.image)
    .bind(&draft.category)
    .bind(draft.is_active)
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await
    .map_err(|e| map_slug_conflict(e, &draft.slug))?;

    insert_categories(&mut tx, &id, &draft.categories).await?;

    tx.commit().await?;

    info!(product_id = %id, slug = %draft.slug, "Product created");
    Ok(id)
}

/// Update a product's scalar fields and, when no reviews exist, its tree
///
/// The scalar UPDATE is the first statement, so this transaction holds
/// SQLite's write lock before reviews are counted; a concurrent first review
/// cannot land between the count and the structure replacement. A slug
/// taken by another product surfaces as a UNIQUE violation.
pub async fn update_product(
    pool: &SqlitePool,
    id: &str,
    draft: &ProductDraft,
) -> Result<UpdateOutcome> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE products
        SET name = ?, slug = ?, description = ?, image = ?, category = ?, is_active = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.slug)
    .bind(&draft.description)
    .bind(&draft.image)
    .bind(&draft.category)
    .bind(draft.is_active)
    .bind(to_db_timestamp(Utc::now()))
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| map_slug_conflict(e, &draft.slug))?;

    if updated.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Product {} not found", id)));
    }

    let review_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE product_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    let outcome = if review_count > 0 {
        debug!(product_id = %id, review_count, "Structure locked, keeping categories");
        UpdateOutcome::StructureLocked
    } else {
        sqlx::query("DELETE FROM review_categories WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_categories(&mut tx, id, &draft.categories).await?;
        UpdateOutcome::Applied
    };

    tx.commit().await?;

    info!(product_id = %id, ?outcome, "Product updated");
    Ok(outcome)
}

/// Set the active flag; returns false when the product does not exist
pub async fn set_active(pool: &SqlitePool, id: &str, is_active: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE products SET is_active = ?, updated_at = ? WHERE id = ?")
        .bind(is_active)
        .bind(to_db_timestamp(Utc::now()))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// All products, newest first, with review count and average rating
pub async fn list_products(pool: &SqlitePool) -> Result<Vec<ProductSummary>> {
    let rows = sqlx::query(
        "SELECT id, name, slug, category, image, is_active FROM products ORDER BY created_at DESC, rowid DESC",
    )
    .fetch_all(pool)
    .await?;

    let ratings: Vec<(String, i64)> =
        sqlx::query_as("SELECT product_id, star_rating FROM reviews")
            .fetch_all(pool)
            .await?;

    let mut by_product: HashMap<String, Vec<u8>> = HashMap::new();
    for (product_id, rating) in ratings {
        let rating = u8::try_from(rating)
            .map_err(|_| Error::Internal(format!("Bad star rating {}", rating)))?;
        by_product.entry(product_id).or_default().push(rating);
    }

    rows.iter()
        .map(|row| -> Result<ProductSummary> {
            let id: String = row.try_get("id")?;
            let product_ratings = by_product.remove(&id).unwrap_or_default();
            Ok(ProductSummary {
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                category: row.try_get("category")?,
                image: row.try_get("image")?,
                is_active: row.try_get("is_active")?,
                review_count: product_ratings.len(),
                average_rating: average_rating(product_ratings),
                id,
            })
        })
        .collect()
}

/// Active products for the public catalog, newest first
pub async fn list_active_products(pool: &SqlitePool) -> Result<Vec<CatalogEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, slug, description, image, category
        FROM products
        WHERE is_active = 1
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<CatalogEntry> {
            Ok(CatalogEntry {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                description: row.try_get("description")?,
                image: row.try_get("image")?,
                category: row.try_get("category")?,
            })
        })
        .collect()
}

/// Product id for a slug, if any
pub async fn find_id_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<String>> {
    let id = sqlx::query_scalar("SELECT id FROM products WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}
