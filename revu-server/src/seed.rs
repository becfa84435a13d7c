//! Demo catalog seeding
//!
//! Upserts a fixed set of products by slug. Existing products go through
//! the regular update path, so the structure lock still applies to
//! products that already have reviews.

use revu_common::model::UpdateOutcome;
use revu_common::slug::slugify;
use revu_common::validation::{CategoryDraft, OptionDraft, ProductDraft};
use revu_common::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::products;

/// Number of numbered juice products created by [`seed_catalog`]
pub const JUICE_COUNT: usize = 5;

const JUICE_DESCRIPTION: &str = "Seasonal fresh fruit juice crafted for balanced flavor.";

/// Category groups shared by every seeded juice
pub const JUICE_TEMPLATE: &[(&str, &[&str])] = &[
    (
        "Taste & Flavour",
        &[
            "Authentic",
            "Fresh fruit taste",
            "Natural sweetness (sweetness feels fruit-derived)",
            "Balanced flavor",
            "Bright and refreshing",
            "Smells fresh and floral",
        ],
    ),
    (
        "Ingredient Quality",
        &[
            "No artificial colors or preservatives",
            "No synthetic flavor enhancers",
            "No synthetic sweeteners",
            "Clear labeling and transparency",
        ],
    ),
    (
        "Texture & Freshness",
        &[
            "Smooth with enjoyable light acidity",
            "Not thick or overly pulpy",
            "Perfectly refreshing when served cold",
            "Refrigerator storage",
        ],
    ),
    (
        "Packaging & Presentation",
        &[
            "Eco-conscious packaging",
            "Secure sealing",
            "Clear nutritional information",
            "Comfortable for both everyday use and special occasions",
        ],
    ),
    (
        "Value for Money",
        &[
            "Premium natural product",
            "Higher fruit concentration",
            "Absence of additives",
            "The unique taste justifies a higher price point",
        ],
    ),
];

const BEIGNET_TEMPLATE: &[(&str, &[&str])] = &[(
    "Quality Indicators",
    &[
        "Minimal oil absorption",
        "Freshly fried",
        "Light and airy",
        "Properly fermented",
        "Lightly crisp outside",
        "Cloud-soft inside",
        "Uniform puffing",
        "No dark or bitter spots",
        "Clean fry, no residual oil flavor",
    ],
)];

/// Counts of products touched by a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub updated: usize,
    /// Updated products whose categories were kept because reviews exist
    pub locked: usize,
}

/// Build category drafts from a template; display orders follow template order
pub fn categories_from_template(template: &[(&str, &[&str])]) -> Vec<CategoryDraft> {
    template
        .iter()
        .enumerate()
        .map(|(category_index, (name, options))| CategoryDraft {
            id: None,
            name: name.to_string(),
            display_order: category_index as i64,
            options: options
                .iter()
                .enumerate()
                .map(|(option_index, label)| OptionDraft {
                    id: None,
                    label: label.to_string(),
                    display_order: option_index as i64,
                })
                .collect(),
        })
        .collect()
}

/// The demo catalog: numbered juices plus beignets
pub fn demo_products() -> Vec<ProductDraft> {
    let mut drafts: Vec<ProductDraft> = (1..=JUICE_COUNT)
        .map(|i| {
            let name = format!("Juice {}", i);
            ProductDraft {
                slug: slugify(&name),
                name,
                description: JUICE_DESCRIPTION.to_string(),
                image: None,
                category: "JUICES".to_string(),
                is_active: true,
                categories: categories_from_template(JUICE_TEMPLATE),
            }
        })
        .collect();

    drafts.push(ProductDraft {
        name: "Beignets".to_string(),
        slug: "beignets".to_string(),
        description: "Classic beignets evaluated for texture and frying quality.".to_string(),
        image: None,
        category: "BEIGNETS".to_string(),
        is_active: true,
        categories: categories_from_template(BEIGNET_TEMPLATE),
    });

    drafts
}

/// Create or update every demo product, matched by slug
pub async fn seed_catalog(pool: &SqlitePool) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for draft in demo_products() {
        match products::find_id_by_slug(pool, &draft.slug).await? {
            Some(id) => {
                if products::update_product(pool, &id, &draft).await?
                    == UpdateOutcome::StructureLocked
                {
                    warn!(slug = %draft.slug, "Seed kept existing categories (reviews exist)");
                    report.locked += 1;
                }
                report.updated += 1;
            }
            None => {
                products::create_product(pool, &draft).await?;
                report.created += 1;
            }
        }
    }

    info!(
        created = report.created,
        updated = report.updated,
        locked = report.locked,
        "Seed complete"
    );
    Ok(report)
}
