//! Domain model
//!
//! Products own an ordered tree of category groups, each owning an ordered
//! list of options. Reviews reference a product and carry the options they
//! selected. All types serialize as camelCase JSON for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reviewable product together with its category tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unique, URL-safe identifier used by the public review form
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    /// Freeform catalog label (e.g. "JUICES")
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Category groups in display order
    pub categories: Vec<CategoryGroup>,
}

/// A named cluster of selectable options within a product's review form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub display_order: i64,
    pub options: Vec<CategoryOption>,
}

/// A single selectable statement within a category group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub id: String,
    pub category_id: String,
    pub label: String,
    pub display_order: i64,
    /// Number of persisted selections referencing this option
    #[serde(default)]
    pub selection_count: i64,
}

/// A submitted review with its resolved selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub reviewer_name: Option<String>,
    /// Star rating, 1 to 5 inclusive
    pub star_rating: u8,
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
    /// Selections in the order they were stored
    pub selections: Vec<Selection>,
}

impl Review {
    /// Reviewer name for display, falling back to "Anonymous"
    pub fn display_name(&self) -> &str {
        match self.reviewer_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS_REVIEWER,
        }
    }
}

/// Display name used when a review has no reviewer name
pub const ANONYMOUS_REVIEWER: &str = "Anonymous";

/// An option chosen by a review, resolved to its category and label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub option_id: String,
    pub category_name: String,
    pub option_label: String,
}

/// Result of an admin product update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Scalar fields and category structure were both replaced
    Applied,
    /// Scalar fields were updated; the structure was kept because reviews exist
    StructureLocked,
}

/// Warning returned to admins when the structure lock kept the old categories
pub const STRUCTURE_LOCKED_WARNING: &str =
    "Product details updated. Categories/options were kept because reviews already exist.";
