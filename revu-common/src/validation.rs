//! Payload validation
//!
//! Request bodies arrive as untyped JSON. Each validator walks the payload
//! field by field and either returns a normalized, strongly-typed value or a
//! [`ValidationIssues`] map holding every violated constraint, keyed by
//! dotted field path (`categories.0.options.2.label`).
//!
//! Malformed input is an expected outcome: validators never stop at the
//! first problem and never panic.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::membership::dedupe_ids;
use crate::slug::is_url_safe;

/// Maximum reviewer name length, in characters
pub const REVIEWER_NAME_MAX_CHARS: usize = 120;

/// Maximum feedback length, in characters
pub const FEEDBACK_MAX_CHARS: usize = 1000;

const REQUIRED: &str = "Required";
const EXPECTED_STRING: &str = "Expected string";
const EXPECTED_ARRAY: &str = "Expected array";
const EXPECTED_BOOLEAN: &str = "Expected boolean";

static HTTP_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("static URL pattern compiles")
});

// ========================================
// Issue collection
// ========================================

/// Field path → messages mapping produced by a failed validation
///
/// Serializes as a plain JSON object, e.g.
/// `{"name": ["Product name is required"], "starRating": ["..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationIssues(BTreeMap<String, Vec<String>>);

impl ValidationIssues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field path
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct field paths with issues
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for one field path
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(path, messages)| format!("{}: {}", path, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

// ========================================
// Typed outputs
// ========================================

/// Validated product definition (create payload)
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub is_active: bool,
    pub categories: Vec<CategoryDraft>,
}

/// Validated category group inside a product definition
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    /// Id echoed back by the edit form; new ids are assigned on write
    pub id: Option<String>,
    pub name: String,
    pub display_order: i64,
    pub options: Vec<OptionDraft>,
}

/// Validated option inside a category group
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDraft {
    pub id: Option<String>,
    pub label: String,
    pub display_order: i64,
}

/// Validated product update (create payload plus the product id)
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub id: String,
    pub product: ProductDraft,
}

/// Validated review submission
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSubmission {
    pub product_id: String,
    pub reviewer_name: Option<String>,
    pub star_rating: u8,
    pub feedback: Option<String>,
    /// Selected option ids, deduplicated in first-seen order
    pub selected_option_ids: Vec<String>,
}

// ========================================
// Validators
// ========================================

/// Validate a product create payload
pub fn validate_product(payload: &Value) -> Result<ProductDraft, ValidationIssues> {
    let mut issues = ValidationIssues::new();
    let fields = Fields::root(payload, &mut issues);
    let draft = read_product(&fields, &mut issues);
    finish(draft, issues)
}

/// Validate a product update payload (create rules plus a non-empty `id`)
pub fn validate_product_update(payload: &Value) -> Result<ProductUpdate, ValidationIssues> {
    let mut issues = ValidationIssues::new();
    let fields = Fields::root(payload, &mut issues);
    let id = fields.required_text("id", "Product id is required", &mut issues);
    let draft = read_product(&fields, &mut issues);
    let update = match (id, draft) {
        (Some(id), Some(product)) => Some(ProductUpdate { id, product }),
        _ => None,
    };
    finish(update, issues)
}

/// Validate a review submission payload
pub fn validate_review(payload: &Value) -> Result<ReviewSubmission, ValidationIssues> {
    let mut issues = ValidationIssues::new();
    let fields = Fields::root(payload, &mut issues);

    let product_id = fields.required_text("productId", "Product is required", &mut issues);
    let reviewer_name = fields.optional_text(
        "reviewerName",
        REVIEWER_NAME_MAX_CHARS,
        "Reviewer name",
        &mut issues,
    );
    let star_rating = read_star_rating(&fields, &mut issues);
    let feedback = fields.optional_text("feedback", FEEDBACK_MAX_CHARS, "Feedback", &mut issues);
    let selected = read_selected_ids(&fields, &mut issues);

    let submission = match (product_id, star_rating, selected) {
        (Some(product_id), Some(star_rating), Some(selected)) => Some(ReviewSubmission {
            product_id,
            reviewer_name,
            star_rating,
            feedback,
            selected_option_ids: selected,
        }),
        _ => None,
    };
    finish(submission, issues)
}

/// Validate an activation toggle payload (`{"isActive": bool}`)
pub fn validate_toggle(payload: &Value) -> Result<bool, ValidationIssues> {
    let mut issues = ValidationIssues::new();
    let fields = Fields::root(payload, &mut issues);
    let is_active = match fields.get("isActive") {
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            issues.push(fields.path("isActive"), EXPECTED_BOOLEAN);
            None
        }
        None => {
            if fields.is_object() {
                issues.push(fields.path("isActive"), REQUIRED);
            }
            None
        }
    };
    finish(is_active, issues)
}

fn finish<T>(value: Option<T>, issues: ValidationIssues) -> Result<T, ValidationIssues> {
    match value {
        Some(value) if issues.is_empty() => Ok(value),
        _ => Err(issues),
    }
}

fn read_product(fields: &Fields<'_>, issues: &mut ValidationIssues) -> Option<ProductDraft> {
    let name = fields.required_text("name", "Product name is required", issues);

    let slug = fields.required_text("slug", "Slug is required", issues);
    if let Some(slug) = &slug {
        if !is_url_safe(slug) {
            issues.push(
                fields.path("slug"),
                "Slug may only contain letters, numbers, '-' and '_'",
            );
        }
    }

    let description = fields.required_text("description", "Description is required", issues);

    let image = fields.optional_text("image", usize::MAX, "Image", issues);
    if let Some(image) = &image {
        if !HTTP_URL.is_match(image) {
            issues.push(fields.path("image"), "Image must be a valid http(s) URL");
        }
    }

    let category = fields.required_text("category", "Category is required", issues);

    let is_active = match fields.get("isActive") {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            issues.push(fields.path("isActive"), EXPECTED_BOOLEAN);
            true
        }
    };

    let categories = read_categories(fields, issues);

    Some(ProductDraft {
        name: name?,
        slug: slug?,
        description: description?,
        image,
        category: category?,
        is_active,
        categories: categories?,
    })
}

fn read_categories(fields: &Fields<'_>, issues: &mut ValidationIssues) -> Option<Vec<CategoryDraft>> {
    let items = fields.non_empty_array(
        "categories",
        "At least one review category is required",
        issues,
    )?;

    let mut categories = Vec::with_capacity(items.len());
    let mut complete = true;

    for (i, item) in items.iter().enumerate() {
        let group = Fields::nested(item, fields.path(&format!("categories.{}", i)), issues);
        let id = group.optional_text("id", usize::MAX, "Category id", issues);
        let name = group.required_text("name", "Category name is required", issues);
        let display_order = group.display_order("displayOrder", issues);
        let options = read_options(&group, issues);

        match (name, display_order, options) {
            (Some(name), Some(display_order), Some(options)) => categories.push(CategoryDraft {
                id,
                name,
                display_order,
                options,
            }),
            _ => complete = false,
        }
    }

    complete.then_some(categories)
}

fn read_options(group: &Fields<'_>, issues: &mut ValidationIssues) -> Option<Vec<OptionDraft>> {
    let items = group.non_empty_array("options", "At least one option is required", issues)?;

    let mut options = Vec::with_capacity(items.len());
    let mut complete = true;

    for (j, item) in items.iter().enumerate() {
        let option = Fields::nested(item, group.path(&format!("options.{}", j)), issues);
        let id = option.optional_text("id", usize::MAX, "Option id", issues);
        let label = option.required_text("label", "Option label is required", issues);
        let display_order = option.display_order("displayOrder", issues);

        match (label, display_order) {
            (Some(label), Some(display_order)) => options.push(OptionDraft {
                id,
                label,
                display_order,
            }),
            _ => complete = false,
        }
    }

    complete.then_some(options)
}

fn read_star_rating(fields: &Fields<'_>, issues: &mut ValidationIssues) -> Option<u8> {
    let path = fields.path("starRating");
    match fields.get("starRating") {
        None => {
            if fields.is_object() {
                issues.push(path, "Star rating is required");
            }
            None
        }
        Some(value) => match as_integer(value) {
            Some(n) if (1..=5).contains(&n) => Some(n as u8),
            Some(_) => {
                issues.push(path, "Star rating must be between 1 and 5");
                None
            }
            None => {
                issues.push(path, "Star rating must be a whole number");
                None
            }
        },
    }
}

fn read_selected_ids(fields: &Fields<'_>, issues: &mut ValidationIssues) -> Option<Vec<String>> {
    let items = fields.non_empty_array("selectedOptionIds", "Select at least one option", issues)?;

    let mut ids = Vec::with_capacity(items.len());
    let mut complete = true;

    for (i, item) in items.iter().enumerate() {
        let path = fields.path(&format!("selectedOptionIds.{}", i));
        match item {
            Value::String(s) if !s.is_empty() => ids.push(s.clone()),
            Value::String(_) => {
                issues.push(path, "Option id must not be empty");
                complete = false;
            }
            _ => {
                issues.push(path, EXPECTED_STRING);
                complete = false;
            }
        }
    }

    complete.then(|| dedupe_ids(&ids))
}

/// Interpret a JSON number as an integer, accepting integral floats (`4.0`)
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
        .map(|f| f as i64)
}

// ========================================
// Field access
// ========================================

/// Read-only view over one JSON object at a given path
///
/// When the value is not an object, one "Expected object" issue is recorded
/// and every getter returns `None` without adding further noise.
struct Fields<'a> {
    object: Option<&'a Map<String, Value>>,
    prefix: String,
}

impl<'a> Fields<'a> {
    fn root(value: &'a Value, issues: &mut ValidationIssues) -> Self {
        let object = value.as_object();
        if object.is_none() {
            issues.push("payload", "Expected object");
        }
        Self {
            object,
            prefix: String::new(),
        }
    }

    fn nested(value: &'a Value, prefix: String, issues: &mut ValidationIssues) -> Self {
        let object = value.as_object();
        if object.is_none() {
            issues.push(prefix.clone(), "Expected object");
        }
        Self { object, prefix }
    }

    fn is_object(&self) -> bool {
        self.object.is_some()
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    /// Field value; JSON `null` reads as absent
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.object?.get(key).filter(|v| !v.is_null())
    }

    /// Non-empty (after trimming) string field
    fn required_text(
        &self,
        key: &str,
        missing_message: &str,
        issues: &mut ValidationIssues,
    ) -> Option<String> {
        if !self.is_object() {
            return None;
        }
        match self.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::String(_)) | None => {
                issues.push(self.path(key), missing_message);
                None
            }
            Some(_) => {
                issues.push(self.path(key), EXPECTED_STRING);
                None
            }
        }
    }

    /// Optional string field; empty strings normalize to `None`
    fn optional_text(
        &self,
        key: &str,
        max_chars: usize,
        label: &str,
        issues: &mut ValidationIssues,
    ) -> Option<String> {
        match self.get(key) {
            None => None,
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else if trimmed.chars().count() > max_chars {
                    issues.push(
                        self.path(key),
                        format!("{} must be at most {} characters", label, max_chars),
                    );
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Some(_) => {
                issues.push(self.path(key), EXPECTED_STRING);
                None
            }
        }
    }

    /// Non-negative integer display order
    fn display_order(&self, key: &str, issues: &mut ValidationIssues) -> Option<i64> {
        if !self.is_object() {
            return None;
        }
        match self.get(key).map(as_integer) {
            Some(Some(n)) if n >= 0 => Some(n),
            Some(_) => {
                issues.push(self.path(key), "Display order must be a non-negative integer");
                None
            }
            None => {
                issues.push(self.path(key), REQUIRED);
                None
            }
        }
    }

    /// Array field with at least one element
    fn non_empty_array(
        &self,
        key: &str,
        empty_message: &str,
        issues: &mut ValidationIssues,
    ) -> Option<&'a Vec<Value>> {
        if !self.is_object() {
            return None;
        }
        match self.get(key) {
            Some(Value::Array(items)) if !items.is_empty() => Some(items),
            Some(Value::Array(_)) | None => {
                issues.push(self.path(key), empty_message);
                None
            }
            Some(_) => {
                issues.push(self.path(key), EXPECTED_ARRAY);
                None
            }
        }
    }
}
