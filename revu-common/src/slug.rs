//! Slug helpers

use once_cell::sync::Lazy;
use regex::Regex;

static URL_SAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static slug pattern compiles"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("static slug pattern compiles"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static slug pattern compiles"));
static DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("static slug pattern compiles"));

/// True when `slug` can be used as a single URL path segment unescaped
pub fn is_url_safe(slug: &str) -> bool {
    URL_SAFE.is_match(slug)
}

/// Derive a slug from a display name
///
/// Lowercases, drops everything except ASCII letters, digits, whitespace and
/// dashes, turns whitespace runs into a dash and collapses repeated dashes.
pub fn slugify(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let dashed = WHITESPACE.replace_all(&stripped, "-");
    DASHES.replace_all(&dashed, "-").into_owned()
}
