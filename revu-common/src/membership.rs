//! Option membership checks for review submissions
//!
//! A submission is acceptable when every selected option belongs to the
//! reviewed product and every category group of that product has at least
//! one selection. Inactive products reject submissions before any option
//! is looked at.

use std::collections::{HashMap, HashSet};

use crate::model::{CategoryGroup, Product};
use crate::{Error, Result};

/// Message returned when a selection references a foreign or unknown option
pub const INVALID_OPTIONS_MESSAGE: &str = "Invalid options selected";

/// Lookup from option id to the position of its owning category group
///
/// Built once per request from the product's ordered category tree and
/// only read afterwards.
#[derive(Debug)]
pub struct OptionIndex<'a> {
    owners: HashMap<&'a str, usize>,
}

impl<'a> OptionIndex<'a> {
    pub fn build(categories: &'a [CategoryGroup]) -> Self {
        let owners = categories
            .iter()
            .enumerate()
            .flat_map(|(position, category)| {
                category
                    .options
                    .iter()
                    .map(move |option| (option.id.as_str(), position))
            })
            .collect();
        Self { owners }
    }

    /// Position of the category group owning `option_id`
    pub fn group_of(&self, option_id: &str) -> Option<usize> {
        self.owners.get(option_id).copied()
    }

    pub fn contains(&self, option_id: &str) -> bool {
        self.owners.contains_key(option_id)
    }
}

/// Remove duplicate ids, keeping the first occurrence of each
pub fn dedupe_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Check deduplicated option ids against a product's ordered category tree
///
/// Unknown ids fail with [`INVALID_OPTIONS_MESSAGE`]. Otherwise the first
/// category group (in display order) without a selection is reported.
pub fn check_selections(categories: &[CategoryGroup], selected: &[String]) -> Result<()> {
    let index = OptionIndex::build(categories);

    if !selected.iter().all(|id| index.contains(id)) {
        return Err(Error::InvalidSelection(INVALID_OPTIONS_MESSAGE.to_string()));
    }

    let mut counts = vec![0usize; categories.len()];
    for position in selected.iter().filter_map(|id| index.group_of(id)) {
        counts[position] += 1;
    }

    if let Some((category, _)) = categories
        .iter()
        .zip(&counts)
        .find(|(_, count)| **count == 0)
    {
        return Err(Error::InvalidSelection(format!(
            "Select at least one option for {}",
            category.name
        )));
    }

    Ok(())
}

/// Full submission gate: availability first, then membership
///
/// `product` is whatever the store returned for the submitted product id;
/// a missing product and an inactive one produce the same error.
pub fn check_submission(product: Option<&Product>, selected: &[String]) -> Result<()> {
    match product {
        Some(product) if product.is_active => check_selections(&product.categories, selected),
        _ => Err(Error::ProductUnavailable),
    }
}
