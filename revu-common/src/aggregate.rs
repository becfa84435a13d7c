//! Review aggregation
//!
//! Derives result summaries from persisted state: average rating, per
//! category selection totals, per option counts and integer percentages,
//! and per review selections grouped by category. Everything here is a pure
//! function of its inputs.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{CategoryGroup, Review};

/// Aggregated results for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResults {
    pub review_count: usize,
    pub average_rating: f64,
    pub categories: Vec<CategoryTally>,
}

/// Selection totals for one category group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTally {
    pub category_id: String,
    pub name: String,
    pub total_selections: i64,
    pub options: Vec<OptionTally>,
}

/// Selection count and share for one option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTally {
    pub option_id: String,
    pub label: String,
    pub count: i64,
    /// Share of the category total, 0..=100, rounded half up
    pub percentage: u32,
}

/// One review row of the admin results view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetail {
    pub id: String,
    pub reviewer_name: String,
    pub star_rating: u8,
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub groups: Vec<SelectionGroup>,
}

/// Selected option labels under one category name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionGroup {
    pub category: String,
    pub labels: Vec<String>,
}

/// Mean of the given ratings, or 0 when there are none
pub fn average_rating<I>(ratings: I) -> f64
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), r| (sum + u64::from(r), count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Integer percentage of `count` within `total`, rounded half up
///
/// Returns 0 when `total` is not positive.
pub fn percentage(count: i64, total: i64) -> u32 {
    if total <= 0 || count <= 0 {
        return 0;
    }
    // round(100 * count / total) == floor((200 * count + total) / (2 * total))
    ((200 * count + total) / (2 * total)) as u32
}

/// Per category totals and per option shares from an annotated tree
///
/// Option counts come from `CategoryOption::selection_count`.
pub fn tally_categories(categories: &[CategoryGroup]) -> Vec<CategoryTally> {
    categories
        .iter()
        .map(|category| {
            let total: i64 = category.options.iter().map(|o| o.selection_count).sum();
            CategoryTally {
                category_id: category.id.clone(),
                name: category.name.clone(),
                total_selections: total,
                options: category
                    .options
                    .iter()
                    .map(|option| OptionTally {
                        option_id: option.id.clone(),
                        label: option.label.clone(),
                        count: option.selection_count,
                        percentage: percentage(option.selection_count, total),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Aggregate a product's reviews against its annotated category tree
pub fn summarize(categories: &[CategoryGroup], reviews: &[Review]) -> ProductResults {
    ProductResults {
        review_count: reviews.len(),
        average_rating: average_rating(reviews.iter().map(|r| r.star_rating)),
        categories: tally_categories(categories),
    }
}

/// Group a review's selections by category
///
/// Categories follow display order and labels follow option definition
/// order, independent of the order the reviewer picked them in. Selections
/// whose option is no longer in the tree are appended afterwards under
/// their recorded category name.
pub fn group_selections(categories: &[CategoryGroup], review: &Review) -> Vec<SelectionGroup> {
    let chosen: HashSet<&str> = review
        .selections
        .iter()
        .map(|s| s.option_id.as_str())
        .collect();

    let mut groups: Vec<SelectionGroup> = categories
        .iter()
        .filter_map(|category| {
            let labels: Vec<String> = category
                .options
                .iter()
                .filter(|o| chosen.contains(o.id.as_str()))
                .map(|o| o.label.clone())
                .collect();
            (!labels.is_empty()).then(|| SelectionGroup {
                category: category.name.clone(),
                labels,
            })
        })
        .collect();

    let known: HashSet<&str> = categories
        .iter()
        .flat_map(|c| c.options.iter().map(|o| o.id.as_str()))
        .collect();

    for selection in review
        .selections
        .iter()
        .filter(|s| !known.contains(s.option_id.as_str()))
    {
        match groups
            .iter_mut()
            .find(|g| g.category == selection.category_name)
        {
            Some(group) => group.labels.push(selection.option_label.clone()),
            None => groups.push(SelectionGroup {
                category: selection.category_name.clone(),
                labels: vec![selection.option_label.clone()],
            }),
        }
    }

    groups
}

/// Detail rows for every review, in the order given
pub fn review_details(categories: &[CategoryGroup], reviews: &[Review]) -> Vec<ReviewDetail> {
    reviews
        .iter()
        .map(|review| ReviewDetail {
            id: review.id.clone(),
            reviewer_name: review.display_name().to_string(),
            star_rating: review.star_rating,
            feedback: review.feedback.clone(),
            submitted_at: review.submitted_at,
            groups: group_selections(categories, review),
        })
        .collect()
}
