//! CSV export of submitted reviews
//!
//! Output layout:
//! - Header row `reviewer name,star rating,selected options,date`
//! - One row per review, `\n` separated, no trailing newline, no BOM
//! - Fields containing a comma, double quote or line break are quoted,
//!   with embedded quotes doubled; everything else is written verbatim

use chrono::SecondsFormat;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::model::Review;
use crate::{Error, Result};

/// Column headers, in output order
pub const CSV_HEADER: [&str; 4] = ["reviewer name", "star rating", "selected options", "date"];

/// Separator between "<Category>: <Option>" pairs in the selections column
pub const SELECTION_SEPARATOR: &str = " | ";

/// One flattened review, ready to be written as a CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReviewRow {
    pub reviewer_name: String,
    pub star_rating: u8,
    pub selected_options: String,
    /// ISO-8601 submission timestamp
    pub submitted_at: String,
}

impl CsvReviewRow {
    /// Flatten a review; selections keep their stored order
    pub fn from_review(review: &Review) -> Self {
        let selected_options = review
            .selections
            .iter()
            .map(|s| format!("{}: {}", s.category_name, s.option_label))
            .collect::<Vec<_>>()
            .join(SELECTION_SEPARATOR);

        Self {
            reviewer_name: review.display_name().to_string(),
            star_rating: review.star_rating,
            selected_options,
            submitted_at: review
                .submitted_at
                .to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }
}

/// Serialize review rows to CSV text
///
/// Every input, including an empty slice, produces a document; the error
/// path only covers failures of the in-memory writer itself.
pub fn reviews_csv(rows: &[CsvReviewRow]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| Error::Internal(format!("CSV write failed: {}", e)))?;

    for row in rows {
        let rating = row.star_rating.to_string();
        writer
            .write_record([
                row.reviewer_name.as_str(),
                rating.as_str(),
                row.selected_options.as_str(),
                row.submitted_at.as_str(),
            ])
            .map_err(|e| Error::Internal(format!("CSV write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Internal(format!("CSV flush failed: {}", e)))?;
    let mut text =
        String::from_utf8(bytes).map_err(|e| Error::Internal(format!("CSV not UTF-8: {}", e)))?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Flatten and serialize reviews in the order given
pub fn export_reviews(reviews: &[Review]) -> Result<String> {
    let rows: Vec<CsvReviewRow> = reviews.iter().map(CsvReviewRow::from_review).collect();
    reviews_csv(&rows)
}

/// Attachment filename for a product's export
pub fn export_filename(product_id: &str) -> String {
    format!("product-{}-reviews.csv", product_id)
}
