//! The default three-signal match scorer.
//!
//! | signal   | weight | rule                                                              |
//! |----------|--------|-------------------------------------------------------------------|
//! | location | 0.30   | exact line: full; both cited and 1-2 lines apart: `w * (1 - d/3)` |
//! | text     | 0.40   | LCS ratio of the lower-cased claim text and bug description       |
//! | category | 0.30   | `w * detected categories expected for the bug / detected count`   |
//!
//! The categories expected for a bug are its own category plus any category whose keywords
//! occur in its description, so restating the description earns full category credit.
//! When the category signal cannot apply (the record has no category, or the claim names
//! no category keyword) it is left out and location plus text are rescaled by their
//! combined weight of 0.70; see [`SignalBreakdown::total`].
//!
//! No signal is sufficient or necessary on its own: a claim with the wrong line but an
//! accurate description (or the reverse) still earns partial credit.

use crate::scoring::keywords::detect_categories;
use crate::scoring::similarity::lcs_ratio;
use crate::traits::scorer::MatchScorer;
use crate::types::{BugRecord, ClaimedEntry, SignalBreakdown};
use crate::utilities::text_normalization::normalize;

pub const LOCATION_WEIGHT: f64 = 0.30;
pub const TEXT_WEIGHT: f64 = 0.40;
pub const CATEGORY_WEIGHT: f64 = 0.30;

/// Largest line distance that still earns location credit.
pub const LOCATION_TOLERANCE: u32 = 2;

/// Scores claims on location, text similarity and category keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScorer;

impl WeightedScorer {
    pub fn location_signal(claim_line: u32, truth_line: u32) -> f64 {
        if claim_line == 0 || truth_line == 0 {
            return 0.0;
        }
        let distance = claim_line.abs_diff(truth_line);
        if distance == 0 {
            LOCATION_WEIGHT
        } else if distance <= LOCATION_TOLERANCE {
            LOCATION_WEIGHT * (1.0 - distance as f64 / (LOCATION_TOLERANCE + 1) as f64)
        } else {
            0.0
        }
    }

    pub fn text_signal(claim_text: &str, description: &str) -> f64 {
        TEXT_WEIGHT * lcs_ratio(&normalize(claim_text), &normalize(description))
    }

    pub fn category_signal(claim_text: &str, truth: &BugRecord) -> Option<f64> {
        let category = truth.category?;
        let detected = detect_categories(claim_text);
        if detected.is_empty() {
            return None;
        }
        let mut expected = detect_categories(&truth.description);
        expected.insert(category);
        let hits = detected.intersection(&expected).count();
        Some(CATEGORY_WEIGHT * hits as f64 / detected.len() as f64)
    }
}

impl MatchScorer for WeightedScorer {
    fn signals(&self, claim: &ClaimedEntry, truth: &BugRecord) -> SignalBreakdown {
        SignalBreakdown {
            location: Self::location_signal(claim.line_number, truth.line_number),
            text: Self::text_signal(&claim.raw_text, &truth.description),
            category: Self::category_signal(&claim.raw_text, truth),
        }
    }
}
