//! Analysis Parser
//!
//! Turns the candidate's free-text analysis into one [`ClaimedEntry`] per non-blank line.
//! A line reference is any `line <n>` mention (case-insensitive, the space is optional);
//! the first one on a line wins. Lines without a reference get line 0, which only means
//! "no location given" and is never read as a "no bugs" answer.
//!
//! The parser is total: empty input, non-ASCII text and lines without numbers all parse
//! without error.

use crate::types::ClaimedEntry;
use crate::utilities::text_normalization::word_count;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static LINE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)line\s*([0-9]+)").expect("line reference pattern is valid"));

/// Parses `text` into claimed entries, in the order they appear.
pub fn parse_analysis(text: &str) -> Vec<ClaimedEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(position, line)| ClaimedEntry {
            position,
            raw_text: line.to_string(),
            line_number: extract_line_number(line),
            word_count: word_count(line),
        })
        .collect()
}

/// First `line <n>` reference in `line`, or 0. Numbers too large for a line index count as absent.
pub fn extract_line_number(line: &str) -> u32 {
    LINE_REFERENCE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Aggregate shape of a parsed analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisStats {
    pub total_identifications: usize,
    pub has_line_references: bool,
    /// Mean word count per claim; 0 when there are no claims.
    pub average_detail_level: f64,
}

impl AnalysisStats {
    pub fn from_claims(claims: &[ClaimedEntry]) -> Self {
        let total = claims.len();
        let words: usize = claims.iter().map(|c| c.word_count).sum();
        Self {
            total_identifications: total,
            has_line_references: claims.iter().any(ClaimedEntry::has_location),
            average_detail_level: if total > 0 {
                words as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}
