//!
//! # Feedback Trait
//!
//! This module defines the [`Feedback`] trait and the [`SynthesizedFeedback`] it produces.
//! A feedback strategy turns the matcher's results and the final score card into
//! candidate-facing text. Strategies must be pure: the same inputs always give the same
//! feedback, so outcomes stay suitable for golden-output testing.
//!

use crate::scorer::ScoreCard;
use crate::types::{BugFeedback, GradeLevel, MatchSummary};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedFeedback {
    /// One entry per claim, in the order the candidate wrote them.
    pub per_bug: Vec<BugFeedback>,
    pub narrative: String,
    pub grade_level: GradeLevel,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub learning_insights: Vec<String>,
}

/// A trait for pluggable feedback strategies.
///
/// Implementations must never reveal the description of a missed bug; missed bugs are
/// only ever reported as a count.
pub trait Feedback: Send + Sync {
    fn synthesize(&self, card: &ScoreCard, summary: &MatchSummary) -> SynthesizedFeedback;
}
