//! # Grader Library
//!
//! Grades a candidate's free-text bug analysis against the ground-truth list of bugs that
//! were injected into a code challenge.
//!
//! ## Key Concepts
//! - **GradingJob**: grades one submission with the deterministic engine.
//! - **Scorers**: pluggable strategies rating how well one claim describes one bug.
//! - **Matcher**: greedy one-to-one pairing of claims with ground-truth bugs.
//! - **Feedback**: deterministic per-claim and narrative feedback.
//! - **Pipeline**: tries an optional assisting strategy first and falls back to the
//!   deterministic engine on any typed failure.
//!
//! The engine is synchronous and stateless; grading the same inputs twice yields identical
//! outcomes.

pub mod error;
pub mod feedback;
pub mod matcher;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod scorer;
pub mod scoring;
pub mod traits;
pub mod types;
pub mod utilities;

use crate::error::GraderError;
use crate::feedback::auto_feedback::AutoFeedback;
use crate::matcher::match_claims;
use crate::parsers::analysis_parser::{AnalysisStats, parse_analysis};
use crate::scorer::compute_score_card;
use crate::scoring::weighted_scorer::WeightedScorer;
use crate::traits::feedback::Feedback;
use crate::traits::scorer::MatchScorer;
use crate::types::{BugRecord, GradingOutcome, GroundTruth};
use crate::utilities::text_normalization::round1;

use tracing::{error, info};

pub const DETERMINISTIC_METHOD: &str = "deterministic";

/// A grading job for a single submission.
///
/// # Fields
/// - `analysis`: the candidate's free-text analysis, one claim per line.
/// - `expected_bugs`: the ground truth, validated when the job runs.
/// - `scorer`: pairwise similarity strategy (defaults to [`WeightedScorer`]).
/// - `feedback`: feedback strategy (defaults to [`AutoFeedback`]).
pub struct GradingJob<'a> {
    analysis: String,
    expected_bugs: Vec<BugRecord>,
    scorer: Box<dyn MatchScorer + 'a>,
    feedback: Box<dyn Feedback + 'a>,
}

impl<'a> GradingJob<'a> {
    pub fn new(analysis: impl Into<String>, expected_bugs: Vec<BugRecord>) -> Self {
        Self {
            analysis: analysis.into(),
            expected_bugs,
            scorer: Box::new(WeightedScorer),
            feedback: Box::new(AutoFeedback::default()),
        }
    }

    /// Set a custom match scorer for this job.
    pub fn with_scorer<S: MatchScorer + 'a>(mut self, scorer: S) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Set a custom feedback strategy for this job.
    pub fn with_feedback<F: Feedback + 'a>(mut self, feedback: F) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    /// Validate the ground truth and grade the analysis.
    ///
    /// # Returns
    /// * `Ok(GradingOutcome)` with scores and feedback.
    /// * `Err(GraderError::InvalidGroundTruth)` before any scoring if the expected-bug list
    ///   is empty or mixes the sentinel with real bugs.
    pub fn grade(self) -> Result<GradingOutcome, GraderError> {
        let ground_truth = validate_ground_truth(self.expected_bugs)?;
        Ok(evaluate(
            &self.analysis,
            &ground_truth,
            self.scorer.as_ref(),
            self.feedback.as_ref(),
        ))
    }
}

/// Grade `analysis` with the default scorer and feedback.
pub fn grade_submission(
    analysis: &str,
    expected_bugs: &[BugRecord],
) -> Result<GradingOutcome, GraderError> {
    GradingJob::new(analysis, expected_bugs.to_vec()).grade()
}

pub(crate) fn validate_ground_truth(
    expected_bugs: Vec<BugRecord>,
) -> Result<GroundTruth, GraderError> {
    GroundTruth::new(expected_bugs).inspect_err(|e| {
        error!(error = %e, "refusing to grade submission");
    })
}

/// Parse, match, score and synthesize feedback. Never fails once the ground truth is valid.
pub(crate) fn evaluate(
    analysis: &str,
    ground_truth: &GroundTruth,
    scorer: &dyn MatchScorer,
    feedback: &dyn Feedback,
) -> GradingOutcome {
    let claims = parse_analysis(analysis);
    let stats = AnalysisStats::from_claims(&claims);
    let summary = match_claims(&claims, ground_truth, scorer);
    let card = compute_score_card(&summary, ground_truth.real_count());
    let synthesized = feedback.synthesize(&card, &summary);

    info!(
        claims = claims.len(),
        bugs_found = card.bugs_found,
        bugs_missed = card.bugs_missed,
        false_positives = card.false_positives,
        score = card.score,
        trick_challenge = card.trick_challenge,
        "submission graded"
    );

    GradingOutcome {
        bugs_found: card.bugs_found,
        bugs_missed: card.bugs_missed,
        false_positives: card.false_positives,
        accuracy_rate: card.accuracy_rate,
        score: card.score,
        per_bug_feedback: synthesized.per_bug,
        narrative_feedback: synthesized.narrative,
        grade_level: synthesized.grade_level,
        strengths: synthesized.strengths,
        improvements: synthesized.improvements,
        learning_insights: synthesized.learning_insights,
        perfect_matches: card.perfect_matches,
        good_matches: card.good_matches,
        partial_matches: card.partial_matches,
        poor_matches: card.poor_matches,
        false_positive_penalty: card.false_positive_penalty,
        trick_challenge: card.trick_challenge,
        lines_analyzed: stats.total_identifications,
        has_line_references: stats.has_line_references,
        average_detail_level: round1(stats.average_detail_level),
        evaluation_method: DETERMINISTIC_METHOD.to_string(),
    }
}
