//! # Grading Pipeline
//!
//! Two-stage grading: an optional assisting [`GradingStrategy`] is tried first and the
//! [`DeterministicGrader`] produces the outcome whenever the assistant is disabled, missing,
//! fails, runs out of time or returns an outcome that does not add up.
//!
//! Ground-truth validation happens before either stage and is never bypassed by a
//! fallback: invalid ground truth is a data error, not a transient one.

use crate::error::{GraderError, StrategyError};
use crate::feedback::auto_feedback::AutoFeedback;
use crate::parsers::analysis_parser::parse_analysis;
use crate::scoring::weighted_scorer::WeightedScorer;
use crate::traits::strategy::GradingStrategy;
use crate::types::{BugRecord, GradingOutcome, GroundTruth};
use crate::{DETERMINISTIC_METHOD, evaluate, validate_ground_truth};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};
use util::grading_config::{FeedbackOptions, GradingConfig};

/// The always-available grader: weighted scorer, greedy matcher and template feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicGrader {
    feedback: AutoFeedback,
}

impl DeterministicGrader {
    pub fn new(options: &FeedbackOptions) -> Self {
        Self {
            feedback: AutoFeedback::from(options),
        }
    }

    pub fn grade_now(&self, analysis: &str, ground_truth: &GroundTruth) -> GradingOutcome {
        evaluate(analysis, ground_truth, &WeightedScorer, &self.feedback)
    }
}

#[async_trait]
impl GradingStrategy for DeterministicGrader {
    fn name(&self) -> &str {
        DETERMINISTIC_METHOD
    }

    async fn grade(
        &self,
        analysis: &str,
        ground_truth: &GroundTruth,
    ) -> Result<GradingOutcome, StrategyError> {
        Ok(self.grade_now(analysis, ground_truth))
    }
}

/// Rejects an assistant outcome whose numbers cannot describe `ground_truth` and an
/// analysis of `claim_count` non-blank lines.
pub fn check_consistency(
    outcome: &GradingOutcome,
    ground_truth: &GroundTruth,
    claim_count: usize,
) -> Result<(), StrategyError> {
    let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
    if !in_range(outcome.score) || !in_range(outcome.accuracy_rate) {
        return Err(StrategyError::InconsistentOutcome(format!(
            "score {} / accuracy {} outside 0-100",
            outcome.score, outcome.accuracy_rate
        )));
    }

    if outcome.trick_challenge != ground_truth.is_trick() {
        return Err(StrategyError::InconsistentOutcome(format!(
            "trick_challenge is {} for a {} challenge",
            outcome.trick_challenge,
            if ground_truth.is_trick() { "trick" } else { "normal" }
        )));
    }

    let accounted = outcome.bugs_found + outcome.bugs_missed;
    if accounted != ground_truth.real_count() {
        return Err(StrategyError::InconsistentOutcome(format!(
            "found {} + missed {} does not equal {} expected bugs",
            outcome.bugs_found,
            outcome.bugs_missed,
            ground_truth.real_count()
        )));
    }

    if outcome.lines_analyzed != claim_count {
        return Err(StrategyError::InconsistentOutcome(format!(
            "lines_analyzed {} but the analysis has {} claims",
            outcome.lines_analyzed, claim_count
        )));
    }

    let claimed = outcome.bugs_found + outcome.false_positives;
    if claimed != claim_count {
        return Err(StrategyError::InconsistentOutcome(format!(
            "found {} + false positives {} does not equal {} claims",
            outcome.bugs_found, outcome.false_positives, claim_count
        )));
    }

    Ok(())
}

/// Grades submissions with an optional assistant in front of the deterministic engine.
pub struct GradingPipeline {
    config: GradingConfig,
    assistant: Option<Box<dyn GradingStrategy>>,
    fallback: DeterministicGrader,
}

impl GradingPipeline {
    pub fn new(config: GradingConfig) -> Self {
        let fallback = DeterministicGrader::new(&config.feedback);
        Self {
            config,
            assistant: None,
            fallback,
        }
    }

    /// Install the strategy tried before the deterministic engine.
    pub fn with_assistant<S: GradingStrategy + 'static>(mut self, assistant: S) -> Self {
        self.assistant = Some(Box::new(assistant));
        self
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Grade one submission.
    ///
    /// # Returns
    /// * `Ok(GradingOutcome)`, from the assistant if it succeeded, otherwise from the
    ///   deterministic engine.
    /// * `Err(GraderError::InvalidGroundTruth)` if the expected bugs are invalid.
    pub async fn grade(
        &self,
        analysis: &str,
        expected_bugs: &[BugRecord],
    ) -> Result<GradingOutcome, GraderError> {
        let ground_truth = validate_ground_truth(expected_bugs.to_vec())?;

        if let Some(assistant) = self.active_assistant() {
            match self.try_assistant(assistant, analysis, &ground_truth).await {
                Ok(outcome) => {
                    info!(
                        strategy = assistant.name(),
                        model = self.config.assist.model_name(),
                        score = outcome.score,
                        "assisted grading accepted"
                    );
                    return Ok(outcome);
                }
                Err(e) => {
                    warn!(
                        strategy = assistant.name(),
                        model = self.config.assist.model_name(),
                        error = %e,
                        "assisted grading failed, falling back to deterministic grading"
                    );
                }
            }
        }

        Ok(self.fallback.grade_now(analysis, &ground_truth))
    }

    fn active_assistant(&self) -> Option<&dyn GradingStrategy> {
        if !self.config.assist.is_active() {
            return None;
        }
        self.assistant.as_deref()
    }

    async fn try_assistant(
        &self,
        assistant: &dyn GradingStrategy,
        analysis: &str,
        ground_truth: &GroundTruth,
    ) -> Result<GradingOutcome, StrategyError> {
        let secs = self.config.assist.timeout_secs;
        let mut outcome = tokio::time::timeout(
            Duration::from_secs(secs),
            assistant.grade(analysis, ground_truth),
        )
        .await
        .map_err(|_| StrategyError::Timeout { secs })??;

        check_consistency(&outcome, ground_truth, parse_analysis(analysis).len())?;
        outcome.evaluation_method = assistant.name().to_string();
        Ok(outcome)
    }
}
