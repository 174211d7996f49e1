//! Grading Strategy Trait
//!
//! A [`GradingStrategy`] grades a whole submission. The deterministic engine is one
//! implementation and can never fail; an enhancement layer (for example an LLM-backed
//! grader) is another, and reports failure as a [`StrategyError`] so the pipeline can fall
//! back instead of unwinding through broad error handlers.

use crate::error::StrategyError;
use crate::types::{GradingOutcome, GroundTruth};
use async_trait::async_trait;

#[async_trait]
pub trait GradingStrategy: Send + Sync {
    /// Short identifier recorded as the outcome's `evaluation_method`.
    fn name(&self) -> &str;

    /// Grades `analysis` against already-validated ground truth.
    async fn grade(
        &self,
        analysis: &str,
        ground_truth: &GroundTruth,
    ) -> Result<GradingOutcome, StrategyError>;
}
