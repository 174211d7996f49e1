//! Grader Error Types
//!
//! [`GraderError`] covers failures of the grading engine itself. The only engine failure is
//! ground truth that breaks the sentinel invariant; candidate text is never an error source
//! because the analysis parser is total.
//!
//! [`StrategyError`] is the typed failure of an optional grading strategy (such as an
//! AI-assisted grader). Every variant means the pipeline must fall back to the
//! deterministic engine; none of them is shown to the candidate.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraderError {
    /// The expected-bug list is empty, or mixes the no-bug sentinel with real records.
    /// This is a data-preparation error upstream and must not be retried as-is.
    #[error("Invalid ground truth: {0}")]
    InvalidGroundTruth(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("Grading strategy unavailable: {0}")]
    Unavailable(String),
    #[error("Grading strategy timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("Grading strategy returned a malformed response: {0}")]
    MalformedResponse(String),
    #[error("Grading strategy returned an inconsistent outcome: {0}")]
    InconsistentOutcome(String),
}
