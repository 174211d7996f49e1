//!
//! Traits Module
//!
//! Extension seams of the grading engine.
//!
//! - [`scorer`]: pairwise similarity between a claim and a ground-truth bug.
//! - [`feedback`]: turning match results and scores into candidate-facing feedback.
//! - [`strategy`]: a complete grading strategy the pipeline can try before the deterministic engine.

pub mod feedback;
pub mod scorer;
pub mod strategy;
