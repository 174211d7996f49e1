//! # Feedback Strategies Module
//!
//! Feedback strategies implement the [`Feedback`](crate::traits::feedback::Feedback) trait and
//! turn a score card plus the matcher's results into candidate-facing text.
//!
//! ## Available Strategies
//!
//! - [`auto_feedback`]: fixed templates per claim, a narrative summary, strengths and
//!   improvements.

pub mod auto_feedback;
pub mod insights;
