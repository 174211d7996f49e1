//! # Scoring
//!
//! Pairwise similarity between one claimed entry and one ground-truth bug.
//!
//! - [`similarity`]: longest-common-subsequence ratio between two texts.
//! - [`keywords`]: category keyword detection over claim text.
//! - [`weighted_scorer`]: the three-signal [`MatchScorer`](crate::traits::scorer::MatchScorer) used by default.

pub mod keywords;
pub mod similarity;
pub mod weighted_scorer;
