//! # Scorer Module
//!
//! Converts the matcher's results into the numeric part of a grading outcome.
//!
//! **Normal challenge.** Each accepted match earns points by quality tier (perfect 100,
//! good 80, partial 50, poor 30). A false-positive penalty of 10 points per false positive,
//! capped at 30, is subtracted from the point total (floored at 0) before normalizing by
//! `100 * total_bugs`. `accuracy_rate` is the plain share of bugs found and ignores match
//! quality.
//!
//! **Trick challenge.** `accuracy_rate` is 100 when the candidate claimed nothing, otherwise
//! `100 - 20 * false_positives` (floored at 0). `score` equals `accuracy_rate`.
//!
//! This is the only score formula in the crate; every code path, fallback included, goes
//! through [`compute_score_card`].

use crate::types::{MatchQuality, MatchSummary};
use crate::utilities::text_normalization::round1;
use serde::Serialize;

pub const FALSE_POSITIVE_PENALTY: u32 = 10;
pub const MAX_FALSE_POSITIVE_PENALTY: u32 = 30;
pub const TRICK_FALSE_POSITIVE_PENALTY: u32 = 20;

/// Numeric grading result before feedback is attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub bugs_found: usize,
    pub bugs_missed: usize,
    pub false_positives: usize,
    pub total_bugs: usize,
    pub trick_challenge: bool,
    /// 0-100, one decimal.
    pub accuracy_rate: f64,
    /// 0-100, one decimal.
    pub score: f64,
    pub perfect_matches: usize,
    pub good_matches: usize,
    pub partial_matches: usize,
    pub poor_matches: usize,
    /// Tier points after the false-positive penalty.
    pub points_earned: u32,
    pub max_points: u32,
    pub false_positive_penalty: u32,
}

/// Builds the score card for `summary`. `total_bugs` is the number of real ground-truth
/// bugs and is ignored for a trick challenge.
pub fn compute_score_card(summary: &MatchSummary, total_bugs: usize) -> ScoreCard {
    let false_positives = summary.false_positives.len();
    let fp = u32::try_from(false_positives).unwrap_or(u32::MAX);

    let mut card = ScoreCard {
        bugs_found: summary.matches.len(),
        bugs_missed: summary.missed.len(),
        false_positives,
        total_bugs: if summary.trick_challenge { 0 } else { total_bugs },
        trick_challenge: summary.trick_challenge,
        accuracy_rate: 0.0,
        score: 0.0,
        perfect_matches: summary.count_quality(MatchQuality::Perfect),
        good_matches: summary.count_quality(MatchQuality::Good),
        partial_matches: summary.count_quality(MatchQuality::Partial),
        poor_matches: summary.count_quality(MatchQuality::Poor),
        points_earned: 0,
        max_points: 0,
        false_positive_penalty: 0,
    };

    if summary.trick_challenge {
        let penalty = fp.saturating_mul(TRICK_FALSE_POSITIVE_PENALTY).min(100);
        let accuracy = if summary.claim_count() == 0 {
            100.0
        } else {
            f64::from(100 - penalty)
        };
        card.false_positive_penalty = penalty;
        card.accuracy_rate = clamp_percent(accuracy);
        card.score = card.accuracy_rate;
        return card;
    }

    if total_bugs == 0 {
        return card;
    }

    let tier_points: u32 = summary.matches.iter().map(|m| m.quality.points()).sum();
    let penalty = fp
        .saturating_mul(FALSE_POSITIVE_PENALTY)
        .min(MAX_FALSE_POSITIVE_PENALTY);
    let points_earned = tier_points.saturating_sub(penalty);
    let max_points = u32::try_from(total_bugs)
        .unwrap_or(u32::MAX)
        .saturating_mul(100);

    card.points_earned = points_earned;
    card.max_points = max_points;
    card.false_positive_penalty = penalty;
    card.score = clamp_percent(f64::from(points_earned) / f64::from(max_points) * 100.0);
    card.accuracy_rate = clamp_percent(card.bugs_found as f64 / total_bugs as f64 * 100.0);
    card
}

fn clamp_percent(value: f64) -> f64 {
    round1(value.clamp(0.0, 100.0))
}
