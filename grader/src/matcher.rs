//! # Matcher
//!
//! Greedy one-to-one assignment of claimed entries to ground-truth bugs.
//!
//! Claims are visited in the order the candidate wrote them. Each claim is scored against
//! every ground-truth record not yet taken and keeps the best one (the earliest record wins
//! a tie). The pairing is accepted only when the best score exceeds
//! [`ACCEPTANCE_THRESHOLD`]; an accepted record is consumed and cannot be matched again.
//! Claims that are never accepted are false positives, records never consumed are missed.
//!
//! A trick challenge (the lone sentinel record) has nothing to find: every claim is a false
//! positive and nothing is missed.

use crate::traits::scorer::MatchScorer;
use crate::types::{
    ClaimedEntry, FalsePositive, GroundTruth, MatchQuality, MatchResult, MatchSummary,
};
use tracing::debug;

/// A pair must score strictly above this to be accepted.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.3;

pub fn match_claims(
    claims: &[ClaimedEntry],
    ground_truth: &GroundTruth,
    scorer: &dyn MatchScorer,
) -> MatchSummary {
    if ground_truth.is_trick() {
        debug!(claims = claims.len(), "trick challenge: every claim is a false positive");
        return MatchSummary {
            matches: Vec::new(),
            false_positives: claims
                .iter()
                .map(|claim| FalsePositive {
                    claimed: claim.clone(),
                    best_score: 0.0,
                    duplicate: false,
                })
                .collect(),
            missed: Vec::new(),
            trick_challenge: true,
        };
    }

    let truths = ground_truth.bugs();
    let mut consumed = vec![false; truths.len()];
    let mut matches = Vec::new();
    let mut false_positives = Vec::new();

    for claim in claims {
        let mut best: Option<(usize, f64)> = None;

        for (index, truth) in truths.iter().enumerate() {
            if consumed[index] {
                continue;
            }
            let score = scorer.score(claim, truth);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score > ACCEPTANCE_THRESHOLD => {
                consumed[index] = true;
                let truth = &truths[index];
                let quality = MatchQuality::from_score(score);
                debug!(
                    position = claim.position,
                    claimed_line = claim.line_number,
                    truth_line = truth.line_number,
                    score,
                    quality = %quality,
                    "claim matched"
                );
                matches.push(MatchResult {
                    claimed: claim.clone(),
                    ground_truth: truth.clone(),
                    score,
                    quality,
                    signals: scorer.signals(claim, truth),
                });
            }
            other => {
                let best_score = other.map_or(0.0, |(_, score)| score);
                let duplicate = truths
                    .iter()
                    .zip(&consumed)
                    .filter(|(_, taken)| **taken)
                    .any(|(truth, _)| scorer.score(claim, truth) > ACCEPTANCE_THRESHOLD);
                debug!(
                    position = claim.position,
                    claimed_line = claim.line_number,
                    best_score,
                    duplicate,
                    "claim rejected"
                );
                false_positives.push(FalsePositive {
                    claimed: claim.clone(),
                    best_score,
                    duplicate,
                });
            }
        }
    }

    let missed = truths
        .iter()
        .zip(&consumed)
        .filter(|(_, taken)| !**taken)
        .map(|(truth, _)| truth.clone())
        .collect();

    MatchSummary {
        matches,
        false_positives,
        missed,
        trick_challenge: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::analysis_parser::parse_analysis;
    use crate::scoring::weighted_scorer::WeightedScorer;
    use crate::types::{BugCategory, BugRecord, SignalBreakdown};

    /// Scores pairs from a fixed table keyed by (claim position, truth line).
    struct TableScorer(Vec<((usize, u32), f64)>);

    impl MatchScorer for TableScorer {
        fn signals(&self, claim: &ClaimedEntry, truth: &BugRecord) -> SignalBreakdown {
            let text = self
                .0
                .iter()
                .find(|(key, _)| *key == (claim.position, truth.line_number))
                .map_or(0.0, |(_, score)| *score);
            SignalBreakdown {
                location: 0.0,
                text,
                category: Some(0.0),
            }
        }
    }

    fn truths(lines: &[u32]) -> GroundTruth {
        GroundTruth::new(
            lines
                .iter()
                .map(|&l| BugRecord::new(l, BugCategory::Logic, format!("bug on {l}")))
                .collect(),
        )
        .unwrap()
    }

    fn claims(n: usize) -> Vec<ClaimedEntry> {
        (0..n)
            .map(|i| ClaimedEntry {
                position: i,
                raw_text: format!("claim {i}"),
                line_number: 0,
                word_count: 2,
            })
            .collect()
    }

    #[test]
    fn test_trick_challenge_all_false_positives() {
        let gt = GroundTruth::new(vec![BugRecord::sentinel("No bugs")]).unwrap();
        let summary = match_claims(&claims(3), &gt, &WeightedScorer);
        assert!(summary.trick_challenge);
        assert!(summary.matches.is_empty());
        assert!(summary.missed.is_empty());
        assert_eq!(summary.false_positives.len(), 3);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let scorer = TableScorer(vec![((0, 1), 0.3), ((1, 1), 0.31)]);
        let summary = match_claims(&claims(2), &truths(&[1]), &scorer);
        assert_eq!(summary.matches.len(), 1);
        assert_eq!(summary.matches[0].claimed.position, 1);
        assert_eq!(summary.false_positives.len(), 1);
        assert_eq!(summary.false_positives[0].claimed.position, 0);
        assert!(!summary.false_positives[0].duplicate);
    }

    #[test]
    fn test_earlier_claim_takes_priority() {
        // Both claims prefer bug 1; the first claim gets it, the second falls back to bug 2.
        let scorer = TableScorer(vec![
            ((0, 1), 0.6),
            ((1, 1), 0.95),
            ((1, 2), 0.5),
        ]);
        let summary = match_claims(&claims(2), &truths(&[1, 2]), &scorer);
        assert_eq!(summary.matches.len(), 2);
        assert_eq!(summary.matches[0].ground_truth.line_number, 1);
        assert_eq!(summary.matches[0].quality, MatchQuality::Partial);
        assert_eq!(summary.matches[1].ground_truth.line_number, 2);
        assert_eq!(summary.matches[1].quality, MatchQuality::Partial);
        assert!(summary.missed.is_empty());
    }

    #[test]
    fn test_tie_goes_to_first_record() {
        let scorer = TableScorer(vec![((0, 1), 0.8), ((0, 2), 0.8)]);
        let summary = match_claims(&claims(1), &truths(&[1, 2]), &scorer);
        assert_eq!(summary.matches[0].ground_truth.line_number, 1);
        assert_eq!(summary.missed.len(), 1);
        assert_eq!(summary.missed[0].line_number, 2);
    }

    #[test]
    fn test_duplicate_claim_is_flagged() {
        let scorer = TableScorer(vec![((0, 1), 0.9), ((1, 1), 0.85)]);
        let summary = match_claims(&claims(2), &truths(&[1]), &scorer);
        assert_eq!(summary.matches.len(), 1);
        assert_eq!(summary.false_positives.len(), 1);
        assert!(summary.false_positives[0].duplicate);
    }

    #[test]
    fn test_no_record_matched_twice_and_counts_balance() {
        let text = "Line 3: off by one\nLine 3: off by one again\nLine 3: still off by one\nnothing else";
        let claims = parse_analysis(text);
        let gt = GroundTruth::new(vec![
            BugRecord::new(3, BugCategory::OffByOne, "Off by one in the loop range"),
            BugRecord::new(8, BugCategory::Security, "Password stored in plain text"),
        ])
        .unwrap();
        let summary = match_claims(&claims, &gt, &WeightedScorer);

        let mut lines: Vec<u32> = summary
            .matches
            .iter()
            .map(|m| m.ground_truth.line_number)
            .collect();
        lines.dedup();
        assert_eq!(lines.len(), summary.matches.len());
        assert_eq!(summary.matches.len() + summary.missed.len(), 2);
        assert_eq!(summary.claim_count(), claims.len());
    }

    #[test]
    fn test_empty_claims_miss_everything() {
        let summary = match_claims(&[], &truths(&[1, 2, 3]), &WeightedScorer);
        assert!(summary.matches.is_empty());
        assert!(summary.false_positives.is_empty());
        assert_eq!(summary.missed.len(), 3);
    }
}
