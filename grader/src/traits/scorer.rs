use crate::types::{BugRecord, ClaimedEntry, SignalBreakdown};

/// MatchScorer is a strategy trait for rating how well one claim describes one ground-truth bug.
///
/// Implementations report each signal separately so that match feedback can explain which
/// part of a claim was imprecise. The matcher only relies on [`MatchScorer::score`] being a
/// deterministic value in [0, 1].
pub trait MatchScorer: Send + Sync {
    /// Weighted contribution of each signal for this pair.
    fn signals(&self, claim: &ClaimedEntry, truth: &BugRecord) -> SignalBreakdown;

    /// Final pair score, clamped to [0, 1].
    fn score(&self, claim: &ClaimedEntry, truth: &BugRecord) -> f64 {
        self.signals(claim, truth).total()
    }
}
