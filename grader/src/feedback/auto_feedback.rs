//! # AutoFeedback Strategy
//!
//! Template-based feedback built only from the matcher's results and the score card.
//!
//! ## Overview
//!
//! - Every claim gets one [`BugFeedback`] entry, in the order the candidate wrote them.
//! - Perfect and good matches are acknowledged as correct; partial and poor matches get a
//!   softer message naming what was imprecise (the cited line or the description).
//! - False positives are told no bug exists on that line; duplicates are told the bug was
//!   already credited.
//! - Missed bugs only appear as a count in the narrative, never by description.
//!
//! The output is a pure function of the inputs, with no randomness.

use crate::feedback::insights::{improvements, learning_insights, plural, strengths};
use crate::scorer::ScoreCard;
use crate::scoring::weighted_scorer::LOCATION_TOLERANCE;
use crate::traits::feedback::{Feedback, SynthesizedFeedback};
use crate::types::{BugFeedback, FalsePositive, GradeLevel, MatchResult, MatchSummary};
use util::grading_config::FeedbackOptions;

pub const CORRECT_MESSAGE: &str = "Correct bug identification!";
pub const NO_BUG_MESSAGE: &str = "No bug found on this line.";
pub const DUPLICATE_MESSAGE: &str =
    "Duplicate identification: this bug was already credited to an earlier line of your analysis.";

/// Automatic feedback strategy.
#[derive(Debug, Clone, Copy)]
pub struct AutoFeedback {
    pub include_learning_insights: bool,
}

impl Default for AutoFeedback {
    fn default() -> Self {
        Self {
            include_learning_insights: true,
        }
    }
}

impl From<&FeedbackOptions> for AutoFeedback {
    fn from(options: &FeedbackOptions) -> Self {
        Self {
            include_learning_insights: options.include_learning_insights,
        }
    }
}

fn match_message(result: &MatchResult) -> String {
    if result.quality.is_correct() {
        return CORRECT_MESSAGE.to_string();
    }

    let claimed = result.claimed.line_number;
    let actual = result.ground_truth.line_number;
    if !result.claimed.has_location() {
        "Partially correct: this relates to a real bug, but cite the line where it occurs."
            .to_string()
    } else if claimed == actual {
        "Partially correct: right location, but the description only partly matches the bug."
            .to_string()
    } else if claimed.abs_diff(actual) <= LOCATION_TOLERANCE {
        "Partially correct: the cited line is slightly off and the description is imprecise."
            .to_string()
    } else {
        "Partially correct: the description points at a real bug, but not where it occurs."
            .to_string()
    }
}

fn false_positive_message(fp: &FalsePositive) -> String {
    if fp.duplicate {
        DUPLICATE_MESSAGE.to_string()
    } else {
        NO_BUG_MESSAGE.to_string()
    }
}

fn per_bug_feedback(summary: &MatchSummary) -> Vec<BugFeedback> {
    let mut entries: Vec<(usize, BugFeedback)> = summary
        .matches
        .iter()
        .map(|m| {
            (
                m.claimed.position,
                BugFeedback {
                    line_number: m.claimed.line_number,
                    claim: m.claimed.raw_text.clone(),
                    is_correct: true,
                    quality: Some(m.quality),
                    message: match_message(m),
                },
            )
        })
        .chain(summary.false_positives.iter().map(|fp| {
            (
                fp.claimed.position,
                BugFeedback {
                    line_number: fp.claimed.line_number,
                    claim: fp.claimed.raw_text.clone(),
                    is_correct: false,
                    quality: None,
                    message: false_positive_message(fp),
                },
            )
        }))
        .collect();

    entries.sort_by_key(|(position, _)| *position);
    entries.into_iter().map(|(_, entry)| entry).collect()
}

fn narrative(card: &ScoreCard) -> String {
    if card.trick_challenge {
        return if card.false_positives == 0 {
            "This was a trick challenge with no bugs. You correctly reported no issues.".to_string()
        } else {
            let reported = if card.false_positives == 1 {
                "1 issue that doesn't exist".to_string()
            } else {
                format!("{} issues that don't exist", card.false_positives)
            };
            format!("This was a trick challenge with no bugs. You reported {reported}.")
        };
    }

    let found = format!(
        "You found {} out of {} correctly.",
        card.bugs_found,
        plural(card.total_bugs, "bug", "bugs")
    );
    if card.bugs_found == card.total_bugs {
        format!("{found} Great job!")
    } else {
        let pronoun = if card.bugs_missed == 1 { "it" } else { "them" };
        format!(
            "{found} You missed {}; keep practicing to find {pronoun}!",
            plural(card.bugs_missed, "bug", "bugs")
        )
    }
}

impl Feedback for AutoFeedback {
    fn synthesize(&self, card: &ScoreCard, summary: &MatchSummary) -> SynthesizedFeedback {
        SynthesizedFeedback {
            per_bug: per_bug_feedback(summary),
            narrative: narrative(card),
            grade_level: GradeLevel::from_score(card.score),
            strengths: strengths(card),
            improvements: improvements(card),
            learning_insights: if self.include_learning_insights {
                learning_insights()
            } else {
                Vec::new()
            },
        }
    }
}
