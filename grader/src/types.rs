//! # Types Module
//!
//! Core data structures shared by every stage of the grading engine: the ground-truth
//! [`BugRecord`]s, the [`ClaimedEntry`]s parsed from a candidate's analysis, the pairing
//! results produced by the matcher, and the final [`GradingOutcome`] handed to callers.

use crate::error::GraderError;
use crate::scoring::weighted_scorer::{LOCATION_WEIGHT, TEXT_WEIGHT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line number reserved for the "no bugs" record of a trick challenge.
pub const SENTINEL_LINE: u32 = 0;

/// The closed set of defect categories a challenge can inject.
///
/// Serialized in kebab-case. The generator's snake_case names (`null_pointer`,
/// `memory_leak`, ...) are accepted as aliases when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BugCategory {
    #[serde(alias = "syntax_error")]
    Syntax,
    #[serde(alias = "logic_error")]
    Logic,
    #[serde(alias = "runtime_error")]
    Runtime,
    #[serde(alias = "type_error")]
    Type,
    #[serde(alias = "null_pointer")]
    NullReference,
    #[serde(alias = "off_by_one")]
    OffByOne,
    #[serde(alias = "infinite_loop")]
    InfiniteLoop,
    #[serde(alias = "memory_leak")]
    ResourceLeak,
    #[serde(alias = "race_condition")]
    Concurrency,
    #[serde(alias = "security_vulnerability")]
    Security,
}

impl BugCategory {
    pub const ALL: [BugCategory; 10] = [
        BugCategory::Syntax,
        BugCategory::Logic,
        BugCategory::Runtime,
        BugCategory::Type,
        BugCategory::NullReference,
        BugCategory::OffByOne,
        BugCategory::InfiniteLoop,
        BugCategory::ResourceLeak,
        BugCategory::Concurrency,
        BugCategory::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BugCategory::Syntax => "syntax",
            BugCategory::Logic => "logic",
            BugCategory::Runtime => "runtime",
            BugCategory::Type => "type",
            BugCategory::NullReference => "null-reference",
            BugCategory::OffByOne => "off-by-one",
            BugCategory::InfiniteLoop => "infinite-loop",
            BugCategory::ResourceLeak => "resource-leak",
            BugCategory::Concurrency => "concurrency",
            BugCategory::Security => "security",
        }
    }
}

impl fmt::Display for BugCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One injected defect of a challenge (or the sentinel for a trick challenge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugRecord {
    /// 1-based line of the defect; [`SENTINEL_LINE`] marks "no real bug".
    pub line_number: u32,
    /// Absent only on the sentinel record.
    #[serde(default, alias = "bug_type")]
    pub category: Option<BugCategory>,
    pub description: String,
    /// Surfaced to the candidate only; never used in scoring.
    #[serde(default)]
    pub hint: Option<String>,
}

impl BugRecord {
    pub fn new(line_number: u32, category: BugCategory, description: impl Into<String>) -> Self {
        Self {
            line_number,
            category: Some(category),
            description: description.into(),
            hint: None,
        }
    }

    /// The single record of a challenge that contains no bugs.
    pub fn sentinel(description: impl Into<String>) -> Self {
        Self {
            line_number: SENTINEL_LINE,
            category: None,
            description: description.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_sentinel(&self) -> bool {
        self.line_number == SENTINEL_LINE
    }
}

/// A validated ground-truth set.
///
/// Either exactly one sentinel record (a trick challenge) or one or more real records.
/// Construction is the only place the invariant is checked, so everything downstream can
/// rely on it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    bugs: Vec<BugRecord>,
    trick: bool,
}

impl GroundTruth {
    pub fn new(bugs: Vec<BugRecord>) -> Result<Self, GraderError> {
        if bugs.is_empty() {
            return Err(GraderError::InvalidGroundTruth(
                "expected bug list is empty; a challenge without bugs must carry the line-0 sentinel"
                    .to_string(),
            ));
        }

        let sentinels = bugs.iter().filter(|b| b.is_sentinel()).count();
        match sentinels {
            0 => Ok(Self { bugs, trick: false }),
            1 if bugs.len() == 1 => Ok(Self { bugs, trick: true }),
            _ => Err(GraderError::InvalidGroundTruth(format!(
                "sentinel record mixed into ground truth ({} sentinel(s) among {} records)",
                sentinels,
                bugs.len()
            ))),
        }
    }

    /// True for a trick challenge: the set is the lone sentinel.
    pub fn is_trick(&self) -> bool {
        self.trick
    }

    pub fn bugs(&self) -> &[BugRecord] {
        &self.bugs
    }

    /// Number of real bugs to find; zero for a trick challenge.
    pub fn real_count(&self) -> usize {
        if self.trick { 0 } else { self.bugs.len() }
    }
}

/// One non-blank line of a candidate's analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedEntry {
    /// Zero-based index among the non-blank lines, in the order the candidate wrote them.
    pub position: usize,
    pub raw_text: String,
    /// Cited line, or 0 when the claim gives no location.
    pub line_number: u32,
    pub word_count: usize,
}

impl ClaimedEntry {
    pub fn has_location(&self) -> bool {
        self.line_number != 0
    }
}

/// Quality tier of an accepted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    Perfect,
    Good,
    Partial,
    Poor,
}

impl MatchQuality {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            MatchQuality::Perfect
        } else if score >= 0.7 {
            MatchQuality::Good
        } else if score >= 0.5 {
            MatchQuality::Partial
        } else {
            MatchQuality::Poor
        }
    }

    /// Points awarded towards the final score (out of 100 per ground-truth bug).
    pub fn points(&self) -> u32 {
        match self {
            MatchQuality::Perfect => 100,
            MatchQuality::Good => 80,
            MatchQuality::Partial => 50,
            MatchQuality::Poor => 30,
        }
    }

    /// Perfect and good matches count as a correct identification.
    pub fn is_correct(&self) -> bool {
        matches!(self, MatchQuality::Perfect | MatchQuality::Good)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchQuality::Perfect => "perfect",
            MatchQuality::Good => "good",
            MatchQuality::Partial => "partial",
            MatchQuality::Poor => "poor",
        }
    }
}

impl fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted contribution of each similarity signal to a pair score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub location: f64,
    pub text: f64,
    /// `None` when the category signal cannot apply to the pair (no category on the
    /// record, or no category keyword in the claim).
    pub category: Option<f64>,
}

impl SignalBreakdown {
    /// Sum of the signals, clamped to [0, 1].
    ///
    /// Without a category signal, location and text are rescaled by their combined weight
    /// so the pair can still reach the full range.
    pub fn total(&self) -> f64 {
        let raw = match self.category {
            Some(category) => self.location + self.text + category,
            None => (self.location + self.text) / (LOCATION_WEIGHT + TEXT_WEIGHT),
        };
        raw.clamp(0.0, 1.0)
    }
}

/// A claim accepted as identifying a ground-truth bug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub claimed: ClaimedEntry,
    pub ground_truth: BugRecord,
    pub score: f64,
    pub quality: MatchQuality,
    pub signals: SignalBreakdown,
}

/// A claim that could not be paired with any ground-truth bug above the acceptance gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FalsePositive {
    pub claimed: ClaimedEntry,
    /// Best score seen against the records that were still available.
    pub best_score: f64,
    /// The claim would have cleared the gate against a bug an earlier claim already took.
    pub duplicate: bool,
}

/// Output of the matcher: every claim lands in exactly one of `matches` or
/// `false_positives`, every real bug in exactly one of `matches` or `missed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub matches: Vec<MatchResult>,
    pub false_positives: Vec<FalsePositive>,
    pub missed: Vec<BugRecord>,
    pub trick_challenge: bool,
}

impl MatchSummary {
    pub fn claim_count(&self) -> usize {
        self.matches.len() + self.false_positives.len()
    }

    pub fn count_quality(&self, quality: MatchQuality) -> usize {
        self.matches.iter().filter(|m| m.quality == quality).count()
    }
}

/// Qualitative grade band of a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl GradeLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            GradeLevel::Excellent
        } else if score >= 75.0 {
            GradeLevel::Good
        } else if score >= 60.0 {
            GradeLevel::Fair
        } else {
            GradeLevel::NeedsImprovement
        }
    }
}

/// Feedback for one claim of the analysis, in the order the candidate wrote them.
///
/// Every field is a primitive or a string, so a list of these encodes as a list of flat
/// JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugFeedback {
    pub line_number: u32,
    pub claim: String,
    pub is_correct: bool,
    /// Quality tier when the claim was matched; `None` for false positives.
    pub quality: Option<MatchQuality>,
    pub message: String,
}

/// The final, serializable result of grading one submission.
///
/// The engine never persists it; callers store it as they see fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingOutcome {
    pub bugs_found: usize,
    pub bugs_missed: usize,
    pub false_positives: usize,
    /// Unweighted share of real bugs found, 0-100.
    pub accuracy_rate: f64,
    /// Quality-weighted score after penalties, 0-100.
    pub score: f64,
    /// One flat record per claim; see [`BugFeedback`].
    pub per_bug_feedback: Vec<BugFeedback>,
    pub narrative_feedback: String,
    pub grade_level: GradeLevel,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub learning_insights: Vec<String>,
    pub perfect_matches: usize,
    pub good_matches: usize,
    pub partial_matches: usize,
    pub poor_matches: usize,
    pub false_positive_penalty: u32,
    pub trick_challenge: bool,
    pub lines_analyzed: usize,
    /// At least one claim cited a line.
    pub has_line_references: bool,
    /// Mean words per claim, one decimal.
    pub average_detail_level: f64,
    /// `deterministic`, or the name of the strategy that produced the outcome.
    pub evaluation_method: String,
}
