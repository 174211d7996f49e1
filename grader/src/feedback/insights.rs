//! Strengths, improvements and learning insights derived from a score card.

use crate::scorer::ScoreCard;

pub const LEARNING_INSIGHTS: [&str; 3] = [
    "Focus on systematic code review techniques",
    "Pay attention to common bug patterns",
    "Be specific about bug locations and causes",
];

pub(crate) fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

pub fn strengths(card: &ScoreCard) -> Vec<String> {
    let mut strengths = Vec::new();
    if card.perfect_matches > 0 {
        strengths.push("Identified bugs with precise accuracy and clear explanations".to_string());
    }
    if card.bugs_found > card.bugs_missed {
        strengths.push("Found majority of the bugs in the code".to_string());
    }
    if card.false_positives == 0 {
        strengths.push("Avoided false positive identifications".to_string());
    }
    if strengths.is_empty() {
        strengths.push("Attempted the analysis".to_string());
    }
    strengths
}

pub fn improvements(card: &ScoreCard) -> Vec<String> {
    let mut improvements = Vec::new();
    if card.bugs_missed > 0 {
        improvements.push(format!(
            "Missed {} - review the code more thoroughly",
            plural(card.bugs_missed, "bug", "bugs")
        ));
    }
    if card.false_positives > 0 {
        improvements.push(format!(
            "Identified {} - be more careful",
            plural(card.false_positives, "non-existent bug", "non-existent bugs")
        ));
    }
    if card.partial_matches > card.perfect_matches {
        improvements.push("Provide more specific and detailed bug descriptions".to_string());
    }
    if improvements.is_empty() {
        improvements.push("Keep practicing!".to_string());
    }
    improvements
}

pub fn learning_insights() -> Vec<String> {
    LEARNING_INSIGHTS.iter().map(|s| s.to_string()).collect()
}
