use grader::feedback::auto_feedback::{CORRECT_MESSAGE, DUPLICATE_MESSAGE, NO_BUG_MESSAGE};
use grader::types::{BugCategory, BugRecord, GradeLevel, MatchQuality};
use grader::{GradingJob, grade_submission};

fn sentinel() -> Vec<BugRecord> {
    vec![BugRecord::sentinel("No bugs found - this code is correct")]
}

fn scenario_a_bugs() -> Vec<BugRecord> {
    vec![
        BugRecord::new(
            3,
            BugCategory::OffByOne,
            "Loop misses last element due to range(len(numbers)-1)",
        ),
        BugRecord::new(4, BugCategory::Logic, "Uses assignment instead of addition"),
    ]
}

const SCENARIO_A: &str = "Line 3: off by one in the loop range\nLine 4: assignment used instead of +=";

fn scenario_d_bugs() -> Vec<BugRecord> {
    vec![
        BugRecord::new(
            2,
            BugCategory::NullReference,
            "Function dereferences user before checking for None",
        ),
        BugRecord::new(5, BugCategory::OffByOne, "Loop upper bound skips the last index"),
        BugRecord::new(
            9,
            BugCategory::Security,
            "SQL query built with string formatting allows injection",
        ),
    ]
}

const SCENARIO_D: &str = "Line 9: SQL injection because the query is built with string formatting\n\
Line 14: variable naming is inconsistent\n\
The docstring has a spelling mistake";

#[test]
fn scenario_a_both_bugs_found() {
    let outcome = grade_submission(SCENARIO_A, &scenario_a_bugs()).unwrap();
    assert_eq!(outcome.bugs_found, 2);
    assert_eq!(outcome.bugs_missed, 0);
    assert_eq!(outcome.false_positives, 0);
    assert!(outcome.score >= 70.0);
    assert_eq!(outcome.score, 80.0);
    assert_eq!(outcome.accuracy_rate, 100.0);
    assert_eq!(outcome.good_matches, 2);
    assert_eq!(outcome.grade_level, GradeLevel::Good);
    assert!(outcome.has_line_references);
    assert_eq!(outcome.average_detail_level, 8.0);
    assert_eq!(
        outcome.narrative_feedback,
        "You found 2 out of 2 bugs correctly. Great job!"
    );
    assert!(outcome.per_bug_feedback.iter().all(|b| b.message == CORRECT_MESSAGE));
}

#[test]
fn scenario_b_trick_challenge_no_claims() {
    let outcome = grade_submission("", &sentinel()).unwrap();
    assert_eq!(outcome.score, 100.0);
    assert_eq!(outcome.false_positives, 0);
    assert!(outcome.trick_challenge);
    assert_eq!(outcome.bugs_found, 0);
    assert_eq!(outcome.bugs_missed, 0);
}

#[test]
fn scenario_c_trick_challenge_one_claim() {
    let outcome = grade_submission("Line 5: off by one error", &sentinel()).unwrap();
    assert_eq!(outcome.false_positives, 1);
    assert_eq!(outcome.score, 80.0);
    assert_eq!(outcome.per_bug_feedback[0].message, NO_BUG_MESSAGE);
    assert_eq!(
        outcome.narrative_feedback,
        "This was a trick challenge with no bugs. You reported 1 issue that doesn't exist."
    );
}

#[test]
fn scenario_d_one_found_two_unrelated() {
    let outcome = grade_submission(SCENARIO_D, &scenario_d_bugs()).unwrap();
    assert_eq!(outcome.bugs_found, 1);
    assert_eq!(outcome.bugs_missed, 2);
    assert_eq!(outcome.false_positives, 2);
    assert_eq!(outcome.accuracy_rate, 33.3);
    assert_eq!(outcome.false_positive_penalty, 20);
    assert_eq!(outcome.score, 20.0);
    assert_eq!(outcome.grade_level, GradeLevel::NeedsImprovement);
    assert_eq!(
        outcome.narrative_feedback,
        "You found 1 out of 3 bugs correctly. You missed 2 bugs; keep practicing to find them!"
    );
    assert_eq!(
        outcome.improvements,
        vec![
            "Missed 2 bugs - review the code more thoroughly",
            "Identified 2 non-existent bugs - be more careful",
        ]
    );

    let serialized = serde_json::to_string(&outcome).unwrap();
    assert!(!serialized.contains("dereferences user"));
    assert!(!serialized.contains("upper bound"));
}

#[test]
fn repeated_claim_is_flagged_as_duplicate() {
    let analysis = "Line 9: SQL injection because the query is built with string formatting\n\
Line 9: the query string formatting allows SQL injection";
    let outcome = grade_submission(analysis, &scenario_d_bugs()).unwrap();
    assert_eq!(outcome.bugs_found, 1);
    assert_eq!(outcome.false_positives, 1);
    assert_eq!(outcome.per_bug_feedback[1].message, DUPLICATE_MESSAGE);
    assert_eq!(outcome.score, 23.3);
}

#[test]
fn p1_sentinel_with_blank_analysis_scores_full() {
    for analysis in ["", "   ", "\n\n\t\n"] {
        let outcome = grade_submission(analysis, &sentinel()).unwrap();
        assert_eq!(outcome.score, 100.0);
        assert_eq!(outcome.false_positives, 0);
    }
}

#[test]
fn p2_sentinel_penalty_per_line() {
    for k in 0..8usize {
        let analysis = (0..k)
            .map(|i| format!("Line {}: suspicious code", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        let outcome = grade_submission(&analysis, &sentinel()).unwrap();
        assert_eq!(outcome.false_positives, k);
        let expected = 100.0_f64 - 20.0 * k as f64;
        assert_eq!(outcome.score, expected.max(0.0));
    }
}

#[test]
fn p3_identical_claim_is_perfect() {
    let text = "line7: division by zero when the list is empty";
    let bugs = vec![BugRecord::new(7, BugCategory::Runtime, text)];
    let outcome = grade_submission(text, &bugs).unwrap();
    assert_eq!(outcome.perfect_matches, 1);
    assert_eq!(outcome.per_bug_feedback[0].quality, Some(MatchQuality::Perfect));
    assert_eq!(outcome.score, 100.0);
}

#[test]
fn p3_restatement_without_category_keyword_is_perfect() {
    let text = "Line 5: the greeting prints the wrong name";
    let bugs = vec![BugRecord::new(5, BugCategory::Logic, text)];
    let outcome = grade_submission(text, &bugs).unwrap();
    assert_eq!(outcome.per_bug_feedback[0].quality, Some(MatchQuality::Perfect));
    assert_eq!(outcome.score, 100.0);
}

#[test]
fn p3_restatement_with_other_category_keyword_is_perfect() {
    let text = "Line 6: total uses the list index";
    let bugs = vec![BugRecord::new(6, BugCategory::Logic, text)];
    let outcome = grade_submission(text, &bugs).unwrap();
    assert_eq!(outcome.per_bug_feedback[0].quality, Some(MatchQuality::Perfect));
    assert_eq!(outcome.score, 100.0);
}

#[test]
fn p4_counts_balance() {
    let cases = [
        (SCENARIO_A, scenario_a_bugs()),
        (SCENARIO_D, scenario_d_bugs()),
        ("Line 9: sql injection\nLine 9: sql injection\nLine 9: sql injection", scenario_d_bugs()),
        ("", scenario_d_bugs()),
    ];
    for (analysis, bugs) in cases {
        let outcome = grade_submission(analysis, &bugs).unwrap();
        assert_eq!(outcome.bugs_found + outcome.bugs_missed, bugs.len());
        assert_eq!(outcome.bugs_found + outcome.false_positives, outcome.lines_analyzed);
        assert_eq!(outcome.per_bug_feedback.len(), outcome.lines_analyzed);
    }
}

#[test]
fn p5_unrelated_claim_never_helps() {
    let base = grade_submission(SCENARIO_A, &scenario_a_bugs()).unwrap();
    let mut analysis = SCENARIO_A.to_string();
    let mut previous = base;
    for extra in [
        "the docstring has a spelling mistake",
        "variable names are too short",
    ] {
        analysis.push('\n');
        analysis.push_str(extra);
        let outcome = grade_submission(&analysis, &scenario_a_bugs()).unwrap();
        assert!(outcome.accuracy_rate <= previous.accuracy_rate);
        assert!(outcome.false_positives >= previous.false_positives);
        assert!(outcome.score <= previous.score);
        previous = outcome;
    }
    assert_eq!(previous.false_positives, 2);
    assert_eq!(previous.score, 70.0);
}

#[test]
fn p6_grading_is_idempotent() {
    let first = grade_submission(SCENARIO_D, &scenario_d_bugs()).unwrap();
    let second = grade_submission(SCENARIO_D, &scenario_d_bugs()).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn ground_truth_from_generator_json() {
    let bugs: Vec<BugRecord> = serde_json::from_str(
        r#"[
            { "line_number": 3, "bug_type": "off_by_one",
              "description": "Loop misses last element due to range(len(numbers)-1)",
              "hint": "Check the loop bounds" },
            { "line_number": 4, "bug_type": "logic_error",
              "description": "Uses assignment instead of addition" }
        ]"#,
    )
    .unwrap();
    let outcome = GradingJob::new(SCENARIO_A, bugs).grade().unwrap();
    assert_eq!(outcome.bugs_found, 2);
}

#[test]
fn outcome_encodes_as_flat_records() {
    let outcome = grade_submission(SCENARIO_D, &scenario_d_bugs()).unwrap();
    let value = serde_json::to_value(&outcome).unwrap();
    let entries = value["per_bug_feedback"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    for entry in entries {
        for (_, field) in entry.as_object().unwrap() {
            assert!(!field.is_object() && !field.is_array());
        }
    }
    for list in ["strengths", "improvements", "learning_insights"] {
        assert!(value[list].as_array().unwrap().iter().all(|v| v.is_string()));
    }
}

#[test]
fn claims_without_line_references() {
    let outcome = grade_submission("the docstring has a spelling mistake", &scenario_d_bugs()).unwrap();
    assert!(!outcome.has_line_references);
    assert_eq!(outcome.average_detail_level, 6.0);
}

#[test]
fn non_ascii_analysis_does_not_fail() {
    let outcome = grade_submission("Línea 3: ✗ índice fuera de rango 🙃", &scenario_a_bugs()).unwrap();
    assert_eq!(outcome.lines_analyzed, 1);
}
