// crates/field-logic/tests/conditions.rs
// ============================================================================
// Module: Condition Evaluation Tests
// Description: Tests for condition states, answer shapes, and fail-closed rules.
// Purpose: Validate per-condition predicate behavior against answers.
// Dependencies: field_logic
// ============================================================================
//! ## Overview
//! Validates condition fulfillment across states, answer shapes, and edge
//! cases such as "Others" answers and unparseable numbers.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use field_logic::AnswerValue;
use field_logic::CheckboxCombo;
use field_logic::Condition;
use field_logic::ConditionState;
use field_logic::ConditionValue;

fn equal(value: &str) -> Condition<String> {
    Condition {
        field: "f1".to_string(),
        state: ConditionState::Equal,
        value: ConditionValue::Single {
            value: value.to_string(),
        },
    }
}

#[test]
fn equal_matches_exact_text() {
    let condition = equal("Approved");
    let answer = AnswerValue::text("Approved");
    assert!(condition.is_fulfilled(Some(&answer), true));
    let other = AnswerValue::text("Rejected");
    assert!(!condition.is_fulfilled(Some(&other), true));
}

#[test]
fn equal_trims_answer_before_comparing() {
    let condition = equal("Approved");
    let answer = AnswerValue::text("  Approved  ");
    assert!(condition.is_fulfilled(Some(&answer), true));
}

#[test]
fn missing_answer_never_fulfills() {
    let condition = equal("Approved");
    assert!(!condition.is_fulfilled(None, true));
}

#[test]
fn either_matches_any_listed_value() {
    let condition = Condition {
        field: "f1".to_string(),
        state: ConditionState::Either,
        value: ConditionValue::MultiSelect {
            values: vec!["Red".to_string(), "Blue".to_string()],
        },
    };
    assert!(condition.is_fulfilled(Some(&AnswerValue::text("Blue")), true));
    assert!(!condition.is_fulfilled(Some(&AnswerValue::text("Green")), true));
}

#[test]
fn either_honors_others_sentinel() {
    let condition = Condition {
        field: "f1".to_string(),
        state: ConditionState::Either,
        value: ConditionValue::MultiSelect {
            values: vec!["Red".to_string(), "Others".to_string()],
        },
    };
    let answer = AnswerValue::text("Others: custom choice");
    assert!(condition.is_fulfilled(Some(&answer), true));
}

#[test]
fn gte_and_lte_compare_numerically() {
    let gte = Condition {
        field: "f1".to_string(),
        state: ConditionState::Gte,
        value: ConditionValue::Number {
            value: 3,
        },
    };
    let lte = Condition {
        field: "f1".to_string(),
        state: ConditionState::Lte,
        value: ConditionValue::Number {
            value: 3,
        },
    };
    let three = AnswerValue::text("3");
    let four = AnswerValue::text("4");
    assert!(gte.is_fulfilled(Some(&three), true));
    assert!(gte.is_fulfilled(Some(&four), true));
    assert!(lte.is_fulfilled(Some(&three), true));
    assert!(!lte.is_fulfilled(Some(&four), true));
}

#[test]
fn unparseable_number_answer_never_fulfills() {
    let condition = Condition {
        field: "f1".to_string(),
        state: ConditionState::Gte,
        value: ConditionValue::Number {
            value: 1,
        },
    };
    let answer = AnswerValue::text("not a number");
    assert!(!condition.is_fulfilled(Some(&answer), true));
}

#[test]
fn checkbox_combo_matches_as_a_set() {
    let condition = Condition {
        field: "f1".to_string(),
        state: ConditionState::Equal,
        value: ConditionValue::CheckboxCombos {
            combos: vec![CheckboxCombo {
                options: vec!["A".to_string(), "B".to_string()],
                others: false,
            }],
        },
    };
    let reordered = AnswerValue::selection(vec!["B".to_string(), "A".to_string()], false);
    assert!(condition.is_fulfilled(Some(&reordered), true));

    let superset =
        AnswerValue::selection(vec!["A".to_string(), "B".to_string(), "C".to_string()], false);
    assert!(!condition.is_fulfilled(Some(&superset), true));
}

#[test]
fn checkbox_combo_requires_matching_others_flag() {
    let condition = Condition {
        field: "f1".to_string(),
        state: ConditionState::Equal,
        value: ConditionValue::CheckboxCombos {
            combos: vec![CheckboxCombo {
                options: vec!["A".to_string()],
                others: true,
            }],
        },
    };
    let without_others = AnswerValue::selection(vec!["A".to_string()], false);
    assert!(!condition.is_fulfilled(Some(&without_others), true));
    let with_others = AnswerValue::selection(vec!["A".to_string()], true);
    assert!(condition.is_fulfilled(Some(&with_others), true));
}

#[test]
fn checkbox_combo_accepts_any_listed_combination() {
    let condition = Condition {
        field: "f1".to_string(),
        state: ConditionState::Either,
        value: ConditionValue::CheckboxCombos {
            combos: vec![
                CheckboxCombo {
                    options: vec!["A".to_string()],
                    others: false,
                },
                CheckboxCombo {
                    options: vec!["B".to_string()],
                    others: false,
                },
            ],
        },
    };
    assert!(condition.is_fulfilled(Some(&AnswerValue::selection(vec!["B".to_string()], false)), true));
}

#[test]
fn shape_mismatch_never_fulfills() {
    let condition = equal("A");
    let selection = AnswerValue::selection(vec!["A".to_string()], false);
    assert!(!condition.is_fulfilled(Some(&selection), true));

    let combos = Condition {
        field: "f1".to_string(),
        state: ConditionState::Equal,
        value: ConditionValue::CheckboxCombos {
            combos: vec![CheckboxCombo {
                options: vec!["A".to_string()],
                others: false,
            }],
        },
    };
    assert!(!combos.is_fulfilled(Some(&AnswerValue::text("A")), true));
}

#[test]
fn condition_serde_round_trip_is_stable() {
    let condition = Condition {
        field: "f1".to_string(),
        state: ConditionState::Either,
        value: ConditionValue::MultiSelect {
            values: vec!["Red".to_string()],
        },
    };
    let encoded = serde_json::to_string(&condition).unwrap();
    let decoded: Condition<String> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(condition, decoded);
}
