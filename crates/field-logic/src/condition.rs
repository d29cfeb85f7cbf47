// crates/field-logic/src/condition.rs
// ============================================================================
// Module: Logic Conditions
// Description: Condition predicates over submitted field answers.
// Purpose: Decide whether a single condition holds for a given answer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A condition references one field and compares its submitted answer
//! against an expected value. Conditions are independent predicates: they
//! carry no boolean connectives of their own, and a logic unit combines them
//! with AND semantics.
//!
//! Evaluation is fail-closed: a condition over an unanswered field, a hidden
//! field, or an answer of the wrong shape never holds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::hash::Hash;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Answer Values
// ============================================================================

/// The shape of a submitted answer as seen by the logic engine.
///
/// # Invariants
/// - `Text` carries the raw answer string; trimming happens at evaluation.
/// - `Selection` options preserve submission order; duplicates are the
///   submitter's problem and compared as a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Single free-text or single-select answer.
    Text {
        /// Raw answer string.
        answer: String,
    },
    /// Checkbox-style multi-select answer.
    Selection {
        /// Selected options.
        options: Vec<String>,
        /// Whether the "Others" option was selected.
        others: bool,
    },
}

impl AnswerValue {
    /// Creates a text answer.
    #[must_use]
    pub fn text(answer: impl Into<String>) -> Self {
        Self::Text {
            answer: answer.into(),
        }
    }

    /// Creates a selection answer.
    #[must_use]
    pub fn selection(options: Vec<String>, others: bool) -> Self {
        Self::Selection {
            options,
            others,
        }
    }

    /// Returns true when the answer is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text {
                answer,
            } => answer.trim().is_empty(),
            Self::Selection {
                options,
                others,
            } => options.is_empty() && !*others,
        }
    }
}

// ============================================================================
// SECTION: Response Reader
// ============================================================================

/// Read access to submitted answers, keyed by field identifier.
///
/// Implement this for your response collection so the engine can look up the
/// answer a condition refers to.
pub trait ResponseReader<K> {
    /// Returns the submitted answer for the given field, if any.
    fn answer(&self, field: &K) -> Option<&AnswerValue>;
}

impl<K: Ord> ResponseReader<K> for BTreeMap<K, AnswerValue> {
    fn answer(&self, field: &K) -> Option<&AnswerValue> {
        self.get(field)
    }
}

impl<K: Eq + Hash, S: BuildHasher> ResponseReader<K> for HashMap<K, AnswerValue, S> {
    fn answer(&self, field: &K) -> Option<&AnswerValue> {
        self.get(field)
    }
}

// ============================================================================
// SECTION: Condition Model
// ============================================================================

/// Comparison applied by a condition.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionState {
    /// Answer equals the expected value.
    Equal,
    /// Answer is one of the expected values.
    Either,
    /// Answer is numerically greater than or equal to the expected value.
    Gte,
    /// Answer is numerically less than or equal to the expected value.
    Lte,
}

/// One combination of checkbox options a condition accepts.
///
/// # Invariants
/// - `options` name declared options only; the "Others" choice is carried by
///   the `others` flag, never as an option string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxCombo {
    /// Declared options that must be selected, exactly.
    pub options: Vec<String>,
    /// Whether the "Others" option must be selected.
    pub others: bool,
}

/// Expected value a condition compares against.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionValue {
    /// Single expected answer string.
    Single {
        /// Expected answer.
        value: String,
    },
    /// Set of accepted answer strings.
    MultiSelect {
        /// Accepted answers.
        values: Vec<String>,
    },
    /// Numeric bound for ordering comparisons.
    Number {
        /// Expected numeric bound.
        value: i64,
    },
    /// Accepted checkbox selection combinations.
    CheckboxCombos {
        /// Accepted combinations; any match satisfies the condition.
        combos: Vec<CheckboxCombo>,
    },
}

/// Condition over a single field's submitted answer.
///
/// # Invariants
/// - `field` refers to a field declared by the owning form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition<K> {
    /// Field the condition reads.
    pub field: K,
    /// Comparison applied to the answer.
    pub state: ConditionState,
    /// Expected value.
    pub value: ConditionValue,
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Prefix used by radio-style "Others" answers.
const OTHERS_ANSWER_PREFIX: &str = "Others: ";

/// Sentinel condition value matching any "Others" answer.
const OTHERS_CONDITION_VALUE: &str = "Others";

impl<K> Condition<K> {
    /// Evaluates the condition against an answer and the visibility of the
    /// referenced field.
    ///
    /// Returns `false` when the field is hidden, unanswered, blank, or when
    /// the answer shape does not match the comparison.
    #[must_use]
    pub fn is_fulfilled(&self, answer: Option<&AnswerValue>, field_visible: bool) -> bool {
        if !field_visible {
            return false;
        }
        let Some(answer) = answer else {
            return false;
        };
        if answer.is_blank() {
            return false;
        }

        match answer {
            AnswerValue::Text {
                answer,
            } => self.fulfilled_by_text(answer.trim()),
            AnswerValue::Selection {
                options,
                others,
            } => self.fulfilled_by_selection(options, *others),
        }
    }

    /// Evaluates the condition against a trimmed text answer.
    fn fulfilled_by_text(&self, answer: &str) -> bool {
        match (&self.state, &self.value) {
            (
                ConditionState::Equal,
                ConditionValue::Single {
                    value,
                },
            ) => text_matches(answer, value),
            (
                ConditionState::Either,
                ConditionValue::MultiSelect {
                    values,
                },
            ) => values.iter().any(|value| text_matches(answer, value)),
            (
                ConditionState::Gte,
                ConditionValue::Number {
                    value,
                },
            ) => answer.parse::<i64>().is_ok_and(|parsed| parsed >= *value),
            (
                ConditionState::Lte,
                ConditionValue::Number {
                    value,
                },
            ) => answer.parse::<i64>().is_ok_and(|parsed| parsed <= *value),
            _ => false,
        }
    }

    /// Evaluates the condition against a checkbox selection.
    fn fulfilled_by_selection(&self, options: &[String], others: bool) -> bool {
        let ConditionValue::CheckboxCombos {
            combos,
        } = &self.value
        else {
            return false;
        };
        if !matches!(self.state, ConditionState::Equal | ConditionState::Either) {
            return false;
        }

        let selected: BTreeSet<&str> = options.iter().map(String::as_str).collect();
        combos.iter().any(|combo| {
            let expected: BTreeSet<&str> = combo.options.iter().map(String::as_str).collect();
            combo.others == others && expected == selected
        })
    }
}

/// Compares a text answer against a condition value, honoring the radio
/// "Others" convention: an answer of the form `Others: <text>` matches the
/// condition value `Others`.
fn text_matches(answer: &str, value: &str) -> bool {
    if answer == value {
        return true;
    }
    value == OTHERS_CONDITION_VALUE && answer.starts_with(OTHERS_ANSWER_PREFIX)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
