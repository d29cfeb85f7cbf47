// crates/field-logic/src/unit.rs
// ============================================================================
// Module: Logic Units
// Description: Condition groups with show-fields or prevent-submit effects.
// Purpose: Model a form's logic rules and their AND-combined satisfaction.
// Dependencies: crate::condition, serde, smallvec
// ============================================================================

//! ## Overview
//! A logic unit joins its conditions with AND semantics and carries one
//! consequence. Units are independent of each other; visibility targets are
//! unioned across satisfied show units by the solver.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

use crate::condition::Condition;
use crate::condition::ResponseReader;

// ============================================================================
// SECTION: Logic Unit Model
// ============================================================================

/// Consequence a satisfied logic unit applies.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogicKind<K> {
    /// Reveal the listed fields.
    ShowFields {
        /// Fields revealed when the unit is satisfied.
        fields: SmallVec<[K; 4]>,
    },
    /// Reject the whole submission.
    PreventSubmit {
        /// Author-provided message explaining the rejection.
        message: String,
    },
}

/// A logic rule: conditions joined by AND, plus a consequence.
///
/// # Invariants
/// - `conditions` is non-empty for authored forms; an empty condition list
///   is treated as never satisfied (fail closed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicUnit<K> {
    /// Conditions that must all hold.
    pub conditions: SmallVec<[Condition<K>; 2]>,
    /// Consequence applied when all conditions hold.
    pub kind: LogicKind<K>,
}

impl<K> LogicUnit<K> {
    /// Returns the show targets when this is a show-fields unit.
    #[must_use]
    pub fn show_targets(&self) -> Option<&[K]> {
        match &self.kind {
            LogicKind::ShowFields {
                fields,
            } => Some(fields),
            LogicKind::PreventSubmit {
                ..
            } => None,
        }
    }

    /// Returns the prevent-submit message when this is a prevent unit.
    #[must_use]
    pub fn prevent_message(&self) -> Option<&str> {
        match &self.kind {
            LogicKind::PreventSubmit {
                message,
            } => Some(message),
            LogicKind::ShowFields {
                ..
            } => None,
        }
    }

    /// Evaluates whether every condition of the unit holds.
    ///
    /// `is_visible` reports whether a condition's source field is currently
    /// visible; conditions over hidden fields never hold.
    #[must_use]
    pub fn is_satisfied<R, V>(&self, reader: &R, is_visible: V) -> bool
    where
        R: ResponseReader<K>,
        V: Fn(&K) -> bool,
    {
        if self.conditions.is_empty() {
            return false;
        }
        self.conditions.iter().all(|condition| {
            condition.is_fulfilled(reader.answer(&condition.field), is_visible(&condition.field))
        })
    }
}
