// crates/field-logic/src/lib.rs
// ============================================================================
// Module: Field Logic
// Description: Visibility-logic engine for form field conditions.
// Purpose: Evaluate show/hide and prevent-submit predicates over answers.
// Dependencies: serde, smallvec
// ============================================================================

//! ## Overview
//!
//! Field Logic is a standalone engine for the conditional logic attached to
//! form definitions. A form declares logic units; each unit carries a set of
//! conditions over field answers (all must hold) and a consequence: either
//! "show these fields" or "prevent submission entirely".
//!
//! The engine is generic over the field key type `K`, so callers can use
//! their own identifier newtypes. Answers are read through the
//! [`ResponseReader`] trait, which has blanket implementations for the
//! standard map types.
//!
//! Visibility is computed as a monotone fixpoint (see
//! [`visibility::visible_field_ids`]): fields targeted by no show unit are
//! visible by default, and satisfied show units add their targets until the
//! set stops growing. A condition over an unanswered or not-yet-visible
//! field never holds, so chained show logic resolves deterministically and
//! independently of unit order.
//!
//! Security posture: answers are untrusted end-user input; evaluation is
//! total and never panics.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod condition;
pub mod unit;
pub mod visibility;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use condition::AnswerValue;
pub use condition::CheckboxCombo;
pub use condition::Condition;
pub use condition::ConditionState;
pub use condition::ConditionValue;
pub use condition::ResponseReader;
pub use unit::LogicKind;
pub use unit::LogicUnit;
pub use visibility::preventing_unit;
pub use visibility::visible_field_ids;
