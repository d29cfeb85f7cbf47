// crates/formpipe-core/src/validate/text.rs
// ============================================================================
// Module: Text and Number Validators
// Description: Character-count and digit-count validation.
// Purpose: Enforce length constraints on text and whole-number answers.
// Dependencies: crate::core::field, crate::pipeline::errors
// ============================================================================

//! ## Overview
//! Text fields constrain the number of characters; number fields accept
//! digits only and constrain the number of digits. Lengths count Unicode
//! scalar values, not bytes, so multi-byte answers are measured the way the
//! respondent sees them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::field::LengthValidation;
use crate::pipeline::errors::ValidationReason;

// ============================================================================
// SECTION: Text Validation
// ============================================================================

/// Validates a short/long text answer against its length constraint.
///
/// # Errors
///
/// Returns [`ValidationReason::OutOfRange`] when the character count falls
/// outside the selected constraint.
pub fn validate_text(
    answer: &str,
    selected: Option<LengthValidation>,
) -> Result<(), ValidationReason> {
    check_length(answer.chars().count(), selected)
}

// ============================================================================
// SECTION: Number Validation
// ============================================================================

/// Validates a whole-number answer: digits only, digit count constrained.
///
/// # Errors
///
/// Returns [`ValidationReason::InvalidFormat`] for non-digit characters and
/// [`ValidationReason::OutOfRange`] for a digit count outside the selected
/// constraint.
pub fn validate_number(
    answer: &str,
    selected: Option<LengthValidation>,
) -> Result<(), ValidationReason> {
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationReason::InvalidFormat);
    }
    check_length(answer.len(), selected)
}

/// Applies a length constraint to an observed count.
fn check_length(
    count: usize,
    selected: Option<LengthValidation>,
) -> Result<(), ValidationReason> {
    let ok = match selected {
        None => true,
        Some(LengthValidation::Minimum {
            count: minimum,
        }) => count >= minimum,
        Some(LengthValidation::Maximum {
            count: maximum,
        }) => count <= maximum,
        Some(LengthValidation::Exact {
            count: exact,
        }) => count == exact,
    };
    if ok { Ok(()) } else { Err(ValidationReason::OutOfRange) }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
