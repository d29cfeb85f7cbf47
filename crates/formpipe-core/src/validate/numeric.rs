// crates/formpipe-core/src/validate/numeric.rs
// ============================================================================
// Module: Decimal and Rating Validators
// Description: Decimal-aware range validation and rating step checks.
// Purpose: Validate decimal answers exactly and rating answers by step count.
// Dependencies: bigdecimal, crate::pipeline::errors, crate::validate
// ============================================================================

//! ## Overview
//! Decimal answers are compared through `BigDecimal` so range checks are
//! exact regardless of magnitude or scale; floating-point rounding never
//! decides a submission. Schema bounds are decimal strings parsed the same
//! way, and an unparseable bound is reported as a bad constraint rather
//! than a bad answer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::Zero;

use crate::pipeline::errors::ValidationReason;
use crate::validate::SchemaOutcome;

// ============================================================================
// SECTION: Decimal Validation
// ============================================================================

/// Validates a decimal answer against its range constraints.
///
/// # Errors
///
/// Returns [`SchemaOutcome::Reason`] for invalid or out-of-range answers
/// and [`SchemaOutcome::BadConstraint`] for unparseable schema bounds.
pub(crate) fn validate_decimal(
    answer: &str,
    minimum: Option<&str>,
    maximum: Option<&str>,
    allow_negative: bool,
) -> Result<(), SchemaOutcome> {
    let Ok(value) = BigDecimal::from_str(answer) else {
        return Err(SchemaOutcome::Reason(ValidationReason::InvalidFormat));
    };
    if !allow_negative && value < BigDecimal::zero() {
        return Err(SchemaOutcome::Reason(ValidationReason::OutOfRange));
    }

    if let Some(minimum) = minimum {
        let Ok(bound) = BigDecimal::from_str(minimum) else {
            return Err(SchemaOutcome::BadConstraint);
        };
        if value < bound {
            return Err(SchemaOutcome::Reason(ValidationReason::OutOfRange));
        }
    }
    if let Some(maximum) = maximum {
        let Ok(bound) = BigDecimal::from_str(maximum) else {
            return Err(SchemaOutcome::BadConstraint);
        };
        if value > bound {
            return Err(SchemaOutcome::Reason(ValidationReason::OutOfRange));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Rating Validation
// ============================================================================

/// Maximum supported rating steps.
const MAX_RATING_STEPS: u8 = 10;

/// Validates a rating answer as an integer within `1..=steps`.
///
/// # Errors
///
/// Returns [`ValidationReason::InvalidFormat`] for non-integer answers and
/// [`ValidationReason::OutOfRange`] for values outside the step range.
pub fn validate_rating(answer: &str, steps: u8) -> Result<(), ValidationReason> {
    let Ok(value) = answer.parse::<u8>() else {
        return Err(ValidationReason::InvalidFormat);
    };
    let steps = steps.min(MAX_RATING_STEPS);
    if (1 ..= steps).contains(&value) {
        Ok(())
    } else {
        Err(ValidationReason::OutOfRange)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
