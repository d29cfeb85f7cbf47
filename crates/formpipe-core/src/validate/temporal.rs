// crates/formpipe-core/src/validate/temporal.rs
// ============================================================================
// Module: Date Validator
// Description: Calendar date validation with restriction windows.
// Purpose: Enforce `YYYY-MM-DD` shape and past/future/range restrictions.
// Dependencies: time, crate::core::field, crate::validate
// ============================================================================

//! ## Overview
//! Date answers are compared as calendar dates, never as timestamps, so the
//! submitter's wall clock and the processing host's clock cannot disagree by
//! more than the caller-supplied `today`. Range bounds come from the field
//! schema; a bound that fails to parse is a schema defect, surfaced as
//! [`SchemaOutcome::BadConstraint`] rather than blamed on the submitter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;
use time::Month;

use crate::core::field::DateRestriction;
use crate::pipeline::errors::ValidationReason;
use crate::validate::SchemaOutcome;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a date answer against the field's restriction.
///
/// # Errors
///
/// Returns [`SchemaOutcome::Reason`] with [`ValidationReason::InvalidFormat`]
/// for unparseable answers, [`ValidationReason::OutOfRange`] for answers
/// outside the restriction window, and [`SchemaOutcome::BadConstraint`] when
/// a schema-supplied range bound is itself unparseable.
pub(crate) fn validate_date(
    answer: &str,
    restriction: &DateRestriction,
    today: Date,
) -> Result<(), SchemaOutcome> {
    let Some(date) = parse_iso_date(answer) else {
        return Err(SchemaOutcome::Reason(ValidationReason::InvalidFormat));
    };

    match restriction {
        DateRestriction::Unrestricted => Ok(()),
        DateRestriction::NoPast => {
            if date < today {
                Err(SchemaOutcome::Reason(ValidationReason::OutOfRange))
            } else {
                Ok(())
            }
        }
        DateRestriction::NoFuture => {
            if date > today {
                Err(SchemaOutcome::Reason(ValidationReason::OutOfRange))
            } else {
                Ok(())
            }
        }
        DateRestriction::Range {
            from,
            to,
        } => {
            if let Some(from) = from.as_deref() {
                let Some(lower) = parse_iso_date(from) else {
                    return Err(SchemaOutcome::BadConstraint);
                };
                if date < lower {
                    return Err(SchemaOutcome::Reason(ValidationReason::OutOfRange));
                }
            }
            if let Some(to) = to.as_deref() {
                let Some(upper) = parse_iso_date(to) else {
                    return Err(SchemaOutcome::BadConstraint);
                };
                if date > upper {
                    return Err(SchemaOutcome::Reason(ValidationReason::OutOfRange));
                }
            }
            Ok(())
        }
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Each component must be fixed-width and numeric; `time` rejects impossible
/// calendar dates such as February 30th.
pub(crate) fn parse_iso_date(value: &str) -> Option<Date> {
    let mut parts = value.split('-');
    let year_part = parts.next()?;
    let month_part = parts.next()?;
    let day_part = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if year_part.len() != 4 || month_part.len() != 2 || day_part.len() != 2 {
        return None;
    }

    let year: i32 = year_part.parse().ok()?;
    let month_number: u8 = month_part.parse().ok()?;
    let day: u8 = day_part.parse().ok()?;
    let month = Month::try_from(month_number).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses a date the tests rely on, failing the test if it is invalid.
    fn day(value: &str) -> Result<Date, Box<dyn std::error::Error>> {
        parse_iso_date(value).ok_or_else(|| "unparseable test date".into())
    }

    /// Checks that an outcome matches the expected value.
    fn check(
        actual: Result<(), SchemaOutcome>,
        expected: Result<(), SchemaOutcome>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if actual == expected {
            Ok(())
        } else {
            Err(format!("expected {expected:?}, got {actual:?}").into())
        }
    }

    #[test]
    fn strict_iso_shape() -> Result<(), Box<dyn std::error::Error>> {
        if parse_iso_date("2026-08-30").is_none() {
            return Err("canonical date rejected".into());
        }
        for bad in ["2026-2-03", "2026-02-30", "2026-02-03T00:00", "26-02-03"] {
            if parse_iso_date(bad).is_some() {
                return Err(format!("accepted malformed date {bad}").into());
            }
        }
        Ok(())
    }

    #[test]
    fn no_past_and_no_future() -> Result<(), Box<dyn std::error::Error>> {
        let today = day("2026-08-30")?;
        check(validate_date("2026-08-30", &DateRestriction::NoPast, today), Ok(()))?;
        check(
            validate_date("2026-08-29", &DateRestriction::NoPast, today),
            Err(SchemaOutcome::Reason(ValidationReason::OutOfRange)),
        )?;
        check(validate_date("2026-08-30", &DateRestriction::NoFuture, today), Ok(()))?;
        check(
            validate_date("2026-08-31", &DateRestriction::NoFuture, today),
            Err(SchemaOutcome::Reason(ValidationReason::OutOfRange)),
        )
    }

    #[test]
    fn range_bounds_inclusive() -> Result<(), Box<dyn std::error::Error>> {
        let today = day("2026-08-30")?;
        let restriction = DateRestriction::Range {
            from: Some("2026-01-01".to_string()),
            to: Some("2026-12-31".to_string()),
        };
        check(validate_date("2026-01-01", &restriction, today), Ok(()))?;
        check(validate_date("2026-12-31", &restriction, today), Ok(()))?;
        check(
            validate_date("2025-12-31", &restriction, today),
            Err(SchemaOutcome::Reason(ValidationReason::OutOfRange)),
        )
    }

    #[test]
    fn malformed_bound_is_a_schema_defect() -> Result<(), Box<dyn std::error::Error>> {
        let today = day("2026-08-30")?;
        let restriction = DateRestriction::Range {
            from: Some("not-a-date".to_string()),
            to: None,
        };
        check(validate_date("2026-08-30", &restriction, today), Err(SchemaOutcome::BadConstraint))
    }
}
