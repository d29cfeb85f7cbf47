// crates/formpipe-core/src/validate/choice.rs
// ============================================================================
// Module: Choice Validators
// Description: Option-membership validation for select-style fields.
// Purpose: Validate yes/no, dropdown, radio, and checkbox answers.
// Dependencies: crate::pipeline::errors
// ============================================================================

//! ## Overview
//! Choice validators enforce membership in the declared option lists. Radio
//! and checkbox fields may offer a free-text "Others" choice; the radio
//! convention encodes it as an `Others: <text>` answer, while the checkbox
//! body carries it structurally. "Others" selections count toward checkbox
//! selection bounds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::pipeline::errors::ValidationReason;

// ============================================================================
// SECTION: Yes/No
// ============================================================================

/// Validates a yes/no answer as the literal `Yes` or `No`.
///
/// # Errors
///
/// Returns [`ValidationReason::NotAnOption`] for any other answer.
pub fn validate_yes_no(answer: &str) -> Result<(), ValidationReason> {
    if answer == "Yes" || answer == "No" {
        Ok(())
    } else {
        Err(ValidationReason::NotAnOption)
    }
}

// ============================================================================
// SECTION: Dropdown
// ============================================================================

/// Validates a dropdown answer as one of the declared options.
///
/// # Errors
///
/// Returns [`ValidationReason::NotAnOption`] when the answer is not listed.
pub fn validate_dropdown(answer: &str, options: &[String]) -> Result<(), ValidationReason> {
    if options.iter().any(|option| option == answer) {
        Ok(())
    } else {
        Err(ValidationReason::NotAnOption)
    }
}

// ============================================================================
// SECTION: Radio
// ============================================================================

/// Prefix carried by radio "Others" answers.
const OTHERS_PREFIX: &str = "Others: ";

/// Validates a radio answer as a declared option or an "Others" entry.
///
/// # Errors
///
/// Returns [`ValidationReason::NotAnOption`] for unlisted answers and
/// [`ValidationReason::InvalidFormat`] for an empty "Others" text.
pub fn validate_radio(
    answer: &str,
    options: &[String],
    others_option: bool,
) -> Result<(), ValidationReason> {
    if options.iter().any(|option| option == answer) {
        return Ok(());
    }
    if let Some(text) = answer.strip_prefix(OTHERS_PREFIX) {
        if !others_option {
            return Err(ValidationReason::NotAnOption);
        }
        if text.trim().is_empty() {
            return Err(ValidationReason::InvalidFormat);
        }
        return Ok(());
    }
    Err(ValidationReason::NotAnOption)
}

// ============================================================================
// SECTION: Checkbox
// ============================================================================

/// Validates a checkbox selection against its declared options and bounds.
///
/// The others text counts as one selection toward the bounds.
///
/// # Errors
///
/// Returns [`ValidationReason::NotAnOption`] for unlisted selections or a
/// disallowed others entry, [`ValidationReason::DuplicateOption`] for
/// repeated selections, [`ValidationReason::InvalidFormat`] for empty
/// others text, and [`ValidationReason::SelectionCount`] when the number of
/// selections falls outside the bounds.
pub fn validate_checkbox(
    selected: &[String],
    others: Option<&str>,
    options: &[String],
    others_option: bool,
    min_selected: Option<usize>,
    max_selected: Option<usize>,
) -> Result<(), ValidationReason> {
    let declared: BTreeSet<&str> = options.iter().map(String::as_str).collect();

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for selection in selected {
        if !declared.contains(selection.as_str()) {
            return Err(ValidationReason::NotAnOption);
        }
        if !seen.insert(selection.as_str()) {
            return Err(ValidationReason::DuplicateOption);
        }
    }

    let mut count = selected.len();
    if let Some(text) = others {
        if !others_option {
            return Err(ValidationReason::NotAnOption);
        }
        if text.trim().is_empty() {
            return Err(ValidationReason::InvalidFormat);
        }
        count += 1;
    }

    if let Some(minimum) = min_selected
        && count < minimum
    {
        return Err(ValidationReason::SelectionCount);
    }
    if let Some(maximum) = max_selected
        && count > maximum
    {
        return Err(ValidationReason::SelectionCount);
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
