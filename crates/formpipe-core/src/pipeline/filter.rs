// crates/formpipe-core/src/pipeline/filter.rs
// ============================================================================
// Module: Response Filter
// Description: Phase one of the pipeline: filter and reconcile raw responses.
// Purpose: Enforce limits, drop mode-excluded responses, reject unknown
//          fields, and require the field set to match the form.
// Dependencies: crate::core, crate::pipeline::errors
// ============================================================================

//! ## Overview
//! The filter phase reconciles the submitted responses against the form's
//! declared fields under the form's response mode. Encrypt mode keeps only
//! the verifiable plaintext subset (email and mobile fields); everything
//! else arrives as ciphertext elsewhere, so responses for mode-excluded
//! declared fields are silently dropped. A response naming a field the form
//! does not declare at all is rejected. After deduplication, the kept set
//! must cover the mode-filtered declared set exactly, otherwise the form
//! changed between render and submit and the submission conflicts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::core::form::FormDefinition;
use crate::core::identifiers::FieldId;
use crate::core::response::RawResponse;
use crate::pipeline::PipelineLimits;
use crate::pipeline::errors::ConflictError;
use crate::pipeline::errors::ProcessingError;
use crate::pipeline::errors::SubmissionError;

// ============================================================================
// SECTION: Filtering
// ============================================================================

/// Filters raw responses against the form's declared field set.
///
/// Returns the kept responses in submission order.
///
/// # Errors
///
/// Returns [`ProcessingError`] for an empty field list, exceeded limits, or
/// unknown response fields, and [`ConflictError`] when the kept set does not
/// cover the mode-filtered declared set.
pub fn filter_responses(
    form: &FormDefinition,
    responses: Vec<RawResponse>,
    limits: &PipelineLimits,
) -> Result<Vec<RawResponse>, SubmissionError> {
    if form.fields.is_empty() {
        return Err(ProcessingError::NoFields.into());
    }
    if responses.len() > limits.max_responses {
        return Err(ProcessingError::LimitExceeded {
            what: "response count",
            max: limits.max_responses,
            actual: responses.len(),
        }
        .into());
    }

    let declared: BTreeMap<&FieldId, bool> = form
        .fields
        .iter()
        .map(|field| (&field.field_id, form.mode_keeps(field.field_type)))
        .collect();

    let mut seen: BTreeSet<FieldId> = BTreeSet::new();
    let mut kept: Vec<RawResponse> = Vec::with_capacity(responses.len());

    for response in responses {
        let body_bytes = response.body.byte_len();
        if body_bytes > limits.max_answer_bytes {
            return Err(ProcessingError::LimitExceeded {
                what: "answer bytes",
                max: limits.max_answer_bytes,
                actual: body_bytes,
            }
            .into());
        }

        match declared.get(&response.field_id) {
            None => {
                return Err(ProcessingError::UnknownResponseField {
                    field_id: response.field_id,
                }
                .into());
            }
            // Declared but excluded by the response mode: ciphertext path.
            Some(false) => {}
            Some(true) => {
                // Duplicates keep the first occurrence.
                if seen.insert(response.field_id.clone()) {
                    kept.push(response);
                }
            }
        }
    }

    let expected = declared.values().filter(|mode_kept| **mode_kept).count();
    if kept.len() != expected {
        return Err(ConflictError::FieldSetMismatch {
            expected,
            actual: kept.len(),
        }
        .into());
    }

    Ok(kept)
}
