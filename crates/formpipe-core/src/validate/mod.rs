// crates/formpipe-core/src/validate/mod.rs
// ============================================================================
// Module: Field Validation Dispatch
// Description: Polymorphic per-field-type validation of processed responses.
// Purpose: Route each response to its type validator under a common gate.
// Dependencies: crate::core, crate::pipeline, submodules
// ============================================================================

//! ## Overview
//! Validation runs under a common visibility gate before any type-specific
//! rule: a hidden field must be blank regardless of its schema (a hidden
//! field is never required, and a hidden field with an answer is rejected),
//! a visible required field must be non-blank, and a visible optional blank
//! field passes untouched. Only then does dispatch select the validator for
//! the declared type, requiring the schema's constraint bag to match; a
//! mismatch is a processing failure because the form itself is malformed,
//! not the answer.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod attachment;
pub mod choice;
pub mod contact;
pub mod numeric;
pub mod signature;
pub mod table;
pub mod temporal;
pub mod text;

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::field::FieldConstraints;
use crate::core::field::FieldSchema;
use crate::core::field::FieldType;
use crate::core::identifiers::FormId;
use crate::core::response::ProcessedResponse;
use crate::core::response::ResponseBody;
use crate::pipeline::ProcessingContext;
use crate::pipeline::errors::FieldValidationError;
use crate::pipeline::errors::ProcessingError;
use crate::pipeline::errors::SubmissionError;
use crate::pipeline::errors::ValidationReason;

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Validates one processed response against its field schema.
///
/// # Errors
///
/// Returns [`SubmissionError::FieldValidation`] when the value fails its
/// type rules, and [`SubmissionError::Processing`] when the schema's
/// constraint bag does not match its type or the signature key is missing.
pub fn validate_field(
    form_id: &FormId,
    schema: &FieldSchema,
    response: &ProcessedResponse,
    ctx: &ProcessingContext,
) -> Result<(), SubmissionError> {
    let blank = response.body.is_blank();

    if !response.visible {
        if blank {
            return Ok(());
        }
        return Err(fail(schema, ValidationReason::HiddenButAnswered));
    }
    if blank {
        if schema.required {
            return Err(fail(schema, ValidationReason::Required));
        }
        return Ok(());
    }
    if schema.field_type.is_display_only() {
        return Err(fail(schema, ValidationReason::NotAnswerable));
    }

    dispatch(form_id, schema, response, ctx)
}

/// Routes a non-blank visible response to its type validator.
fn dispatch(
    form_id: &FormId,
    schema: &FieldSchema,
    response: &ProcessedResponse,
    ctx: &ProcessingContext,
) -> Result<(), SubmissionError> {
    match (schema.field_type, &schema.constraints) {
        (
            FieldType::ShortText | FieldType::LongText,
            FieldConstraints::Text {
                selected,
            },
        ) => {
            let answer = plain_answer(schema, response)?;
            text::validate_text(answer, *selected).map_err(|reason| fail(schema, reason))
        }
        (
            FieldType::Number,
            FieldConstraints::Number {
                selected,
            },
        ) => {
            let answer = plain_answer(schema, response)?;
            text::validate_number(answer, *selected).map_err(|reason| fail(schema, reason))
        }
        (
            FieldType::Decimal,
            FieldConstraints::Decimal {
                minimum,
                maximum,
                allow_negative,
            },
        ) => {
            let answer = plain_answer(schema, response)?;
            numeric::validate_decimal(
                answer,
                minimum.as_deref(),
                maximum.as_deref(),
                *allow_negative,
            )
            .map_err(|outcome| map_schema_outcome(schema, outcome))
        }
        (
            FieldType::Email,
            FieldConstraints::Email {
                allowed_domains,
            },
        ) => {
            let answer = verifiable_answer(form_id, schema, response, ctx)?;
            contact::validate_email(answer, allowed_domains)
                .map_err(|reason| fail(schema, reason))
        }
        (
            FieldType::Mobile,
            FieldConstraints::Mobile {
                allow_international,
            },
        ) => {
            let answer = verifiable_answer(form_id, schema, response, ctx)?;
            contact::validate_mobile(answer, *allow_international)
                .map_err(|reason| fail(schema, reason))
        }
        (FieldType::HomeNo, FieldConstraints::None) => {
            let answer = plain_answer(schema, response)?;
            contact::validate_home_number(answer).map_err(|reason| fail(schema, reason))
        }
        (FieldType::YesNo, FieldConstraints::None) => {
            let answer = plain_answer(schema, response)?;
            choice::validate_yes_no(answer).map_err(|reason| fail(schema, reason))
        }
        (
            FieldType::Dropdown,
            FieldConstraints::Options {
                options,
                ..
            },
        ) => {
            let answer = plain_answer(schema, response)?;
            choice::validate_dropdown(answer, options).map_err(|reason| fail(schema, reason))
        }
        (
            FieldType::Radio,
            FieldConstraints::Options {
                options,
                others_option,
            },
        ) => {
            let answer = plain_answer(schema, response)?;
            choice::validate_radio(answer, options, *others_option)
                .map_err(|reason| fail(schema, reason))
        }
        (
            FieldType::Checkbox,
            FieldConstraints::Checkbox {
                options,
                others_option,
                min_selected,
                max_selected,
            },
        ) => match &response.body {
            ResponseBody::Checkbox {
                options: selected,
                others,
            } => choice::validate_checkbox(
                selected,
                others.as_deref(),
                options,
                *others_option,
                *min_selected,
                *max_selected,
            )
            .map_err(|reason| fail(schema, reason)),
            _ => Err(fail(schema, ValidationReason::WrongShape)),
        },
        (
            FieldType::Rating,
            FieldConstraints::Rating {
                steps,
            },
        ) => {
            let answer = plain_answer(schema, response)?;
            numeric::validate_rating(answer, *steps).map_err(|reason| fail(schema, reason))
        }
        (
            FieldType::Date,
            FieldConstraints::Date {
                restriction,
            },
        ) => {
            let answer = plain_answer(schema, response)?;
            temporal::validate_date(answer, restriction, ctx.today)
                .map_err(|outcome| map_schema_outcome(schema, outcome))
        }
        (FieldType::Nric, FieldConstraints::None) => {
            let answer = plain_answer(schema, response)?;
            contact::validate_nric(answer).map_err(|reason| fail(schema, reason))
        }
        (FieldType::Uen, FieldConstraints::None) => {
            let answer = plain_answer(schema, response)?;
            contact::validate_uen(answer).map_err(|reason| fail(schema, reason))
        }
        (
            FieldType::Table,
            FieldConstraints::Table {
                columns,
                min_rows,
                max_rows,
            },
        ) => match &response.body {
            ResponseBody::Table {
                rows,
            } => table::validate_table(rows, columns, *min_rows, *max_rows)
                .map_err(|reason| fail(schema, reason)),
            _ => Err(fail(schema, ValidationReason::WrongShape)),
        },
        (
            FieldType::Attachment,
            FieldConstraints::Attachment {
                max_bytes,
            },
        ) => match &response.body {
            ResponseBody::Attachment {
                filename,
                size_bytes,
            } => attachment::validate_attachment(filename, *size_bytes, *max_bytes)
                .map_err(|reason| fail(schema, reason)),
            _ => Err(fail(schema, ValidationReason::WrongShape)),
        },
        _ => Err(ProcessingError::ConstraintMismatch {
            field_id: schema.field_id.clone(),
        }
        .into()),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validator outcome that can also signal a malformed schema constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchemaOutcome {
    /// The answer failed validation.
    Reason(ValidationReason),
    /// A schema constraint (e.g. a date bound) could not be interpreted.
    BadConstraint,
}

/// Builds a field validation failure for the schema's field.
fn fail(schema: &FieldSchema, reason: ValidationReason) -> SubmissionError {
    FieldValidationError {
        field_id: schema.field_id.clone(),
        reason,
    }
    .into()
}

/// Maps a schema-aware validator outcome onto the failure taxonomy.
fn map_schema_outcome(schema: &FieldSchema, outcome: SchemaOutcome) -> SubmissionError {
    match outcome {
        SchemaOutcome::Reason(reason) => fail(schema, reason),
        SchemaOutcome::BadConstraint => ProcessingError::ConstraintMismatch {
            field_id: schema.field_id.clone(),
        }
        .into(),
    }
}

/// Extracts a plain answer body, rejecting other shapes.
fn plain_answer<'response>(
    schema: &FieldSchema,
    response: &'response ProcessedResponse,
) -> Result<&'response str, SubmissionError> {
    match &response.body {
        ResponseBody::Answer {
            answer,
        } => Ok(answer.trim()),
        _ => Err(fail(schema, ValidationReason::WrongShape)),
    }
}

/// Extracts the answer from a possibly-verified body, verifying the
/// signature when the schema requires one.
fn verifiable_answer<'response>(
    form_id: &FormId,
    schema: &FieldSchema,
    response: &'response ProcessedResponse,
    ctx: &ProcessingContext,
) -> Result<&'response str, SubmissionError> {
    if !schema.is_verifiable() {
        return plain_answer(schema, response);
    }

    match &response.body {
        ResponseBody::Verified {
            answer,
            signature,
        } => {
            let Some(params) = &ctx.verification else {
                return Err(ProcessingError::MissingSignatureKey.into());
            };
            signature::verify(
                params,
                form_id,
                &schema.field_id,
                answer.trim(),
                signature,
                ctx.now_unix,
            )
            .map_err(|reason| fail(schema, reason))?;
            Ok(answer.trim())
        }
        ResponseBody::Answer {
            ..
        } => Err(fail(schema, ValidationReason::SignatureMissing)),
        _ => Err(fail(schema, ValidationReason::WrongShape)),
    }
}
