// crates/formpipe-core/src/pipeline/errors.rs
// ============================================================================
// Module: Submission Failure Taxonomy
// Description: Typed failures returned by the submission pipeline.
// Purpose: Let callers map each taxonomy member to a distinct response code.
// Dependencies: crate::core::identifiers, thiserror
// ============================================================================

//! ## Overview
//! All pipeline failures are values, never panics. The taxonomy has three
//! members: processing failures (structural problems with the submission or
//! form), conflict failures (the submitted field set diverges from the
//! form's declared set, modeling a race on the form definition), and field
//! validation failures (one specific field's value failed its type's
//! rules, carrying the field identifier and a stable reason).

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::FieldId;

// ============================================================================
// SECTION: Processing Failures
// ============================================================================

/// Structural failure while processing a submission.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    /// The form declares no fields at all.
    #[error("form has no fields")]
    NoFields,
    /// A response references a field the form does not declare.
    #[error("response references unknown field `{field_id}`")]
    UnknownResponseField {
        /// Offending response field identifier.
        field_id: FieldId,
    },
    /// A prevent-submit logic unit fired; the client should have blocked
    /// this submission already.
    #[error("submission prevented by form logic: {message}")]
    PreventedByLogic {
        /// Author-provided prevent message.
        message: String,
    },
    /// A field's constraint bag does not match its declared type.
    #[error("field `{field_id}` constraints do not match its declared type")]
    ConstraintMismatch {
        /// Offending field identifier.
        field_id: FieldId,
    },
    /// Verifiable answered fields are present but no signature key was
    /// configured.
    #[error("verifiable fields present but no signature key configured")]
    MissingSignatureKey,
    /// A pipeline input limit was exceeded.
    #[error("{what} limit exceeded: {actual} (max {max})")]
    LimitExceeded {
        /// Limited quantity description.
        what: &'static str,
        /// Maximum allowed value.
        max: usize,
        /// Actual observed value.
        actual: usize,
    },
}

// ============================================================================
// SECTION: Conflict Failures
// ============================================================================

/// Submission state conflicts with the persisted form state.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    /// The submitted field set does not cover the form's declared set,
    /// typically because the form changed between render and submit.
    #[error("submitted field set does not match the form: expected {expected} fields, got {actual}")]
    FieldSetMismatch {
        /// Number of fields the form declares under its mode filter.
        expected: usize,
        /// Number of matching responses submitted.
        actual: usize,
    },
}

// ============================================================================
// SECTION: Field Validation Failures
// ============================================================================

/// Stable reason a field's value failed validation.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationReason {
    /// A visible required field was left empty.
    #[error("a required field was left empty")]
    Required,
    /// A logic-hidden field carried a value.
    #[error("a hidden field carried an answer")]
    HiddenButAnswered,
    /// The answer's format is invalid for the field type.
    #[error("answer format is invalid")]
    InvalidFormat,
    /// The answer is outside the allowed range or length bounds.
    #[error("answer is out of the allowed range")]
    OutOfRange,
    /// The answer is not one of the declared options.
    #[error("answer is not one of the declared options")]
    NotAnOption,
    /// The answer selects the same option more than once.
    #[error("answer selects the same option more than once")]
    DuplicateOption,
    /// The number of selections is outside the allowed bounds.
    #[error("number of selections is outside the allowed bounds")]
    SelectionCount,
    /// The number of table rows is outside the allowed bounds.
    #[error("row count is outside the allowed bounds")]
    RowCount,
    /// A table row does not match the declared columns.
    #[error("row shape does not match the declared columns")]
    RowShape,
    /// The field type never accepts an answer.
    #[error("answer must be empty for this field type")]
    NotAnswerable,
    /// The attachment exceeds the allowed size.
    #[error("attachment is larger than allowed")]
    TooLarge,
    /// The body shape does not match the field type.
    #[error("answer shape does not match the field type")]
    WrongShape,
    /// A verifiable answer carries no signature.
    #[error("verified answer signature is missing")]
    SignatureMissing,
    /// The verification signature failed to verify.
    #[error("verified answer signature is invalid")]
    SignatureInvalid,
    /// The verification signature is older than the allowed window.
    #[error("verified answer signature has expired")]
    SignatureExpired,
}

/// Validation failure for one specific field.
///
/// # Invariants
/// - `field_id` names the offending response's field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for field `{field_id}`: {reason}")]
pub struct FieldValidationError {
    /// Offending field identifier.
    pub field_id: FieldId,
    /// Stable failure reason.
    pub reason: ValidationReason,
}

// ============================================================================
// SECTION: Submission Error
// ============================================================================

/// Tagged union of every pipeline failure.
///
/// # Invariants
/// - Members are stable so callers can map each to a distinct response code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Structural processing failure.
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    /// Form-state conflict failure.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    /// Per-field validation failure.
    #[error(transparent)]
    FieldValidation(#[from] FieldValidationError),
}
