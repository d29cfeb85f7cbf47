// crates/formpipe-core/src/lib.rs
// ============================================================================
// Module: Formpipe Core
// Description: Form definitions, responses, and the submission pipeline.
// Purpose: Turn raw field responses into validated, metadata-enriched sets.
// Dependencies: field-logic, serde, thiserror, bigdecimal, time, sha2
// ============================================================================

//! ## Overview
//!
//! Formpipe Core implements the submission response processing pipeline for
//! form definitions: given a form (ordered field schemas with types,
//! constraint bags, and visibility logic) and a set of raw submitted
//! responses, it produces either a validated, metadata-enriched
//! [`ProcessedSubmission`] ready for downstream storage or encryption, or a
//! typed [`SubmissionError`] explaining the rejection.
//!
//! Processing runs in four ordered phases, each of which may short-circuit:
//!
//! 1. **Filter**: discard mode-excluded responses, reject responses for
//!    undeclared fields, and require the submitted field set to match the
//!    form's declared set.
//! 2. **Visibility resolution**: run the [`field_logic`] solver over the
//!    filtered answers to compute the visible field set.
//! 3. **Consistency guard**: reject the submission when any
//!    prevent-submit unit fires; the client should have blocked it, so a
//!    hit here indicates tampering or divergent logic evaluation.
//! 4. **Per-field validation and metadata injection**: validate each
//!    response against its schema's type-specific rules and attach question
//!    text, visibility, and verification metadata.
//!
//! All failures are values in a three-member taxonomy (processing, conflict,
//! field validation) so callers can map each member to a distinct response
//! or exit code. The pipeline is deterministic: time enters only through
//! [`ProcessingContext`], and identical inputs yield identical outputs.
//!
//! Security posture: responses are untrusted end-user input; validation is
//! fail-closed and never panics.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod pipeline;
pub mod validate;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use self::core::field::ColumnKind;
pub use self::core::field::ColumnSchema;
pub use self::core::field::DateRestriction;
pub use self::core::field::FieldConstraints;
pub use self::core::field::FieldSchema;
pub use self::core::field::FieldType;
pub use self::core::field::LengthValidation;
pub use self::core::form::FormDefinition;
pub use self::core::form::ResponseMode;
pub use self::core::identifiers::FieldId;
pub use self::core::identifiers::FormId;
pub use self::core::response::ProcessedResponse;
pub use self::core::response::ProcessedSubmission;
pub use self::core::response::RawResponse;
pub use self::core::response::ResponseBody;
pub use pipeline::PipelineLimits;
pub use pipeline::ProcessingContext;
pub use pipeline::VerificationParams;
pub use pipeline::errors::ConflictError;
pub use pipeline::errors::FieldValidationError;
pub use pipeline::errors::ProcessingError;
pub use pipeline::errors::SubmissionError;
pub use pipeline::errors::ValidationReason;
pub use pipeline::process_submission;
