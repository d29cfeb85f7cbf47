// crates/formpipe-core/src/pipeline/mod.rs
// ============================================================================
// Module: Submission Pipeline
// Description: Four-phase processing of raw field responses.
// Purpose: Filter, resolve visibility, guard consistency, validate, enrich.
// Dependencies: crate::core, crate::validate, field-logic, time
// ============================================================================

//! ## Overview
//! [`process_submission`] is the pipeline entry point. It runs four ordered
//! phases, each of which may short-circuit with a typed failure:
//!
//! 1. Filter ([`filter::filter_responses`]).
//! 2. Visibility resolution ([`field_logic::visible_field_ids`]).
//! 3. Consistency guard ([`field_logic::preventing_unit`]); a hit means the
//!    submitted values contradict the form's own logic, which the client
//!    re-evaluates before submitting, so the server rejects outright.
//! 4. Per-field validation with metadata injection ([`crate::validate`]).
//!
//! The pipeline is pure: the processing day, wall-clock seconds, signature
//! key, and limits all enter through [`ProcessingContext`], so identical
//! inputs produce identical outputs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod errors;
pub mod filter;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use field_logic::AnswerValue;
use field_logic::preventing_unit;
use field_logic::visible_field_ids;
use time::Date;

use crate::core::form::FormDefinition;
use crate::core::form::ResponseMode;
use crate::core::identifiers::FieldId;
use crate::core::response::ProcessedResponse;
use crate::core::response::ProcessedSubmission;
use crate::core::response::RawResponse;
use crate::pipeline::errors::ProcessingError;
use crate::pipeline::errors::SubmissionError;
use crate::validate::validate_field;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum number of responses accepted per submission.
const DEFAULT_MAX_RESPONSES: usize = 512;
/// Default maximum byte length of a single response body.
const DEFAULT_MAX_ANSWER_BYTES: usize = 16_384;

/// Input ceilings enforced by the filter phase.
///
/// # Invariants
/// - Limits are non-zero; zero limits would reject every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineLimits {
    /// Maximum number of responses per submission.
    pub max_responses: usize,
    /// Maximum byte length of a single response body.
    pub max_answer_bytes: usize,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            max_responses: DEFAULT_MAX_RESPONSES,
            max_answer_bytes: DEFAULT_MAX_ANSWER_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Processing Context
// ============================================================================

/// Key material and freshness window for verified-field signatures.
///
/// # Invariants
/// - `key` is raw key bytes; hex decoding happens at the config boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationParams {
    /// Signing key bytes shared with the verification service.
    pub key: Vec<u8>,
    /// Maximum accepted signature age in seconds.
    pub max_age_secs: u64,
}

/// Ambient inputs the pipeline needs beyond the form and responses.
///
/// # Invariants
/// - `today` and `now_unix` describe the same instant; date restrictions
///   use `today`, signature freshness uses `now_unix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingContext {
    /// Processing day for date restrictions.
    pub today: Date,
    /// Processing instant as unix seconds, for signature freshness.
    pub now_unix: i64,
    /// Signature verification parameters; `None` when no key is configured.
    pub verification: Option<VerificationParams>,
    /// Input ceilings for the filter phase.
    pub limits: PipelineLimits,
}

impl ProcessingContext {
    /// Creates a context with default limits and no verification key.
    #[must_use]
    pub fn new(today: Date, now_unix: i64) -> Self {
        Self {
            today,
            now_unix,
            verification: None,
            limits: PipelineLimits::default(),
        }
    }

    /// Sets the verification parameters.
    #[must_use]
    pub fn with_verification(mut self, params: VerificationParams) -> Self {
        self.verification = Some(params);
        self
    }

    /// Sets the pipeline limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: PipelineLimits) -> Self {
        self.limits = limits;
        self
    }
}

// ============================================================================
// SECTION: Pipeline Entry Point
// ============================================================================

/// Processes a raw submission against a form definition.
///
/// On success the returned set preserves submission order, covers exactly
/// the mode-filtered declared fields, and carries injected question text,
/// visibility, and verification metadata per response.
///
/// # Errors
///
/// Returns [`SubmissionError::Processing`] for structural failures,
/// [`SubmissionError::Conflict`] when the submitted field set diverges from
/// the form, and [`SubmissionError::FieldValidation`] when a specific
/// field's value fails its type rules.
pub fn process_submission(
    form: &FormDefinition,
    responses: Vec<RawResponse>,
    ctx: &ProcessingContext,
) -> Result<ProcessedSubmission, SubmissionError> {
    // Phase 1: filter.
    let filtered = filter::filter_responses(form, responses, &ctx.limits)?;

    // Phase 2: visibility resolution over the filtered answers.
    let answers: BTreeMap<FieldId, AnswerValue> = filtered
        .iter()
        .filter_map(|response| {
            response.body.logic_answer().map(|answer| (response.field_id.clone(), answer))
        })
        .collect();
    let field_ids: Vec<FieldId> =
        form.fields.iter().map(|field| field.field_id.clone()).collect();
    let visible = visible_field_ids(&answers, &field_ids, &form.logic);

    // Phase 3: consistency guard against the form's own logic.
    if let Some(unit) = preventing_unit(&answers, &visible, &form.logic) {
        return Err(ProcessingError::PreventedByLogic {
            message: unit.prevent_message().unwrap_or_default().to_string(),
        }
        .into());
    }

    let schema_by_id: BTreeMap<&FieldId, _> =
        form.fields.iter().map(|field| (&field.field_id, field)).collect();

    // Phase 4: per-field validation and metadata injection.
    let mut processed = Vec::with_capacity(filtered.len());
    for response in filtered {
        let Some(schema) = schema_by_id.get(&response.field_id).copied() else {
            return Err(ProcessingError::UnknownResponseField {
                field_id: response.field_id,
            }
            .into());
        };

        // In encrypt mode only the verifiable plaintext subset reaches this
        // point, and logic-computed visibility cannot be re-derived from the
        // ciphertext of the remaining fields. Visibility for these
        // always-considered-answered types is therefore taken from the
        // answer itself.
        let is_visible = match form.response_mode {
            ResponseMode::Encrypt => response
                .body
                .answer_text()
                .is_some_and(|answer| !answer.trim().is_empty()),
            ResponseMode::Email => visible.contains(&response.field_id),
        };

        let enriched = ProcessedResponse {
            field_id: response.field_id,
            body: response.body,
            question: schema.question().to_string(),
            visible: is_visible,
            verified: schema.is_verifiable().then_some(true),
        };

        validate_field(&form.form_id, schema, &enriched, ctx)?;
        processed.push(enriched);
    }

    Ok(ProcessedSubmission::new(processed))
}
