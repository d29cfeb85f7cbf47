// crates/formpipe-core/src/core/form.rs
// ============================================================================
// Module: Form Definition
// Description: The form document the pipeline validates submissions against.
// Purpose: Bundle ordered field schemas, logic units, and the response mode.
// Dependencies: crate::core::{field, identifiers}, field-logic, serde
// ============================================================================

//! ## Overview
//! A form definition is the server-side source of truth for a submission:
//! ordered field schemas, the visibility-logic units shared with the client,
//! and the response mode that decides which fields the pipeline validates in
//! plaintext.

// ============================================================================
// SECTION: Imports
// ============================================================================

use field_logic::LogicUnit;
use serde::Deserialize;
use serde::Serialize;

use crate::core::field::FieldSchema;
use crate::core::field::FieldType;
use crate::core::identifiers::FieldId;
use crate::core::identifiers::FormId;

// ============================================================================
// SECTION: Response Mode
// ============================================================================

/// Storage mode for submitted responses.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Responses are stored in clear and every field is validated.
    Email,
    /// Responses are end-to-end encrypted; only the verifiable plaintext
    /// subset (email and mobile fields) reaches the pipeline.
    Encrypt,
}

// ============================================================================
// SECTION: Form Definition
// ============================================================================

/// Form document: ordered fields plus logic units.
///
/// # Invariants
/// - `fields` preserves author order; field identifiers are unique.
/// - Logic units reference declared field identifiers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Form identifier.
    pub form_id: FormId,
    /// Form title.
    pub title: String,
    /// Storage mode for submissions.
    pub response_mode: ResponseMode,
    /// Ordered field declarations.
    pub fields: Vec<FieldSchema>,
    /// Visibility and prevent-submit logic units.
    #[serde(default)]
    pub logic: Vec<LogicUnit<FieldId>>,
}

impl FormDefinition {
    /// Looks up a field schema by identifier.
    #[must_use]
    pub fn field(&self, field_id: &FieldId) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| &field.field_id == field_id)
    }

    /// Returns true when the mode keeps this field in the plaintext
    /// validation path.
    #[must_use]
    pub const fn mode_keeps(&self, field_type: FieldType) -> bool {
        match self.response_mode {
            ResponseMode::Email => true,
            ResponseMode::Encrypt => field_type.supports_verification(),
        }
    }

    /// Iterates the fields the pipeline validates under the form's mode.
    pub fn mode_filtered_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|field| self.mode_keeps(field.field_type))
    }
}
