// crates/formpipe-core/src/core/field.rs
// ============================================================================
// Module: Field Schemas
// Description: Field types, constraint bags, and per-field schema records.
// Purpose: Declare what a form field is and how its answers are validated.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A field schema pairs a declared type from a fixed enumeration with a
//! type-specific constraint bag. The validator dispatch requires the bag to
//! match the declared type; a mismatch is a processing failure, not a field
//! validation failure, because it indicates a malformed form rather than a
//! bad answer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::FieldId;

// ============================================================================
// SECTION: Field Types
// ============================================================================

/// Declared field type.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Section header; never carries an answer.
    Section,
    /// Static statement text; never carries an answer.
    Statement,
    /// Single-line free text.
    ShortText,
    /// Multi-line free text.
    LongText,
    /// Whole-number answer with digit-count constraints.
    Number,
    /// Decimal answer with range constraints.
    Decimal,
    /// Email address, optionally signature-verified.
    Email,
    /// Mobile phone number, optionally signature-verified.
    Mobile,
    /// Home/landline phone number.
    HomeNo,
    /// Literal Yes/No choice.
    YesNo,
    /// Single choice from a dropdown list.
    Dropdown,
    /// Single choice from radio options, optionally with "Others".
    Radio,
    /// Multiple choice from checkbox options, optionally with "Others".
    Checkbox,
    /// Star rating from 1 to a configured number of steps.
    Rating,
    /// Calendar date.
    Date,
    /// Singapore NRIC/FIN with checksum validation.
    Nric,
    /// Tabular answer with typed columns.
    Table,
    /// Uploaded attachment metadata.
    Attachment,
    /// Singapore Unique Entity Number.
    Uen,
}

impl FieldType {
    /// Returns true for the field types that support signature verification.
    #[must_use]
    pub const fn supports_verification(self) -> bool {
        matches!(self, Self::Email | Self::Mobile)
    }

    /// Returns true for display-only types that never carry an answer.
    #[must_use]
    pub const fn is_display_only(self) -> bool {
        matches!(self, Self::Section | Self::Statement)
    }
}

// ============================================================================
// SECTION: Constraint Bags
// ============================================================================

/// Length constraint applied to a text or number answer.
///
/// # Invariants
/// - Counts are in characters for text and digits for numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LengthValidation {
    /// Answer must be at least this long.
    Minimum {
        /// Minimum length.
        count: usize,
    },
    /// Answer must be at most this long.
    Maximum {
        /// Maximum length.
        count: usize,
    },
    /// Answer must be exactly this long.
    Exact {
        /// Required length.
        count: usize,
    },
}

/// Restriction applied to date answers.
///
/// # Invariants
/// - Range bounds are ISO `YYYY-MM-DD` strings; an unparseable bound is a
///   processing failure at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateRestriction {
    /// Any valid date is accepted.
    Unrestricted,
    /// Dates before the processing day are rejected.
    NoPast,
    /// Dates after the processing day are rejected.
    NoFuture,
    /// Dates outside the inclusive range are rejected.
    Range {
        /// Inclusive lower bound, ISO date.
        from: Option<String>,
        /// Inclusive upper bound, ISO date.
        to: Option<String>,
    },
}

/// Column kind within a table field.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free-text cell.
    ShortText,
    /// Single choice from the listed options.
    Dropdown {
        /// Options accepted by this column.
        options: Vec<String>,
    },
}

/// Column declaration within a table field.
///
/// # Invariants
/// - `title` is display text only; cells are addressed positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column title shown to the respondent.
    pub title: String,
    /// Whether cells in this column must be non-empty.
    pub required: bool,
    /// Cell kind.
    pub kind: ColumnKind,
}

/// Type-specific constraint bag attached to a field schema.
///
/// # Invariants
/// - The variant must match the schema's declared [`FieldType`]; the
///   validator dispatch rejects mismatches as processing failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConstraints {
    /// No constraints beyond the type's own format rules.
    None,
    /// Character-count constraints for short/long text.
    Text {
        /// Optional selected length validation.
        selected: Option<LengthValidation>,
    },
    /// Digit-count constraints for whole numbers.
    Number {
        /// Optional selected length validation.
        selected: Option<LengthValidation>,
    },
    /// Range constraints for decimals.
    Decimal {
        /// Inclusive minimum as a decimal string.
        minimum: Option<String>,
        /// Inclusive maximum as a decimal string.
        maximum: Option<String>,
        /// Whether negative values are accepted.
        allow_negative: bool,
    },
    /// Domain restrictions for email answers.
    Email {
        /// Accepted domains (matched against the part after `@`);
        /// empty means all domains are accepted.
        allowed_domains: Vec<String>,
    },
    /// Number-plan restrictions for mobile answers.
    Mobile {
        /// Whether non-Singapore numbers are accepted.
        allow_international: bool,
    },
    /// Option list for dropdown and radio fields.
    Options {
        /// Declared options.
        options: Vec<String>,
        /// Whether a free-text "Others" choice is offered (radio only).
        others_option: bool,
    },
    /// Option list and selection bounds for checkbox fields.
    Checkbox {
        /// Declared options.
        options: Vec<String>,
        /// Whether a free-text "Others" choice is offered.
        others_option: bool,
        /// Minimum number of selections, when bounded.
        min_selected: Option<usize>,
        /// Maximum number of selections, when bounded.
        max_selected: Option<usize>,
    },
    /// Step count for rating fields.
    Rating {
        /// Number of rating steps (1 to 10).
        steps: u8,
    },
    /// Restriction for date fields.
    Date {
        /// Date restriction to enforce.
        restriction: DateRestriction,
    },
    /// Layout and row bounds for table fields.
    Table {
        /// Declared columns, in cell order.
        columns: Vec<ColumnSchema>,
        /// Minimum number of rows.
        min_rows: usize,
        /// Maximum number of rows, when bounded.
        max_rows: Option<usize>,
    },
    /// Size ceiling for attachment fields.
    Attachment {
        /// Maximum attachment size in bytes.
        max_bytes: u64,
    },
}

// ============================================================================
// SECTION: Field Schema
// ============================================================================

/// Declaration of a single form field.
///
/// # Invariants
/// - `field_id` is unique within the owning form.
/// - `verifiable` is only honored for types where
///   [`FieldType::supports_verification`] holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Stable field identifier.
    pub field_id: FieldId,
    /// Declared field type.
    pub field_type: FieldType,
    /// Question text shown to the respondent.
    pub title: String,
    /// Optional helper text.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether a visible field must be answered.
    pub required: bool,
    /// Whether answers carry a verification signature.
    #[serde(default)]
    pub verifiable: bool,
    /// Type-specific constraints.
    pub constraints: FieldConstraints,
}

impl FieldSchema {
    /// Returns the question text injected into processed responses.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.title
    }

    /// Returns true when answers to this field must carry a signature.
    #[must_use]
    pub const fn is_verifiable(&self) -> bool {
        self.verifiable && self.field_type.supports_verification()
    }
}
