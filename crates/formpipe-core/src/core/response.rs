// crates/formpipe-core/src/core/response.rs
// ============================================================================
// Module: Responses
// Description: Raw submitted responses and processed, metadata-enriched ones.
// Purpose: Model what the end user submits and what the pipeline emits.
// Dependencies: crate::core::identifiers, field-logic, serde
// ============================================================================

//! ## Overview
//! A raw response pairs a field identifier with a body whose shape depends
//! on the field type: a plain answer string, a structured checkbox
//! selection, table rows, attachment metadata, or a signed answer for
//! verifiable fields. A processed response is the raw response plus the
//! metadata the pipeline injects: resolved question text, computed
//! visibility, and verification status.

// ============================================================================
// SECTION: Imports
// ============================================================================

use field_logic::AnswerValue;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::FieldId;

// ============================================================================
// SECTION: Response Bodies
// ============================================================================

/// Submitted value of a single response.
///
/// # Invariants
/// - Shape must match the declared field type; mismatches are field
///   validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseBody {
    /// Plain answer string.
    Answer {
        /// Submitted answer.
        answer: String,
    },
    /// Checkbox selection.
    Checkbox {
        /// Selected declared options.
        options: Vec<String>,
        /// Free text for the "Others" choice when selected.
        others: Option<String>,
    },
    /// Table rows; each row is one cell per declared column.
    Table {
        /// Submitted rows.
        rows: Vec<Vec<String>>,
    },
    /// Attachment metadata (content travels out of band).
    Attachment {
        /// Original filename.
        filename: String,
        /// Content size in bytes.
        size_bytes: u64,
    },
    /// Signed answer for verifiable fields.
    Verified {
        /// Submitted answer.
        answer: String,
        /// Verification signature string.
        signature: String,
    },
}

impl ResponseBody {
    /// Returns the plain answer text when the body carries one.
    #[must_use]
    pub fn answer_text(&self) -> Option<&str> {
        match self {
            Self::Answer {
                answer,
            }
            | Self::Verified {
                answer,
                ..
            } => Some(answer),
            Self::Checkbox {
                ..
            }
            | Self::Table {
                ..
            }
            | Self::Attachment {
                ..
            } => None,
        }
    }

    /// Returns true when the body carries no value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Answer {
                answer,
            }
            | Self::Verified {
                answer,
                ..
            } => answer.trim().is_empty(),
            Self::Checkbox {
                options,
                others,
            } => options.is_empty() && others.is_none(),
            Self::Table {
                rows,
            } => rows.iter().all(|row| row.iter().all(|cell| cell.trim().is_empty())),
            Self::Attachment {
                filename,
                ..
            } => filename.trim().is_empty(),
        }
    }

    /// Converts the body into the answer shape the logic engine reads.
    ///
    /// Table and attachment bodies are opaque to logic and return `None`.
    #[must_use]
    pub fn logic_answer(&self) -> Option<AnswerValue> {
        match self {
            Self::Answer {
                answer,
            }
            | Self::Verified {
                answer,
                ..
            } => Some(AnswerValue::text(answer.clone())),
            Self::Checkbox {
                options,
                others,
            } => Some(AnswerValue::selection(options.clone(), others.is_some())),
            Self::Table {
                ..
            }
            | Self::Attachment {
                ..
            } => None,
        }
    }

    /// Returns the total byte length of the submitted strings.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        match self {
            Self::Answer {
                answer,
            } => answer.len(),
            Self::Verified {
                answer,
                signature,
            } => answer.len() + signature.len(),
            Self::Checkbox {
                options,
                others,
            } => {
                options.iter().map(String::len).sum::<usize>()
                    + others.as_ref().map_or(0, String::len)
            }
            Self::Table {
                rows,
            } => rows.iter().flatten().map(String::len).sum(),
            Self::Attachment {
                filename,
                ..
            } => filename.len(),
        }
    }
}

// ============================================================================
// SECTION: Raw Responses
// ============================================================================

/// Raw field response as submitted by the end user.
///
/// # Invariants
/// - `field_id` must name a field declared by the target form; the filter
///   phase rejects unknown identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    /// Field the response answers.
    pub field_id: FieldId,
    /// Submitted value.
    pub body: ResponseBody,
}

// ============================================================================
// SECTION: Processed Responses
// ============================================================================

/// Response with injected metadata, ready for persistence.
///
/// # Invariants
/// - `field_id` is declared by the form that produced it.
/// - `verified` is present iff the field schema is verifiable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedResponse {
    /// Field the response answers.
    pub field_id: FieldId,
    /// Submitted value.
    pub body: ResponseBody,
    /// Question text resolved from the field schema.
    pub question: String,
    /// Whether the field was visible for this submission.
    pub visible: bool,
    /// Verification status; present only for verifiable fields.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verified: Option<bool>,
}

/// Validated, metadata-enriched response set.
///
/// # Invariants
/// - Responses preserve submission order.
/// - Field identifiers form a subset of the form's declared identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedSubmission {
    /// Processed responses in submission order.
    responses: Vec<ProcessedResponse>,
}

impl ProcessedSubmission {
    /// Wraps an already-processed response list.
    #[must_use]
    pub(crate) const fn new(responses: Vec<ProcessedResponse>) -> Self {
        Self {
            responses,
        }
    }

    /// Returns the processed responses in submission order.
    #[must_use]
    pub fn responses(&self) -> &[ProcessedResponse] {
        &self.responses
    }

    /// Consumes the set, yielding the processed responses.
    #[must_use]
    pub fn into_responses(self) -> Vec<ProcessedResponse> {
        self.responses
    }

    /// Returns the number of processed responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Returns true when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
