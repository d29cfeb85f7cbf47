// crates/formpipe-core/tests/pipeline.rs
// ============================================================================
// Module: Submission Pipeline Tests
// Description: End-to-end tests for the four-phase submission pipeline.
// Purpose: Validate filtering, visibility, consistency, and enrichment.
// ============================================================================

//! ## Overview
//! Drives [`formpipe_core::process_submission`] end to end: field-set
//! reconciliation, logic-driven visibility, prevent-submit guarding,
//! metadata injection, and the encrypt-mode plaintext subset.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use field_logic::Condition;
use field_logic::ConditionState;
use field_logic::ConditionValue;
use field_logic::LogicKind;
use field_logic::LogicUnit;
use formpipe_core::ConflictError;
use formpipe_core::FieldConstraints;
use formpipe_core::FieldId;
use formpipe_core::FieldSchema;
use formpipe_core::FieldType;
use formpipe_core::FormDefinition;
use formpipe_core::FormId;
use formpipe_core::PipelineLimits;
use formpipe_core::ProcessingContext;
use formpipe_core::ProcessingError;
use formpipe_core::RawResponse;
use formpipe_core::ResponseBody;
use formpipe_core::ResponseMode;
use formpipe_core::SubmissionError;
use formpipe_core::ValidationReason;
use formpipe_core::process_submission;
use smallvec::smallvec;
use time::Date;
use time::Month;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn ctx() -> ProcessingContext {
    let today = Date::from_calendar_date(2026, Month::August, 30).unwrap();
    ProcessingContext::new(today, 1_756_500_000)
}

fn field(id: &str, field_type: FieldType, required: bool) -> FieldSchema {
    let constraints = match field_type {
        FieldType::ShortText | FieldType::LongText => FieldConstraints::Text {
            selected: None,
        },
        FieldType::Number => FieldConstraints::Number {
            selected: None,
        },
        FieldType::Email => FieldConstraints::Email {
            allowed_domains: Vec::new(),
        },
        FieldType::Mobile => FieldConstraints::Mobile {
            allow_international: false,
        },
        FieldType::Radio | FieldType::Dropdown => FieldConstraints::Options {
            options: vec!["A".to_string(), "B".to_string()],
            others_option: false,
        },
        _ => FieldConstraints::None,
    };
    FieldSchema {
        field_id: FieldId::new(id),
        field_type,
        title: format!("Question {id}"),
        description: None,
        required,
        verifiable: false,
        constraints,
    }
}

fn form(fields: Vec<FieldSchema>) -> FormDefinition {
    FormDefinition {
        form_id: FormId::new("form-1"),
        title: "Test form".to_string(),
        response_mode: ResponseMode::Email,
        fields,
        logic: Vec::new(),
    }
}

fn answer(id: &str, text: &str) -> RawResponse {
    RawResponse {
        field_id: FieldId::new(id),
        body: ResponseBody::Answer {
            answer: text.to_string(),
        },
    }
}

fn equals(field: &str, value: &str) -> Condition<FieldId> {
    Condition {
        field: FieldId::new(field),
        state: ConditionState::Equal,
        value: ConditionValue::Single {
            value: value.to_string(),
        },
    }
}

// ============================================================================
// SECTION: Happy Path
// ============================================================================

#[test]
fn processes_complete_submission_with_metadata() {
    let form = form(vec![
        field("f1", FieldType::ShortText, true),
        field("f2", FieldType::Number, false),
    ]);
    let responses = vec![answer("f1", "hello"), answer("f2", "42")];

    let processed = process_submission(&form, responses, &ctx()).unwrap();
    assert_eq!(processed.len(), 2);
    let first = &processed.responses()[0];
    assert_eq!(first.field_id, FieldId::new("f1"));
    assert_eq!(first.question, "Question f1");
    assert!(first.visible);
    assert_eq!(first.verified, None);
}

#[test]
fn output_covers_every_declared_field() {
    let form = form(vec![
        field("f1", FieldType::ShortText, false),
        field("f2", FieldType::ShortText, false),
        field("f3", FieldType::ShortText, false),
    ]);
    let responses = vec![answer("f1", "a"), answer("f2", ""), answer("f3", "c")];

    let processed = process_submission(&form, responses, &ctx()).unwrap();
    assert_eq!(processed.len(), form.fields.len());
    let ids: Vec<&str> = processed.responses().iter().map(|r| r.field_id.as_str()).collect();
    assert_eq!(ids, vec!["f1", "f2", "f3"]);
}

#[test]
fn processing_is_deterministic() {
    let form = form(vec![field("f1", FieldType::ShortText, true)]);
    let responses = vec![answer("f1", "same")];

    let first = process_submission(&form, responses.clone(), &ctx()).unwrap();
    let second = process_submission(&form, responses, &ctx()).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// SECTION: Filtering
// ============================================================================

#[test]
fn rejects_unknown_response_field() {
    let form = form(vec![field("f1", FieldType::ShortText, true)]);
    let responses = vec![answer("f1", "hello"), answer("ghost", "boo")];

    let err = process_submission(&form, responses, &ctx()).unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Processing(ProcessingError::UnknownResponseField { field_id })
            if field_id == FieldId::new("ghost")
    ));
}

#[test]
fn missing_field_is_a_conflict() {
    let form = form(vec![
        field("f1", FieldType::ShortText, false),
        field("f2", FieldType::ShortText, false),
    ]);
    let responses = vec![answer("f1", "only one")];

    let err = process_submission(&form, responses, &ctx()).unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Conflict(ConflictError::FieldSetMismatch {
            expected: 2,
            actual: 1,
        })
    ));
}

#[test]
fn duplicate_responses_keep_the_first() {
    let form = form(vec![field("f1", FieldType::ShortText, true)]);
    let responses = vec![answer("f1", "first"), answer("f1", "second")];

    let processed = process_submission(&form, responses, &ctx()).unwrap();
    assert_eq!(processed.len(), 1);
    assert_eq!(processed.responses()[0].body, ResponseBody::Answer {
        answer: "first".to_string(),
    });
}

#[test]
fn empty_form_is_a_processing_failure() {
    let form = form(Vec::new());
    let err = process_submission(&form, Vec::new(), &ctx()).unwrap_err();
    assert!(matches!(err, SubmissionError::Processing(ProcessingError::NoFields)));
}

#[test]
fn response_count_limit_is_enforced() {
    let form = form(vec![field("f1", FieldType::ShortText, true)]);
    let responses = vec![answer("f1", "a"), answer("f1", "b"), answer("f1", "c")];
    let ctx = ctx().with_limits(PipelineLimits {
        max_responses: 2,
        max_answer_bytes: 16_384,
    });

    let err = process_submission(&form, responses, &ctx).unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Processing(ProcessingError::LimitExceeded {
            what: "response count",
            ..
        })
    ));
}

#[test]
fn answer_byte_limit_is_enforced() {
    let form = form(vec![field("f1", FieldType::ShortText, true)]);
    let responses = vec![answer("f1", &"x".repeat(64))];
    let ctx = ctx().with_limits(PipelineLimits {
        max_responses: 512,
        max_answer_bytes: 32,
    });

    let err = process_submission(&form, responses, &ctx).unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Processing(ProcessingError::LimitExceeded {
            what: "answer bytes",
            ..
        })
    ));
}

// ============================================================================
// SECTION: Visibility Logic
// ============================================================================

/// Form with `f2` revealed only when `f1` equals `show`.
fn gated_form(prevent: bool) -> FormDefinition {
    let kind = if prevent {
        LogicKind::PreventSubmit {
            message: "not eligible".to_string(),
        }
    } else {
        LogicKind::ShowFields {
            fields: smallvec![FieldId::new("f2")],
        }
    };
    let mut form = form(vec![
        field("f1", FieldType::ShortText, true),
        field("f2", FieldType::ShortText, true),
    ]);
    form.logic = vec![LogicUnit {
        conditions: smallvec![equals("f1", "show")],
        kind,
    }];
    form
}

#[test]
fn hidden_field_is_never_required() {
    let form = gated_form(false);
    // f2 is required but hidden because f1 does not say "show".
    let responses = vec![answer("f1", "hide"), answer("f2", "")];

    let processed = process_submission(&form, responses, &ctx()).unwrap();
    assert_eq!(processed.len(), 2);
    assert!(!processed.responses()[1].visible);
}

#[test]
fn hidden_field_with_answer_is_rejected() {
    let form = gated_form(false);
    let responses = vec![answer("f1", "hide"), answer("f2", "smuggled")];

    let err = process_submission(&form, responses, &ctx()).unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::FieldValidation(failure)
            if failure.reason == ValidationReason::HiddenButAnswered
    ));
}

#[test]
fn revealed_required_field_must_be_answered() {
    let form = gated_form(false);
    let responses = vec![answer("f1", "show"), answer("f2", "")];

    let err = process_submission(&form, responses, &ctx()).unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::FieldValidation(failure)
            if failure.reason == ValidationReason::Required
    ));
}

#[test]
fn revealed_field_is_visible_in_output() {
    let form = gated_form(false);
    let responses = vec![answer("f1", "show"), answer("f2", "now visible")];

    let processed = process_submission(&form, responses, &ctx()).unwrap();
    assert!(processed.responses()[1].visible);
}

// ============================================================================
// SECTION: Consistency Guard
// ============================================================================

#[test]
fn prevent_submit_unit_blocks_the_submission() {
    let form = gated_form(true);
    let responses = vec![answer("f1", "show"), answer("f2", "anything")];

    let err = process_submission(&form, responses, &ctx()).unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::Processing(ProcessingError::PreventedByLogic { message })
            if message == "not eligible"
    ));
}

#[test]
fn prevent_submit_unit_ignores_unmatched_answers() {
    let form = gated_form(true);
    let responses = vec![answer("f1", "other"), answer("f2", "")];

    // The prevent unit targets no field, so f2 stays default-visible but
    // optional conditions let a blank pass only when not required.
    let result = process_submission(&form, responses, &ctx());
    // f2 is required and visible (no show unit targets it in prevent form).
    assert!(matches!(
        result,
        Err(SubmissionError::FieldValidation(failure))
            if failure.reason == ValidationReason::Required
    ));
}

// ============================================================================
// SECTION: Encrypt Mode
// ============================================================================

#[test]
fn encrypt_mode_validates_only_the_plaintext_subset() {
    let mut form = form(vec![
        field("f1", FieldType::ShortText, true),
        field("f2", FieldType::Email, false),
    ]);
    form.response_mode = ResponseMode::Encrypt;
    // The short-text response is ciphertext elsewhere; submitting it here
    // is allowed and silently dropped.
    let responses = vec![answer("f1", "ignored"), answer("f2", "a@example.com")];

    let processed = process_submission(&form, responses, &ctx()).unwrap();
    assert_eq!(processed.len(), 1);
    assert_eq!(processed.responses()[0].field_id, FieldId::new("f2"));
}

#[test]
fn encrypt_mode_visibility_follows_the_answer() {
    let mut form = form(vec![
        field("f1", FieldType::Email, false),
        field("f2", FieldType::Mobile, false),
    ]);
    form.response_mode = ResponseMode::Encrypt;
    let responses = vec![answer("f1", "a@example.com"), answer("f2", "")];

    let processed = process_submission(&form, responses, &ctx()).unwrap();
    assert!(processed.responses()[0].visible);
    assert!(!processed.responses()[1].visible);
}

// ============================================================================
// SECTION: Display-Only Fields
// ============================================================================

#[test]
fn section_with_an_answer_is_rejected() {
    let form = form(vec![
        field("s1", FieldType::Section, false),
        field("f1", FieldType::ShortText, false),
    ]);
    let responses = vec![answer("s1", "should be empty"), answer("f1", "ok")];

    let err = process_submission(&form, responses, &ctx()).unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::FieldValidation(failure)
            if failure.reason == ValidationReason::NotAnswerable
    ));
}

#[test]
fn section_with_blank_answer_passes() {
    let form = form(vec![
        field("s1", FieldType::Section, false),
        field("f1", FieldType::ShortText, false),
    ]);
    let responses = vec![answer("s1", ""), answer("f1", "ok")];

    let processed = process_submission(&form, responses, &ctx()).unwrap();
    assert_eq!(processed.len(), 2);
}
