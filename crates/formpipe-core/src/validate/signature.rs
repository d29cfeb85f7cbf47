// crates/formpipe-core/src/validate/signature.rs
// ============================================================================
// Module: Verified Answer Signatures
// Description: Parsing and verification of verified-field signatures.
// Purpose: Confirm that an answer was attested by the verification service.
// Dependencies: base64, sha2, subtle, crate::core, crate::pipeline
// ============================================================================

//! ## Overview
//! Verified fields (email and mobile) carry a signature minted by the
//! verification service after the submitter completed an OTP challenge. The
//! signature binds the answer to the form, the field, and a mint time:
//!
//! ```text
//! v1,t=<unix-seconds>,s=<base64(SHA-256(key "." form_id "." field_id "." answer "." t))>
//! ```
//!
//! Verification fails closed: malformed envelopes, digest mismatches, and
//! future-dated timestamps are all invalid, and digests are compared in
//! constant time so a mismatch reveals nothing about the expected value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;
use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::core::identifiers::FieldId;
use crate::core::identifiers::FormId;
use crate::pipeline::VerificationParams;
use crate::pipeline::errors::ValidationReason;

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Signature scheme version accepted by this verifier.
const SIGNATURE_VERSION: &str = "v1";
/// Separator between the signed payload components.
const PAYLOAD_SEPARATOR: &[u8] = b".";

/// Verifies a signature over an answer for a specific form and field.
///
/// # Errors
///
/// Returns [`ValidationReason::SignatureInvalid`] for malformed envelopes,
/// unknown versions, future-dated timestamps, and digest mismatches, and
/// [`ValidationReason::SignatureExpired`] when the mint time is older than
/// the configured maximum age.
pub(crate) fn verify(
    params: &VerificationParams,
    form_id: &FormId,
    field_id: &FieldId,
    answer: &str,
    signature: &str,
    now_unix: i64,
) -> Result<(), ValidationReason> {
    let envelope = parse_envelope(signature).ok_or(ValidationReason::SignatureInvalid)?;

    let age = now_unix
        .checked_sub(envelope.minted_at)
        .and_then(|delta| u64::try_from(delta).ok())
        .ok_or(ValidationReason::SignatureInvalid)?;
    if age > params.max_age_secs {
        return Err(ValidationReason::SignatureExpired);
    }

    let expected = payload_digest(params, form_id, field_id, answer, envelope.minted_at);
    let provided = Base64
        .decode(envelope.digest)
        .map_err(|_| ValidationReason::SignatureInvalid)?;
    if bool::from(expected.ct_eq(provided.as_slice())) {
        Ok(())
    } else {
        Err(ValidationReason::SignatureInvalid)
    }
}

/// Computes the expected digest for a signed payload.
fn payload_digest(
    params: &VerificationParams,
    form_id: &FormId,
    field_id: &FieldId,
    answer: &str,
    minted_at: i64,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(&params.key);
    hasher.update(PAYLOAD_SEPARATOR);
    hasher.update(form_id.as_str().as_bytes());
    hasher.update(PAYLOAD_SEPARATOR);
    hasher.update(field_id.as_str().as_bytes());
    hasher.update(PAYLOAD_SEPARATOR);
    hasher.update(answer.as_bytes());
    hasher.update(PAYLOAD_SEPARATOR);
    hasher.update(minted_at.to_string().as_bytes());
    hasher.finalize().into()
}

// ============================================================================
// SECTION: Envelope Parsing
// ============================================================================

/// Parsed components of a signature envelope.
struct Envelope<'sig> {
    /// Unix seconds at which the signature was minted.
    minted_at: i64,
    /// Base64 digest text, not yet decoded.
    digest: &'sig str,
}

/// Parses `v1,t=<seconds>,s=<base64>` into its components.
fn parse_envelope(signature: &str) -> Option<Envelope<'_>> {
    let mut parts = signature.split(',');
    let version = parts.next()?;
    let time_part = parts.next()?;
    let digest_part = parts.next()?;
    if parts.next().is_some() || version != SIGNATURE_VERSION {
        return None;
    }

    let minted_at: i64 = time_part.strip_prefix("t=")?.parse().ok()?;
    let digest = digest_part.strip_prefix("s=")?;
    if minted_at < 0 || digest.is_empty() {
        return None;
    }
    Some(Envelope {
        minted_at,
        digest,
    })
}

// ============================================================================
// SECTION: Test Support
// ============================================================================

/// Mints a valid signature for an answer. Test-only counterpart of the
/// verification service.
#[cfg(test)]
pub(crate) fn mint(
    params: &VerificationParams,
    form_id: &FormId,
    field_id: &FieldId,
    answer: &str,
    minted_at: i64,
) -> String {
    let digest = payload_digest(params, form_id, field_id, answer, minted_at);
    format!("{SIGNATURE_VERSION},t={minted_at},s={}", Base64.encode(digest))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> VerificationParams {
        VerificationParams {
            key: b"test-signing-key".to_vec(),
            max_age_secs: 3600,
        }
    }

    fn ids() -> (FormId, FieldId) {
        (FormId::new("form-1"), FieldId::new("field-1"))
    }

    #[test]
    fn round_trip_verifies() {
        let params = params();
        let (form_id, field_id) = ids();
        let signature = mint(&params, &form_id, &field_id, "a@b.com", 1_000);
        assert_eq!(verify(&params, &form_id, &field_id, "a@b.com", &signature, 1_500), Ok(()));
    }

    #[test]
    fn tampered_answer_is_invalid() {
        let params = params();
        let (form_id, field_id) = ids();
        let signature = mint(&params, &form_id, &field_id, "a@b.com", 1_000);
        assert_eq!(
            verify(&params, &form_id, &field_id, "x@b.com", &signature, 1_500),
            Err(ValidationReason::SignatureInvalid)
        );
    }

    #[test]
    fn signature_bound_to_field() {
        let params = params();
        let (form_id, field_id) = ids();
        let signature = mint(&params, &form_id, &field_id, "a@b.com", 1_000);
        let other_field = FieldId::new("field-2");
        assert_eq!(
            verify(&params, &form_id, &other_field, "a@b.com", &signature, 1_500),
            Err(ValidationReason::SignatureInvalid)
        );
    }

    #[test]
    fn stale_signature_expires() {
        let params = params();
        let (form_id, field_id) = ids();
        let signature = mint(&params, &form_id, &field_id, "a@b.com", 1_000);
        assert_eq!(
            verify(&params, &form_id, &field_id, "a@b.com", &signature, 1_000 + 3_601),
            Err(ValidationReason::SignatureExpired)
        );
        assert_eq!(
            verify(&params, &form_id, &field_id, "a@b.com", &signature, 1_000 + 3_600),
            Ok(())
        );
    }

    #[test]
    fn future_dated_signature_is_invalid() {
        let params = params();
        let (form_id, field_id) = ids();
        let signature = mint(&params, &form_id, &field_id, "a@b.com", 2_000);
        assert_eq!(
            verify(&params, &form_id, &field_id, "a@b.com", &signature, 1_500),
            Err(ValidationReason::SignatureInvalid)
        );
    }

    #[test]
    fn extreme_mint_time_is_invalid() {
        let params = params();
        let (form_id, field_id) = ids();
        let signature = mint(&params, &form_id, &field_id, "a@b.com", i64::MAX);
        assert_eq!(
            verify(&params, &form_id, &field_id, "a@b.com", &signature, -1),
            Err(ValidationReason::SignatureInvalid)
        );
    }

    #[test]
    fn malformed_envelopes_are_invalid() {
        let params = params();
        let (form_id, field_id) = ids();
        for bad in ["", "v2,t=1,s=AAAA", "v1,t=abc,s=AAAA", "v1,t=1", "v1,t=1,s=", "v1,t=1,s=!!"] {
            assert_eq!(
                verify(&params, &form_id, &field_id, "a@b.com", bad, 1_500),
                Err(ValidationReason::SignatureInvalid),
                "envelope {bad:?} should be invalid",
            );
        }
    }
}
