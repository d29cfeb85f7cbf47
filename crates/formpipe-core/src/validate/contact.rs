// crates/formpipe-core/src/validate/contact.rs
// ============================================================================
// Module: Contact and Identity Validators
// Description: Email, phone number, NRIC/FIN, and UEN validation.
// Purpose: Enforce the structural and checksum rules for contact fields.
// Dependencies: crate::pipeline::errors
// ============================================================================

//! ## Overview
//! Contact validators are structural: they accept exactly the shapes the
//! downstream verification services expect and nothing else. Phone numbers
//! use E.164-style `+` prefixes with Singapore plan rules applied to `+65`
//! numbers. NRIC/FIN answers are validated with the published checksum
//! algorithm; UEN answers with the three structural registration formats.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::pipeline::errors::ValidationReason;

// ============================================================================
// SECTION: Email
// ============================================================================

/// Validates an email answer structurally and against allowed domains.
///
/// An empty `allowed_domains` list accepts every domain; otherwise the part
/// after `@` must equal one of the entries, case-insensitively.
///
/// # Errors
///
/// Returns [`ValidationReason::InvalidFormat`] for malformed addresses and
/// [`ValidationReason::NotAnOption`] for disallowed domains.
pub fn validate_email(answer: &str, allowed_domains: &[String]) -> Result<(), ValidationReason> {
    let mut parts = answer.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationReason::InvalidFormat);
    };
    if local.is_empty() || answer.chars().any(char::is_whitespace) {
        return Err(ValidationReason::InvalidFormat);
    }
    if !is_valid_domain(domain) {
        return Err(ValidationReason::InvalidFormat);
    }

    if allowed_domains.is_empty() {
        return Ok(());
    }
    let domain_lower = domain.to_ascii_lowercase();
    if allowed_domains.iter().any(|allowed| {
        allowed.trim_start_matches('@').eq_ignore_ascii_case(&domain_lower)
    }) {
        Ok(())
    } else {
        Err(ValidationReason::NotAnOption)
    }
}

/// Checks a dotted domain: non-empty alphanumeric/hyphen labels, at least
/// two of them, no label starting or ending with a hyphen.
fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

// ============================================================================
// SECTION: Phone Numbers
// ============================================================================

/// Singapore country calling code.
const SG_PREFIX: &str = "+65";
/// Length of a Singapore subscriber number.
const SG_SUBSCRIBER_DIGITS: usize = 8;

/// Validates a mobile number answer.
///
/// Numbers must be `+` followed by 8 to 15 digits. Singapore numbers must
/// carry an 8-digit subscriber number starting with 8 or 9; other country
/// codes are accepted only when `allow_international` is set.
///
/// # Errors
///
/// Returns [`ValidationReason::InvalidFormat`] for malformed numbers and
/// [`ValidationReason::NotAnOption`] for non-Singapore numbers when
/// international numbers are disallowed.
pub fn validate_mobile(answer: &str, allow_international: bool) -> Result<(), ValidationReason> {
    let digits = e164_digits(answer)?;
    if let Some(subscriber) = answer.strip_prefix(SG_PREFIX) {
        if subscriber.len() != SG_SUBSCRIBER_DIGITS
            || !subscriber.starts_with(['8', '9'])
        {
            return Err(ValidationReason::InvalidFormat);
        }
        return Ok(());
    }
    // Non-SG number; digits already validated for E.164 shape.
    let _ = digits;
    if allow_international { Ok(()) } else { Err(ValidationReason::NotAnOption) }
}

/// Validates a home/landline number answer.
///
/// Singapore numbers must carry an 8-digit subscriber number starting
/// with 6; other country codes are accepted as-is.
///
/// # Errors
///
/// Returns [`ValidationReason::InvalidFormat`] for malformed numbers.
pub fn validate_home_number(answer: &str) -> Result<(), ValidationReason> {
    let _ = e164_digits(answer)?;
    if let Some(subscriber) = answer.strip_prefix(SG_PREFIX)
        && (subscriber.len() != SG_SUBSCRIBER_DIGITS || !subscriber.starts_with('6'))
    {
        return Err(ValidationReason::InvalidFormat);
    }
    Ok(())
}

/// Checks the E.164 shape: `+` then 8 to 15 digits. Returns the digits.
fn e164_digits(answer: &str) -> Result<&str, ValidationReason> {
    let Some(digits) = answer.strip_prefix('+') else {
        return Err(ValidationReason::InvalidFormat);
    };
    if digits.len() < 8 || digits.len() > 15 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationReason::InvalidFormat);
    }
    Ok(digits)
}

// ============================================================================
// SECTION: NRIC / FIN
// ============================================================================

/// Checksum weights applied to the seven NRIC digits.
const NRIC_WEIGHTS: [u32; 7] = [2, 7, 6, 5, 4, 3, 2];
/// Check letters for the S and T series.
const NRIC_ST_LETTERS: [char; 11] = ['J', 'Z', 'I', 'H', 'G', 'F', 'E', 'D', 'C', 'B', 'A'];
/// Check letters for the F and G series.
const NRIC_FG_LETTERS: [char; 11] = ['X', 'W', 'U', 'T', 'R', 'Q', 'P', 'N', 'M', 'L', 'K'];
/// Check letters for the M series.
const NRIC_M_LETTERS: [char; 11] = ['K', 'L', 'J', 'N', 'P', 'Q', 'R', 'T', 'U', 'W', 'X'];

/// Validates a Singapore NRIC/FIN answer with its checksum.
///
/// # Errors
///
/// Returns [`ValidationReason::InvalidFormat`] for malformed or
/// checksum-failing values.
pub fn validate_nric(answer: &str) -> Result<(), ValidationReason> {
    let upper = answer.to_ascii_uppercase();
    let chars: Vec<char> = upper.chars().collect();
    if chars.len() != 9 {
        return Err(ValidationReason::InvalidFormat);
    }
    let prefix = chars[0];
    let check = chars[8];
    let mut sum: u32 = 0;
    for (index, digit) in chars[1 ..= 7].iter().enumerate() {
        let Some(value) = digit.to_digit(10) else {
            return Err(ValidationReason::InvalidFormat);
        };
        sum += value * NRIC_WEIGHTS[index];
    }

    // Series offset: T and G add 4, M adds 3.
    let (offset, letters) = match prefix {
        'S' => (0, &NRIC_ST_LETTERS),
        'T' => (4, &NRIC_ST_LETTERS),
        'F' => (0, &NRIC_FG_LETTERS),
        'G' => (4, &NRIC_FG_LETTERS),
        'M' => (3, &NRIC_M_LETTERS),
        _ => return Err(ValidationReason::InvalidFormat),
    };
    let remainder = ((sum + offset) % 11) as usize;
    if letters[remainder] == check {
        Ok(())
    } else {
        Err(ValidationReason::InvalidFormat)
    }
}

// ============================================================================
// SECTION: UEN
// ============================================================================

/// Validates a Singapore UEN answer structurally.
///
/// Accepted formats: 8 digits + check letter (businesses), 9 digits + check
/// letter (local companies), and `TyyPQnnnnX` / `SyyPQnnnnX` / `RyyPQnnnnX`
/// (other entity types: year, two-letter entity code, four digits, letter).
///
/// # Errors
///
/// Returns [`ValidationReason::InvalidFormat`] for values matching none of
/// the formats.
pub fn validate_uen(answer: &str) -> Result<(), ValidationReason> {
    let upper = answer.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let ok = match bytes.len() {
        9 => bytes[.. 8].iter().all(u8::is_ascii_digit) && bytes[8].is_ascii_uppercase(),
        10 => {
            let numeric =
                bytes[.. 9].iter().all(u8::is_ascii_digit) && bytes[9].is_ascii_uppercase();
            let entity = matches!(bytes[0], b'T' | b'S' | b'R')
                && bytes[1 .. 3].iter().all(u8::is_ascii_digit)
                && bytes[3 .. 5].iter().all(u8::is_ascii_uppercase)
                && bytes[5 .. 9].iter().all(u8::is_ascii_digit)
                && bytes[9].is_ascii_uppercase();
            numeric || entity
        }
        _ => false,
    };
    if ok { Ok(()) } else { Err(ValidationReason::InvalidFormat) }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
