// crates/formpipe-core/src/validate/attachment.rs
// ============================================================================
// Module: Attachment Validator
// Description: Filename and size checks for attachment metadata.
// Purpose: Reject oversized uploads and unsafe filenames before storage.
// Dependencies: crate::pipeline::errors
// ============================================================================

//! ## Overview
//! Attachment answers carry metadata only; the bytes travel out of band.
//! Validation is therefore structural: the declared size must fit the field's
//! budget and the filename must be a bare name with no path components, so a
//! crafted submission cannot steer downstream storage outside its directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::pipeline::errors::ValidationReason;

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Filename characters rejected regardless of platform.
const FORBIDDEN_FILENAME_CHARS: [char; 4] = ['/', '\\', '\0', ':'];

/// Validates attachment metadata against the field's size budget.
///
/// # Errors
///
/// Returns [`ValidationReason::TooLarge`] when the declared size exceeds the
/// budget and [`ValidationReason::InvalidFormat`] for empty, dot-only, or
/// path-bearing filenames.
pub fn validate_attachment(
    filename: &str,
    size_bytes: u64,
    max_bytes: u64,
) -> Result<(), ValidationReason> {
    let name = filename.trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(ValidationReason::InvalidFormat);
    }
    if name.chars().any(|c| FORBIDDEN_FILENAME_CHARS.contains(&c)) {
        return Err(ValidationReason::InvalidFormat);
    }
    if size_bytes == 0 {
        return Err(ValidationReason::InvalidFormat);
    }
    if size_bytes > max_bytes {
        return Err(ValidationReason::TooLarge);
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
