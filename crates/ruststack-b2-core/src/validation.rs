//! Validation for B2 requests.
//!
//! Bucket and file naming rules follow the B2 documentation. File names may
//! not contain control characters, which is what guarantees that the `'\0'`
//! sentinel used by [`crate::listing`] sorts below every legal name.

use crate::error::B2ServiceError;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 6;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 50;

/// Bucket names with this prefix are reserved.
const RESERVED_BUCKET_PREFIX: &str = "b2-";

/// Maximum file name length in bytes.
const MAX_FILE_NAME_BYTES: usize = 1024;

/// Validate a B2 bucket name.
///
/// Rules:
/// - 6-50 characters long
/// - Only ASCII letters, digits, and hyphens
/// - Must not start with `b2-`
///
/// # Errors
///
/// Returns [`B2ServiceError::InvalidBucketName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use ruststack_b2_core::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("my-photos").is_ok());
/// assert!(validate_bucket_name("tiny").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), B2ServiceError> {
    let len = name.len();

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(B2ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: format!(
                "Bucket name must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
            ),
        });
    }

    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(B2ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: "Bucket name must only contain letters, numbers, and hyphens".to_owned(),
        });
    }

    if name
        .get(..RESERVED_BUCKET_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(RESERVED_BUCKET_PREFIX))
    {
        return Err(B2ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: format!("Bucket name must not start with '{RESERVED_BUCKET_PREFIX}'"),
        });
    }

    Ok(())
}

/// Validate a B2 file name.
///
/// Rules:
/// - 1-1024 bytes of UTF-8
/// - No characters below U+0020 and no DEL (U+007F)
/// - No leading `/`, trailing `/`, or empty segment (`//`)
///
/// # Errors
///
/// Returns [`B2ServiceError::InvalidFileName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use ruststack_b2_core::validation::validate_file_name;
///
/// assert!(validate_file_name("photos/2024/cat.jpg").is_ok());
/// assert!(validate_file_name("bad\0name").is_err());
/// ```
pub fn validate_file_name(name: &str) -> Result<(), B2ServiceError> {
    let invalid = |reason: &str| B2ServiceError::InvalidFileName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    if name.is_empty() {
        return Err(invalid("File name must not be empty"));
    }
    if name.len() > MAX_FILE_NAME_BYTES {
        return Err(invalid("File name must be at most 1024 bytes"));
    }
    if name.chars().any(|c| c < '\u{20}' || c == '\u{7f}') {
        return Err(invalid("File name must not contain control characters"));
    }
    if name.starts_with('/') || name.ends_with('/') || name.contains("//") {
        return Err(invalid("File name must not start or end with '/' or contain '//'"));
    }

    Ok(())
}
