//! Shared utilities for the B2 service.
//!
//! Provides ID generation, timestamp helpers, and `Authorization: Basic`
//! credential parsing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::Utc;
use uuid::Uuid;

use crate::error::B2ServiceError;

// ---------------------------------------------------------------------------
// ID generation
// ---------------------------------------------------------------------------

/// Generate a fresh bucket ID (UUID v4).
///
/// # Examples
///
/// ```
/// use ruststack_b2_core::utils::generate_bucket_id;
///
/// let id = generate_bucket_id();
/// assert_eq!(id.len(), 36);
/// ```
#[must_use]
pub fn generate_bucket_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a fresh file ID (UUID v4).
///
/// Every file version, including an in-progress large file, gets its own ID.
#[must_use]
pub fn generate_file_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate an opaque authorization token (UUID v4 without dashes).
///
/// # Examples
///
/// ```
/// use ruststack_b2_core::utils::generate_auth_token;
///
/// let token = generate_auth_token();
/// assert_eq!(token.len(), 32);
/// assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn generate_auth_token() -> String {
    Uuid::new_v4().simple().to_string()
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Return the current UTC time as milliseconds since the Unix epoch.
#[must_use]
pub fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// ---------------------------------------------------------------------------
// Basic auth
// ---------------------------------------------------------------------------

/// Parse an `Authorization: Basic base64(account:key)` header value into
/// `(account_id, key)`.
///
/// # Errors
///
/// - [`B2ServiceError::Unauthorized`] if the header is missing, does not use
///   the `Basic` scheme, is not valid base64 or UTF-8, or has no `:`.
/// - [`B2ServiceError::BadRequest`] if the decoded pair has more than one `:`.
///
/// # Examples
///
/// ```
/// use ruststack_b2_core::utils::parse_basic_auth;
///
/// // base64("acct:secret")
/// let (account, key) = parse_basic_auth(Some("Basic YWNjdDpzZWNyZXQ=")).unwrap();
/// assert_eq!(account, "acct");
/// assert_eq!(key, "secret");
/// ```
pub fn parse_basic_auth(header: Option<&str>) -> Result<(String, String), B2ServiceError> {
    let unauthorized = |message: &str| B2ServiceError::Unauthorized {
        message: message.to_owned(),
    };

    let header = header.ok_or_else(|| unauthorized("Basic authorization is required"))?;
    let encoded = header
        .strip_prefix("Basic ")
        .ok_or_else(|| unauthorized("Authorization scheme must be Basic"))?;
    let decoded = BASE64_STANDARD
        .decode(encoded.trim())
        .map_err(|_| unauthorized("Authorization credentials are not valid base64"))?;
    let pair = String::from_utf8(decoded)
        .map_err(|_| unauthorized("Authorization credentials are not valid UTF-8"))?;

    let mut parts = pair.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(account), Some(key), None) => Ok((account.to_owned(), key.to_owned())),
        (_, None, _) => Err(unauthorized("Authorization credentials must be account:key")),
        _ => Err(B2ServiceError::BadRequest {
            message: "Authorization credentials must contain exactly one ':'".to_owned(),
        }),
    }
}
