//! B2 wire-level errors.
//!
//! B2 reports failures as a JSON body `{"status": …, "code": …, "message": …}`
//! alongside the matching HTTP status. [`B2ErrorCode`] enumerates the codes
//! the control plane produces; [`B2Error`] carries one occurrence.

use std::fmt;

use serde::Serialize;

/// Well-known B2 error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum B2ErrorCode {
    /// Malformed or semantically invalid request.
    #[default]
    BadRequest,
    /// Credentials are missing or wrong.
    Unauthorized,
    /// The presented auth token is not valid.
    BadAuthToken,
    /// The presented auth token has expired.
    ExpiredAuthToken,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with the current state (e.g. stale revision).
    Conflict,
    /// A bucket with the requested name already exists.
    DuplicateBucketName,
    /// The account has reached its bucket limit.
    TooManyBuckets,
    /// Unexpected server-side failure.
    InternalError,
    /// The service is temporarily unable to handle the request.
    ServiceUnavailable,
}

impl B2ErrorCode {
    /// Returns the error code as it appears in the `code` field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::BadAuthToken => "bad_auth_token",
            Self::ExpiredAuthToken => "expired_auth_token",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::DuplicateBucketName => "duplicate_bucket_name",
            Self::TooManyBuckets => "too_many_buckets",
            Self::InternalError => "internal_error",
            Self::ServiceUnavailable => "service_unavailable",
        }
    }

    /// Returns the HTTP status code B2 pairs with this error code.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::BadRequest | Self::DuplicateBucketName | Self::TooManyBuckets => {
                http::StatusCode::BAD_REQUEST
            }
            Self::Unauthorized | Self::BadAuthToken | Self::ExpiredAuthToken => {
                http::StatusCode::UNAUTHORIZED
            }
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::Conflict => http::StatusCode::CONFLICT,
            Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns the default message for this error.
    #[must_use]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "The request is not valid",
            Self::Unauthorized => "The credentials are not valid",
            Self::BadAuthToken => "Invalid authorization token",
            Self::ExpiredAuthToken => "Authorization token has expired",
            Self::NotFound => "The requested resource was not found",
            Self::Conflict => "The request conflicts with the current state",
            Self::DuplicateBucketName => "Bucket name is already in use",
            Self::TooManyBuckets => "Account has too many buckets",
            Self::InternalError => "Internal server error",
            Self::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl fmt::Display for B2ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A B2 error response.
#[derive(Debug)]
pub struct B2Error {
    /// The error code.
    pub code: B2ErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// JSON body of a B2 error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct B2ErrorBody {
    /// Numeric HTTP status.
    pub status: u16,
    /// Error code string.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for B2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B2Error({}): {}", self.code, self.message)
    }
}

impl std::error::Error for B2Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl B2Error {
    /// Create a new B2Error from an error code.
    #[must_use]
    pub fn new(code: B2ErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.default_message().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new B2Error with a custom message.
    #[must_use]
    pub fn with_message(code: B2ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The JSON body a gateway should send for this error.
    #[must_use]
    pub fn body(&self) -> B2ErrorBody {
        B2ErrorBody {
            status: self.status_code.as_u16(),
            code: self.code.as_str(),
            message: self.message.clone(),
        }
    }
}

/// Create a B2Error from an error code.
///
/// # Examples
///
/// ```
/// use ruststack_b2_model::b2_error;
/// use ruststack_b2_model::error::B2ErrorCode;
///
/// let err = b2_error!(NotFound);
/// assert_eq!(err.code, B2ErrorCode::NotFound);
///
/// let err = b2_error!(BadRequest, "fileName is required");
/// assert_eq!(err.message, "fileName is required");
/// ```
#[macro_export]
macro_rules! b2_error {
    ($code:ident) => {
        $crate::error::B2Error::new($crate::error::B2ErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::B2Error::with_message($crate::error::B2ErrorCode::$code, $msg)
    };
}
