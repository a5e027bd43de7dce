//! B2-specific error types.
//!
//! Defines [`B2ServiceError`], the error enum every handler, the listing
//! engine, and every backend contract returns. [`B2ServiceError::kind`]
//! classifies a variant into one of the coarse [`ErrorKind`]s a gateway maps
//! to transport behavior, and the [`From`] impl produces the wire-level
//! [`B2Error`].
//!
//! # Usage
//!
//! ```
//! use ruststack_b2_core::error::{B2ServiceError, ErrorKind};
//! use ruststack_b2_model::B2ErrorCode;
//!
//! let err = B2ServiceError::NoSuchBucket {
//!     bucket_id: "b-123".to_owned(),
//! };
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(err.into_b2_error().code, B2ErrorCode::NotFound);
//! ```

use ruststack_b2_model::{B2Error, B2ErrorCode};

/// Coarse classification of a [`B2ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed credentials.
    Authentication,
    /// Malformed request shape or invalid argument.
    Validation,
    /// Stale revision on a compare-and-swap update.
    Conflict,
    /// Part checksum list does not match what was uploaded.
    Integrity,
    /// A backend lookup missed.
    NotFound,
    /// Opaque failure surfaced by a backend, including record codec failures.
    Backend,
}

/// B2 service error type.
#[derive(Debug, thiserror::Error)]
pub enum B2ServiceError {
    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------
    /// Credentials are missing, malformed, or rejected.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Why the credentials were rejected.
        message: String,
    },

    /// The presented auth token is unknown.
    #[error("Invalid authorization token")]
    BadAuthToken,

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------
    /// The request is malformed.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Description of the problem.
        message: String,
    },

    /// The bucket name violates the naming rules.
    #[error("Invalid bucket name: {name}: {reason}")]
    InvalidBucketName {
        /// The rejected name.
        name: String,
        /// The rule that was violated.
        reason: String,
    },

    /// The file name violates the naming rules.
    #[error("Invalid file name: {name:?}: {reason}")]
    InvalidFileName {
        /// The rejected name.
        name: String,
        /// The rule that was violated.
        reason: String,
    },

    /// Another bucket already uses this name.
    #[error("Bucket name is already in use: {bucket}")]
    DuplicateBucketName {
        /// The contested name.
        bucket: String,
    },

    /// The file is not a large file in progress.
    #[error("No active upload for: {file_id}")]
    NoActiveUpload {
        /// The file that was expected to be in progress.
        file_id: String,
    },

    // -----------------------------------------------------------------------
    // Conflict
    // -----------------------------------------------------------------------
    /// A compare-and-swap update was issued against a stale revision.
    #[error("Bucket {bucket_id} revision mismatch: expected {expected}, stored {actual}")]
    RevisionMismatch {
        /// The bucket being updated.
        bucket_id: String,
        /// The revision the caller supplied.
        expected: u64,
        /// The revision currently stored.
        actual: u64,
    },

    // -----------------------------------------------------------------------
    // Integrity
    // -----------------------------------------------------------------------
    /// The part SHA1 list submitted on finish differs from the uploaded parts.
    #[error("Part SHA1 array does not match the uploaded parts of {file_id}")]
    PartChecksumMismatch {
        /// The large file being finished.
        file_id: String,
    },

    // -----------------------------------------------------------------------
    // Not found
    // -----------------------------------------------------------------------
    /// The bucket does not exist.
    #[error("Bucket does not exist: {bucket_id}")]
    NoSuchBucket {
        /// The bucket id that was not found.
        bucket_id: String,
    },

    /// The file does not exist.
    #[error("File not present: {file_id}")]
    NoSuchFile {
        /// The file id that was not found.
        file_id: String,
    },

    // -----------------------------------------------------------------------
    // Backend
    // -----------------------------------------------------------------------
    /// A record could not be encoded or decoded.
    #[error("Record codec failure: {0}")]
    Codec(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl B2ServiceError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } | Self::BadAuthToken => ErrorKind::Authentication,
            Self::BadRequest { .. }
            | Self::InvalidBucketName { .. }
            | Self::InvalidFileName { .. }
            | Self::DuplicateBucketName { .. }
            | Self::NoActiveUpload { .. } => ErrorKind::Validation,
            Self::RevisionMismatch { .. } => ErrorKind::Conflict,
            Self::PartChecksumMismatch { .. } => ErrorKind::Integrity,
            Self::NoSuchBucket { .. } | Self::NoSuchFile { .. } => ErrorKind::NotFound,
            Self::Codec(_) | Self::Internal(_) => ErrorKind::Backend,
        }
    }

    /// Convert this error into a wire-level [`B2Error`].
    #[must_use]
    pub fn into_b2_error(self) -> B2Error {
        B2Error::from(self)
    }
}

impl From<B2ServiceError> for B2Error {
    fn from(err: B2ServiceError) -> Self {
        let message = err.to_string();
        let code = error_code(&err);

        B2Error::with_message(code, message)
    }
}

/// Map a [`B2ServiceError`] variant to the corresponding [`B2ErrorCode`].
fn error_code(err: &B2ServiceError) -> B2ErrorCode {
    match err {
        B2ServiceError::Unauthorized { .. } => B2ErrorCode::Unauthorized,
        B2ServiceError::BadAuthToken => B2ErrorCode::BadAuthToken,
        B2ServiceError::BadRequest { .. }
        | B2ServiceError::InvalidBucketName { .. }
        | B2ServiceError::InvalidFileName { .. }
        | B2ServiceError::NoActiveUpload { .. }
        | B2ServiceError::PartChecksumMismatch { .. } => B2ErrorCode::BadRequest,
        B2ServiceError::DuplicateBucketName { .. } => B2ErrorCode::DuplicateBucketName,
        B2ServiceError::RevisionMismatch { .. } => B2ErrorCode::Conflict,
        B2ServiceError::NoSuchBucket { .. } | B2ServiceError::NoSuchFile { .. } => {
            B2ErrorCode::NotFound
        }
        B2ServiceError::Codec(_) | B2ServiceError::Internal(_) => B2ErrorCode::InternalError,
    }
}

/// Convenience result type for B2 service operations.
pub type B2ServiceResult<T> = Result<T, B2ServiceError>;
