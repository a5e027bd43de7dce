//! Record blob encoding.
//!
//! Bucket and file records are handed to backends as CBOR blobs. The byte
//! layout is private to this module; callers rely only on
//! `decode_record(encode_record(r)) == r`.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{B2ServiceError, B2ServiceResult};

/// Encode a record into an opaque blob.
///
/// # Errors
///
/// Returns [`B2ServiceError::Codec`] if the record cannot be serialized.
pub fn encode_record<T: Serialize>(record: &T) -> B2ServiceResult<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(record, &mut buf).map_err(|e| B2ServiceError::Codec(e.to_string()))?;
    Ok(buf)
}

/// Decode a blob produced by [`encode_record`].
///
/// # Errors
///
/// Returns [`B2ServiceError::Codec`] if the blob is malformed or does not
/// describe a `T`.
pub fn decode_record<T: DeserializeOwned>(blob: &[u8]) -> B2ServiceResult<T> {
    ciborium::from_reader(blob).map_err(|e| B2ServiceError::Codec(e.to_string()))
}
