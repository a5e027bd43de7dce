//! B2 API data model for RustStack.
//!
//! Plain data shapes shared between the B2 control plane
//! (`ruststack-b2-core`) and whatever gateway exposes it on the wire:
//!
//! - [`types`] -- the stored records ([`Bucket`], [`File`])
//! - [`input`] / [`output`] -- one request and one response struct per
//!   operation, serialized with the camelCase field names the B2 JSON API uses
//! - [`request`] -- the [`B2Request`] envelope carrying headers
//! - [`error`] -- [`B2ErrorCode`] and the wire-level [`B2Error`]

pub mod error;
pub mod input;
pub mod output;
pub mod request;
pub mod types;

pub use error::{B2Error, B2ErrorCode};
pub use request::B2Request;
pub use types::{Bucket, BucketType, File, FileAction};
