//! Backend capability contracts.
//!
//! The control plane composes four independent capabilities. Each is an
//! object-safe async trait so a deployment can mix storage backends and
//! tests can substitute [`crate::memory::MemoryBackend`].
//!
//! Records cross these boundaries as opaque blobs produced by
//! [`crate::codec`]; a backend only has to store and return them.
//!
//! # Object safety
//!
//! The traits use `#[async_trait]` so that they can be held as
//! `Arc<dyn …>` by [`crate::provider::RustStackB2`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::B2ServiceResult;

/// Part sizes advertised to an account, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSizes {
    /// Part size the service recommends.
    pub recommended: u64,
    /// Smallest part size the service accepts.
    pub absolute_minimum: u64,
}

/// Account authentication and request routing.
#[async_trait]
pub trait AccountManager: Send + Sync {
    /// Check an account's key and mint an auth token for it.
    async fn authorize(&self, account_id: &str, key: &str) -> B2ServiceResult<String>;

    /// Check that `token` is valid for calling `api`.
    async fn check_creds(&self, token: &str, api: &str) -> B2ServiceResult<()>;

    /// Base URL for API calls made by this account.
    fn api_root(&self, account_id: &str) -> String;

    /// Base URL for downloads made by this account.
    fn download_root(&self, account_id: &str) -> String;

    /// Host that should receive the parts of a large file.
    async fn upload_part_host(&self, file_id: &str) -> B2ServiceResult<String>;

    /// Host that should receive whole-file uploads into a bucket.
    async fn upload_host(&self, bucket_id: &str) -> B2ServiceResult<String>;

    /// Part sizes advertised to the account.
    fn sizes(&self, account_id: &str) -> PartSizes;
}

/// Durable storage of bucket records.
#[async_trait]
pub trait BucketManager: Send + Sync {
    /// Persist a new bucket record.
    ///
    /// Fails with [`crate::error::B2ServiceError::DuplicateBucketName`] when
    /// the name is taken.
    async fn add_bucket(&self, bucket_id: &str, name: &str, record: Vec<u8>) -> B2ServiceResult<()>;

    /// Remove a bucket record.
    async fn remove_bucket(&self, bucket_id: &str) -> B2ServiceResult<()>;

    /// Replace a bucket record if, and only if, the stored revision equals
    /// `revision`. The check and the write must be atomic with respect to
    /// concurrent updaters.
    async fn update_bucket(
        &self,
        bucket_id: &str,
        revision: u64,
        record: Vec<u8>,
    ) -> B2ServiceResult<()>;

    /// Every bucket record owned by `account_id`.
    async fn list_buckets(&self, account_id: &str) -> B2ServiceResult<Vec<Vec<u8>>>;

    /// A single bucket record.
    async fn get_bucket(&self, bucket_id: &str) -> B2ServiceResult<Vec<u8>>;
}

/// Durable storage of file records and large-file part bookkeeping.
#[async_trait]
pub trait FileOrganizer: Send + Sync {
    /// Register a large file as in progress.
    async fn start_large(
        &self,
        bucket_id: &str,
        file_name: &str,
        file_id: &str,
        record: Vec<u8>,
    ) -> B2ServiceResult<()>;

    /// The record of a file version.
    async fn get_file(&self, file_id: &str) -> B2ServiceResult<Vec<u8>>;

    /// Hex SHA1 of every uploaded part of an in-progress large file, in
    /// part-number order.
    async fn parts(&self, file_id: &str) -> B2ServiceResult<Vec<String>>;

    /// Mark an in-progress large file as finished.
    async fn finish_large(&self, file_id: &str) -> B2ServiceResult<()>;
}

/// Cursor-based access to a bucket's sorted name space.
#[async_trait]
pub trait ListManager: Send + Sync {
    /// Return up to `n` names in byte-lexicographic order, beginning at and
    /// including `file_name` if it exists.
    ///
    /// When `with_prefix` is non-empty only names starting with it are
    /// returned. When `skip_prefix` is non-empty no name starting with it is
    /// returned; if the two conflict, `skip_prefix` wins.
    ///
    /// Fewer than `n` results means no further names match.
    async fn next_n(
        &self,
        bucket_id: &str,
        file_name: &str,
        with_prefix: &str,
        skip_prefix: &str,
        n: usize,
    ) -> B2ServiceResult<Vec<Arc<dyn VersionedObject>>>;
}

/// A name together with its ordered version history.
#[async_trait]
pub trait VersionedObject: Send + Sync {
    /// The object's name.
    fn name(&self) -> &str;

    /// Return up to `n` version ids, newest first, beginning at and including
    /// `begin`. An empty `begin` starts at the newest version.
    async fn next_n_versions(&self, begin: &str, n: usize) -> B2ServiceResult<Vec<String>>;
}
