//! In-memory implementation of every backend contract.
//!
//! [`MemoryBackend`] keeps accounts, tokens, bucket records, file records and
//! each bucket's versioned name space in `DashMap`s. It backs the integration
//! tests and local development, where no durable storage exists.
//!
//! Besides the contract methods it exposes the out-of-band operations a data
//! plane would normally perform: registering accounts
//! ([`MemoryBackend::add_account`]), uploading whole files
//! ([`MemoryBackend::upload_file`]) and uploading parts of a large file
//! ([`MemoryBackend::upload_part`]).
//!
//! Versions of a name are kept newest first. Unfinished large files are not
//! part of the name space until they are finished.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use ruststack_b2_model::{Bucket, File, FileAction};
use sha1::{Digest, Sha1};
use tracing::{debug, info};

use crate::backend::{
    AccountManager, BucketManager, FileOrganizer, ListManager, PartSizes, VersionedObject,
};
use crate::codec::{decode_record, encode_record};
use crate::config::B2Config;
use crate::error::{B2ServiceError, B2ServiceResult};
use crate::utils::{generate_auth_token, generate_file_id, timestamp_millis};

/// A stored bucket record plus the fields the backend indexes on.
#[derive(Debug, Clone)]
struct StoredBucket {
    account_id: String,
    bucket_name: String,
    revision: u64,
    record: Vec<u8>,
}

/// A stored file record.
#[derive(Debug, Clone)]
struct StoredFile {
    bucket_id: String,
    file_name: String,
    record: Vec<u8>,
    /// Part number to hex SHA1 while a large upload is in progress.
    upload: Option<BTreeMap<u32, String>>,
}

/// Name to version ids (newest first) for one bucket.
type Namespace = BTreeMap<String, Vec<String>>;

/// In-memory backend implementing all four capability contracts.
pub struct MemoryBackend {
    api_url: String,
    download_url: String,
    upload_host: String,
    sizes: PartSizes,
    /// Account id to application key.
    accounts: DashMap<String, String>,
    /// Auth token to account id.
    tokens: DashMap<String, String>,
    /// Bucket id to stored bucket.
    buckets: DashMap<String, StoredBucket>,
    /// Bucket name to bucket id (enforces global uniqueness).
    bucket_names: DashMap<String, String>,
    /// File id to stored file.
    files: DashMap<String, StoredFile>,
    /// Bucket id to its name space.
    namespaces: DashMap<String, Namespace>,
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("account_count", &self.accounts.len())
            .field("bucket_count", &self.buckets.len())
            .field("file_count", &self.files.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(&B2Config::default())
    }
}

impl MemoryBackend {
    /// Create an empty backend advertising the URLs and part sizes in
    /// `config`.
    #[must_use]
    pub fn new(config: &B2Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            download_url: config.download_url.clone(),
            upload_host: config.upload_host.clone(),
            sizes: PartSizes {
                recommended: config.recommended_part_size,
                absolute_minimum: config.absolute_minimum_part_size,
            },
            accounts: DashMap::new(),
            tokens: DashMap::new(),
            buckets: DashMap::new(),
            bucket_names: DashMap::new(),
            files: DashMap::new(),
            namespaces: DashMap::new(),
        }
    }

    /// Register an account and its application key, replacing any previous
    /// key.
    pub fn add_account(&self, account_id: &str, key: &str) {
        self.accounts.insert(account_id.to_owned(), key.to_owned());
        info!(account_id = %account_id, "account registered");
    }

    /// Store a finished single-part file as the newest version of
    /// `file_name`. Returns the new file id.
    ///
    /// # Errors
    ///
    /// Returns [`B2ServiceError::NoSuchBucket`] if the bucket does not exist.
    pub fn upload_file(
        &self,
        bucket_id: &str,
        file_name: &str,
        content_type: &str,
        file_info: BTreeMap<String, String>,
    ) -> B2ServiceResult<String> {
        self.ensure_bucket(bucket_id)?;

        let file = File {
            file_id: generate_file_id(),
            file_name: file_name.to_owned(),
            bucket_id: bucket_id.to_owned(),
            content_type: content_type.to_owned(),
            file_info,
            action: FileAction::Upload,
            upload_timestamp: timestamp_millis(),
        };
        let record = encode_record(&file)?;

        self.files.insert(
            file.file_id.clone(),
            StoredFile {
                bucket_id: bucket_id.to_owned(),
                file_name: file_name.to_owned(),
                record,
                upload: None,
            },
        );
        self.publish_version(bucket_id, file_name, &file.file_id)?;

        info!(bucket_id = %bucket_id, file_name = %file_name, file_id = %file.file_id, "file uploaded");
        Ok(file.file_id)
    }

    /// Record one part of an in-progress large file, replacing an earlier
    /// upload of the same part number. Returns the part's hex SHA1.
    ///
    /// # Errors
    ///
    /// - [`B2ServiceError::NoSuchFile`] if the file does not exist.
    /// - [`B2ServiceError::NoActiveUpload`] if the file is already finished.
    /// - [`B2ServiceError::BadRequest`] if `part_number` is zero.
    pub fn upload_part(&self, file_id: &str, part_number: u32, data: &[u8]) -> B2ServiceResult<String> {
        if part_number == 0 {
            return Err(B2ServiceError::BadRequest {
                message: "Part numbers start at 1".to_owned(),
            });
        }

        let mut file = self
            .files
            .get_mut(file_id)
            .ok_or_else(|| B2ServiceError::NoSuchFile {
                file_id: file_id.to_owned(),
            })?;
        let parts = file
            .upload
            .as_mut()
            .ok_or_else(|| B2ServiceError::NoActiveUpload {
                file_id: file_id.to_owned(),
            })?;

        let sha1 = hex::encode(Sha1::digest(data));
        parts.insert(part_number, sha1.clone());

        debug!(file_id = %file_id, part_number, size = data.len(), "part uploaded");
        Ok(sha1)
    }

    fn ensure_bucket(&self, bucket_id: &str) -> B2ServiceResult<()> {
        if self.buckets.contains_key(bucket_id) {
            Ok(())
        } else {
            Err(B2ServiceError::NoSuchBucket {
                bucket_id: bucket_id.to_owned(),
            })
        }
    }

    /// Make `file_id` the newest version of `file_name`.
    fn publish_version(&self, bucket_id: &str, file_name: &str, file_id: &str) -> B2ServiceResult<()> {
        let mut namespace =
            self.namespaces
                .get_mut(bucket_id)
                .ok_or_else(|| B2ServiceError::NoSuchBucket {
                    bucket_id: bucket_id.to_owned(),
                })?;
        namespace
            .entry(file_name.to_owned())
            .or_default()
            .insert(0, file_id.to_owned());
        Ok(())
    }
}

#[async_trait]
impl AccountManager for MemoryBackend {
    async fn authorize(&self, account_id: &str, key: &str) -> B2ServiceResult<String> {
        let known = self
            .accounts
            .get(account_id)
            .is_some_and(|stored| stored.value() == key);
        if !known {
            return Err(B2ServiceError::Unauthorized {
                message: format!("Invalid credentials for account {account_id}"),
            });
        }

        let token = generate_auth_token();
        self.tokens.insert(token.clone(), account_id.to_owned());
        info!(account_id = %account_id, "account authorized");
        Ok(token)
    }

    async fn check_creds(&self, token: &str, api: &str) -> B2ServiceResult<()> {
        if self.tokens.contains_key(token) {
            debug!(api = %api, "token accepted");
            Ok(())
        } else {
            Err(B2ServiceError::BadAuthToken)
        }
    }

    fn api_root(&self, _account_id: &str) -> String {
        self.api_url.clone()
    }

    fn download_root(&self, _account_id: &str) -> String {
        self.download_url.clone()
    }

    async fn upload_part_host(&self, file_id: &str) -> B2ServiceResult<String> {
        let file = self
            .files
            .get(file_id)
            .ok_or_else(|| B2ServiceError::NoSuchFile {
                file_id: file_id.to_owned(),
            })?;
        if file.upload.is_none() {
            return Err(B2ServiceError::NoActiveUpload {
                file_id: file_id.to_owned(),
            });
        }
        Ok(self.upload_host.clone())
    }

    async fn upload_host(&self, bucket_id: &str) -> B2ServiceResult<String> {
        self.ensure_bucket(bucket_id)?;
        Ok(self.upload_host.clone())
    }

    fn sizes(&self, _account_id: &str) -> PartSizes {
        self.sizes
    }
}

#[async_trait]
impl BucketManager for MemoryBackend {
    async fn add_bucket(&self, bucket_id: &str, name: &str, record: Vec<u8>) -> B2ServiceResult<()> {
        let bucket: Bucket = decode_record(&record)?;

        match self.bucket_names.entry(name.to_owned()) {
            Entry::Occupied(_) => {
                return Err(B2ServiceError::DuplicateBucketName {
                    bucket: name.to_owned(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(bucket_id.to_owned());
            }
        }

        self.buckets.insert(
            bucket_id.to_owned(),
            StoredBucket {
                account_id: bucket.account_id,
                bucket_name: name.to_owned(),
                revision: bucket.revision,
                record,
            },
        );
        self.namespaces.insert(bucket_id.to_owned(), Namespace::new());

        info!(bucket_id = %bucket_id, bucket_name = %name, "bucket created");
        Ok(())
    }

    async fn remove_bucket(&self, bucket_id: &str) -> B2ServiceResult<()> {
        let (_, stored) =
            self.buckets
                .remove(bucket_id)
                .ok_or_else(|| B2ServiceError::NoSuchBucket {
                    bucket_id: bucket_id.to_owned(),
                })?;
        self.bucket_names.remove(&stored.bucket_name);
        self.namespaces.remove(bucket_id);
        self.files.retain(|_, file| file.bucket_id != bucket_id);

        info!(bucket_id = %bucket_id, bucket_name = %stored.bucket_name, "bucket deleted");
        Ok(())
    }

    async fn update_bucket(
        &self,
        bucket_id: &str,
        revision: u64,
        record: Vec<u8>,
    ) -> B2ServiceResult<()> {
        let bucket: Bucket = decode_record(&record)?;

        let mut stored =
            self.buckets
                .get_mut(bucket_id)
                .ok_or_else(|| B2ServiceError::NoSuchBucket {
                    bucket_id: bucket_id.to_owned(),
                })?;
        if stored.revision != revision {
            return Err(B2ServiceError::RevisionMismatch {
                bucket_id: bucket_id.to_owned(),
                expected: revision,
                actual: stored.revision,
            });
        }

        stored.revision = bucket.revision;
        stored.record = record;

        info!(bucket_id = %bucket_id, revision = bucket.revision, "bucket updated");
        Ok(())
    }

    async fn list_buckets(&self, account_id: &str) -> B2ServiceResult<Vec<Vec<u8>>> {
        Ok(self
            .buckets
            .iter()
            .filter(|entry| entry.account_id == account_id)
            .map(|entry| entry.record.clone())
            .collect())
    }

    async fn get_bucket(&self, bucket_id: &str) -> B2ServiceResult<Vec<u8>> {
        self.buckets
            .get(bucket_id)
            .map(|stored| stored.record.clone())
            .ok_or_else(|| B2ServiceError::NoSuchBucket {
                bucket_id: bucket_id.to_owned(),
            })
    }
}

#[async_trait]
impl FileOrganizer for MemoryBackend {
    async fn start_large(
        &self,
        bucket_id: &str,
        file_name: &str,
        file_id: &str,
        record: Vec<u8>,
    ) -> B2ServiceResult<()> {
        self.ensure_bucket(bucket_id)?;

        self.files.insert(
            file_id.to_owned(),
            StoredFile {
                bucket_id: bucket_id.to_owned(),
                file_name: file_name.to_owned(),
                record,
                upload: Some(BTreeMap::new()),
            },
        );

        info!(bucket_id = %bucket_id, file_name = %file_name, file_id = %file_id, "large file started");
        Ok(())
    }

    async fn get_file(&self, file_id: &str) -> B2ServiceResult<Vec<u8>> {
        self.files
            .get(file_id)
            .map(|file| file.record.clone())
            .ok_or_else(|| B2ServiceError::NoSuchFile {
                file_id: file_id.to_owned(),
            })
    }

    async fn parts(&self, file_id: &str) -> B2ServiceResult<Vec<String>> {
        let file = self
            .files
            .get(file_id)
            .ok_or_else(|| B2ServiceError::NoSuchFile {
                file_id: file_id.to_owned(),
            })?;
        let parts = file
            .upload
            .as_ref()
            .ok_or_else(|| B2ServiceError::NoActiveUpload {
                file_id: file_id.to_owned(),
            })?;
        Ok(parts.values().cloned().collect())
    }

    async fn finish_large(&self, file_id: &str) -> B2ServiceResult<()> {
        let mut stored = self
            .files
            .get_mut(file_id)
            .ok_or_else(|| B2ServiceError::NoSuchFile {
                file_id: file_id.to_owned(),
            })?;
        if stored.upload.is_none() {
            return Err(B2ServiceError::NoActiveUpload {
                file_id: file_id.to_owned(),
            });
        }

        let mut file: File = decode_record(&stored.record)?;
        file.action = FileAction::Upload;
        let record = encode_record(&file)?;

        // The file entry stays locked until the version is visible, and is
        // left untouched if the bucket has gone away.
        self.publish_version(&stored.bucket_id, &stored.file_name, file_id)?;
        stored.record = record;
        stored.upload = None;

        info!(
            bucket_id = %stored.bucket_id,
            file_name = %stored.file_name,
            file_id = %file_id,
            "large file finished"
        );
        Ok(())
    }
}

#[async_trait]
impl ListManager for MemoryBackend {
    async fn next_n(
        &self,
        bucket_id: &str,
        file_name: &str,
        with_prefix: &str,
        skip_prefix: &str,
        n: usize,
    ) -> B2ServiceResult<Vec<Arc<dyn VersionedObject>>> {
        let namespace =
            self.namespaces
                .get(bucket_id)
                .ok_or_else(|| B2ServiceError::NoSuchBucket {
                    bucket_id: bucket_id.to_owned(),
                })?;

        // Names sharing a prefix are contiguous, so the walk can begin at the
        // prefix and stop at the first name outside it.
        let start = file_name.max(with_prefix);
        let objects = namespace
            .range::<str, _>((Bound::Included(start), Bound::Unbounded))
            .take_while(|(name, _)| name.starts_with(with_prefix))
            .filter(|(name, _)| skip_prefix.is_empty() || !name.starts_with(skip_prefix))
            .take(n)
            .map(|(name, versions)| {
                Arc::new(MemoryVersionedObject {
                    name: name.clone(),
                    versions: versions.clone(),
                }) as Arc<dyn VersionedObject>
            })
            .collect();
        Ok(objects)
    }
}

/// Point-in-time snapshot of one name and its versions, newest first.
#[derive(Debug, Clone)]
pub struct MemoryVersionedObject {
    name: String,
    versions: Vec<String>,
}

#[async_trait]
impl VersionedObject for MemoryVersionedObject {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_n_versions(&self, begin: &str, n: usize) -> B2ServiceResult<Vec<String>> {
        let start = if begin.is_empty() {
            0
        } else {
            match self.versions.iter().position(|v| v == begin) {
                Some(idx) => idx,
                None => return Ok(Vec::new()),
            }
        };
        Ok(self.versions.iter().skip(start).take(n).cloned().collect())
    }
}
