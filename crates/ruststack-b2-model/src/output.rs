//! Response payloads, one per B2 operation.
//!
//! Operations that return a bare record (`b2_create_bucket`,
//! `b2_update_bucket`, `b2_delete_bucket`) use [`Bucket`] directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Bucket, File};

/// `b2_authorize_account`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeAccountOutput {
    /// The authorized account.
    pub account_id: String,
    /// Token to present on subsequent calls.
    pub authorization_token: String,
    /// Base URL for API calls.
    pub api_url: String,
    /// Base URL for downloads.
    pub download_url: String,
    /// Part size the service recommends for large files.
    pub recommended_part_size: u64,
    /// Deprecated alias for `recommended_part_size`.
    pub minimum_part_size: u64,
    /// Smallest part size the service accepts.
    pub absolute_minimum_part_size: u64,
}

/// `b2_list_buckets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBucketsOutput {
    /// Every bucket of the account, ordered by name.
    pub buckets: Vec<Bucket>,
}

/// `b2_get_upload_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUploadUrlOutput {
    /// Bucket the URL uploads into.
    pub bucket_id: String,
    /// Fully qualified upload endpoint.
    pub upload_url: String,
}

/// `b2_start_large_file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLargeFileOutput {
    /// Newly assigned file id.
    pub file_id: String,
    /// Echoed file name.
    pub file_name: String,
    /// Echoed bucket id.
    pub bucket_id: String,
    /// Echoed MIME type.
    pub content_type: String,
    /// Echoed user metadata.
    pub file_info: BTreeMap<String, String>,
    /// Milliseconds since the Unix epoch.
    pub upload_timestamp: i64,
}

/// `b2_get_upload_part_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUploadPartUrlOutput {
    /// Large file the URL uploads parts for.
    pub file_id: String,
    /// Fully qualified part-upload endpoint.
    pub upload_url: String,
}

/// `b2_finish_large_file`. Empty on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishLargeFileOutput {}

/// `b2_list_file_versions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFileVersionsOutput {
    /// File versions and folder entries, in listing order.
    pub files: Vec<File>,
    /// Name to pass as `startFileName` for the next page.
    pub next_file_name: Option<String>,
    /// Version to pass as `startFileId` for the next page. Empty when the
    /// next entry is a folder.
    pub next_file_id: Option<String>,
}

impl ListFileVersionsOutput {
    /// Whether more results are available.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.next_file_name.is_some()
    }
}
