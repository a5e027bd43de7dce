//! Request payloads, one per B2 operation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::BucketType;

/// `b2_authorize_account`. Credentials travel in the `authorization` header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeAccountInput {}

/// `b2_list_buckets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBucketsInput {
    /// Account whose buckets are listed.
    pub account_id: String,
}

/// `b2_create_bucket`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucketInput {
    /// Owning account.
    pub account_id: String,
    /// Requested bucket name.
    pub bucket_name: String,
    /// Access type.
    #[serde(default)]
    pub bucket_type: BucketType,
    /// Free-form user metadata.
    #[serde(default)]
    pub bucket_info: BTreeMap<String, String>,
}

/// `b2_update_bucket`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBucketInput {
    /// Owning account.
    pub account_id: String,
    /// Bucket to update.
    pub bucket_id: String,
    /// New access type, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_type: Option<BucketType>,
    /// Replacement user metadata, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_info: Option<BTreeMap<String, String>>,
    /// Only apply the update if the stored revision equals this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_revision_is: Option<u64>,
}

/// `b2_delete_bucket`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBucketInput {
    /// Owning account.
    pub account_id: String,
    /// Bucket to delete.
    pub bucket_id: String,
}

/// `b2_get_upload_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUploadUrlInput {
    /// Target bucket.
    pub bucket_id: String,
}

/// `b2_start_large_file`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLargeFileInput {
    /// Target bucket.
    pub bucket_id: String,
    /// Name of the file being assembled.
    pub file_name: String,
    /// MIME type of the assembled file.
    pub content_type: String,
    /// Free-form user metadata.
    #[serde(default)]
    pub file_info: BTreeMap<String, String>,
}

/// `b2_get_upload_part_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUploadPartUrlInput {
    /// Large file the parts belong to.
    pub file_id: String,
}

/// `b2_finish_large_file`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishLargeFileInput {
    /// Large file to finish.
    pub file_id: String,
    /// Hex SHA1 of every part, in part-number order.
    #[serde(default)]
    pub part_sha1_array: Vec<String>,
}

/// `b2_list_file_versions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFileVersionsInput {
    /// Bucket to list.
    pub bucket_id: String,
    /// First file name to return (inclusive). Empty starts at the beginning.
    #[serde(default)]
    pub start_file_name: String,
    /// First version of `start_file_name` to return (inclusive).
    #[serde(default)]
    pub start_file_id: String,
    /// Only names starting with this prefix are returned.
    #[serde(default)]
    pub prefix: String,
    /// Groups names into folders at the first occurrence after `prefix`.
    /// Empty disables grouping.
    #[serde(default)]
    pub delimiter: String,
    /// Page size. Zero selects the configured default.
    #[serde(default)]
    pub max_file_count: u32,
}
