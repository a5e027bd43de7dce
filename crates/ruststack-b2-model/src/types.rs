//! Stored B2 records.
//!
//! These are the records the control plane serializes into opaque backend
//! blobs and hands back to callers. Field names follow the B2 JSON API.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Access type of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketType {
    /// Only authorized callers may download.
    #[default]
    AllPrivate,
    /// Anyone may download.
    AllPublic,
    /// Bucket holding snapshot exports.
    Snapshot,
}

impl BucketType {
    /// Returns the wire name of this bucket type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllPrivate => "allPrivate",
            Self::AllPublic => "allPublic",
            Self::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for BucketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bucket record.
///
/// `revision` starts at 1 and is advanced by exactly one on every accepted
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Owning account.
    pub account_id: String,
    /// Opaque, globally unique identifier.
    pub bucket_id: String,
    /// Display name, globally unique.
    pub bucket_name: String,
    /// Access type.
    pub bucket_type: BucketType,
    /// Free-form user metadata.
    #[serde(default)]
    pub bucket_info: BTreeMap<String, String>,
    /// Optimistic-concurrency revision.
    pub revision: u64,
}

/// What a listing entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    /// A large file that has been started but not finished.
    Start,
    /// A complete, downloadable file version.
    #[default]
    Upload,
    /// A synthetic common-prefix entry produced by delimited listing.
    Folder,
    /// A hide marker.
    ///
    /// Accepted so records written by other B2 implementations decode; this
    /// control plane never produces one.
    Hide,
}

impl FileAction {
    /// Returns the wire name of this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Upload => "upload",
            Self::Folder => "folder",
            Self::Hide => "hide",
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file version record.
///
/// Folder entries returned by delimited listing carry only `file_name` and
/// `action`; every other field is left at its default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Version identifier. Empty for folder entries.
    #[serde(default)]
    pub file_id: String,
    /// Full object name.
    pub file_name: String,
    /// Owning bucket. Empty for folder entries.
    #[serde(default)]
    pub bucket_id: String,
    /// MIME type supplied at upload time.
    #[serde(default)]
    pub content_type: String,
    /// Free-form user metadata.
    #[serde(default)]
    pub file_info: BTreeMap<String, String>,
    /// What this entry represents.
    pub action: FileAction,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub upload_timestamp: i64,
}

impl File {
    /// Build a synthetic folder entry for a common prefix.
    #[must_use]
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            file_name: name.into(),
            action: FileAction::Folder,
            ..Self::default()
        }
    }

    /// Whether this entry is a folder marker rather than a stored version.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.action == FileAction::Folder
    }
}
