//! Versioned, hierarchical listing over a flat name space.
//!
//! [`ListManager::next_n`] walks a bucket's names in byte order and is
//! inclusive of its start name. This module turns that primitive into
//! paginated listings of `(name, version)` candidates:
//!
//! - [`list_undelimited_file_versions`] emits every version of every name.
//! - [`list_delimited_file_versions`] collapses names that contain the
//!   delimiter after the prefix into a single folder candidate.
//!
//! To advance past a name the engine fetches from `name + '\0'`. File names
//! cannot contain control characters, so the sentinel sorts below every
//! legal continuation of `name` and the next fetch starts strictly after it.
//!
//! Backend calls within one listing are issued strictly one after another.

use std::sync::Arc;

use crate::backend::{ListManager, VersionedObject};
use crate::error::{B2ServiceError, B2ServiceResult};

/// Appended to a name to make an inclusive fetch exclusive.
const SENTINEL: char = '\0';

/// Upper bound on capacity reserved up front; `n` is caller-controlled.
const MAX_PREALLOC: usize = 1024;

/// One step of a delimited walk over a bucket.
#[derive(Clone)]
pub enum ListEntry {
    /// A common prefix, ending with the delimiter.
    Folder(String),
    /// A name together with its versions.
    Object(Arc<dyn VersionedObject>),
}

impl std::fmt::Debug for ListEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Folder(name) => f.debug_tuple("Folder").field(name).finish(),
            Self::Object(obj) => f.debug_tuple("Object").field(&obj.name()).finish(),
        }
    }
}

/// A listing result: either a folder marker or one version of a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCandidate {
    /// A common prefix.
    Folder {
        /// The prefix, including the trailing delimiter.
        name: String,
    },
    /// A single file version.
    Version {
        /// The file name.
        name: String,
        /// The version's file id.
        file_id: String,
    },
}

impl ListCandidate {
    /// The candidate's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name } | Self::Version { name, .. } => name,
        }
    }

    /// The candidate's version id; empty for a folder.
    #[must_use]
    pub fn version_id(&self) -> &str {
        match self {
            Self::Folder { .. } => "",
            Self::Version { file_id, .. } => file_id,
        }
    }

    /// Whether this candidate is a folder marker.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }
}

/// Groups names by their first delimiter after a prefix.
///
/// The walker owns its cursor and the prefix of the most recently emitted
/// folder, so it can be drained one entry at a time without emitting a
/// folder twice or leaking one of its children.
pub struct CommonPrefixWalker<'a> {
    list: &'a dyn ListManager,
    bucket_id: String,
    prefix: String,
    delimiter: String,
    cursor: String,
    skip_prefix: String,
}

impl std::fmt::Debug for CommonPrefixWalker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonPrefixWalker")
            .field("bucket_id", &self.bucket_id)
            .field("prefix", &self.prefix)
            .field("delimiter", &self.delimiter)
            .field("cursor", &self.cursor)
            .field("skip_prefix", &self.skip_prefix)
            .finish_non_exhaustive()
    }
}

impl<'a> CommonPrefixWalker<'a> {
    /// Create a walker that starts at, and includes, `start_name`.
    ///
    /// An empty `delimiter` disables grouping.
    #[must_use]
    pub fn new(
        list: &'a dyn ListManager,
        bucket_id: &str,
        start_name: &str,
        prefix: &str,
        delimiter: &str,
    ) -> Self {
        Self {
            list,
            bucket_id: bucket_id.to_owned(),
            prefix: prefix.to_owned(),
            delimiter: delimiter.to_owned(),
            cursor: start_name.to_owned(),
            skip_prefix: String::new(),
        }
    }

    /// Fetch the next entry, or `None` once the name space is exhausted.
    pub async fn next_entry(&mut self) -> B2ServiceResult<Option<ListEntry>> {
        let batch = self
            .list
            .next_n(
                &self.bucket_id,
                &self.cursor,
                &self.prefix,
                &self.skip_prefix,
                1,
            )
            .await?;
        let Some(obj) = batch.into_iter().next() else {
            return Ok(None);
        };

        let name = obj.name();
        let Some(rest) = name.strip_prefix(self.prefix.as_str()) else {
            return Err(B2ServiceError::Internal(anyhow::anyhow!(
                "list backend returned {name:?} outside prefix {:?}",
                self.prefix
            )));
        };

        if !self.delimiter.is_empty() {
            if let Some(idx) = rest.find(self.delimiter.as_str()) {
                let folder = name[..self.prefix.len() + idx + self.delimiter.len()].to_owned();
                self.skip_prefix.clone_from(&folder);
                self.cursor.clone_from(&folder);
                return Ok(Some(ListEntry::Folder(folder)));
            }
        }

        self.skip_prefix.clear();
        self.cursor = format!("{name}{SENTINEL}");
        Ok(Some(ListEntry::Object(obj)))
    }

    /// Fetch up to `n` entries. Fewer than `n` means the walk is exhausted.
    pub async fn get_dir_names(&mut self, n: usize) -> B2ServiceResult<Vec<ListEntry>> {
        let mut entries = Vec::with_capacity(n.min(MAX_PREALLOC));
        while entries.len() < n {
            match self.next_entry().await? {
                Some(entry) => entries.push(entry),
                None => break,
            }
        }
        Ok(entries)
    }
}

/// Tracks the caller's version cursor, which only applies to the first
/// object seen and only if that object is the start name.
struct StartVersion<'s> {
    name: &'s str,
    file_id: Option<&'s str>,
}

impl<'s> StartVersion<'s> {
    fn new(name: &'s str, file_id: &'s str) -> Self {
        Self {
            name,
            file_id: Some(file_id),
        }
    }

    fn begin_for(&mut self, obj_name: &str) -> &'s str {
        match self.file_id.take() {
            Some(file_id) if obj_name == self.name => file_id,
            _ => "",
        }
    }
}

/// Append up to `quota` versions of `obj` to `out`.
async fn push_versions(
    obj: &dyn VersionedObject,
    begin: &str,
    quota: usize,
    out: &mut Vec<ListCandidate>,
) -> B2ServiceResult<()> {
    let mut versions = obj.next_n_versions(begin, quota).await?;
    versions.truncate(quota);
    out.extend(versions.into_iter().map(|file_id| ListCandidate::Version {
        name: obj.name().to_owned(),
        file_id,
    }));
    Ok(())
}

/// List up to `n` candidates, grouping names under `prefix` by `delimiter`.
///
/// Starts at `(start_name, start_file_id)`, inclusive. A folder consumes one
/// slot; an object contributes as many versions as remain in the quota.
pub async fn list_delimited_file_versions(
    list: &dyn ListManager,
    bucket_id: &str,
    start_name: &str,
    start_file_id: &str,
    prefix: &str,
    delimiter: &str,
    n: usize,
) -> B2ServiceResult<Vec<ListCandidate>> {
    let mut walker = CommonPrefixWalker::new(list, bucket_id, start_name, prefix, delimiter);
    let mut start = StartVersion::new(start_name, start_file_id);
    let mut out = Vec::with_capacity(n.min(MAX_PREALLOC));

    while out.len() < n {
        match walker.next_entry().await? {
            None => break,
            Some(ListEntry::Folder(name)) => out.push(ListCandidate::Folder { name }),
            Some(ListEntry::Object(obj)) => {
                let begin = start.begin_for(obj.name());
                let quota = n - out.len();
                push_versions(obj.as_ref(), begin, quota, &mut out).await?;
            }
        }
    }

    Ok(out)
}

/// List up to `n` versions of names under `prefix`, without grouping.
///
/// Starts at `(start_name, start_file_id)`, inclusive.
pub async fn list_undelimited_file_versions(
    list: &dyn ListManager,
    bucket_id: &str,
    start_name: &str,
    start_file_id: &str,
    prefix: &str,
    n: usize,
) -> B2ServiceResult<Vec<ListCandidate>> {
    let mut cursor = start_name.to_owned();
    let mut start = StartVersion::new(start_name, start_file_id);
    let mut out = Vec::with_capacity(n.min(MAX_PREALLOC));

    while out.len() < n {
        let batch = list.next_n(bucket_id, &cursor, prefix, "", 1).await?;
        let Some(obj) = batch.into_iter().next() else {
            break;
        };
        let begin = start.begin_for(obj.name());
        let quota = n - out.len();
        push_versions(obj.as_ref(), begin, quota, &mut out).await?;
        cursor = format!("{}{SENTINEL}", obj.name());
    }

    Ok(out)
}
