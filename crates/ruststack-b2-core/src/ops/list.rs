//! List operation handlers.
//!
//! Implements `b2_list_file_versions` on top of [`crate::listing`].

use ruststack_b2_model::input::ListFileVersionsInput;
use ruststack_b2_model::output::ListFileVersionsOutput;
use ruststack_b2_model::{B2Request, File};
use tracing::debug;

use crate::codec::decode_record;
use crate::error::{B2ServiceError, B2ServiceResult};
use crate::listing::{ListCandidate, list_delimited_file_versions, list_undelimited_file_versions};
use crate::provider::RustStackB2;

impl RustStackB2 {
    /// List file versions, optionally grouped into folders by a delimiter.
    ///
    /// One candidate more than the page size is requested; if it arrives it
    /// becomes the `(nextFileName, nextFileId)` cursor and is not returned.
    /// A page size above `max_file_count_limit` is rejected.
    pub async fn handle_list_file_versions(
        &self,
        req: B2Request<ListFileVersionsInput>,
    ) -> B2ServiceResult<ListFileVersionsOutput> {
        let input = req.input;
        let max_file_count = if input.max_file_count == 0 {
            self.config.default_max_file_count
        } else {
            input.max_file_count
        };
        if max_file_count > self.config.max_file_count_limit {
            return Err(B2ServiceError::BadRequest {
                message: format!(
                    "maxFileCount {max_file_count} exceeds the limit of {}",
                    self.config.max_file_count_limit
                ),
            });
        }
        let max = max_file_count as usize;

        let mut candidates = if input.delimiter.is_empty() {
            list_undelimited_file_versions(
                self.list.as_ref(),
                &input.bucket_id,
                &input.start_file_name,
                &input.start_file_id,
                &input.prefix,
                max + 1,
            )
            .await?
        } else {
            list_delimited_file_versions(
                self.list.as_ref(),
                &input.bucket_id,
                &input.start_file_name,
                &input.start_file_id,
                &input.prefix,
                &input.delimiter,
                max + 1,
            )
            .await?
        };

        let next = if candidates.len() > max {
            candidates.pop()
        } else {
            None
        };

        let mut files = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match candidate {
                ListCandidate::Folder { name } => files.push(File::folder(name)),
                ListCandidate::Version { file_id, .. } => {
                    let blob = self.files.get_file(&file_id).await?;
                    files.push(decode_record::<File>(&blob)?);
                }
            }
        }

        let (next_file_name, next_file_id) = match next {
            Some(cursor) => (
                Some(cursor.name().to_owned()),
                Some(cursor.version_id().to_owned()),
            ),
            None => (None, None),
        };

        debug!(
            bucket_id = %input.bucket_id,
            prefix = %input.prefix,
            delimiter = %input.delimiter,
            count = files.len(),
            truncated = next_file_name.is_some(),
            "list_file_versions completed"
        );

        Ok(ListFileVersionsOutput {
            files,
            next_file_name,
            next_file_id,
        })
    }
}
