//! Large file operation handlers.
//!
//! Implements `b2_start_large_file` and `b2_finish_large_file`. Parts are
//! uploaded out of band; the control plane only registers the file and
//! checks, on finish, that the client's ordered SHA1 list matches what the
//! backend recorded.

use ruststack_b2_model::input::{FinishLargeFileInput, StartLargeFileInput};
use ruststack_b2_model::output::{FinishLargeFileOutput, StartLargeFileOutput};
use ruststack_b2_model::{B2Request, File, FileAction};
use tracing::{debug, warn};

use crate::codec::encode_record;
use crate::error::{B2ServiceError, B2ServiceResult};
use crate::provider::RustStackB2;
use crate::utils::{generate_file_id, timestamp_millis};
use crate::validation::validate_file_name;

impl RustStackB2 {
    /// Register a new large file as in progress.
    pub async fn handle_start_large_file(
        &self,
        req: B2Request<StartLargeFileInput>,
    ) -> B2ServiceResult<StartLargeFileOutput> {
        let input = req.input;
        validate_file_name(&input.file_name)?;

        let file = File {
            file_id: generate_file_id(),
            file_name: input.file_name,
            bucket_id: input.bucket_id,
            content_type: input.content_type,
            file_info: input.file_info,
            action: FileAction::Start,
            upload_timestamp: timestamp_millis(),
        };
        let record = encode_record(&file)?;
        self.files
            .start_large(&file.bucket_id, &file.file_name, &file.file_id, record)
            .await?;
        self.monitor.add_writer(&file.file_id, &file.file_name);

        debug!(
            bucket_id = %file.bucket_id,
            file_name = %file.file_name,
            file_id = %file.file_id,
            "start_large_file completed"
        );

        Ok(StartLargeFileOutput {
            file_id: file.file_id,
            file_name: file.file_name,
            bucket_id: file.bucket_id,
            content_type: file.content_type,
            file_info: file.file_info,
            upload_timestamp: file.upload_timestamp,
        })
    }

    /// Finish a large file if the submitted part SHA1 list matches the
    /// uploaded parts exactly, in order.
    pub async fn handle_finish_large_file(
        &self,
        req: B2Request<FinishLargeFileInput>,
    ) -> B2ServiceResult<FinishLargeFileOutput> {
        let input = req.input;
        let recorded = self.files.parts(&input.file_id).await?;

        if recorded != input.part_sha1_array {
            warn!(
                file_id = %input.file_id,
                recorded = recorded.len(),
                submitted = input.part_sha1_array.len(),
                "part SHA1 array mismatch"
            );
            return Err(B2ServiceError::PartChecksumMismatch {
                file_id: input.file_id,
            });
        }

        self.files.finish_large(&input.file_id).await?;
        self.monitor.remove_writer(&input.file_id);

        debug!(file_id = %input.file_id, parts = recorded.len(), "finish_large_file completed");
        Ok(FinishLargeFileOutput {})
    }
}
