//! Bucket operation handlers.
//!
//! Implements `b2_list_buckets`, `b2_create_bucket`, `b2_update_bucket` and
//! `b2_delete_bucket`. Bucket records travel to and from the
//! [`crate::backend::BucketManager`] as codec blobs.

use ruststack_b2_model::input::{
    CreateBucketInput, DeleteBucketInput, ListBucketsInput, UpdateBucketInput,
};
use ruststack_b2_model::output::ListBucketsOutput;
use ruststack_b2_model::{B2Request, Bucket};
use tracing::debug;

use crate::codec::{decode_record, encode_record};
use crate::error::{B2ServiceError, B2ServiceResult};
use crate::provider::RustStackB2;
use crate::utils::generate_bucket_id;
use crate::validation::validate_bucket_name;

/// Revision assigned to a freshly created bucket.
const INITIAL_REVISION: u64 = 1;

impl RustStackB2 {
    /// List every bucket owned by an account, sorted by name.
    pub async fn handle_list_buckets(
        &self,
        req: B2Request<ListBucketsInput>,
    ) -> B2ServiceResult<ListBucketsOutput> {
        let account_id = req.input.account_id;

        let blobs = self.buckets.list_buckets(&account_id).await?;
        let mut buckets = blobs
            .iter()
            .map(|blob| decode_record::<Bucket>(blob))
            .collect::<B2ServiceResult<Vec<_>>>()?;
        buckets.sort_by(|a, b| a.bucket_name.cmp(&b.bucket_name));

        debug!(account_id = %account_id, count = buckets.len(), "list_buckets completed");
        Ok(ListBucketsOutput { buckets })
    }

    /// Create a bucket and return its full record.
    pub async fn handle_create_bucket(
        &self,
        req: B2Request<CreateBucketInput>,
    ) -> B2ServiceResult<Bucket> {
        let input = req.input;
        validate_bucket_name(&input.bucket_name)?;

        let bucket = Bucket {
            account_id: input.account_id,
            bucket_id: generate_bucket_id(),
            bucket_name: input.bucket_name,
            bucket_type: input.bucket_type,
            bucket_info: input.bucket_info,
            revision: INITIAL_REVISION,
        };
        let record = encode_record(&bucket)?;
        self.buckets
            .add_bucket(&bucket.bucket_id, &bucket.bucket_name, record)
            .await?;

        debug!(
            bucket_id = %bucket.bucket_id,
            bucket_name = %bucket.bucket_name,
            "create_bucket completed"
        );
        Ok(bucket)
    }

    /// Update a bucket's type and info under optimistic concurrency.
    ///
    /// When `if_revision_is` is given and does not match the stored revision
    /// nothing is written. Otherwise the record is written back with the
    /// revision advanced by one, and the backend rejects the write if another
    /// updater got there first.
    pub async fn handle_update_bucket(
        &self,
        req: B2Request<UpdateBucketInput>,
    ) -> B2ServiceResult<Bucket> {
        let input = req.input;
        let current = self.owned_bucket(&input.account_id, &input.bucket_id).await?;

        if let Some(expected) = input.if_revision_is {
            if expected != current.revision {
                return Err(B2ServiceError::RevisionMismatch {
                    bucket_id: input.bucket_id,
                    expected,
                    actual: current.revision,
                });
            }
        }

        let mut updated = current.clone();
        if let Some(bucket_type) = input.bucket_type {
            updated.bucket_type = bucket_type;
        }
        if let Some(bucket_info) = input.bucket_info {
            updated.bucket_info = bucket_info;
        }
        updated.revision = current.revision + 1;

        let record = encode_record(&updated)?;
        self.buckets
            .update_bucket(&updated.bucket_id, current.revision, record)
            .await?;

        debug!(
            bucket_id = %updated.bucket_id,
            revision = updated.revision,
            "update_bucket completed"
        );
        Ok(updated)
    }

    /// Delete a bucket and return its record as it was before deletion.
    pub async fn handle_delete_bucket(
        &self,
        req: B2Request<DeleteBucketInput>,
    ) -> B2ServiceResult<Bucket> {
        let input = req.input;
        let bucket = self.owned_bucket(&input.account_id, &input.bucket_id).await?;

        self.buckets.remove_bucket(&bucket.bucket_id).await?;

        debug!(
            bucket_id = %bucket.bucket_id,
            bucket_name = %bucket.bucket_name,
            "delete_bucket completed"
        );
        Ok(bucket)
    }

    /// Read and decode a bucket, hiding buckets of other accounts.
    async fn owned_bucket(&self, account_id: &str, bucket_id: &str) -> B2ServiceResult<Bucket> {
        let bucket: Bucket = decode_record(&self.buckets.get_bucket(bucket_id).await?)?;
        if bucket.account_id != account_id {
            return Err(B2ServiceError::NoSuchBucket {
                bucket_id: bucket_id.to_owned(),
            });
        }
        Ok(bucket)
    }
}
