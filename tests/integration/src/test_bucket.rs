//! Bucket lifecycle integration tests.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ruststack_b2_core::ErrorKind;
    use ruststack_b2_model::input::{DeleteBucketInput, ListBucketsInput, UpdateBucketInput};
    use ruststack_b2_model::{B2Error, B2ErrorCode, B2Request, BucketType};

    use crate::{TEST_ACCOUNT, create_test_bucket, test_env};

    fn update(
        bucket_id: &str,
        info: &[(&str, &str)],
        if_revision_is: Option<u64>,
    ) -> B2Request<UpdateBucketInput> {
        B2Request::new(UpdateBucketInput {
            account_id: TEST_ACCOUNT.to_owned(),
            bucket_id: bucket_id.to_owned(),
            bucket_type: None,
            bucket_info: Some(
                info.iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect(),
            ),
            if_revision_is,
        })
    }

    async fn list_names(env: &crate::TestEnv) -> Vec<String> {
        env.provider
            .handle_list_buckets(B2Request::new(ListBucketsInput {
                account_id: TEST_ACCOUNT.to_owned(),
            }))
            .await
            .expect("list buckets")
            .buckets
            .into_iter()
            .map(|b| b.bucket_name)
            .collect()
    }

    #[tokio::test]
    async fn test_should_create_list_and_delete_bucket() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "lifecycle").await;
        assert_eq!(bucket.account_id, TEST_ACCOUNT);
        assert_eq!(bucket.bucket_type, BucketType::AllPrivate);
        assert!(list_names(&env).await.contains(&bucket.bucket_name));

        let deleted = env
            .provider
            .handle_delete_bucket(B2Request::new(DeleteBucketInput {
                account_id: TEST_ACCOUNT.to_owned(),
                bucket_id: bucket.bucket_id.clone(),
            }))
            .await
            .expect("delete");
        assert_eq!(deleted, bucket);
        assert!(!list_names(&env).await.contains(&bucket.bucket_name));
    }

    #[tokio::test]
    async fn test_should_reject_stale_revision_without_changing_record() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "revision").await;

        let updated = env
            .provider
            .handle_update_bucket(update(&bucket.bucket_id, &[("k", "v1")], Some(1)))
            .await
            .expect("update at current revision");
        assert_eq!(updated.revision, 2);

        let err = env
            .provider
            .handle_update_bucket(update(&bucket.bucket_id, &[("k", "stale")], Some(1)))
            .await
            .expect_err("stale revision");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        let wire: B2Error = err.into();
        assert_eq!(wire.code, B2ErrorCode::Conflict);
        assert_eq!(wire.body().status, 409);

        let deleted = env
            .provider
            .handle_delete_bucket(B2Request::new(DeleteBucketInput {
                account_id: TEST_ACCOUNT.to_owned(),
                bucket_id: bucket.bucket_id.clone(),
            }))
            .await
            .expect("delete");
        assert_eq!(deleted.revision, 2);
        assert_eq!(
            deleted.bucket_info,
            BTreeMap::from([("k".to_owned(), "v1".to_owned())])
        );
    }

    #[tokio::test]
    async fn test_should_let_only_one_concurrent_update_win() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "race").await;

        let mut handles = Vec::new();
        for i in 0..8 {
            let provider = env.provider.clone();
            let bucket_id = bucket.bucket_id.clone();
            let value = format!("writer-{i}");
            handles.push(tokio::spawn(async move {
                provider
                    .handle_update_bucket(update(&bucket_id, &[("owner", value.as_str())], Some(1)))
                    .await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            match handle.await.expect("join") {
                Ok(updated) => {
                    assert_eq!(updated.revision, 2);
                    wins += 1;
                }
                Err(err) => assert_eq!(err.kind(), ErrorKind::Conflict),
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_should_map_duplicate_name_to_wire_error() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "dup").await;

        let err = env
            .provider
            .handle_create_bucket(B2Request::new(
                ruststack_b2_model::input::CreateBucketInput {
                    account_id: "another-account".to_owned(),
                    bucket_name: bucket.bucket_name.clone(),
                    bucket_type: BucketType::AllPublic,
                    bucket_info: BTreeMap::new(),
                },
            ))
            .await
            .expect_err("duplicate name");
        let wire = err.into_b2_error();
        assert_eq!(wire.code, B2ErrorCode::DuplicateBucketName);
        assert_eq!(wire.body().code, "duplicate_bucket_name");
    }
}
