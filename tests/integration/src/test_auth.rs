//! Account authorization and routing integration tests.

#[cfg(test)]
mod tests {
    use ruststack_b2_core::ErrorKind;
    use ruststack_b2_model::B2Request;
    use ruststack_b2_model::input::{AuthorizeAccountInput, GetUploadUrlInput};

    use crate::{TEST_ACCOUNT, TEST_KEY, basic_auth, create_test_bucket, test_env};

    #[tokio::test]
    async fn test_should_authorize_and_use_token() {
        let env = test_env();
        let out = env
            .provider
            .handle_authorize_account(
                B2Request::new(AuthorizeAccountInput {})
                    .with_authorization(&basic_auth(TEST_ACCOUNT, TEST_KEY)),
            )
            .await
            .expect("authorize");

        assert_eq!(out.account_id, TEST_ACCOUNT);
        assert!(!out.authorization_token.is_empty());
        assert_eq!(out.api_url, env.provider.config().api_url);
        assert_eq!(out.minimum_part_size, out.recommended_part_size);
        assert!(out.absolute_minimum_part_size <= out.recommended_part_size);

        let req = B2Request::new(()).with_authorization(&out.authorization_token);
        env.provider
            .check_authorization(&req, "b2_list_buckets")
            .await
            .expect("token accepted");
    }

    #[tokio::test]
    async fn test_should_classify_credential_failures() {
        let env = test_env();
        let cases = [
            (None, ErrorKind::Authentication),
            (Some("Bearer token".to_owned()), ErrorKind::Authentication),
            (Some("Basic %%%".to_owned()), ErrorKind::Authentication),
            (Some(basic_auth(TEST_ACCOUNT, "wrong")), ErrorKind::Authentication),
            (Some(basic_auth("a", "b:c")), ErrorKind::Validation),
        ];

        for (header, expected) in cases {
            let mut req = B2Request::new(AuthorizeAccountInput {});
            if let Some(value) = &header {
                req = req.with_authorization(value);
            }
            let err = env
                .provider
                .handle_authorize_account(req)
                .await
                .expect_err("should be rejected");
            assert_eq!(err.kind(), expected, "header {header:?}");
        }
    }

    #[tokio::test]
    async fn test_should_build_upload_url_for_bucket() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "upload-url").await;

        let out = env
            .provider
            .handle_get_upload_url(B2Request::new(GetUploadUrlInput {
                bucket_id: bucket.bucket_id.clone(),
            }))
            .await
            .expect("upload url");

        assert_eq!(out.bucket_id, bucket.bucket_id);
        assert!(out.upload_url.starts_with(&env.provider.config().upload_host));
        assert!(
            out.upload_url
                .ends_with(&format!("/b2api/v1/b2_upload_file/{}", bucket.bucket_id))
        );
    }
}
