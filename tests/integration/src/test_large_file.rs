//! Large file integration tests.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ruststack_b2_core::{B2ServiceResult, ErrorKind};
    use ruststack_b2_model::input::{
        FinishLargeFileInput, GetUploadPartUrlInput, StartLargeFileInput,
    };
    use ruststack_b2_model::{B2Request, FileAction};

    use crate::{TestEnv, create_test_bucket, list_page, test_env};

    async fn start(env: &TestEnv, bucket_id: &str, file_name: &str) -> String {
        env.provider
            .handle_start_large_file(B2Request::new(StartLargeFileInput {
                bucket_id: bucket_id.to_owned(),
                file_name: file_name.to_owned(),
                content_type: "video/mp4".to_owned(),
                file_info: BTreeMap::new(),
            }))
            .await
            .expect("start large file")
            .file_id
    }

    async fn finish(env: &TestEnv, file_id: &str, shas: Vec<String>) -> B2ServiceResult<()> {
        env.provider
            .handle_finish_large_file(B2Request::new(FinishLargeFileInput {
                file_id: file_id.to_owned(),
                part_sha1_array: shas,
            }))
            .await
            .map(|_| ())
    }

    fn upload_parts(env: &TestEnv, file_id: &str, parts: &[&str]) -> Vec<String> {
        parts
            .iter()
            .zip(1..)
            .map(|(data, n)| {
                env.backend
                    .upload_part(file_id, n, data.as_bytes())
                    .expect("upload part")
            })
            .collect()
    }

    #[tokio::test]
    async fn test_should_finish_large_file_and_list_it() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "large").await;
        let file_id = start(&env, &bucket.bucket_id, "movies/big.mp4").await;

        let url = env
            .provider
            .handle_get_upload_part_url(B2Request::new(GetUploadPartUrlInput {
                file_id: file_id.clone(),
            }))
            .await
            .expect("part url");
        assert!(url.upload_url.ends_with(&format!("/b2api/v1/b2_upload_part/{file_id}")));

        let before = list_page(&env, &bucket.bucket_id, ("", ""), "", "", 10).await;
        assert!(before.files.is_empty(), "unfinished files are not listed");

        let shas = upload_parts(&env, &file_id, &["part one", "part two", "part three"]);
        finish(&env, &file_id, shas).await.expect("finish");

        let after = list_page(&env, &bucket.bucket_id, ("", ""), "", "", 10).await;
        assert_eq!(after.files.len(), 1);
        assert_eq!(after.files[0].file_id, file_id);
        assert_eq!(after.files[0].action, FileAction::Upload);
        assert_eq!(after.files[0].content_type, "video/mp4");
    }

    #[tokio::test]
    async fn test_should_keep_file_unfinished_on_any_mismatch() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "mismatch").await;
        let file_id = start(&env, &bucket.bucket_id, "data.bin").await;
        let shas = upload_parts(&env, &file_id, &["a", "b", "c"]);

        let mut variants = Vec::new();
        for idx in 0..shas.len() {
            let mut changed = shas.clone();
            changed[idx] = "f".repeat(40);
            variants.push(changed);
        }
        variants.push(shas[..2].to_vec());
        variants.push([shas.clone(), vec![shas[0].clone()]].concat());
        variants.push(Vec::new());

        for variant in variants {
            let err = finish(&env, &file_id, variant).await.expect_err("mismatch");
            assert_eq!(err.kind(), ErrorKind::Integrity);
            assert!(env.provider.monitor().is_tracked(&file_id));
        }

        finish(&env, &file_id, shas.clone()).await.expect("exact match");
        let err = finish(&env, &file_id, shas).await.expect_err("re-finish");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_should_track_progress_while_in_flight() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "progress").await;
        let file_id = start(&env, &bucket.bucket_id, "stream.bin").await;

        assert!(env.provider.monitor().report_progress(&file_id, 1, 0.5));
        let status = env.provider.monitor().status();
        assert_eq!(status.writers[&file_id].file_name, "stream.bin");

        let shas = upload_parts(&env, &file_id, &["only"]);
        finish(&env, &file_id, shas).await.expect("finish");
        assert!(!env.provider.monitor().report_progress(&file_id, 1, 1.0));
    }
}
