//! File version listing integration tests.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use ruststack_b2_model::File;

    use crate::{create_test_bucket, list_all_pages, list_page, test_env, upload};

    fn names(files: &[File]) -> Vec<&str> {
        files.iter().map(|f| f.file_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_should_group_scenario_namespace_by_delimiter() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "scenario").await;
        let _x1 = upload(&env, &bucket.bucket_id, "a/x");
        let _x2 = upload(&env, &bucket.bucket_id, "a/x");
        let _y1 = upload(&env, &bucket.bucket_id, "a/y");
        let b1 = upload(&env, &bucket.bucket_id, "b");

        let out = list_page(&env, &bucket.bucket_id, ("", ""), "", "/", 10).await;
        assert_eq!(names(&out.files), vec!["a/", "b"]);
        assert!(out.files[0].is_folder());
        assert_eq!(out.files[1].file_id, b1);
        assert!(out.next_file_name.is_none());
        assert!(out.next_file_id.is_none());
    }

    #[tokio::test]
    async fn test_should_page_scenario_namespace_without_delimiter() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "scenario").await;
        let x1 = upload(&env, &bucket.bucket_id, "a/x");
        let x2 = upload(&env, &bucket.bucket_id, "a/x");
        let y1 = upload(&env, &bucket.bucket_id, "a/y");
        let _b1 = upload(&env, &bucket.bucket_id, "b");

        let out = list_page(&env, &bucket.bucket_id, ("", ""), "", "", 2).await;
        let ids: Vec<_> = out.files.iter().map(|f| f.file_id.clone()).collect();
        assert_eq!(ids, vec![x2, x1]);
        assert_eq!(out.next_file_name.as_deref(), Some("a/y"));
        assert_eq!(out.next_file_id.as_deref(), Some(y1.as_str()));
    }

    #[tokio::test]
    async fn test_should_concatenate_pages_into_full_listing() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "pages").await;
        for name in ["alpha", "beta", "beta", "beta", "delta", "gamma", "gamma", "omega"] {
            let _ = upload(&env, &bucket.bucket_id, name);
        }

        let full = list_page(&env, &bucket.bucket_id, ("", ""), "", "", 100).await;
        assert_eq!(full.files.len(), 8);

        for page_size in 1..=9 {
            let pages = list_all_pages(&env, &bucket.bucket_id, "", "", page_size).await;
            let concatenated: Vec<File> = pages.concat();
            assert_eq!(concatenated, full.files, "page size {page_size}");

            for pair in pages.windows(2) {
                let last = pair[0].last().expect("non-empty page");
                assert_ne!(pair[1].first(), Some(last), "cursor must be exclusive");
            }
        }
    }

    #[tokio::test]
    async fn test_should_never_repeat_folders_across_pages() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "folders").await;
        for name in [
            "docs/a.txt",
            "docs/b.txt",
            "docs/deep/c.txt",
            "img/1.png",
            "img/2.png",
            "readme.md",
            "src/lib.rs",
            "src/main.rs",
            "zeta",
        ] {
            let _ = upload(&env, &bucket.bucket_id, name);
        }

        let expected = vec!["docs/", "img/", "readme.md", "src/", "zeta"];
        for page_size in 1..=6 {
            let pages = list_all_pages(&env, &bucket.bucket_id, "", "/", page_size).await;
            let all: Vec<File> = pages.concat();
            assert_eq!(names(&all), expected, "page size {page_size}");

            let folders: Vec<_> = all.iter().filter(|f| f.is_folder()).collect();
            let unique: HashSet<_> = folders.iter().map(|f| f.file_name.as_str()).collect();
            assert_eq!(unique.len(), folders.len());
            for folder in &folders {
                assert!(
                    !all.iter()
                        .any(|f| !f.is_folder() && f.file_name.starts_with(&folder.file_name)),
                    "child of {} leaked",
                    folder.file_name
                );
            }
        }
    }

    #[tokio::test]
    async fn test_should_group_beneath_prefix() {
        let env = test_env();
        let bucket = create_test_bucket(&env, "prefix").await;
        for name in ["docs/a.txt", "docs/deep/c.txt", "docs/deep/d.txt", "docs/z.txt", "img/1.png"] {
            let _ = upload(&env, &bucket.bucket_id, name);
        }

        let out = list_page(&env, &bucket.bucket_id, ("", ""), "docs/", "/", 10).await;
        assert_eq!(names(&out.files), vec!["docs/a.txt", "docs/deep/", "docs/z.txt"]);

        let out = list_page(&env, &bucket.bucket_id, ("", ""), "docs/", "", 10).await;
        assert_eq!(out.files.len(), 4);
        assert!(out.files.iter().all(|f| f.file_name.starts_with("docs/")));
    }
}
