//! End-to-end tests for the RustStack B2 control plane.
//!
//! Each test drives [`RustStackB2`] through its public handlers against a
//! fresh [`MemoryBackend`], the same way a gateway would. No server is
//! required.
//!
//! Run them with:
//! ```text
//! cargo test -p ruststack-b2-integration
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Once};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use ruststack_b2_core::{B2Config, MemoryBackend, RustStackB2};
use ruststack_b2_model::input::{CreateBucketInput, ListFileVersionsInput};
use ruststack_b2_model::output::ListFileVersionsOutput;
use ruststack_b2_model::{B2Request, Bucket, BucketType, File};

static INIT: Once = Once::new();

/// Account every test environment is seeded with.
pub const TEST_ACCOUNT: &str = "test-account";

/// Application key of [`TEST_ACCOUNT`].
pub const TEST_KEY: &str = "test-key";

/// Initialize tracing (once).
///
/// `RUST_LOG` wins; otherwise the configured log level is used.
fn init_tracing(config: &B2Config) {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
            )
            .with_test_writer()
            .init();
    });
}

/// A provider plus the in-memory backend behind it.
#[derive(Debug, Clone)]
pub struct TestEnv {
    /// The control plane under test.
    pub provider: RustStackB2,
    /// Backend used for out-of-band seeding (accounts, uploads).
    pub backend: Arc<MemoryBackend>,
}

/// Create a provider backed by a fresh [`MemoryBackend`] with
/// [`TEST_ACCOUNT`] registered.
#[must_use]
pub fn test_env() -> TestEnv {
    let config = B2Config::from_env();
    init_tracing(&config);

    let (provider, backend) = RustStackB2::in_memory(config);
    backend.add_account(TEST_ACCOUNT, TEST_KEY);
    TestEnv { provider, backend }
}

/// `Authorization: Basic` header value for `account:key`.
#[must_use]
pub fn basic_auth(account: &str, key: &str) -> String {
    format!("Basic {}", BASE64_STANDARD.encode(format!("{account}:{key}")))
}

/// Generate a unique, valid bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a private bucket owned by [`TEST_ACCOUNT`].
pub async fn create_test_bucket(env: &TestEnv, prefix: &str) -> Bucket {
    let name = test_bucket_name(prefix);
    env.provider
        .handle_create_bucket(B2Request::new(CreateBucketInput {
            account_id: TEST_ACCOUNT.to_owned(),
            bucket_name: name.clone(),
            bucket_type: BucketType::AllPrivate,
            bucket_info: BTreeMap::new(),
        }))
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"))
}

/// Upload `name` as a new version and return its file id.
#[must_use]
pub fn upload(env: &TestEnv, bucket_id: &str, name: &str) -> String {
    env.backend
        .upload_file(bucket_id, name, "text/plain", BTreeMap::new())
        .unwrap_or_else(|e| panic!("failed to upload {name}: {e}"))
}

/// Request one page of `b2_list_file_versions`.
pub async fn list_page(
    env: &TestEnv,
    bucket_id: &str,
    start: (&str, &str),
    prefix: &str,
    delimiter: &str,
    max_file_count: u32,
) -> ListFileVersionsOutput {
    env.provider
        .handle_list_file_versions(B2Request::new(ListFileVersionsInput {
            bucket_id: bucket_id.to_owned(),
            start_file_name: start.0.to_owned(),
            start_file_id: start.1.to_owned(),
            prefix: prefix.to_owned(),
            delimiter: delimiter.to_owned(),
            max_file_count,
        }))
        .await
        .unwrap_or_else(|e| panic!("list_file_versions failed: {e}"))
}

/// Follow next-page cursors until the listing is exhausted.
pub async fn list_all_pages(
    env: &TestEnv,
    bucket_id: &str,
    prefix: &str,
    delimiter: &str,
    page_size: u32,
) -> Vec<Vec<File>> {
    let mut pages = Vec::new();
    let (mut name, mut file_id) = (String::new(), String::new());
    loop {
        let page = list_page(env, bucket_id, (&name, &file_id), prefix, delimiter, page_size).await;
        let next = page.next_file_name.clone().zip(page.next_file_id.clone());
        pages.push(page.files);
        match next {
            Some((next_name, next_id)) => {
                name = next_name;
                file_id = next_id;
            }
            None => return pages,
        }
    }
}

mod test_auth;
mod test_bucket;
mod test_large_file;
mod test_list;
