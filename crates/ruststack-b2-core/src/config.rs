//! B2-specific configuration.
//!
//! Provides [`B2Config`] for configuring the RustStack B2 control plane.
//! Values are loaded from environment variables, following the same
//! conventions as the other RustStack services.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// B2 service configuration.
///
/// # Examples
///
/// ```
/// use ruststack_b2_core::config::B2Config;
///
/// let config = B2Config::default();
/// assert_eq!(config.default_max_file_count, 1000);
/// assert!(config.recommended_part_size > config.absolute_minimum_part_size);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct B2Config {
    /// Base URL returned as `apiUrl` by `b2_authorize_account`.
    #[builder(default = String::from("http://localhost:4566"))]
    pub api_url: String,

    /// Base URL returned as `downloadUrl` by `b2_authorize_account`.
    #[builder(default = String::from("http://localhost:4566"))]
    pub download_url: String,

    /// Host that upload and part-upload URLs point at.
    #[builder(default = String::from("http://localhost:4566"))]
    pub upload_host: String,

    /// Page size used when a listing request asks for zero files.
    #[builder(default = 1000)]
    pub default_max_file_count: u32,

    /// Largest page size a listing request may ask for.
    #[builder(default = 10_000)]
    pub max_file_count_limit: u32,

    /// Recommended large-file part size in bytes.
    #[builder(default = 100_000_000)]
    pub recommended_part_size: u64,

    /// Smallest accepted large-file part size in bytes.
    #[builder(default = 5_000_000)]
    pub absolute_minimum_part_size: u64,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for B2Config {
    fn default() -> Self {
        Self {
            api_url: String::from("http://localhost:4566"),
            download_url: String::from("http://localhost:4566"),
            upload_host: String::from("http://localhost:4566"),
            default_max_file_count: 1000,
            max_file_count_limit: 10_000,
            recommended_part_size: 100_000_000,
            absolute_minimum_part_size: 5_000_000,
            log_level: String::from("info"),
        }
    }
}

impl B2Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `B2_API_URL` | `http://localhost:4566` |
    /// | `B2_DOWNLOAD_URL` | `http://localhost:4566` |
    /// | `B2_UPLOAD_HOST` | `http://localhost:4566` |
    /// | `B2_DEFAULT_MAX_FILE_COUNT` | `1000` |
    /// | `B2_MAX_FILE_COUNT_LIMIT` | `10000` |
    /// | `B2_RECOMMENDED_PART_SIZE` | `100000000` |
    /// | `B2_ABSOLUTE_MINIMUM_PART_SIZE` | `5000000` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// Unparseable numeric values are ignored and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("B2_API_URL") {
            config.api_url = v;
        }
        if let Ok(v) = std::env::var("B2_DOWNLOAD_URL") {
            config.download_url = v;
        }
        if let Ok(v) = std::env::var("B2_UPLOAD_HOST") {
            config.upload_host = v;
        }
        if let Ok(v) = std::env::var("B2_DEFAULT_MAX_FILE_COUNT") {
            if let Ok(n) = v.parse::<u32>() {
                if n > 0 {
                    config.default_max_file_count = n;
                }
            }
        }
        if let Ok(v) = std::env::var("B2_MAX_FILE_COUNT_LIMIT") {
            if let Ok(n) = v.parse::<u32>() {
                if n > 0 {
                    config.max_file_count_limit = n;
                }
            }
        }
        if let Ok(v) = std::env::var("B2_RECOMMENDED_PART_SIZE") {
            if let Ok(n) = v.parse::<u64>() {
                config.recommended_part_size = n;
            }
        }
        if let Ok(v) = std::env::var("B2_ABSOLUTE_MINIMUM_PART_SIZE") {
            if let Ok(n) = v.parse::<u64>() {
                config.absolute_minimum_part_size = n;
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
