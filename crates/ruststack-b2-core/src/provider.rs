//! B2 control-plane provider.
//!
//! [`RustStackB2`] composes the four backend capability contracts into the
//! B2 RPC surface. It holds no state of its own besides the informational
//! [`TransferMonitor`]; every record lives behind a contract. Individual
//! operations are implemented in the [`crate::ops`] submodules.

use std::sync::Arc;

use crate::backend::{AccountManager, BucketManager, FileOrganizer, ListManager};
use crate::config::B2Config;
use crate::memory::MemoryBackend;
use crate::monitor::TransferMonitor;

/// The main B2 provider.
///
/// All fields are `Arc`-wrapped for cheap cloning and shared ownership
/// across handler tasks.
///
/// # Examples
///
/// ```
/// use ruststack_b2_core::RustStackB2;
/// use ruststack_b2_core::config::B2Config;
///
/// let (provider, _backend) = RustStackB2::in_memory(B2Config::default());
/// assert_eq!(provider.config().default_max_file_count, 1000);
/// ```
#[derive(Clone)]
pub struct RustStackB2 {
    /// Account authentication and routing.
    pub(crate) accounts: Arc<dyn AccountManager>,
    /// Bucket record storage.
    pub(crate) buckets: Arc<dyn BucketManager>,
    /// File record and large-file part storage.
    pub(crate) files: Arc<dyn FileOrganizer>,
    /// Sorted name space access.
    pub(crate) list: Arc<dyn ListManager>,
    /// Provider configuration.
    pub(crate) config: Arc<B2Config>,
    /// In-flight large uploads.
    pub(crate) monitor: Arc<TransferMonitor>,
}

impl std::fmt::Debug for RustStackB2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustStackB2")
            .field("config", &self.config)
            .field("monitor", &self.monitor)
            .finish_non_exhaustive()
    }
}

impl RustStackB2 {
    /// Create a provider over the given backends.
    #[must_use]
    pub fn new(
        config: B2Config,
        accounts: Arc<dyn AccountManager>,
        buckets: Arc<dyn BucketManager>,
        files: Arc<dyn FileOrganizer>,
        list: Arc<dyn ListManager>,
    ) -> Self {
        Self {
            accounts,
            buckets,
            files,
            list,
            config: Arc::new(config),
            monitor: Arc::new(TransferMonitor::new()),
        }
    }

    /// Create a provider whose four contracts are served by one
    /// [`MemoryBackend`]. The backend is returned as well so callers can seed
    /// accounts and upload data out of band.
    #[must_use]
    pub fn in_memory(config: B2Config) -> (Self, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new(&config));
        let provider = Self::new(
            config,
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
        );
        (provider, backend)
    }

    /// Returns a reference to the provider configuration.
    #[must_use]
    pub fn config(&self) -> &B2Config {
        &self.config
    }

    /// Returns a reference to the transfer monitor.
    #[must_use]
    pub fn monitor(&self) -> &TransferMonitor {
        &self.monitor
    }
}
