//! B2 control plane for RustStack.
//!
//! This crate implements the server side of a B2-compatible object storage
//! API: account authorization, bucket lifecycle with optimistic concurrency,
//! large file orchestration, and versioned, folder-aware, paginated listing.
//! Storage is delegated to four pluggable capability contracts; an in-memory
//! implementation of all four is included.
//!
//! # Architecture
//!
//! ```text
//! B2 JSON gateway (external)
//!        |
//!        v
//! RustStackB2 (ops::* handlers)
//!        |                \
//!        v                 v
//!   listing engine     record codec (CBOR)
//!        |                 |
//!        v                 v
//! AccountManager / BucketManager / FileOrganizer / ListManager
//!        |
//!        v
//!   MemoryBackend (or any other backend)
//! ```

pub mod backend;
pub mod codec;
pub mod config;
pub mod error;
pub mod listing;
pub mod memory;
pub mod monitor;
mod ops;
pub mod provider;
pub mod utils;
pub mod validation;

pub use config::B2Config;
pub use error::{B2ServiceError, B2ServiceResult, ErrorKind};
pub use memory::MemoryBackend;
pub use provider::RustStackB2;
