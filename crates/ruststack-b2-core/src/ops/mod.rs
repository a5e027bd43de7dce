//! B2 operation handlers.
//!
//! This module contains the implementations of all B2 operations, organized
//! into submodules by category. Each submodule exposes `handle_*` methods
//! on [`crate::provider::RustStackB2`].
//!
//! A gateway maps each B2 JSON endpoint onto one handler and maps the
//! returned [`crate::error::B2ServiceError`] onto the wire via
//! [`ruststack_b2_model::B2Error`].

pub mod account;
pub mod bucket;
pub mod large_file;
pub mod list;
