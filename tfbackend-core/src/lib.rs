//! tfbackend Core Library
//!
//! This crate provides the typed records shared by the tfbackend crates:
//! the decoded backend declaration, the inspected module, the inspection
//! settings and the error type.

pub mod backend;
pub mod config;
pub mod error;
pub mod module;

pub use backend::{BackendConfig, LocalBackendConfig, S3BackendConfig, default_backend_block};
pub use error::{Error, Result};
pub use module::Module;

/// tfbackend version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
