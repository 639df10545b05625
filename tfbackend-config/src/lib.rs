//! tfbackend Configuration Decoder
//!
//! This crate reads the `terraform` blocks of a Terraform configuration and
//! decodes the declared state backend. Parsing is done by [`hcl`]; this
//! crate only selects the content it knows about and converts it.
//!
//! # Example
//!
//! ```rust,ignore
//! use tfbackend_config::decode_backend;
//!
//! let body = hcl::parse(r#"
//!     backend "s3" {
//!       bucket = "my-bucket"
//!       key    = "state/prod"
//!       region = "us-east-1"
//!     }
//! "#).unwrap();
//!
//! let block = body.blocks().next().unwrap();
//! let (backend, diagnostics) = decode_backend(block);
//! assert!(diagnostics.is_empty());
//! assert_eq!(backend.kind(), "s3");
//! ```

pub mod backend;
pub mod diagnostics;
pub mod eval;
pub mod loader;
pub mod schema;

pub use backend::decode_backend;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use loader::{LoadError, LoadedModule, load_module, load_module_from_str};
pub use schema::{
    AttributeSchema, BodyContent, BodySchema, BlockHeaderSchema, PartialContent, partial_content,
    schema_for,
    BACKEND_CONFIG_SCHEMA, ROOT_SCHEMA, TERRAFORM_BLOCK_SCHEMA,
};
pub use tfbackend_core::default_backend_block;
