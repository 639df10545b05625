//! Backend block decoder
//!
//! Turns a `backend "<kind>" { ... }` block into a [`BackendConfig`]. The
//! label picks the decode routine; unknown kinds are kept by name and
//! reported with a warning.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::eval::decode_string;
use crate::schema::{BACKEND_CONFIG_SCHEMA, BodyContent, partial_content};
use hcl::Block;
use tfbackend_core::{BackendConfig, LocalBackendConfig, S3BackendConfig};

/// Decode a backend block.
///
/// Always returns a record. Problems with individual attributes are
/// collected into the diagnostics and never stop the remaining attributes
/// from being decoded.
pub fn decode_backend(block: &Block) -> (BackendConfig, Diagnostics) {
    let mut diags = Diagnostics::new();

    let Some(label) = block.labels().first() else {
        diags.error(DiagnosticKind::MissingLabel {
            block_type: block.identifier().to_string(),
        });
        return (BackendConfig::Unknown { kind: String::new() }, diags);
    };

    let kind = label.as_str();
    tracing::debug!("Decoding \"{}\" backend block", kind);

    let config = match kind.to_lowercase().as_str() {
        BackendConfig::S3_KIND => BackendConfig::S3(decode_s3(block, &mut diags)),
        BackendConfig::LOCAL_KIND => BackendConfig::Local(decode_local(block, &mut diags)),
        _ => {
            tracing::warn!("Backend type \"{}\" is not supported", kind);
            diags.warning(DiagnosticKind::UnsupportedBackend { kind: kind.to_string() });
            BackendConfig::Unknown { kind: kind.to_string() }
        }
    };

    (config, diags)
}

fn decode_s3(block: &Block, diags: &mut Diagnostics) -> S3BackendConfig {
    let partial = partial_content(block.body(), &BACKEND_CONFIG_SCHEMA);
    diags.extend(partial.diagnostics);
    let content = partial.content;

    let bucket = required_string(&content, "bucket", diags);
    let key = required_string(&content, "key", diags);
    let region = required_string(&content, "region", diags);
    let dynamodb_table = content
        .attribute("dynamodb_table")
        .and_then(|attr| decode_string(attr, diags))
        .filter(|table| !table.is_empty());

    S3BackendConfig {
        bucket,
        key,
        region,
        dynamodb_table,
    }
}

fn decode_local(block: &Block, diags: &mut Diagnostics) -> LocalBackendConfig {
    let partial = partial_content(block.body(), &BACKEND_CONFIG_SCHEMA);
    diags.extend(partial.diagnostics);

    LocalBackendConfig {
        path: required_string(&partial.content, "path", diags),
    }
}

/// Decode a required string attribute; left empty when missing or invalid.
fn required_string(content: &BodyContent<'_>, name: &str, diags: &mut Diagnostics) -> String {
    match content.attribute(name) {
        Some(attr) => decode_string(attr, diags).unwrap_or_default(),
        None => {
            diags.error(DiagnosticKind::MissingAttribute { name: name.to_string() });
            String::new()
        }
    }
}
