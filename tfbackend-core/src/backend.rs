//! Backend type definitions
//!
//! A backend declaration names where a configuration keeps its remote state.
//! Only the `s3` and `local` kinds carry a typed payload; any other kind is
//! kept by name so callers can still report it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State file name used by the implicit local backend
pub const DEFAULT_STATE_FILE: &str = "terraform.tfstate";

/// Decoded `backend "<kind>" { ... }` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BackendRepr", into = "BackendRepr")]
pub enum BackendConfig {
    /// `backend "s3"`
    S3(S3BackendConfig),

    /// `backend "local"`
    Local(LocalBackendConfig),

    /// Any other backend kind, keeping the label as written
    Unknown { kind: String },
}

/// Settings of an S3 backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3BackendConfig {
    pub bucket: String,
    pub key: String,
    pub region: String,

    /// Lock table; `None` when not configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamodb_table: Option<String>,
}

/// Settings of a local backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalBackendConfig {
    pub path: String,
}

impl BackendConfig {
    pub const S3_KIND: &'static str = "s3";
    pub const LOCAL_KIND: &'static str = "local";

    /// Backend kind as it appears in the `type` field
    pub fn kind(&self) -> &str {
        match self {
            BackendConfig::S3(_) => Self::S3_KIND,
            BackendConfig::Local(_) => Self::LOCAL_KIND,
            BackendConfig::Unknown { kind } => kind,
        }
    }

    /// Local backend storing state in `dir`
    pub fn default_for_dir(dir: &str) -> Self {
        BackendConfig::Local(LocalBackendConfig {
            path: format!("{}/{}", dir, DEFAULT_STATE_FILE),
        })
    }

    pub fn as_s3(&self) -> Option<&S3BackendConfig> {
        match self {
            BackendConfig::S3(s3) => Some(s3),
            _ => None,
        }
    }

    pub fn as_local(&self) -> Option<&LocalBackendConfig> {
        match self {
            BackendConfig::Local(local) => Some(local),
            _ => None,
        }
    }

    /// Whether the kind has a typed payload
    pub fn is_supported(&self) -> bool {
        !matches!(self, BackendConfig::Unknown { .. })
    }
}

/// Backend used when a configuration declares none: local state next to
/// the configuration files.
pub fn default_backend_block(dir: &str) -> BackendConfig {
    BackendConfig::default_for_dir(dir)
}

impl fmt::Display for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendConfig::S3(s3) => write!(f, "s3://{}/{} ({})", s3.bucket, s3.key, s3.region),
            BackendConfig::Local(local) => write!(f, "local:{}", local.path),
            BackendConfig::Unknown { kind } => write!(f, "{} (unsupported)", kind),
        }
    }
}

/// Wire shape: `{"type": ..., "s3": {...}}` / `{"type": ..., "local": {...}}`
#[derive(Serialize, Deserialize)]
struct BackendRepr {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    s3: Option<S3BackendConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    local: Option<LocalBackendConfig>,
}

impl From<BackendConfig> for BackendRepr {
    fn from(config: BackendConfig) -> Self {
        match config {
            BackendConfig::S3(s3) => BackendRepr {
                kind: BackendConfig::S3_KIND.to_string(),
                s3: Some(s3),
                local: None,
            },
            BackendConfig::Local(local) => BackendRepr {
                kind: BackendConfig::LOCAL_KIND.to_string(),
                s3: None,
                local: Some(local),
            },
            BackendConfig::Unknown { kind } => BackendRepr { kind, s3: None, local: None },
        }
    }
}

impl TryFrom<BackendRepr> for BackendConfig {
    type Error = crate::Error;

    fn try_from(repr: BackendRepr) -> Result<Self, Self::Error> {
        let kind = repr.kind.to_lowercase();
        match (repr.s3, repr.local) {
            (Some(_), Some(_)) => Err(crate::Error::Backend(
                "record carries both s3 and local settings".to_string(),
            )),
            (Some(s3), None) if kind == Self::S3_KIND => Ok(BackendConfig::S3(s3)),
            (None, Some(local)) if kind == Self::LOCAL_KIND => Ok(BackendConfig::Local(local)),
            (None, None) if kind != Self::S3_KIND && kind != Self::LOCAL_KIND => {
                Ok(BackendConfig::Unknown { kind: repr.kind })
            }
            _ => Err(crate::Error::Backend(format!(
                "settings do not match backend type '{}'",
                repr.kind
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_backend_block() {
        let backend = default_backend_block("/srv/proj");
        assert_eq!(backend.kind(), "local");
        assert_eq!(backend.as_local().unwrap().path, "/srv/proj/terraform.tfstate");
        assert!(backend.as_s3().is_none());
    }

    #[test]
    fn test_s3_json_shape() {
        let backend = BackendConfig::S3(S3BackendConfig {
            bucket: "my-bucket".to_string(),
            key: "state/prod".to_string(),
            region: "us-east-1".to_string(),
            dynamodb_table: None,
        });

        let value = serde_json::to_value(&backend).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "s3",
                "s3": { "bucket": "my-bucket", "key": "state/prod", "region": "us-east-1" }
            })
        );
    }

    #[test]
    fn test_s3_lock_table_serialized_camel_case() {
        let backend = BackendConfig::S3(S3BackendConfig {
            bucket: "b".to_string(),
            key: "k".to_string(),
            region: "r".to_string(),
            dynamodb_table: Some("lock-table".to_string()),
        });

        let value = serde_json::to_value(&backend).unwrap();
        assert_eq!(value["s3"]["dynamodbTable"], "lock-table");
    }

    #[test]
    fn test_unknown_has_only_type() {
        let backend = BackendConfig::Unknown { kind: "AzureRM".to_string() };
        let value = serde_json::to_value(&backend).unwrap();
        assert_eq!(value, json!({ "type": "AzureRM" }));
        assert!(!backend.is_supported());
    }

    #[test]
    fn test_rejects_both_payloads() {
        let value = json!({
            "type": "s3",
            "s3": { "bucket": "b", "key": "k", "region": "r" },
            "local": { "path": "/tmp/x" }
        });
        assert!(serde_json::from_value::<BackendConfig>(value).is_err());
    }

    #[test]
    fn test_rejects_mismatched_payload() {
        let value = json!({ "type": "local", "s3": { "bucket": "b", "key": "k", "region": "r" } });
        assert!(serde_json::from_value::<BackendConfig>(value).is_err());

        let value = json!({ "type": "s3" });
        assert!(serde_json::from_value::<BackendConfig>(value).is_err());
    }

    #[test]
    fn test_reads_local_record() {
        let value = json!({ "type": "local", "local": { "path": "/tmp/state.tfstate" } });
        let backend: BackendConfig = serde_json::from_value(value).unwrap();
        assert_eq!(
            backend,
            BackendConfig::Local(LocalBackendConfig { path: "/tmp/state.tfstate".to_string() })
        );
    }
}
