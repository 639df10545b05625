//! Inspected module type

use crate::backend::BackendConfig;
use serde::{Deserialize, Serialize};

/// What was learned about one configuration directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Directory (or document name) the module was read from
    pub path: String,

    /// `required_version` constraints, one per `terraform` block that sets it
    #[serde(default)]
    pub required_core: Vec<String>,

    /// Declared backend, or the implicit local one
    #[serde(default)]
    pub backend: Option<BackendConfig>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}
