//! Configuration type definitions
//!
//! These types control how a configuration directory is inspected.

use serde::{Deserialize, Serialize};

/// Settings for module inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// File name suffixes treated as configuration files
    pub extensions: Vec<String>,

    /// Use local state in the module directory when no backend is declared
    pub fallback_to_local: bool,

    /// Treat warning diagnostics as failures
    pub fail_on_warnings: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".tf".to_string()],
            fallback_to_local: true,
            fail_on_warnings: false,
        }
    }
}

impl InspectConfig {
    /// Whether `file_name` is a configuration file under these settings.
    ///
    /// Hidden files and editor leftovers (`foo.tf~`, `#foo.tf#`) never match.
    pub fn is_config_file(&self, file_name: &str) -> bool {
        if file_name.starts_with('.')
            || file_name.ends_with('~')
            || (file_name.starts_with('#') && file_name.ends_with('#'))
        {
            return false;
        }
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InspectConfig::default();
        assert_eq!(config.extensions, vec![".tf"]);
        assert!(config.fallback_to_local);
        assert!(!config.fail_on_warnings);
    }

    #[test]
    fn test_config_file_filter() {
        let config = InspectConfig::default();
        assert!(config.is_config_file("main.tf"));
        assert!(!config.is_config_file("main.tf.json"));
        assert!(!config.is_config_file(".hidden.tf"));
        assert!(!config.is_config_file("main.tf~"));
        assert!(!config.is_config_file("#main.tf#"));
        assert!(!config.is_config_file("README.md"));
    }
}
