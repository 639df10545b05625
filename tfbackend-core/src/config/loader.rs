//! Configuration loader

use crate::config::InspectConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// Configuration loader for various formats
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<InspectConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        tracing::debug!("Loading inspect config from {} ({})", path.display(), ext);

        match ext {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            _ => Err(Error::Config(format!("Unknown config format: {}", ext))),
        }
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<InspectConfig> {
        serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<InspectConfig> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_loading() {
        let json = r#"{"fail_on_warnings": true}"#;
        let config = ConfigLoader::from_json(json).unwrap();
        assert!(config.fail_on_warnings);
        assert!(config.fallback_to_local);
    }

    #[test]
    fn test_toml_loading() {
        let toml = r#"
            extensions = [".tf", ".tofu"]
            fallback_to_local = false
        "#;
        let config = ConfigLoader::from_toml(toml).unwrap();
        assert_eq!(config.extensions, vec![".tf", ".tofu"]);
        assert!(!config.fallback_to_local);
    }

    #[test]
    fn test_load_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "fail_on_warnings = true").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert!(config.fail_on_warnings);
    }

    #[test]
    fn test_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(ConfigLoader::load(file.path()), Err(Error::Config(_))));
    }
}
