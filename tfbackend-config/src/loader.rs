//! Module loader
//!
//! Reads every configuration file of a directory and collects what the
//! `terraform` blocks declare: core version constraints and the backend.

use crate::backend::decode_backend;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::eval::decode_string;
use crate::schema::{ROOT_SCHEMA, TERRAFORM_BLOCK_SCHEMA, partial_content};
use hcl::Body;
use serde::Serialize;
use std::path::Path;
use tfbackend_core::config::InspectConfig;
use tfbackend_core::{Module, default_backend_block};
use thiserror::Error;

/// Loader errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A module together with everything reported while loading it
#[derive(Debug, Clone, Serialize)]
pub struct LoadedModule {
    #[serde(flatten)]
    pub module: Module,
    pub diagnostics: Diagnostics,
}

impl LoadedModule {
    /// Whether loading should count as a failure under `config`
    pub fn is_failure(&self, config: &InspectConfig) -> bool {
        self.diagnostics.has_errors() || (config.fail_on_warnings && !self.diagnostics.is_empty())
    }
}

/// Load every configuration file in `dir`.
///
/// Only failing to list the directory is an error; unreadable or
/// unparsable files are reported as diagnostics and skipped.
pub fn load_module(dir: impl AsRef<Path>, config: &InspectConfig) -> Result<LoadedModule, LoadError> {
    let dir = dir.as_ref();
    let dir_name = dir.to_string_lossy().to_string();

    let entries = std::fs::read_dir(dir).map_err(|source| LoadError::ReadDir {
        path: dir_name.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::ReadDir {
            path: dir_name.clone(),
            source,
        })?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if config.is_config_file(&name) {
            files.push((name, entry.path()));
        }
    }
    files.sort();

    let mut builder = ModuleBuilder::new(Module::new(dir_name.clone()));
    for (name, path) in &files {
        tracing::debug!("Reading {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(source) => builder.add_source(name, &source),
            Err(e) => builder.diagnostics.error(DiagnosticKind::Io {
                file: name.clone(),
                message: e.to_string(),
            }),
        }
    }

    let loaded = builder.finish(&dir_name, config);
    tracing::info!(
        "Loaded module {} from {} files ({} diagnostics)",
        dir_name,
        files.len(),
        loaded.diagnostics.len()
    );
    Ok(loaded)
}

/// Load a single in-memory document as a module named `name`.
///
/// The fallback backend, if enabled, is placed in the current directory.
pub fn load_module_from_str(name: &str, source: &str, config: &InspectConfig) -> LoadedModule {
    let mut builder = ModuleBuilder::new(Module::new(name));
    builder.add_source(name, source);
    builder.finish(".", config)
}

struct ModuleBuilder {
    module: Module,
    diagnostics: Diagnostics,
}

impl ModuleBuilder {
    fn new(module: Module) -> Self {
        Self {
            module,
            diagnostics: Diagnostics::new(),
        }
    }

    fn add_source(&mut self, file: &str, source: &str) {
        match hcl::parse(source) {
            Ok(body) => self.add_body(&body),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file, e);
                self.diagnostics.error(DiagnosticKind::Parse {
                    file: file.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    fn add_body(&mut self, body: &Body) {
        let root = partial_content(body, &ROOT_SCHEMA);
        self.diagnostics.extend(root.diagnostics);

        for terraform in root.content.blocks_of("terraform") {
            let content = partial_content(terraform.body(), &TERRAFORM_BLOCK_SCHEMA);
            self.diagnostics.extend(content.diagnostics);

            if let Some(attr) = content.content.attribute("required_version") {
                if let Some(constraint) = decode_string(attr, &mut self.diagnostics) {
                    self.module.required_core.push(constraint);
                }
            }

            for block in content.content.blocks_of("backend") {
                let (backend, diags) = decode_backend(block);
                self.diagnostics.extend(diags);

                if self.module.backend.is_some() {
                    tracing::warn!("Ignoring extra \"{}\" backend block", backend.kind());
                    self.diagnostics.error(DiagnosticKind::DuplicateBackend);
                    continue;
                }
                self.module.backend = Some(backend);
            }
        }
    }

    fn finish(mut self, dir: &str, config: &InspectConfig) -> LoadedModule {
        if self.module.backend.is_none() && config.fallback_to_local {
            tracing::debug!("No backend declared, using local state in {}", dir);
            self.module.backend = Some(default_backend_block(dir));
        }

        LoadedModule {
            module: self.module,
            diagnostics: self.diagnostics,
        }
    }
}
