//! tfbackend - inspect the state backend of a Terraform configuration
//!
//! This is the main entry point for the tfbackend CLI.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tfbackend_config::{LoadedModule, Severity};
use tfbackend_core::config::{ConfigLoader, InspectConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// tfbackend - show where a Terraform configuration keeps its state
#[derive(Parser)]
#[command(name = "tfbackend")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a configuration directory (use "-" to read one document from stdin)
    Inspect {
        /// Configuration directory
        #[arg(default_value = ".")]
        dir: String,

        /// Inspection settings file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not assume local state when no backend is declared
        #[arg(long)]
        no_fallback: bool,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
    },

    /// Print the backend used when none is declared
    #[command(name = "default-backend")]
    DefaultBackend {
        /// Configuration directory
        dir: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Inspect { dir, config, no_fallback, strict } => {
            let mut settings = match &config {
                Some(path) => ConfigLoader::load(path)?,
                None => InspectConfig::default(),
            };
            if no_fallback {
                settings.fallback_to_local = false;
            }
            if strict {
                settings.fail_on_warnings = true;
            }

            let loaded = inspect(&dir, &settings)?;
            report(&loaded);
            println!("{}", serde_json::to_string_pretty(&loaded)?);

            if loaded.is_failure(&settings) {
                std::process::exit(1);
            }
        }

        Commands::DefaultBackend { dir } => {
            let backend = tfbackend_config::default_backend_block(&dir);
            println!("{}", serde_json::to_string_pretty(&backend)?);
        }

        Commands::Version => {
            println!("tfbackend v{}", tfbackend_core::VERSION);
        }
    }

    Ok(())
}

fn inspect(dir: &str, settings: &InspectConfig) -> anyhow::Result<LoadedModule> {
    if dir == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(tfbackend_config::load_module_from_str("<stdin>", &source, settings));
    }

    tracing::info!("Inspecting {}", dir);
    Ok(tfbackend_config::load_module(Path::new(dir), settings)?)
}

fn report(loaded: &LoadedModule) {
    for diagnostic in &loaded.diagnostics {
        match diagnostic.severity {
            Severity::Error => tracing::error!("{}", diagnostic.kind),
            Severity::Warning => tracing::warn!("{}", diagnostic.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inspect_flags() {
        let cli = Cli::parse_from(["tfbackend", "inspect", "infra", "--strict", "--no-fallback"]);
        match cli.command {
            Commands::Inspect { dir, config, no_fallback, strict } => {
                assert_eq!(dir, "infra");
                assert!(config.is_none());
                assert!(no_fallback);
                assert!(strict);
            }
            _ => panic!("expected inspect"),
        }
    }
}
