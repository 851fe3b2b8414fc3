//! Command-line interface for local rendering.
//!
//! The host normally drives the plugin over its own transport. The binary lets
//! a developer load a whole configuration document and look at the Terraform
//! the plugin would produce for a site.
//!
//! # Commands
//!
//! - `render` - render backend, providers, resources and components of a site
//! - `schema` - print the bundled validation schemas
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//!
//! Without either flag `RUST_LOG` is honoured, defaulting to `info`.
//!
//! # Examples
//!
//! ```bash
//! mach-azure-minimal render --input plugin.yaml --site my-site
//! mach-azure-minimal render -i plugin.json -s my-site --component payment --format json
//! AZURE_PLUGIN_PROVIDER_VERSION=">= 4.0.0" mach-azure-minimal render -i plugin.toml -s my-site
//! mach-azure-minimal schema
//! ```

mod render;
mod schema;

pub use render::{OutputFormat, RenderCommand, SiteRender};
pub use schema::SchemaCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` defers to `RUST_LOG`
    pub log_level: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, logging to stderr.
    ///
    /// Ignored when a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "mach-azure-minimal",
    about = "Render the Terraform produced by the minimal Azure plugin for mach composer",
    version,
    long_about = "Loads a configuration document (JSON, YAML or TOML) with global, site and component \
                  configuration, applies it to the Azure plugin and prints the generated Terraform."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the Terraform of a site
    Render(RenderCommand),

    /// Print the configuration validation schemas
    Schema(SchemaCommand),
}

impl Cli {
    /// Initialise logging and run the selected command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config)
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    pub fn execute_with_config(self, _config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Render(cmd) => cmd.execute(),
            Commands::Schema(cmd) => cmd.execute(),
        }
    }
}
