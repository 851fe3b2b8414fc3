//! `render` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::PluginDocument;
use crate::constants::{ENVIRONMENT_ENV_VAR, PROVIDER_VERSION_ENV_VAR};
use crate::plugin::AzurePlugin;
use crate::render::ComponentDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terraform fragments separated by comment headers
    Text,
    /// All renders as one JSON object
    Json,
}

/// Render the Terraform of a site from a configuration document.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Configuration document (.json, .yaml, .yml or .toml)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Site to render
    #[arg(short, long)]
    pub site: String,

    /// Only render this component
    #[arg(short, long)]
    pub component: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Deployment environment, used for the `Environment` tag
    #[arg(long, env = ENVIRONMENT_ENV_VAR, default_value = "")]
    pub environment: String,

    /// `azurerm` provider version or version constraint
    #[arg(long, env = PROVIDER_VERSION_ENV_VAR)]
    pub provider_version: Option<String>,
}

/// Everything rendered for one site.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteRender {
    pub site: String,
    pub backend: String,
    pub providers: String,
    pub resources: String,
    pub components: BTreeMap<String, ComponentDescriptor>,
}

impl SiteRender {
    /// Whether the plugin produced nothing for the site.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
            && self.providers.is_empty()
            && self.resources.is_empty()
            && self.components.is_empty()
    }

    /// Render every section, or only `component` when given.
    ///
    /// Without a component filter every component attached to the site is
    /// rendered.
    pub fn collect(plugin: &AzurePlugin, site: &str, component: Option<&str>) -> Result<Self> {
        let mut render = Self {
            site: site.to_string(),
            backend: plugin.render_terraform_state_backend(site)?,
            providers: plugin.render_terraform_providers(site)?,
            resources: plugin.render_terraform_resources(site)?,
            components: BTreeMap::new(),
        };

        let names: Vec<String> = match component {
            Some(name) => vec![name.to_string()],
            None => plugin
                .store()
                .resolve_site(site)
                .map(|config| config.components.into_keys().collect())
                .unwrap_or_default(),
        };

        for name in names {
            let descriptor = plugin
                .render_terraform_component(site, &name)
                .with_context(|| format!("Failed to render component '{name}' of site '{site}'"))?;
            if let Some(descriptor) = descriptor {
                render.components.insert(name, descriptor);
            }
        }

        Ok(render)
    }

    /// Text output with one commented header per section.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut sections: Vec<String> = Vec::new();
        for (title, body) in [
            ("backend", &self.backend),
            ("providers", &self.providers),
            ("resources", &self.resources),
        ] {
            if !body.is_empty() {
                sections.push(format!("# {title}\n{body}"));
            }
        }
        for (name, descriptor) in &self.components {
            sections.push(format!(
                "# component: {name}\n# providers: {}\n{}",
                descriptor.providers.join(", "),
                descriptor.variables
            ));
        }
        sections.join("\n\n")
    }
}

impl RenderCommand {
    pub fn execute(self) -> Result<()> {
        let document = PluginDocument::load(&self.input)?;

        let mut plugin = AzurePlugin::new();
        plugin.configure(&self.environment, self.provider_version.as_deref().unwrap_or(""))?;
        document.apply(&mut plugin).with_context(|| {
            format!("Failed to apply configuration document: {}", self.input.display())
        })?;
        debug!(
            sites = plugin.store().site_names().count(),
            enabled = plugin.is_enabled(),
            "Applied configuration document"
        );

        let render = SiteRender::collect(&plugin, &self.site, self.component.as_deref())?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&render)?),
            OutputFormat::Text if render.is_empty() => {
                info!(site = %self.site, "Nothing to render");
                eprintln!("{} site '{}' has no azure configuration", "note:".yellow(), self.site);
            }
            OutputFormat::Text => println!("{}", render.to_text()),
        }
        Ok(())
    }
}
