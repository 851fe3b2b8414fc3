//! Whole-configuration documents for the command-line front end.
//!
//! The host normally pushes configuration one tier at a time. For local use the
//! binary instead reads every tier from a single document and replays it
//! against a fresh plugin in the order the host would use.
//!
//! # Format
//!
//! The format is chosen by file extension (`.json`, `.yaml`/`.yml`, `.toml`):
//!
//! ```yaml
//! global:
//!   subscription_id: 0000-0000
//!   resource_group: my-resource-group
//!   resource_prefix: mysite-tst
//! remote_state:
//!   resource_group: my-state-resource-group
//!   storage_account: mystorageaccount
//!   container_name: tfstate
//! components:
//!   payment:
//!     service_plan: default
//! component_endpoints:
//!   payment:
//!     internal: https://payment.internal.example.com
//! sites:
//!   my-site:
//!     resource_prefix: my-site-prd
//! site_components:
//!   my-site:
//!     payment: {}
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::RawConfig;
use crate::core::{PluginError, Result};
use crate::plugin::AzurePlugin;

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Every configuration tier of a deployment in one structure.
///
/// Tier payloads stay loosely typed; they are decoded by the plugin exactly
/// as if the host had sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<RawConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_state: Option<RawConfig>,

    /// Component name → component configuration
    pub components: BTreeMap<String, RawConfig>,

    /// Component name → endpoint name → URL
    pub component_endpoints: BTreeMap<String, RawConfig>,

    /// Site name → site configuration
    pub sites: BTreeMap<String, RawConfig>,

    /// Site name → component name → site component configuration
    pub site_components: BTreeMap<String, BTreeMap<String, RawConfig>>,
}

impl PluginDocument {
    /// Read and parse a document, choosing the format by extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| PluginError::Other {
            message: format!(
                "Unsupported configuration document '{}': expected a .json, .yaml, .yml or .toml file",
                path.display()
            ),
        })?;

        let content = std::fs::read_to_string(path)
            .map_err(PluginError::from)
            .with_context(|| format!("Failed to read configuration document: {}", path.display()))?;

        let document = Self::parse(&content, format)
            .with_context(|| format!("Failed to parse configuration document: {}", path.display()))?;

        debug!(
            path = %path.display(),
            sites = document.sites.len(),
            components = document.components.len(),
            "Loaded configuration document"
        );
        Ok(document)
    }

    /// Parse document text in the given format.
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self> {
        let document = match format {
            DocumentFormat::Json => serde_json::from_str(content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
            DocumentFormat::Toml => toml::from_str(content)?,
        };
        Ok(document)
    }

    /// Replay the document against `plugin` in host order.
    ///
    /// Global configuration first, then remote state, components and their
    /// endpoints, sites, and finally the site components. Stops at the first
    /// error.
    pub fn apply(&self, plugin: &mut AzurePlugin) -> Result<()> {
        if let Some(global) = &self.global {
            plugin.set_global_config(global.clone())?;
        }
        if let Some(remote_state) = &self.remote_state {
            plugin.set_remote_state_backend(remote_state.clone())?;
        }
        for (name, data) in &self.components {
            plugin.set_component_config(name, data.clone())?;
        }
        for (name, endpoints) in &self.component_endpoints {
            plugin.set_component_endpoints_config(name, endpoints.clone())?;
        }
        for (site, data) in &self.sites {
            plugin.set_site_config(site, data.clone())?;
        }
        for (site, components) in &self.site_components {
            for (component, data) in components {
                plugin.set_site_component_config(site, component, data.clone())?;
            }
        }
        Ok(())
    }
}
