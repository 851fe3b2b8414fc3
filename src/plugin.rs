//! Host-facing plugin facade.
//!
//! [`AzurePlugin`] is what the orchestrator talks to: it receives the
//! configuration tiers one call at a time and answers render requests for a
//! site or a (site, component) pair.
//!
//! ```rust
//! use mach_azure_minimal::AzurePlugin;
//! use serde_json::json;
//!
//! # fn main() -> mach_azure_minimal::core::Result<()> {
//! let object = |v: serde_json::Value| v.as_object().cloned().unwrap_or_default();
//!
//! let mut plugin = AzurePlugin::new();
//! plugin.configure("test", "")?;
//! plugin.set_global_config(object(json!({"subscription_id": "sub", "resource_group": "grp"})))?;
//! plugin.set_site_config("my-site", object(json!({"resource_prefix": "my-site-tst"})))?;
//! plugin.set_site_component_config("my-site", "payment", object(json!({})))?;
//!
//! assert!(plugin.is_enabled());
//! assert!(plugin.render_terraform_providers("my-site")?.contains("~> 3.42.0"));
//!
//! let component = plugin.render_terraform_component("my-site", "payment")?.unwrap();
//! assert_eq!(component.providers, vec!["azurerm = azurerm"]);
//! # Ok(())
//! # }
//! ```

use crate::config::{PluginSettings, RawConfig};
use crate::constants::PLUGIN_IDENTIFIER;
use crate::core::Result;
use crate::render::{ComponentDescriptor, RenderPipeline};
use crate::schema::ValidationSchema;
use crate::store::ConfigStore;

/// The Azure plugin: configuration store plus plugin settings.
#[derive(Debug, Clone, Default)]
pub struct AzurePlugin {
    settings: PluginSettings,
    store: ConfigStore,
}

impl AzurePlugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier the host registers the plugin under.
    #[must_use]
    pub const fn identifier(&self) -> &'static str {
        PLUGIN_IDENTIFIER
    }

    /// Set the deployment environment and, when non-empty, the provider version.
    pub fn configure(&mut self, environment: &str, provider_version: &str) -> Result<()> {
        self.settings.configure(environment, provider_version)
    }

    /// Whether any site uses this plugin.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.store.is_empty()
    }

    /// Schemas for every configuration tier.
    pub fn validation_schema(&self) -> Result<ValidationSchema> {
        ValidationSchema::bundled()
    }

    pub fn set_global_config(&mut self, data: RawConfig) -> Result<()> {
        self.store.set_global(data)
    }

    pub fn set_remote_state_backend(&mut self, data: RawConfig) -> Result<()> {
        self.store.set_remote_state(data)
    }

    pub fn set_component_config(&mut self, component: &str, data: RawConfig) -> Result<()> {
        self.store.set_component(component, data)
    }

    pub fn set_component_endpoints_config(&mut self, component: &str, data: RawConfig) -> Result<()> {
        self.store.set_component_endpoints(component, data)
    }

    pub fn set_site_config(&mut self, site: &str, data: RawConfig) -> Result<()> {
        self.store.set_site(site, data)
    }

    pub fn set_site_component_config(
        &mut self,
        site: &str,
        component: &str,
        data: RawConfig,
    ) -> Result<()> {
        self.store.set_site_component(site, component, data)
    }

    pub fn render_terraform_state_backend(&self, site: &str) -> Result<String> {
        self.pipeline().backend(site)
    }

    pub fn render_terraform_providers(&self, site: &str) -> Result<String> {
        self.pipeline().providers(site)
    }

    pub fn render_terraform_resources(&self, site: &str) -> Result<String> {
        self.pipeline().resources(site)
    }

    pub fn render_terraform_component(
        &self,
        site: &str,
        component: &str,
    ) -> Result<Option<ComponentDescriptor>> {
        self.pipeline().component(site, component)
    }

    /// Read access to the configuration store.
    #[must_use]
    pub const fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Current plugin settings.
    #[must_use]
    pub const fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    fn pipeline(&self) -> RenderPipeline<'_> {
        RenderPipeline::new(&self.store, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PluginError;

    #[test]
    fn test_identifier_and_enabled() {
        let mut plugin = AzurePlugin::new();
        assert_eq!(plugin.identifier(), "azure");
        assert!(!plugin.is_enabled());

        plugin.set_global_config(RawConfig::new()).unwrap();
        assert!(!plugin.is_enabled());

        plugin.set_site_config("my-site", RawConfig::new()).unwrap();
        assert!(plugin.is_enabled());
    }

    #[test]
    fn test_configure_rejects_invalid_version() {
        let mut plugin = AzurePlugin::new();
        let err = plugin.configure("test", "latest").unwrap_err();
        assert!(matches!(err, PluginError::InvalidProviderVersion { .. }));
        assert_eq!(plugin.settings().provider_version(), "3.42.0");
    }

    #[test]
    fn test_renders_without_configuration() {
        let plugin = AzurePlugin::new();
        assert_eq!(plugin.render_terraform_state_backend("my-site").unwrap(), "");
        assert_eq!(plugin.render_terraform_providers("my-site").unwrap(), "");
        assert_eq!(plugin.render_terraform_resources("my-site").unwrap(), "");
        assert!(plugin.render_terraform_component("my-site", "payment").unwrap().is_none());
    }

    #[test]
    fn test_validation_schema() {
        let schema = AzurePlugin::new().validation_schema().unwrap();
        assert_eq!(schema.component_config_schema, schema.site_component_config_schema);
    }
}
