//! Configuration store and resolution
//!
//! [`ConfigStore`] keeps every configuration tier the host has pushed and
//! answers the two questions renders ask:
//!
//! - *What is the effective configuration of this site?* ([`ConfigStore::resolve_site`])
//! - *What are the site-independent settings of this component?*
//!   ([`ConfigStore::resolve_component`])
//!
//! # Write semantics
//!
//! | Operation                | Semantics                                         |
//! |--------------------------|---------------------------------------------------|
//! | `set_global`             | replace                                           |
//! | `set_remote_state`       | replace (warns when replacing)                    |
//! | `set_site`               | replace with a freshly decoded, merged site       |
//! | `set_site_component`     | insert or replace; no-op for an unknown site      |
//! | `set_component`          | upsert-merge onto the existing component          |
//! | `set_component_endpoints`| upsert the endpoint mapping of a component        |
//!
//! Every write decodes the host data before touching the store, so a decode
//! failure leaves the store exactly as it was.
//!
//! # Resolution
//!
//! Sites are merged against the global tier when written and again when read,
//! so a global configuration replaced after the site still reaches renders for
//! fields the site left empty.
//!
//! ```rust
//! use mach_azure_minimal::store::ConfigStore;
//! use serde_json::json;
//!
//! # fn main() -> mach_azure_minimal::core::Result<()> {
//! let object = |v: serde_json::Value| v.as_object().cloned().unwrap_or_default();
//!
//! let mut store = ConfigStore::new();
//! store.set_global(object(json!({"resource_group": "global-group"})))?;
//! store.set_site("my-site", object(json!({"resource_prefix": "my-site-prd"})))?;
//!
//! let site = store.resolve_site("my-site").unwrap();
//! assert_eq!(site.resource_group, "global-group");
//! assert_eq!(site.resource_prefix, "my-site-prd");
//! assert!(store.resolve_site("other-site").is_none());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::component::ComponentConfigPatch;
use crate::config::{
    ComponentConfig, ConfigTier, GlobalConfig, RawConfig, RemoteStateConfig, SiteComponentConfig,
    SiteConfig, decode,
};
use crate::core::{PluginError, Result};


/// All configuration pushed by the host, keyed by site and component name.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    global: Option<GlobalConfig>,
    remote_state: Option<RemoteStateConfig>,
    sites: BTreeMap<String, SiteConfig>,
    components: BTreeMap<String, ComponentConfig>,
}

impl ConfigStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the global configuration.
    pub fn set_global(&mut self, data: RawConfig) -> Result<()> {
        let global: GlobalConfig = decode(ConfigTier::Global, data)?;

        if global.has_deprecated_tags() {
            warn!(
                "Using resource tags is deprecated. These should be inferred from the site \
                 configuration. The field will be removed in a future release."
            );
        }

        debug!(
            resource_group = %global.resource_group,
            resource_prefix = %global.resource_prefix,
            features = global.features.len(),
            "Stored global azure config"
        );
        self.global = Some(global);
        Ok(())
    }

    /// Replace the remote state backend configuration.
    pub fn set_remote_state(&mut self, data: RawConfig) -> Result<()> {
        let state: RemoteStateConfig = decode(ConfigTier::RemoteState, data)?;

        if self.remote_state.is_some() {
            warn!(
                storage_account = %state.storage_account,
                "Remote state backend was already configured; replacing it"
            );
        }
        self.remote_state = Some(state);
        Ok(())
    }

    /// Store a freshly decoded site, merged against the global configuration.
    ///
    /// Replaces any earlier configuration of the site, including the components
    /// attached to it.
    pub fn set_site(&mut self, site: &str, data: RawConfig) -> Result<()> {
        let Some(global) = &self.global else {
            return Err(PluginError::GlobalConfigRequired {
                site: site.to_string(),
            });
        };

        let mut config: SiteConfig = decode(ConfigTier::Site, data)?;
        config.merge(global);

        debug!(site, resource_group = %config.resource_group, "Stored site azure config");
        self.sites.insert(site.to_string(), config);
        Ok(())
    }

    /// Attach a component to a site, replacing an earlier attachment.
    ///
    /// Silently ignored when the site was never configured: components of sites
    /// that do not use this plugin are still announced by the host.
    pub fn set_site_component(&mut self, site: &str, component: &str, data: RawConfig) -> Result<()> {
        let Some(config) = self.sites.get_mut(site) else {
            debug!(site, component, "Ignoring component of unconfigured site");
            return Ok(());
        };

        let mut site_component: SiteComponentConfig = decode(ConfigTier::SiteComponent, data)?;
        site_component.name = component.to_string();
        config.attach_component(site_component);
        Ok(())
    }

    /// Merge component settings onto the stored component.
    ///
    /// Fields absent from `data` keep their current value.
    pub fn set_component(&mut self, component: &str, data: RawConfig) -> Result<()> {
        let patch: ComponentConfigPatch = decode(ConfigTier::Component, data)?;

        let config = self
            .components
            .entry(component.to_string())
            .or_insert_with(|| ComponentConfig::named(component));
        config.apply(patch);
        config.name = component.to_string();
        Ok(())
    }

    /// Replace the endpoints of a component.
    ///
    /// `data` maps endpoint names to URLs; every value must be a string.
    pub fn set_component_endpoints(&mut self, component: &str, data: RawConfig) -> Result<()> {
        let endpoints: BTreeMap<String, String> = decode(ConfigTier::Component, data)?;

        let config = self
            .components
            .entry(component.to_string())
            .or_insert_with(|| ComponentConfig::named(component));
        config.endpoints = endpoints;
        config.name = component.to_string();
        Ok(())
    }

    /// Effective configuration of a site, or `None` when it was never set.
    ///
    /// Returns a copy merged against the current global configuration.
    #[must_use]
    pub fn resolve_site(&self, site: &str) -> Option<SiteConfig> {
        let config = self.sites.get(site)?;
        Some(match &self.global {
            Some(global) => config.merged_with(global),
            None => config.clone(),
        })
    }

    /// Settings of a component, or an empty configuration carrying its name.
    #[must_use]
    pub fn resolve_component(&self, component: &str) -> ComponentConfig {
        self.components
            .get(component)
            .cloned()
            .unwrap_or_else(|| ComponentConfig::named(component))
    }

    /// The global configuration, if set.
    #[must_use]
    pub const fn global(&self) -> Option<&GlobalConfig> {
        self.global.as_ref()
    }

    /// The remote state backend, if set.
    #[must_use]
    pub const fn remote_state(&self) -> Option<&RemoteStateConfig> {
        self.remote_state.as_ref()
    }

    /// Names of all configured sites, in sorted order.
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// Whether no site has been configured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
