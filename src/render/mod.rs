//! Render pipeline
//!
//! [`RenderPipeline`] resolves configuration through the
//! [`ConfigStore`](crate::store::ConfigStore), builds a context per template
//! and renders it. Every operation is a pure function of the store and the
//! plugin settings.
//!
//! | Operation    | Nothing configured  | Output                                   |
//! |--------------|---------------------|------------------------------------------|
//! | `backend`    | no remote state     | `backend "azurerm" { ... }`              |
//! | `providers`  | unknown site        | `azurerm = { version = "..." }`          |
//! | `resources`  | unknown site        | `provider "azurerm" { ... }` + `locals`  |
//! | `component`  | unknown site        | [`ComponentDescriptor`]                  |
//!
//! "Nothing configured" yields empty text (or `None`), never an error.

pub mod context;

pub use context::{default_features, resource_tags};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PluginSettings;
use crate::constants::AZURERM_PROVIDER_BINDING;
use crate::core::{PluginError, Result};
use crate::store::ConfigStore;
use crate::templating::{TemplateRenderer, templates};
use context::{BackendContext, ComponentContext, ProvidersContext, ResourcesContext, to_tera};

/// What the host needs to instantiate a component module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Terraform text of the module's `azure` variable
    pub variables: String,
    /// Provider bindings passed into the module
    pub providers: Vec<String>,
    /// Extra module dependencies
    pub depends_on: Vec<String>,
}

/// Renders Terraform fragments from the current configuration.
pub struct RenderPipeline<'a> {
    store: &'a ConfigStore,
    settings: &'a PluginSettings,
    renderer: TemplateRenderer,
}

impl<'a> RenderPipeline<'a> {
    #[must_use]
    pub fn new(store: &'a ConfigStore, settings: &'a PluginSettings) -> Self {
        Self {
            store,
            settings,
            renderer: TemplateRenderer::new(),
        }
    }

    /// `backend "azurerm"` block for `site`; empty without remote state.
    pub fn backend(&self, site: &str) -> Result<String> {
        let Some(state) = self.store.remote_state() else {
            debug!(site, "No remote state configured, skipping backend");
            return Ok(String::new());
        };

        let context = to_tera(
            "backend",
            &BackendContext {
                state,
                site,
                key: state.key(site),
            },
        )?;
        Ok(self.renderer.render("backend", templates::BACKEND, &context)?)
    }

    /// `azurerm` entry of `required_providers`; empty for an unknown site.
    pub fn providers(&self, site: &str) -> Result<String> {
        if self.store.resolve_site(site).is_none() {
            debug!(site, "Site has no azure config, skipping providers");
            return Ok(String::new());
        }

        let context = to_tera(
            "providers",
            &ProvidersContext {
                version: self.settings.provider_constraint(),
            },
        )?;
        Ok(self.renderer.render("providers", templates::PROVIDERS, &context)?)
    }

    /// Provider configuration and locals; empty for an unknown site.
    pub fn resources(&self, site: &str) -> Result<String> {
        let Some(config) = self.store.resolve_site(site) else {
            debug!(site, "Site has no azure config, skipping resources");
            return Ok(String::new());
        };
        let global = self.store.global();

        let features = if config.features.is_empty() {
            default_features()
        } else {
            config.features.clone()
        };

        let context = to_tera(
            "resources",
            &ResourcesContext {
                subscription_id: &config.subscription_id,
                tenant_id: global.map_or("", |g| g.tenant_id.as_str()),
                features,
                tags: resource_tags(site, &self.settings.environment, global),
            },
        )?;
        Ok(self.renderer.render("resources", templates::RESOURCES, &context)?)
    }

    /// Module inputs for `component` on `site`.
    ///
    /// Returns `Ok(None)` when the site has no azure configuration.
    ///
    /// # Errors
    ///
    /// - [`PluginError::MissingComponentConfig`] when the component was never
    ///   attached to the site
    /// - [`PluginError::MissingRequiredConfig`] when the site resolves without a
    ///   resource group or resource prefix
    pub fn component(&self, site: &str, component: &str) -> Result<Option<ComponentDescriptor>> {
        let Some(config) = self.store.resolve_site(site) else {
            debug!(site, component, "Site has no azure config, skipping component");
            return Ok(None);
        };

        let Some(site_component) = config.component(component) else {
            return Err(PluginError::MissingComponentConfig {
                site: site.to_string(),
                component: component.to_string(),
            });
        };
        let component_config = self.store.resolve_component(component);

        if config.resource_group.is_empty() {
            return Err(PluginError::MissingRequiredConfig {
                site: site.to_string(),
                field: "resource_group",
            });
        }
        if config.resource_prefix.is_empty() {
            return Err(PluginError::MissingRequiredConfig {
                site: site.to_string(),
                field: "resource_prefix",
            });
        }

        let service_plan = site_component.service_plan().or_else(|| component_config.service_plan());

        let context = to_tera(
            "component",
            &ComponentContext {
                site: &config,
                component: &component_config,
                service_plan,
            },
        )?;
        let variables = self.renderer.render("component", templates::COMPONENT_VARIABLES, &context)?;

        debug!(site, component, service_plan = ?service_plan, "Rendered component variables");
        Ok(Some(ComponentDescriptor {
            variables,
            providers: vec![AZURERM_PROVIDER_BINDING.to_string()],
            depends_on: Vec::new(),
        }))
    }
}
