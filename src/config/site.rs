//! Site (tier 2) configuration and the per-site component overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{FeatureMap, GlobalConfig, null_as_default};

/// Per-site configuration.
///
/// Fields left empty by the host inherit the matching [`GlobalConfig`] value.
/// Inheritance is per field and all-or-nothing: an empty string or an empty
/// feature mapping is replaced wholesale, a non-empty one is kept untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub resource_group: String,

    #[serde(deserialize_with = "null_as_default")]
    pub resource_prefix: String,

    #[serde(deserialize_with = "null_as_default")]
    pub subscription_id: String,

    /// Provider feature blocks; when non-empty the global features are ignored
    #[serde(deserialize_with = "null_as_default")]
    pub features: FeatureMap,

    /// Components enabled for this site, keyed by component name.
    ///
    /// Never decoded from host data; filled by component attachment.
    #[serde(skip)]
    pub components: BTreeMap<String, SiteComponentConfig>,
}

impl SiteConfig {
    /// Fill every empty field from the global configuration.
    ///
    /// Idempotent: only empty fields are written, so merging twice is the same
    /// as merging once.
    pub fn merge(&mut self, global: &GlobalConfig) {
        fill_if_empty(&mut self.resource_prefix, &global.resource_prefix);
        fill_if_empty(&mut self.subscription_id, &global.subscription_id);
        fill_if_empty(&mut self.resource_group, &global.resource_group);
        if self.features.is_empty() {
            self.features = global.features.clone();
        }
    }

    /// Return a merged copy, leaving `self` untouched.
    #[must_use]
    pub fn merged_with(&self, global: &GlobalConfig) -> Self {
        let mut merged = self.clone();
        merged.merge(global);
        merged
    }

    /// Insert or replace the configuration of a component on this site.
    pub fn attach_component(&mut self, component: SiteComponentConfig) {
        self.components.insert(component.name.clone(), component);
    }

    /// Look up an attached component.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&SiteComponentConfig> {
        self.components.get(name)
    }
}

fn fill_if_empty(target: &mut String, fallback: &str) {
    if target.is_empty() {
        *target = fallback.to_string();
    }
}

/// Per-site override of a component.
///
/// The link to the component's [`ComponentConfig`](super::ComponentConfig) is
/// the `name`; it is looked up in the store when rendering, never cached here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteComponentConfig {
    /// Component name, stamped by the store
    #[serde(skip_deserializing)]
    pub name: String,

    /// Service plan override for this site
    pub service_plan: Option<String>,
}

impl SiteComponentConfig {
    /// The override service plan, ignoring empty strings.
    #[must_use]
    pub fn service_plan(&self) -> Option<&str> {
        self.service_plan.as_deref().filter(|plan| !plan.is_empty())
    }
}
