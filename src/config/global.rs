//! Global (tier 1) configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{FeatureMap, null_as_default};

/// Settings shared by every site.
///
/// Set once per process by the host. Every [`SiteConfig`](super::SiteConfig)
/// falls back to these values for the fields it leaves empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Azure AD tenant the provider authenticates against
    #[serde(deserialize_with = "null_as_default")]
    pub tenant_id: String,

    /// Default subscription for all sites
    #[serde(deserialize_with = "null_as_default")]
    pub subscription_id: String,

    /// Default resource group for all sites
    #[serde(deserialize_with = "null_as_default")]
    pub resource_group: String,

    /// Default resource name prefix for all sites
    #[serde(deserialize_with = "null_as_default")]
    pub resource_prefix: String,

    /// Extra resource tags.
    ///
    /// Deprecated: tags should be inferred from the site configuration. Still
    /// honoured by the resources render, where they override the built-in
    /// `SiteName` and `Environment` tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_tags: Option<BTreeMap<String, String>>,

    /// Provider feature blocks inherited by sites that define none
    #[serde(deserialize_with = "null_as_default")]
    pub features: FeatureMap,
}

impl GlobalConfig {
    /// Whether the deprecated `resource_tags` field was supplied.
    #[must_use]
    pub const fn has_deprecated_tags(&self) -> bool {
        self.resource_tags.is_some()
    }
}
