//! Configuration tiers for the Azure plugin
//!
//! The host hands configuration to the plugin one tier at a time, as loosely
//! typed JSON objects ([`RawConfig`]). This module turns those objects into
//! typed structures and implements the fallback rules between tiers.
//!
//! # Tiers
//!
//! 1. **Global** ([`GlobalConfig`]) - tenant, subscription, resource group,
//!    resource prefix, (deprecated) resource tags and provider features
//! 2. **Site** ([`SiteConfig`]) - per-environment overrides; every empty field
//!    falls back to the global value as a whole
//! 3. **Component** ([`ComponentConfig`]) - site-independent component settings
//! 4. **Site component** ([`SiteComponentConfig`]) - per-site component overrides
//!
//! The optional [`RemoteStateConfig`] describes the Terraform state backend and
//! [`PluginSettings`] carries the values passed to `configure`.
//!
//! # Decoding
//!
//! Decoding maps fields by name and ignores unknown fields, so newer hosts can
//! send settings older plugins do not understand. Explicit `null` values are
//! treated the same as absent fields.
//!
//! ```rust
//! use mach_azure_minimal::config::{GlobalConfig, SiteConfig};
//!
//! let global = GlobalConfig {
//!     resource_prefix: "globalPrefix".to_string(),
//!     ..GlobalConfig::default()
//! };
//! let mut site = SiteConfig::default();
//! site.merge(&global);
//! assert_eq!(site.resource_prefix, "globalPrefix");
//! ```

pub mod component;
pub mod document;
pub mod global;
pub mod remote_state;
pub mod settings;
pub mod site;

pub use component::ComponentConfig;
pub use document::PluginDocument;
pub use global::GlobalConfig;
pub use remote_state::RemoteStateConfig;
pub use settings::PluginSettings;
pub use site::{SiteComponentConfig, SiteConfig};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::{PluginError, Result};

/// Loosely typed configuration object as supplied by the host.
pub type RawConfig = serde_json::Map<String, serde_json::Value>;

/// Provider feature blocks: feature name → option name → value.
///
/// Ordered so every rendering of the same features is byte-for-byte identical.
pub type FeatureMap = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// The configuration tier a piece of data belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigTier {
    Global,
    Site,
    SiteComponent,
    Component,
    RemoteState,
}

impl fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Global => "global",
            Self::Site => "site",
            Self::SiteComponent => "site component",
            Self::Component => "component",
            Self::RemoteState => "remote state",
        };
        f.write_str(name)
    }
}

/// Decode host data into a typed configuration structure.
///
/// The data is consumed; on failure nothing has been written anywhere, which
/// lets callers decode first and commit afterwards.
pub(crate) fn decode<T>(tier: ConfigTier, data: RawConfig) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(serde_json::Value::Object(data))
        .map_err(|source| PluginError::decode(tier, source))
}

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawConfig {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let global: GlobalConfig = decode(
            ConfigTier::Global,
            raw(json!({"resource_group": "grp", "something_new": {"nested": true}})),
        )
        .unwrap();
        assert_eq!(global.resource_group, "grp");
    }

    #[test]
    fn test_decode_treats_null_as_absent() {
        let site: SiteConfig = decode(
            ConfigTier::Site,
            raw(json!({"resource_group": null, "features": null})),
        )
        .unwrap();
        assert_eq!(site.resource_group, "");
        assert!(site.features.is_empty());
    }

    #[test]
    fn test_decode_reports_tier() {
        let err = decode::<GlobalConfig>(ConfigTier::Global, raw(json!({"resource_group": 42})))
            .unwrap_err();
        assert!(matches!(
            err,
            PluginError::Decode {
                tier: ConfigTier::Global,
                ..
            }
        ));
        assert!(err.to_string().starts_with("invalid global configuration"));
    }
}
