//! Site-independent component configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Component settings shared by every site the component is enabled on.
///
/// Components without Azure-specific settings simply have no entry in the
/// store; lookups then yield [`ComponentConfig::named`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentConfig {
    /// Component name, always re-stamped by the store
    pub name: String,

    /// App service plan the component runs on
    pub service_plan: Option<String>,

    /// Abbreviated name used in length-limited resource names
    pub short_name: Option<String>,

    /// Endpoints provided by the host, name → URL
    pub endpoints: BTreeMap<String, String>,
}

impl ComponentConfig {
    /// An otherwise empty configuration for `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The component-level service plan, ignoring empty strings.
    #[must_use]
    pub fn service_plan(&self) -> Option<&str> {
        self.service_plan.as_deref().filter(|plan| !plan.is_empty())
    }

    /// Overwrite the fields present in `patch`, keeping everything else.
    pub(crate) fn apply(&mut self, patch: ComponentConfigPatch) {
        if let Some(service_plan) = patch.service_plan {
            self.service_plan = Some(service_plan);
        }
        if let Some(short_name) = patch.short_name {
            self.short_name = Some(short_name);
        }
    }
}

/// The decodable subset of [`ComponentConfig`].
///
/// Every field is optional so a partial update only touches what it names.
/// The name is stamped by the store and the endpoints arrive through their own
/// setter, so neither is read from host data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ComponentConfigPatch {
    service_plan: Option<String>,
    short_name: Option<String>,
}
