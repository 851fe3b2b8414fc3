//! JSON schemas the host uses to validate configuration before sending it.
//!
//! The schemas are bundled into the binary and returned verbatim. Site
//! components are validated with the component schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Result;

const GLOBAL_CONFIG_SCHEMA: &str = include_str!("schemas/global-config.json");
const SITE_CONFIG_SCHEMA: &str = include_str!("schemas/site-config.json");
const REMOTE_STATE_SCHEMA: &str = include_str!("schemas/remote-state.json");
const COMPONENT_CONFIG_SCHEMA: &str = include_str!("schemas/component-config.json");

/// Validation schema for every configuration tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSchema {
    pub global_config_schema: Value,
    pub remote_state_schema: Value,
    pub site_config_schema: Value,
    pub component_config_schema: Value,
    pub site_component_config_schema: Value,
}

impl ValidationSchema {
    /// Parse the bundled schemas.
    pub fn bundled() -> Result<Self> {
        let component: Value = serde_json::from_str(COMPONENT_CONFIG_SCHEMA)?;
        Ok(Self {
            global_config_schema: serde_json::from_str(GLOBAL_CONFIG_SCHEMA)?,
            remote_state_schema: serde_json::from_str(REMOTE_STATE_SCHEMA)?,
            site_config_schema: serde_json::from_str(SITE_CONFIG_SCHEMA)?,
            site_component_config_schema: component.clone(),
            component_config_schema: component,
        })
    }
}
