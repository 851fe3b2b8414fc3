//! Render contexts for the Terraform templates.
//!
//! Each template gets its own serializable context so the set of variables a
//! template can see is explicit.

use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use tera::Context as TeraContext;

use crate::config::{ComponentConfig, FeatureMap, GlobalConfig, RemoteStateConfig, SiteConfig};
use crate::templating::{ErrorLocation, TemplateError};

#[derive(Debug, Serialize)]
pub(crate) struct BackendContext<'a> {
    pub state: &'a RemoteStateConfig,
    pub site: &'a str,
    pub key: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProvidersContext {
    pub version: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResourcesContext<'a> {
    pub subscription_id: &'a str,
    pub tenant_id: &'a str,
    pub features: FeatureMap,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ComponentContext<'a> {
    pub site: &'a SiteConfig,
    pub component: &'a ComponentConfig,
    pub service_plan: Option<&'a str>,
}

/// Serialize a context struct into a Tera context.
pub(crate) fn to_tera<T: Serialize>(template: &str, context: &T) -> Result<TeraContext, TemplateError> {
    TeraContext::from_serialize(context).map_err(|e| TemplateError::InvalidContext {
        message: e.to_string(),
        location: Box::new(ErrorLocation::template(template)),
    })
}

/// Provider features used when neither the site nor the global tier sets any.
#[must_use]
pub fn default_features() -> FeatureMap {
    let mut features = FeatureMap::new();
    features.insert(
        "resource_group".to_string(),
        BTreeMap::from([("prevent_deletion_if_contains_resources".to_string(), json!(true))]),
    );
    features.insert(
        "key_vault".to_string(),
        BTreeMap::from([
            ("purge_soft_deleted_keys_on_destroy".to_string(), json!(true)),
            ("recover_soft_deleted_keys".to_string(), json!(true)),
        ]),
    );
    features
}

/// Resource tags of a site.
///
/// The built-in `SiteName` and `Environment` tags are overridden by the
/// (deprecated) global resource tags.
#[must_use]
pub fn resource_tags(site: &str, environment: &str, global: Option<&GlobalConfig>) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::from([
        ("SiteName".to_string(), site.to_string()),
        ("Environment".to_string(), environment.to_string()),
    ]);
    if let Some(extra) = global.and_then(|g| g.resource_tags.as_ref()) {
        tags.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    tags
}
