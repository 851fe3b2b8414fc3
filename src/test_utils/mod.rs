//! Test utilities for mach-azure-minimal
//!
//! Helpers shared by unit and integration tests: one-time logging setup,
//! raw configuration maps from JSON literals, and a plugin preloaded with a
//! realistic configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use mach_azure_minimal::test_utils::{configured_plugin, init_test_logging};
//!
//! init_test_logging(None);
//! let plugin = configured_plugin();
//! assert!(plugin.is_enabled());
//! ```

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::RawConfig;
use crate::plugin::AzurePlugin;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Site used by [`configured_plugin`].
pub const TEST_SITE: &str = "my-site";

/// Initialize logging for tests.
///
/// Only the first call installs a subscriber. `level` wins over `RUST_LOG`;
/// with neither, tests run without logging.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Raw configuration map from a JSON value.
///
/// # Panics
///
/// Panics when `value` is not a JSON object.
pub fn raw(value: serde_json::Value) -> RawConfig {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("raw config must be a JSON object, got {other}"),
    }
}

/// Plugin configured for [`TEST_SITE`] with two components attached.
///
/// - `payment` runs on the `default` service plan
/// - `api-extensions` is moved to the `consumption` plan by the site
///
/// # Panics
///
/// Panics when any configuration call fails.
pub fn configured_plugin() -> AzurePlugin {
    use serde_json::json;

    let mut plugin = AzurePlugin::new();
    plugin.configure("test", "").expect("configure");
    plugin
        .set_global_config(raw(json!({
            "tenant_id": "tenant-id",
            "subscription_id": "subscription-id",
            "resource_group": "my-resource-group",
            "resource_prefix": "mysite-tst",
            "resource_tags": {"Owner": "platform-team"}
        })))
        .expect("global config");
    plugin
        .set_remote_state_backend(raw(json!({
            "resource_group": "my-state-resource-group",
            "storage_account": "mystorageaccount",
            "container_name": "tfstate",
            "state_folder": "envs"
        })))
        .expect("remote state");
    plugin
        .set_component_config("payment", raw(json!({"service_plan": "default", "short_name": "pay"})))
        .expect("payment component");
    plugin
        .set_component_config("api-extensions", raw(json!({"service_plan": "premium"})))
        .expect("api-extensions component");
    plugin
        .set_site_config(
            TEST_SITE,
            raw(json!({
                "resource_group": "my-site-resource-group",
                "resource_prefix": "my-site-prd"
            })),
        )
        .expect("site config");
    plugin
        .set_site_component_config(TEST_SITE, "payment", RawConfig::new())
        .expect("payment site component");
    plugin
        .set_site_component_config(
            TEST_SITE,
            "api-extensions",
            raw(json!({"service_plan": "consumption"})),
        )
        .expect("api-extensions site component");
    plugin
}
