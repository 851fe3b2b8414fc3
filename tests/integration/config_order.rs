//! Ordering rules and atomicity of configuration calls.

use mach_azure_minimal::AzurePlugin;
use mach_azure_minimal::config::RawConfig;
use mach_azure_minimal::core::PluginError;
use mach_azure_minimal::test_utils::{TEST_SITE, configured_plugin, raw};
use serde_json::json;

#[test]
fn test_site_before_global_is_rejected() {
    let mut plugin = AzurePlugin::new();

    let err = plugin.set_site_config("my-site", RawConfig::new()).unwrap_err();
    assert!(matches!(err, PluginError::GlobalConfigRequired { ref site } if site == "my-site"));
    assert!(!plugin.is_enabled());
}

#[test]
fn test_site_component_before_site_is_ignored() {
    let mut plugin = AzurePlugin::new();
    plugin.set_global_config(raw(json!({"resource_group": "grp", "resource_prefix": "pfx"}))).unwrap();

    plugin.set_site_component_config("my-site", "payment", RawConfig::new()).unwrap();
    plugin.set_site_config("my-site", RawConfig::new()).unwrap();

    let err = plugin.render_terraform_component("my-site", "payment").unwrap_err();
    assert!(matches!(err, PluginError::MissingComponentConfig { .. }));
}

#[test]
fn test_component_config_after_site_component() {
    let mut plugin = AzurePlugin::new();
    plugin.set_global_config(raw(json!({"resource_group": "grp", "resource_prefix": "pfx"}))).unwrap();
    plugin.set_site_config("my-site", RawConfig::new()).unwrap();
    plugin.set_site_component_config("my-site", "payment", RawConfig::new()).unwrap();

    let before = plugin.render_terraform_component("my-site", "payment").unwrap().unwrap();
    assert!(!before.variables.contains("service_plan"));

    plugin.set_component_config("payment", raw(json!({"service_plan": "premium"}))).unwrap();
    let after = plugin.render_terraform_component("my-site", "payment").unwrap().unwrap();
    assert!(after.variables.contains(r#"service_plan = "functionapps_premium""#));
}

#[test]
fn test_global_after_site_does_not_rewrite_site() {
    let mut plugin = AzurePlugin::new();
    plugin.set_global_config(raw(json!({"subscription_id": "first"}))).unwrap();
    plugin.set_site_config("my-site", RawConfig::new()).unwrap();
    plugin.set_global_config(raw(json!({"subscription_id": "second"}))).unwrap();

    let resources = plugin.render_terraform_resources("my-site").unwrap();
    assert!(resources.contains(r#""first""#), "{resources}");
}

#[test]
fn test_invalid_site_payload_keeps_previous_state() {
    let mut plugin = configured_plugin();
    let before = plugin.render_terraform_resources(TEST_SITE).unwrap();

    let err = plugin
        .set_site_config(TEST_SITE, raw(json!({"resource_group": ["not", "a", "string"]})))
        .unwrap_err();
    assert!(matches!(err, PluginError::Decode { .. }));
    assert_eq!(plugin.render_terraform_resources(TEST_SITE).unwrap(), before);
}

#[test]
fn test_invalid_provider_version_keeps_previous_settings() {
    let mut plugin = configured_plugin();
    plugin.configure("prod", "4.1.0").unwrap();

    let err = plugin.configure("staging", "~> banana").unwrap_err();
    assert!(matches!(err, PluginError::InvalidProviderVersion { .. }));
    assert_eq!(plugin.settings().environment, "prod");
    assert!(plugin.render_terraform_providers(TEST_SITE).unwrap().contains("~> 4.1.0"));
}

#[test]
fn test_missing_resource_prefix() {
    let mut plugin = AzurePlugin::new();
    plugin.set_global_config(raw(json!({"resource_group": "grp"}))).unwrap();
    plugin.set_site_config("my-site", RawConfig::new()).unwrap();
    plugin.set_site_component_config("my-site", "payment", RawConfig::new()).unwrap();

    let err = plugin.render_terraform_component("my-site", "payment").unwrap_err();
    assert!(matches!(err, PluginError::MissingRequiredConfig { field: "resource_prefix", .. }));
}
