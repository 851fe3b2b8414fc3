//! Renders without configuration.

use mach_azure_minimal::AzurePlugin;
use mach_azure_minimal::config::RawConfig;
use mach_azure_minimal::test_utils::raw;
use serde_json::json;

#[test]
fn test_fresh_plugin_renders_nothing() {
    let plugin = AzurePlugin::new();

    assert!(!plugin.is_enabled());
    assert_eq!(plugin.render_terraform_state_backend("my-site").unwrap(), "");
    assert_eq!(plugin.render_terraform_providers("my-site").unwrap(), "");
    assert_eq!(plugin.render_terraform_resources("my-site").unwrap(), "");
    assert!(plugin.render_terraform_component("my-site", "payment").unwrap().is_none());
}

#[test]
fn test_site_without_azure_config() {
    let mut plugin = AzurePlugin::new();
    plugin.set_global_config(raw(json!({"subscription_id": "sub"}))).unwrap();
    plugin.set_site_config("azure-site", RawConfig::new()).unwrap();

    assert!(plugin.is_enabled());
    assert_eq!(plugin.render_terraform_providers("aws-site").unwrap(), "");
    assert_eq!(plugin.render_terraform_resources("aws-site").unwrap(), "");
    assert!(plugin.render_terraform_component("aws-site", "payment").unwrap().is_none());
}

#[test]
fn test_backend_needs_only_remote_state() {
    let mut plugin = AzurePlugin::new();
    plugin
        .set_remote_state_backend(raw(json!({
            "resource_group": "state",
            "storage_account": "account",
            "container_name": "tfstate"
        })))
        .unwrap();

    let backend = plugin.render_terraform_state_backend("any-site").unwrap();
    assert!(backend.contains(r#"key                  = "any-site""#));
    assert!(!plugin.is_enabled());
}
