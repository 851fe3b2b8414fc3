//! Configuration documents replayed against the plugin.

use mach_azure_minimal::AzurePlugin;
use mach_azure_minimal::core::PluginError;
use mach_azure_minimal::test_utils::{TEST_SITE, configured_plugin};

use crate::fixtures::{self, EMPTY_JSON, FULL_JSON, FULL_YAML, SITE_WITHOUT_GLOBAL_TOML};

fn apply(name: &str) -> Result<AzurePlugin, PluginError> {
    let document = fixtures::load_document(name);
    let mut plugin = AzurePlugin::new();
    plugin.configure("test", "")?;
    document.apply(&mut plugin)?;
    Ok(plugin)
}

#[test]
fn test_full_document_matches_direct_configuration() {
    let from_document = apply(FULL_JSON).unwrap();
    let direct = configured_plugin();

    assert_eq!(
        from_document.render_terraform_state_backend(TEST_SITE).unwrap(),
        direct.render_terraform_state_backend(TEST_SITE).unwrap()
    );
    assert_eq!(
        from_document.render_terraform_resources(TEST_SITE).unwrap(),
        direct.render_terraform_resources(TEST_SITE).unwrap()
    );
    for component in ["payment", "api-extensions"] {
        assert_eq!(
            from_document.render_terraform_component(TEST_SITE, component).unwrap(),
            direct.render_terraform_component(TEST_SITE, component).unwrap()
        );
    }
}

#[test]
fn test_yaml_and_json_documents_agree() {
    let json = apply(FULL_JSON).unwrap();
    let yaml = apply(FULL_YAML).unwrap();

    assert_eq!(
        json.render_terraform_resources(TEST_SITE).unwrap(),
        yaml.render_terraform_resources(TEST_SITE).unwrap()
    );
    assert_eq!(
        json.render_terraform_component(TEST_SITE, "api-extensions").unwrap(),
        yaml.render_terraform_component(TEST_SITE, "api-extensions").unwrap()
    );
}

#[test]
fn test_endpoints_are_recorded() {
    let plugin = apply(FULL_JSON).unwrap();

    let payment = plugin.store().resolve_component("payment");
    assert_eq!(
        payment.endpoints.get("internal").map(String::as_str),
        Some("https://payment.internal.example.com")
    );
    assert_eq!(payment.short_name.as_deref(), Some("pay"));
}

#[test]
fn test_empty_document() {
    let plugin = apply(EMPTY_JSON).unwrap();
    assert!(!plugin.is_enabled());
    assert_eq!(plugin.render_terraform_resources(TEST_SITE).unwrap(), "");
}

#[test]
fn test_site_without_global_fails() {
    let err = apply(SITE_WITHOUT_GLOBAL_TOML).unwrap_err();
    assert!(matches!(err, PluginError::GlobalConfigRequired { .. }));
}
