//! Renders for a fully configured site.

use mach_azure_minimal::test_utils::{TEST_SITE, configured_plugin, init_test_logging};

#[test]
fn test_state_backend() {
    init_test_logging(None);
    let plugin = configured_plugin();

    let backend = plugin.render_terraform_state_backend(TEST_SITE).unwrap();
    assert_eq!(
        backend,
        r#"backend "azurerm" {
  resource_group_name  = "my-state-resource-group"
  storage_account_name = "mystorageaccount"
  container_name       = "tfstate"
  key                  = "envs/my-site"
}"#
    );
}

#[test]
fn test_providers() {
    let plugin = configured_plugin();

    let providers = plugin.render_terraform_providers(TEST_SITE).unwrap();
    assert_eq!(providers, "azurerm = {\n  version = \"~> 3.42.0\"\n}");
}

#[test]
fn test_providers_with_configured_constraint() {
    let mut plugin = configured_plugin();
    plugin.configure("test", ">= 3.40.0, < 4.0.0").unwrap();

    let providers = plugin.render_terraform_providers(TEST_SITE).unwrap();
    assert!(providers.contains(r#"version = ">= 3.40.0, < 4.0.0""#));
}

#[test]
fn test_resources() {
    let plugin = configured_plugin();

    let resources = plugin.render_terraform_resources(TEST_SITE).unwrap();
    let expected = r#"provider "azurerm" {
  subscription_id            = "subscription-id"
  tenant_id                  = "tenant-id"
  skip_provider_registration = true

  features {
    key_vault {
      purge_soft_deleted_keys_on_destroy = true
      recover_soft_deleted_keys          = true
    }
    resource_group {
      prevent_deletion_if_contains_resources = true
    }
  }
}

locals {
  tags = {
    Environment = "test"
    Owner       = "platform-team"
    SiteName    = "my-site"
  }
}"#;
    assert_eq!(resources, expected);
}

#[test]
fn test_component_on_default_plan() {
    let plugin = configured_plugin();

    let descriptor = plugin.render_terraform_component(TEST_SITE, "payment").unwrap().unwrap();
    assert_eq!(
        descriptor.variables,
        r#"azure = {
  resource_group_name = "my-site-resource-group"
  resource_prefix = "my-site-prd"
  service_plan = "functionapps"
}"#
    );
    assert_eq!(descriptor.providers, vec!["azurerm = azurerm".to_string()]);
    assert!(descriptor.depends_on.is_empty());
}

#[test]
fn test_component_site_plan_overrides_component_plan() {
    let plugin = configured_plugin();

    let descriptor =
        plugin.render_terraform_component(TEST_SITE, "api-extensions").unwrap().unwrap();
    assert!(descriptor.variables.contains(r#"service_plan = "functionapps_consumption""#));
    assert!(!descriptor.variables.contains("premium"));
}

#[test]
fn test_renders_are_repeatable() {
    let plugin = configured_plugin();

    for _ in 0..3 {
        assert_eq!(
            plugin.render_terraform_resources(TEST_SITE).unwrap(),
            configured_plugin().render_terraform_resources(TEST_SITE).unwrap()
        );
    }
}
