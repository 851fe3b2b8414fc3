//! Terraform templates rendered by the plugin.
//!
//! Templates produce no leading or trailing newline; the host decides where
//! the fragments go. Dynamic maps go through `render_property` so their keys
//! come out sorted.

/// `backend "azurerm"` block of the site's `terraform` block.
pub const BACKEND: &str = r#"backend "azurerm" {
  resource_group_name  = {{ state.resource_group | json_encode }}
  storage_account_name = {{ state.storage_account | json_encode }}
  container_name       = {{ state.container_name | json_encode }}
  key                  = {{ key | json_encode }}
}"#;

/// Entry of the `required_providers` block.
pub const PROVIDERS: &str = r#"azurerm = {
  version = {{ version | json_encode }}
}"#;

/// Provider configuration and shared locals of a site.
pub const RESOURCES: &str = r#"provider "azurerm" {
  subscription_id            = {{ subscription_id | json_encode }}
{%- if tenant_id %}
  tenant_id                  = {{ tenant_id | json_encode }}
{%- endif %}
  skip_provider_registration = true

  {{ render_property(key="features", value=features, block=true, indent=1) }}
}

locals {
  {{ render_property(key="tags", value=tags, indent=1) }}
}"#;

/// `azure` variable handed to every component module.
pub const COMPONENT_VARIABLES: &str = r#"azure = {
  {{ render_property(key="resource_group_name", value=site.resource_group) }}
  {{ render_property(key="resource_prefix", value=site.resource_prefix) }}
{%- if service_plan %}
  {% set plan_resource = service_plan | service_plan_resource_name -%}
  {{ render_property(key="service_plan", value=plan_resource) }}
{%- endif %}
}"#;
