//! Constants shared across the plugin.
//!
//! Names that end up in generated Terraform or in host-visible descriptors live
//! here so renders and tests agree on them.

/// Identifier the host uses to address this plugin.
pub const PLUGIN_IDENTIFIER: &str = "azure";

/// `azurerm` provider version used when `configure` passes none.
pub const DEFAULT_PROVIDER_VERSION: &str = "3.42.0";

/// Provider binding every component module receives.
pub const AZURERM_PROVIDER_BINDING: &str = "azurerm = azurerm";

/// Legacy resource name of the default app service plan.
///
/// Kept for compatibility with state created by earlier tooling.
pub const DEFAULT_SERVICE_PLAN_RESOURCE: &str = "functionapps";

/// Service plan value that maps onto [`DEFAULT_SERVICE_PLAN_RESOURCE`].
pub const DEFAULT_SERVICE_PLAN: &str = "default";

/// Maximum number of re-renders spent defining undefined template variables.
pub const MAX_UNDEFINED_VARIABLE_PASSES: usize = 32;

/// Environment variable overriding the plugin environment in the CLI.
pub const ENVIRONMENT_ENV_VAR: &str = "AZURE_PLUGIN_ENVIRONMENT";

/// Environment variable overriding the provider version in the CLI.
pub const PROVIDER_VERSION_ENV_VAR: &str = "AZURE_PLUGIN_PROVIDER_VERSION";
