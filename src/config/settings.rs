//! Plugin-wide settings passed through `configure`.
//!
//! The host configures the plugin once with the deployment environment and an
//! optional `azurerm` provider version. The version is stored as written and
//! turned into a Terraform version constraint when the providers block is
//! rendered:
//!
//! | Input          | Constraint     |
//! |----------------|----------------|
//! | `3.42.0`       | `~> 3.42.0`    |
//! | `3.42`         | `~> 3.42`      |
//! | `>= 4.0.0`     | `>= 4.0.0`     |
//! | `~> 3.0, < 4`  | `~> 3.0, < 4`  |

use semver::Version;
use tracing::debug;

use crate::constants::DEFAULT_PROVIDER_VERSION;
use crate::core::{PluginError, Result};

/// Operators a Terraform version constraint clause may start with.
///
/// Longer operators come first so `>=` is not mistaken for `>`.
const CONSTRAINT_OPERATORS: &[&str] = &["~>", ">=", "<=", "!=", "=", ">", "<"];

/// Settings supplied by the host through `configure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSettings {
    /// Deployment environment, used for the `Environment` resource tag
    pub environment: String,

    /// Provider version or constraint, validated on write
    provider_version: String,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            environment: String::new(),
            provider_version: DEFAULT_PROVIDER_VERSION.to_string(),
        }
    }
}

impl PluginSettings {
    /// Store the environment and, when non-empty, the provider version.
    ///
    /// An empty `provider_version` keeps the current one. Nothing is written
    /// when the version is rejected.
    pub fn configure(&mut self, environment: &str, provider_version: &str) -> Result<()> {
        let provider_version = provider_version.trim();
        if !provider_version.is_empty() {
            validate_provider_version(provider_version)?;
            self.provider_version = provider_version.to_string();
        }
        self.environment = environment.to_string();
        debug!(
            environment = %self.environment,
            provider_version = %self.provider_version,
            "Configured azure plugin"
        );
        Ok(())
    }

    /// The provider version exactly as configured.
    #[must_use]
    pub fn provider_version(&self) -> &str {
        &self.provider_version
    }

    /// The provider version as a Terraform version constraint.
    #[must_use]
    pub fn provider_constraint(&self) -> String {
        version_constraint(&self.provider_version)
    }
}

/// Turn a bare version into a pessimistic constraint, leaving expressions alone.
#[must_use]
pub fn version_constraint(version: &str) -> String {
    if version.starts_with(|c: char| c.is_ascii_digit()) {
        format!("~> {version}")
    } else {
        version.to_string()
    }
}

/// Check that `version` is a bare version or a constraint expression.
pub fn validate_provider_version(version: &str) -> Result<()> {
    let invalid = |reason: String| PluginError::InvalidProviderVersion {
        version: version.to_string(),
        reason,
    };

    if version.starts_with(|c: char| c.is_ascii_digit()) {
        return parse_bare_version(version).map(|_| ()).map_err(invalid);
    }

    if !version.starts_with(['~', '>', '<', '=', '!']) {
        return Err(invalid("expected a version number or a constraint operator".to_string()));
    }

    for clause in version.split(',') {
        let clause = clause.trim();
        let Some(operand) = CONSTRAINT_OPERATORS.iter().find_map(|op| clause.strip_prefix(op))
        else {
            return Err(invalid(format!("clause '{clause}' has no constraint operator")));
        };
        parse_bare_version(operand.trim()).map_err(invalid)?;
    }

    Ok(())
}

/// Parse `1`, `1.2` or `1.2.3` into a full semantic version.
fn parse_bare_version(version: &str) -> std::result::Result<Version, String> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() > 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return Err(format!("'{version}' is not a version number"));
    }

    let mut padded = parts.clone();
    padded.resize(3, "0");
    Version::parse(&padded.join(".")).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provider_version() {
        let settings = PluginSettings::default();
        assert_eq!(settings.provider_version(), "3.42.0");
        assert_eq!(settings.provider_constraint(), "~> 3.42.0");
    }

    #[test]
    fn test_empty_provider_keeps_default() {
        let mut settings = PluginSettings::default();
        settings.configure("test", "").unwrap();
        assert_eq!(settings.environment, "test");
        assert_eq!(settings.provider_version(), "3.42.0");
    }

    #[test]
    fn test_bare_versions_become_pessimistic() {
        assert_eq!(version_constraint("3.42.0"), "~> 3.42.0");
        assert_eq!(version_constraint("3.42"), "~> 3.42");
    }

    #[test]
    fn test_constraints_pass_through() {
        for constraint in [">= 4.0.0", "~> 3.0", "= 3.42.0", "~> 3.0, < 4", "!= 3.1.0"] {
            validate_provider_version(constraint).unwrap();
            assert_eq!(version_constraint(constraint), constraint);
        }
    }

    #[test]
    fn test_invalid_versions_rejected() {
        for version in ["latest", "v3.42.0", "3.x", "3.42.0.1", ">= four", "~> 3.0,"] {
            let err = validate_provider_version(version).unwrap_err();
            assert!(
                matches!(err, PluginError::InvalidProviderVersion { .. }),
                "{version} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejected_version_leaves_settings_unchanged() {
        let mut settings = PluginSettings::default();
        assert!(settings.configure("prod", "latest").is_err());
        assert_eq!(settings.environment, "");
        assert_eq!(settings.provider_version(), "3.42.0");
    }
}
