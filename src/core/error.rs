//! Error handling for the Azure plugin
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`PluginError`]) so the host can tell a missing
//!    precondition apart from bad input or a failed render
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and suggestions
//!    for the command-line front end
//!
//! # Error Categories
//!
//! - **Preconditions**: [`PluginError::GlobalConfigRequired`]
//! - **Resolution**: [`PluginError::MissingComponentConfig`],
//!   [`PluginError::MissingRequiredConfig`]
//! - **Decoding**: [`PluginError::Decode`], [`PluginError::InvalidProviderVersion`]
//! - **Rendering**: [`PluginError::Template`]
//! - **Document loading**: [`PluginError::Io`], [`PluginError::Json`],
//!   [`PluginError::Yaml`], [`PluginError::Toml`]
//!
//! Degraded-but-valid outcomes (a site that was never configured, a remote
//! state that was never set) are not errors at all; the render operations
//! return empty text or `None` for them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mach_azure_minimal::core::{PluginError, user_friendly_error};
//!
//! let error = PluginError::GlobalConfigRequired {
//!     site: "my-site".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::config::ConfigTier;
use crate::templating::TemplateError;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, PluginError>;

/// The main error type for plugin operations
///
/// Every variant is terminal for the call that raised it. Nothing in this crate
/// performs I/O during configuration or rendering, so nothing is retried.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Site configuration was set before any global configuration
    ///
    /// The global tier supplies the fallback values every site inherits, so it
    /// must exist first. No partial state is committed.
    #[error("a global azure config is required for setting per-site configuration (site '{site}')")]
    GlobalConfigRequired {
        /// Site whose configuration was rejected
        site: String,
    },

    /// A component render was requested for a component that was never
    /// attached to the (configured) site
    #[error("missing config for component '{component}' in site '{site}'")]
    MissingComponentConfig {
        /// Site that was resolved
        site: String,
        /// Component that has no site-level configuration
        component: String,
    },

    /// The resolved site lacks a field required by a render
    #[error("site '{site}' is missing required azure setting '{field}'")]
    MissingRequiredConfig {
        /// Site that was resolved
        site: String,
        /// Name of the empty field (e.g. `resource_group`)
        field: &'static str,
    },

    /// Inbound configuration could not be mapped onto the expected shape
    #[error("invalid {tier} configuration: {source}")]
    Decode {
        /// Which configuration tier was being decoded
        tier: ConfigTier,
        /// The underlying decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// The configured provider version is neither a version nor a constraint
    #[error("invalid provider version '{version}': {reason}")]
    InvalidProviderVersion {
        /// The rejected version string
        version: String,
        /// Why it was rejected
        reason: String,
    },

    /// Template rendering failed; no output was produced
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl PluginError {
    /// Build a [`PluginError::Decode`] for the given tier.
    pub(crate) fn decode(tier: ConfigTier, source: serde_json::Error) -> Self {
        Self::Decode {
            tier,
            source,
        }
    }
}

/// Error wrapper carrying user-facing details and a suggestion
///
/// Used by the binary to present failures. Library code returns
/// [`PluginError`] directly.
#[derive(Debug)]
pub struct ErrorContext {
    /// The error message to display
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context from anything printable.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`]
///
/// Recognises [`PluginError`] variants anywhere in the error chain and attaches
/// tailored suggestions. Other errors keep their full cause chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(plugin_error) = error.chain().find_map(|e| e.downcast_ref::<PluginError>()) {
        return create_error_context(plugin_error, &error);
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(error.to_string());
    if chain.is_empty() {
        context
    } else {
        context.with_details(chain.join("\n  → "))
    }
}

fn create_error_context(plugin_error: &PluginError, error: &anyhow::Error) -> ErrorContext {
    let context = ErrorContext::new(error.to_string());
    match plugin_error {
        PluginError::GlobalConfigRequired {
            ..
        } => context
            .with_details("Sites inherit resource group, prefix, subscription and features from the global tier")
            .with_suggestion("Add a top-level `global` section to the configuration document"),
        PluginError::MissingComponentConfig {
            site,
            component,
        } => context
            .with_details(format!("Component '{component}' was never attached to site '{site}'"))
            .with_suggestion(format!(
                "Add '{component}' under `site_components.{site}` (an empty object is enough)"
            )),
        PluginError::MissingRequiredConfig {
            field,
            ..
        } => context
            .with_details(format!("'{field}' is empty on both the site and the global tier"))
            .with_suggestion(format!("Set `{field}` on the site or in the global configuration")),
        PluginError::Decode {
            tier,
            source,
        } => context
            .with_details(source.to_string())
            .with_suggestion(format!("Check the field types of the {tier} configuration")),
        PluginError::InvalidProviderVersion {
            ..
        } => context.with_suggestion(
            "Use a bare version such as `3.42.0` or a constraint such as `>= 4.0.0`",
        ),
        PluginError::Template(template_error) => {
            context.with_details(template_error.format_with_context())
        }
        PluginError::Yaml(_) | PluginError::Json(_) | PluginError::Toml(_) => context
            .with_suggestion("Check the syntax of the configuration document"),
        PluginError::Io(io_error) if io_error.kind() == std::io::ErrorKind::NotFound => {
            context.with_suggestion("Check that the file exists and the path is correct")
        }
        _ => context,
    }
}
