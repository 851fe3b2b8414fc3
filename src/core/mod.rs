//! Core types shared by every layer of the plugin
//!
//! - [`PluginError`] - the error enum returned by configuration and render calls
//! - [`ErrorContext`] / [`user_friendly_error`] - presentation of errors in the CLI
//! - [`Result`] - crate-wide result alias

pub mod error;

pub use error::{ErrorContext, PluginError, Result, user_friendly_error};
