//! Configuration documents used by the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use mach_azure_minimal::config::PluginDocument;

/// Global, remote state, two components and one site with both attached.
pub const FULL_JSON: &str = "full-test-case.json";

/// Same content as [`FULL_JSON`] in YAML.
pub const FULL_YAML: &str = "full-test-case.yaml";

/// A document without any tier.
pub const EMPTY_JSON: &str = "empty-test-case.json";

/// A site without global configuration.
pub const SITE_WITHOUT_GLOBAL_TOML: &str = "site-without-global.toml";

/// Absolute path of a fixture document.
pub fn document_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("documents")
        .join(name)
}

/// Load a fixture document.
pub fn load_document(name: &str) -> PluginDocument {
    PluginDocument::load(&document_path(name))
        .unwrap_or_else(|e| panic!("failed to load fixture {name}: {e:#}"))
}
