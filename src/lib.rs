//! mach-azure-minimal - minimal Azure plugin for mach composer
//!
//! The plugin receives configuration from the mach composer host in tiers
//! (global, remote state, site, component, site component), merges them per
//! site, and renders the Terraform fragments the host stitches into each
//! site's generated project.
//!
//! # Architecture Overview
//!
//! ```text
//! host ──set_*──▶ AzurePlugin ──▶ ConfigStore (decoded + merged tiers)
//!                     │
//!                     └─render_*──▶ RenderPipeline ──▶ TemplateRenderer (Tera)
//! ```
//!
//! - Every `set_*` call decodes its raw map before touching the store, so a
//!   malformed payload never leaves partial state behind.
//! - Site configuration is merged with the global configuration field by field;
//!   the `features` map is inherited as a whole.
//! - Render calls are pure: for a given store and settings they always return
//!   the same text. Maps are rendered with sorted keys.
//!
//! # Core Modules
//!
//! - [`plugin`] - host-facing facade ([`AzurePlugin`])
//! - [`config`] - configuration tiers, plugin settings and configuration documents
//! - [`store`] - storage and merging of the configuration tiers
//! - [`render`] - render pipeline and template contexts
//! - [`templating`] - Tera engine, filters, `render_property` and templates
//! - [`naming`] - resource naming helpers
//! - [`schema`] - bundled validation schemas
//! - [`core`] - error types and user-facing error formatting
//! - [`cli`] - local rendering from a configuration document
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Render everything the plugin produces for a site
//! mach-azure-minimal render --input plugin.yaml --site my-site
//!
//! # One component, as JSON, with a pinned provider range
//! mach-azure-minimal render -i plugin.json -s my-site -c payment --format json \
//!     --provider-version ">= 3.40.0, < 4.0.0"
//!
//! # Print the validation schemas
//! mach-azure-minimal schema
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod naming;
pub mod plugin;
pub mod render;
pub mod schema;
pub mod store;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use plugin::AzurePlugin;
pub use render::ComponentDescriptor;
pub use schema::ValidationSchema;
