//! Terraform text generation with Tera
//!
//! Every piece of Terraform the plugin emits is a Tera template from
//! [`templates`] rendered by [`TemplateRenderer`] against a context built from
//! the resolved configuration.
//!
//! # Template Syntax
//!
//! Templates use standard Tera syntax plus:
//!
//! - **Functions**: `render_property(key, value, block=false, indent=0)` turns a
//!   scalar or a (nested) map into Terraform attributes (see [`functions`])
//! - **Filters**: `service_plan_resource_name`, `short_prefix` and
//!   `remove(pattern=...)` (see [`filters`])
//!
//! Undefined placeholders render as empty text instead of failing the render.
//!
//! # Example
//!
//! ```rust
//! use mach_azure_minimal::templating::TemplateRenderer;
//! use tera::Context;
//!
//! let mut context = Context::new();
//! context.insert("prefix", "my-site-prd");
//!
//! let rendered = TemplateRenderer::new()
//!     .render("example", r#"{{ render_property(key="prefix", value=prefix) }}"#, &context)
//!     .unwrap();
//! assert_eq!(rendered, r#"prefix = "my-site-prd""#);
//!
//! let short = TemplateRenderer::new()
//!     .render("example", "{{ prefix | short_prefix }}", &context)
//!     .unwrap();
//! assert_eq!(short, "my-site-p");
//! ```

pub mod error;
pub mod filters;
pub mod functions;
pub mod renderer;
pub mod templates;

pub use error::{ErrorLocation, TemplateError};
pub use filters::FilterError;
pub use renderer::TemplateRenderer;
