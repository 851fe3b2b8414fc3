//! Integration test suite for mach-azure-minimal
//!
//! End-to-end tests that drive the plugin the way the host does, and the
//! binary the way a developer does.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render_full**: every render for a fully configured site
//! - **render_no_data**: renders without configuration produce nothing
//! - **config_order**: ordering rules and atomicity of configuration calls
//! - **documents**: loading configuration documents in every format
//! - **cli**: the `render` and `schema` commands

// Shared fixtures (from parent tests/ directory)
#[path = "../fixtures/mod.rs"]
mod fixtures;

mod cli;
mod config_order;
mod documents;
mod render_full;
mod render_no_data;
