//! The `render` and `schema` commands.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::fixtures::{EMPTY_JSON, FULL_JSON, FULL_YAML, SITE_WITHOUT_GLOBAL_TOML, document_path};

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("mach-azure-minimal").unwrap();
    cmd.env_remove("AZURE_PLUGIN_ENVIRONMENT")
        .env_remove("AZURE_PLUGIN_PROVIDER_VERSION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_render_text() {
    cmd()
        .arg("render")
        .arg("--input")
        .arg(document_path(FULL_JSON))
        .args(["--site", "my-site", "--environment", "test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# backend\nbackend \"azurerm\" {"))
        .stdout(predicate::str::contains(r#"key                  = "envs/my-site""#))
        .stdout(predicate::str::contains(r#"version = "~> 3.42.0""#))
        .stdout(predicate::str::contains(r#"Environment = "test""#))
        .stdout(predicate::str::contains("# component: api-extensions"))
        .stdout(predicate::str::contains("# component: payment"));
}

#[test]
fn test_render_single_component_json() {
    let output = cmd()
        .arg("render")
        .arg("-i")
        .arg(document_path(FULL_YAML))
        .args(["-s", "my-site", "-c", "api-extensions", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["site"], "my-site");
    let components = value["components"].as_object().unwrap();
    assert_eq!(components.len(), 1);
    assert!(
        components["api-extensions"]["variables"]
            .as_str()
            .unwrap()
            .contains("functionapps_consumption")
    );
    assert_eq!(components["api-extensions"]["providers"][0], "azurerm = azurerm");
}

#[test]
fn test_provider_version_from_environment() {
    cmd()
        .env("AZURE_PLUGIN_PROVIDER_VERSION", ">= 4.0.0")
        .arg("render")
        .arg("--input")
        .arg(document_path(FULL_JSON))
        .args(["--site", "my-site"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"version = ">= 4.0.0""#));
}

#[test]
fn test_invalid_provider_version() {
    cmd()
        .arg("render")
        .arg("--input")
        .arg(document_path(FULL_JSON))
        .args(["--site", "my-site", "--provider-version", "latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("latest"));
}

#[test]
fn test_unknown_site_renders_nothing() {
    cmd()
        .arg("render")
        .arg("--input")
        .arg(document_path(EMPTY_JSON))
        .args(["--site", "my-site"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("has no azure configuration"));
}

#[test]
fn test_site_without_global_fails() {
    cmd()
        .arg("render")
        .arg("--input")
        .arg(document_path(SITE_WITHOUT_GLOBAL_TOML))
        .args(["--site", "my-site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to apply configuration document"))
        .stderr(predicate::str::contains("top-level `global` section"));
}

#[test]
fn test_unsupported_document_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("plugin.ini");
    std::fs::write(&path, "global = true").unwrap();

    cmd()
        .arg("render")
        .arg("--input")
        .arg(&path)
        .args(["--site", "my-site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported configuration document"));
}

#[test]
fn test_missing_document() {
    let temp = TempDir::new().unwrap();

    cmd()
        .arg("render")
        .arg("--input")
        .arg(temp.path().join("missing.json"))
        .args(["--site", "my-site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read configuration document"));
}

#[test]
fn test_schema() {
    let output = cmd().arg("schema").output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for tier in [
        "global_config_schema",
        "remote_state_schema",
        "site_config_schema",
        "component_config_schema",
        "site_component_config_schema",
    ] {
        assert!(value.get(tier).is_some(), "missing {tier}");
    }
}
