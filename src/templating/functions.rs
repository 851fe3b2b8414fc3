//! Template functions that turn dynamic maps into Terraform text.
//!
//! `render_property` is the only way maps of unknown shape (tags, provider
//! features, component variables) reach the output:
//!
//! ```text
//! {{ render_property(key="tags", value=tags, indent=1) }}
//! ```
//!
//! renders, for `tags = {"Environment": "test", "SiteName": "my-site"}`:
//!
//! ```text
//! tags = {
//!     Environment = "test"
//!     SiteName    = "my-site"
//!   }
//! ```
//!
//! The first line carries no indentation because the template already placed
//! the call at the right column. Entries are sorted by key and the `=` signs of
//! the scalar entries of one level are aligned.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tera::Tera;

/// Spaces per nesting level.
const INDENT_WIDTH: usize = 2;

/// Register every rendering function on `tera`.
pub fn register(tera: &mut Tera) {
    tera.register_function("render_property", render_property);
}

/// `render_property(key, value, block=false, indent=0)`
///
/// - scalar → `key = "value"` (strings quoted, booleans and numbers bare)
/// - list → `key = ["a", 1]` on one line
/// - map → `key = {` (or `key {` with `block=true`) followed by one line per
///   entry, recursing into nested maps
/// - `null`, or a map without any renderable entry → nothing
pub fn render_property(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let key = args
        .get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("render_property requires a string 'key' argument"))?;
    let value = args.get("value").unwrap_or(&Value::Null);
    let block = match args.get("block") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(block)) => *block,
        Some(_) => return Err(tera::Error::msg("render_property 'block' must be a boolean")),
    };
    let indent = match args.get("indent") {
        None | Some(Value::Null) => 0,
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| tera::Error::msg("render_property 'indent' must be a non-negative integer"))?,
    };

    let mut output = String::new();
    write_property(&mut output, key, value, block, indent, 0)?;
    Ok(Value::String(output))
}

/// Render one property; `width` pads the key for `=` alignment.
fn write_property(
    output: &mut String,
    key: &str,
    value: &Value,
    block: bool,
    indent: usize,
    width: usize,
) -> tera::Result<()> {
    let name = format_key(key);
    match value {
        Value::Null => {}
        Value::Object(map) => {
            let mut entries = String::new();
            write_entries(&mut entries, map, block, indent + 1)?;
            if entries.is_empty() {
                return Ok(());
            }
            if block {
                output.push_str(&format!("{name} {{"));
            } else {
                output.push_str(&format!("{name} = {{"));
            }
            output.push_str(&entries);
            output.push('\n');
            output.push_str(&pad(indent));
            output.push('}');
        }
        inline => {
            output.push_str(&format!("{name:<width$} = {}", format_inline(inline)?));
        }
    }
    Ok(())
}

fn write_entries(
    output: &mut String,
    map: &Map<String, Value>,
    block: bool,
    indent: usize,
) -> tera::Result<()> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let width = entries
        .iter()
        .filter(|(_, value)| is_inline(value))
        .map(|(key, _)| format_key(key).chars().count())
        .max()
        .unwrap_or(0);

    for (key, value) in entries {
        let mut line = String::new();
        write_property(&mut line, key, value, block, indent, width)?;
        if !line.is_empty() {
            output.push('\n');
            output.push_str(&pad(indent));
            output.push_str(&line);
        }
    }
    Ok(())
}

/// Single-line HCL expression for a scalar, list or list element.
///
/// Maps nested inside lists become `{ key = value, ... }` objects.
fn format_inline(value: &Value) -> tera::Result<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::String(s) => serde_json::to_string(s).map_err(tera::Error::json),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => {
            let items = items.iter().map(format_inline).collect::<tera::Result<Vec<_>>>()?;
            Ok(format!("[{}]", items.join(", ")))
        }
        Value::Object(map) if map.is_empty() => Ok("{}".to_string()),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let entries = entries
                .into_iter()
                .map(|(key, value)| -> tera::Result<String> {
                    Ok(format!("{} = {}", format_key(key), format_inline(value)?))
                })
                .collect::<tera::Result<Vec<_>>>()?;
            Ok(format!("{{ {} }}", entries.join(", ")))
        }
    }
}

/// Entries written on one line and therefore aligned.
const fn is_inline(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Bool(_) | Value::Number(_) | Value::Array(_))
}

/// Terraform identifier: a letter or `_`, then letters, digits, `_` or `-`.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Quote keys that are not valid Terraform identifiers.
fn format_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}

fn pad(indent: usize) -> String {
    " ".repeat(indent * INDENT_WIDTH)
}
