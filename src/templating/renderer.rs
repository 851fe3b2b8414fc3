//! Template rendering engine with Tera.
//!
//! This module provides the [`TemplateRenderer`] that wraps Tera with the
//! plugin's filters and functions and with the rule that undefined placeholders
//! render as empty text.

use regex::Regex;
use std::error::Error as _;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};
use std::sync::OnceLock;
use tracing::debug;

use super::error::{ErrorLocation, TemplateError};
use super::{filters, functions};
use crate::constants::MAX_UNDEFINED_VARIABLE_PASSES;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Number of template lines shown around an error.
const ERROR_CONTEXT_LINES: usize = 3;

/// Patterns matched against Tera error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorPattern {
    VariableNotFound,
    UnknownVariable,
    FilterCall,
    FunctionCall,
    /// Tera's `--> line:column` marker
    Location,
}

impl ErrorPattern {
    const ALL: [Self; 5] = [
        Self::VariableNotFound,
        Self::UnknownVariable,
        Self::FilterCall,
        Self::FunctionCall,
        Self::Location,
    ];

    const fn source(self) -> &'static str {
        match self {
            Self::VariableNotFound => r"Variable `([^`]+)` not found",
            Self::UnknownVariable => r"Unknown variable `([^`]+)`",
            Self::FilterCall => r"Filter call '([^']+)' failed",
            Self::FunctionCall => r"Function call '([^']+)' failed",
            Self::Location => r"-->\s*(\d+):\d+",
        }
    }

    /// Compiled pattern, built once per process.
    fn regex(self) -> Option<&'static Regex> {
        static COMPILED: OnceLock<Vec<Option<Regex>>> = OnceLock::new();
        COMPILED
            .get_or_init(|| Self::ALL.iter().map(|pattern| Regex::new(pattern.source()).ok()).collect())
            .get(self as usize)?
            .as_ref()
    }

    /// First capture group of the pattern in `text`.
    fn capture(self, text: &str) -> Option<String> {
        self.regex()?.captures(text).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
    }
}

/// Template renderer with the Terraform filters and functions registered.
///
/// A fresh Tera instance is built for every render, so the renderer holds no
/// state between calls.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    /// Upper bound on undefined variables defined per render
    max_undefined_passes: usize,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_undefined_passes: MAX_UNDEFINED_VARIABLE_PASSES,
        }
    }

    /// Render `template` against `context`.
    ///
    /// Undefined variables render as empty text: each one reported by Tera is
    /// defined as `null` and the template is rendered again. Rendering is all
    /// or nothing; on error no partial output is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Template syntax is invalid
    /// - A filter or function rejects its input
    /// - An undefined variable cannot be defined (e.g. it indexes into a string)
    pub fn render(
        &self,
        name: &str,
        template: &str,
        context: &TeraContext,
    ) -> Result<String, TemplateError> {
        debug!(template = name, "Rendering template");
        Self::log_context_as_kv(context);

        let mut context = context.clone();
        let mut defined: Vec<String> = Vec::new();

        loop {
            let mut tera = Self::engine();
            let error = match tera.render_str(template, &context) {
                Ok(rendered) => {
                    if !defined.is_empty() {
                        debug!(
                            template = name,
                            variables = ?defined,
                            "Rendered undefined variables as empty"
                        );
                    }
                    return Ok(rendered);
                }
                Err(error) => error,
            };

            let Some(variable) = Self::undefined_variable(&error) else {
                return Err(Self::parse_tera_error(name, &error, template, &context));
            };

            if defined.len() >= self.max_undefined_passes
                || defined.contains(&variable)
                || !Self::define_as_null(&mut context, &variable)
            {
                return Err(Self::parse_tera_error(name, &error, template, &context));
            }
            defined.push(variable);
        }
    }

    /// Build a Tera instance with every filter and function registered.
    fn engine() -> Tera {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        filters::register(&mut tera);
        functions::register(&mut tera);
        tera
    }

    /// Name of the undefined variable behind `error`, if that is the cause.
    fn undefined_variable(error: &tera::Error) -> Option<String> {
        Self::error_messages(error).iter().find_map(|msg| Self::extract_variable_name(msg))
    }

    /// Define a dotted variable path as `null`, creating parent objects.
    ///
    /// Returns `false` when the path cannot be defined, for example when a
    /// parent already holds a string or the path uses indexing.
    fn define_as_null(context: &mut TeraContext, path: &str) -> bool {
        let segments: Vec<&str> = path.split('.').collect();
        if segments
            .iter()
            .any(|segment| segment.is_empty() || segment.contains(['[', ']', '"', '\'']))
        {
            return false;
        }
        let Some((last, parents)) = segments.split_last() else {
            return false;
        };

        let mut root = context.clone().into_json();
        let mut current = &mut root;
        for segment in parents {
            let Some(map) = current.as_object_mut() else {
                return false;
            };
            let entry = map.entry((*segment).to_string()).or_insert(serde_json::Value::Null);
            if entry.is_null() {
                *entry = serde_json::Value::Object(serde_json::Map::new());
            }
            current = entry;
        }
        let Some(map) = current.as_object_mut() else {
            return false;
        };
        map.insert((*last).to_string(), serde_json::Value::Null);

        match TeraContext::from_value(root) {
            Ok(updated) => {
                *context = updated;
                true
            }
            Err(_) => false,
        }
    }

    /// Parse a Tera error into a structured [`TemplateError`]
    fn parse_tera_error(
        name: &str,
        error: &tera::Error,
        template: &str,
        context: &TeraContext,
    ) -> TemplateError {
        let line_number = Self::extract_line_from_tera_error(error);
        let context_lines = line_number
            .map(|line| Self::extract_context_lines(template, line, ERROR_CONTEXT_LINES))
            .filter(|lines| !lines.is_empty());
        let location = Box::new(ErrorLocation {
            template: name.to_string(),
            line_number,
            context_lines,
        });

        let messages = Self::error_messages(error);

        if let Some(variable) = messages.iter().find_map(|msg| Self::extract_variable_name(msg)) {
            let available_variables = Self::extract_available_variables(context);
            let suggestions = Self::find_similar_variables(&variable, &available_variables);
            return TemplateError::VariableNotFound {
                variable,
                available_variables: Box::new(available_variables),
                suggestions: Box::new(suggestions),
                location,
            };
        }

        let message = Self::format_tera_error(error);

        if let Some(filter) = messages.iter().find_map(|msg| ErrorPattern::FilterCall.capture(msg)) {
            return TemplateError::FilterFailed {
                filter,
                message,
                location,
            };
        }

        if let Some(function) =
            messages.iter().find_map(|msg| ErrorPattern::FunctionCall.capture(msg))
        {
            return TemplateError::FunctionFailed {
                function,
                message,
                location,
            };
        }

        TemplateError::SyntaxError {
            message,
            location,
        }
    }

    /// Every message in the error chain, outermost first.
    fn error_messages(error: &tera::Error) -> Vec<String> {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(err) = current {
            messages.push(err.to_string());
            current = err.source();
        }
        messages
    }

    /// Extract variable name from "Variable `foo` not found" message
    fn extract_variable_name(error_msg: &str) -> Option<String> {
        ErrorPattern::VariableNotFound
            .capture(error_msg)
            .or_else(|| ErrorPattern::UnknownVariable.capture(error_msg))
    }

    /// Dotted paths of every leaf in the context, sorted.
    fn extract_available_variables(context: &TeraContext) -> Vec<String> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
            match value {
                serde_json::Value::Object(map) if !map.is_empty() => {
                    for (key, value) in map {
                        let path = if prefix.is_empty() {
                            key.clone()
                        } else {
                            format!("{prefix}.{key}")
                        };
                        walk(&path, value, out);
                    }
                }
                _ if !prefix.is_empty() => out.push(prefix.to_string()),
                _ => {}
            }
        }

        let mut vars = Vec::new();
        walk("", &context.clone().into_json(), &mut vars);
        vars.sort();
        vars
    }

    /// Find similar variable names using Levenshtein distance
    fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
        let mut scored: Vec<_> =
            available.iter().map(|var| (var.clone(), levenshtein(target, var))).collect();

        scored.sort_by_key(|(_, dist)| *dist);

        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(var, _)| var)
            .collect()
    }

    /// Up to `context_size` lines before and after the error line, 1-indexed.
    fn extract_context_lines(
        content: &str,
        error_line: usize,
        context_size: usize,
    ) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();

        if error_line == 0 || error_line > total_lines {
            return Vec::new();
        }

        let start = error_line.saturating_sub(context_size + 1);
        let end = (error_line + context_size).min(total_lines);

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, (*line).to_string()))
            .collect()
    }

    /// Extract line number from Tera parse errors (`--> 1:7`)
    fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
        Self::line_from_messages(&Self::error_messages(error).join("\n"))
    }

    /// Line of the first `--> line:column` marker in `messages`.
    fn line_from_messages(messages: &str) -> Option<usize> {
        ErrorPattern::Location.capture(messages)?.parse::<usize>().ok()
    }

    /// Flatten a Tera error chain into one readable message.
    ///
    /// Drops Tera's internal `__tera_one_off` template name.
    pub fn format_tera_error(error: &tera::Error) -> String {
        let messages: Vec<String> = Self::error_messages(error)
            .into_iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                    .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|msg| {
                !msg.is_empty() && msg != "Template rendering failed" && msg != "Template syntax error"
            })
            .collect();

        if messages.is_empty() {
            "Template syntax error (see details above)".to_string()
        } else {
            messages.join("\n  → ")
        }
    }

    /// Log the template context as key-value pairs at debug level.
    fn log_context_as_kv(context: &TeraContext) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        if let serde_json::Value::Object(map) = context.clone().into_json() {
            for (key, value) in map {
                debug!("  {key}: {value}");
            }
        }
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
