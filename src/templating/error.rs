//! Structured template errors
//!
//! Tera reports most failures as a chain of plain messages. The renderer turns
//! that chain into a [`TemplateError`] so callers can tell a typo in a variable
//! name apart from a filter rejecting its input.

use std::fmt;

/// Template rendering failure with location details
#[derive(Debug)]
pub enum TemplateError {
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },

    FilterFailed {
        filter: String,
        message: String,
        location: Box<ErrorLocation>,
    },

    FunctionFailed {
        function: String,
        message: String,
        location: Box<ErrorLocation>,
    },

    /// The render context could not be built from the resolved configuration
    InvalidContext {
        message: String,
        location: Box<ErrorLocation>,
    },
}

/// Where a template error occurred
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Name of the template being rendered (e.g. `backend`)
    pub template: String,
    /// Line number if Tera reported one
    pub line_number: Option<usize>,
    /// Numbered template lines around the error
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl ErrorLocation {
    /// A location that only knows the template name.
    #[must_use]
    pub fn template(name: impl Into<String>) -> Self {
        Self {
            template: name.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                location,
                ..
            } => {
                write!(f, "Template variable not found in '{}': '{variable}'", location.template)
            }
            TemplateError::SyntaxError {
                message,
                location,
            } => {
                write!(f, "Template error in '{}': {message}", location.template)
            }
            TemplateError::FilterFailed {
                filter,
                message,
                location,
            } => {
                write!(f, "Filter '{filter}' failed in '{}': {message}", location.template)
            }
            TemplateError::FunctionFailed {
                function,
                message,
                location,
            } => {
                write!(f, "Function '{function}' failed in '{}': {message}", location.template)
            }
            TemplateError::InvalidContext {
                message,
                location,
            } => {
                write!(f, "Invalid render context for '{}': {message}", location.template)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    /// The location the error refers to.
    #[must_use]
    pub fn location(&self) -> &ErrorLocation {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            }
            | TemplateError::FilterFailed {
                location,
                ..
            }
            | TemplateError::FunctionFailed {
                location,
                ..
            }
            | TemplateError::InvalidContext {
                location,
                ..
            } => location,
        }
    }

    /// Generate user-friendly error message with context and suggestions
    #[must_use]
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::VariableNotFound {
                variable,
                available_variables,
                suggestions,
                location,
            } => format_variable_not_found_error(
                variable,
                available_variables,
                suggestions,
                location,
            ),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_failure("Template Syntax Error", message, location),
            TemplateError::FilterFailed {
                filter,
                message,
                location,
            } => {
                let mut msg = format_failure("Filter Failed", message, location);
                msg.push_str(&format!(
                    "SUGGESTION: '{filter}' only accepts strings; check the value piped into it.\n"
                ));
                msg
            }
            TemplateError::FunctionFailed {
                function,
                message,
                location,
            } => {
                let mut msg = format_failure("Function Failed", message, location);
                msg.push_str(&format!(
                    "SUGGESTION: check the arguments passed to '{function}'.\n"
                ));
                msg
            }
            TemplateError::InvalidContext {
                message,
                location,
            } => format_failure("Invalid Render Context", message, location),
        }
    }
}

fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Variable Not Found\n\n");
    msg.push_str(&format!("Variable: {variable}\n"));
    msg.push_str(&format!("Template: {}\n", location.template));
    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {line}\n"));
    }
    msg.push('\n');

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  - {suggestion}\n"));
        }
        msg.push('\n');
    }

    if !available_variables.is_empty() {
        msg.push_str("Available variables in this context:\n");
        for var in available_variables.iter().take(10) {
            msg.push_str(&format!("  {var}\n"));
        }
        if available_variables.len() > 10 {
            msg.push_str(&format!("  ... and {} more\n", available_variables.len() - 10));
        }
        msg.push('\n');
    }

    msg
}

fn format_failure(title: &str, message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str(&format!("ERROR: {title}\n\n"));
    msg.push_str(&format!("Error: {message}\n"));
    msg.push_str(&format!("Template: {}\n", location.template));
    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {line}\n"));
    }

    if let Some(lines) = &location.context_lines {
        msg.push('\n');
        for (number, line) in lines {
            let marker = if Some(*number) == location.line_number {
                ">"
            } else {
                " "
            };
            msg.push_str(&format!("{marker} {number:>4} | {line}\n"));
        }
    }
    msg.push('\n');

    msg
}
