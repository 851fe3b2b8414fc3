//! Custom Tera filters for generated Terraform.
//!
//! Thin wrappers that expose the [`crate::naming`] functions to templates:
//!
//! | Filter                       | Example                                       |
//! |------------------------------|-----------------------------------------------|
//! | `service_plan_resource_name` | `{{ "default" \| service_plan_resource_name }}` → `functionapps` |
//! | `short_prefix`               | `{{ "mysite-prd" \| short_prefix }}` → `mysite-p` |
//! | `remove`                     | `{{ "my-site" \| remove(pattern="-") }}` → `mysite` |
//!
//! Every filter only accepts strings. Any other input fails the render with a
//! [`FilterError`], which the renderer reports as a filter failure.

use std::collections::HashMap;
use tera::{Tera, Value};
use thiserror::Error;

use crate::naming;

/// Type errors raised by the naming filters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter input was not a string
    #[error("filter '{filter}' is only applicable on strings, got {actual}")]
    NotAString {
        filter: &'static str,
        actual: &'static str,
    },

    /// A required string argument was missing or had another type
    #[error("filter '{filter}' requires a string '{argument}' argument")]
    MissingArgument {
        filter: &'static str,
        argument: &'static str,
    },
}

impl From<FilterError> for tera::Error {
    fn from(error: FilterError) -> Self {
        tera::Error::msg(error.to_string())
    }
}

/// Register every naming filter on `tera`.
pub fn register(tera: &mut Tera) {
    tera.register_filter("service_plan_resource_name", service_plan_resource_name);
    tera.register_filter("short_prefix", short_prefix);
    tera.register_filter("remove", remove);
}

fn service_plan_resource_name(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let plan = expect_str("service_plan_resource_name", value)?;
    Ok(Value::String(naming::service_plan_resource_name(plan)))
}

fn short_prefix(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let input = expect_str("short_prefix", value)?;
    Ok(Value::String(naming::short_prefix(input)))
}

fn remove(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let input = expect_str("remove", value)?;
    let pattern = args.get("pattern").and_then(Value::as_str).ok_or(FilterError::MissingArgument {
        filter: "remove",
        argument: "pattern",
    })?;
    Ok(Value::String(naming::remove(input, pattern)))
}

fn expect_str<'a>(filter: &'static str, value: &'a Value) -> Result<&'a str, FilterError> {
    value.as_str().ok_or(FilterError::NotAString {
        filter,
        actual: value_kind(value),
    })
}

/// Human-readable name of a JSON value's type.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    fn render(template: &str, context: &Context) -> tera::Result<String> {
        let mut tera = Tera::default();
        register(&mut tera);
        tera.render_str(template, context)
    }

    fn error_chain(error: &tera::Error) -> String {
        let mut messages = vec![error.to_string()];
        let mut source = std::error::Error::source(error);
        while let Some(inner) = source {
            messages.push(inner.to_string());
            source = inner.source();
        }
        messages.join(": ")
    }

    #[test]
    fn test_service_plan_filter() {
        let context = Context::new();
        assert_eq!(
            render(r#"{{ "default" | service_plan_resource_name }}"#, &context).unwrap(),
            "functionapps"
        );
        assert_eq!(
            render(r#"{{ "premium" | service_plan_resource_name }}"#, &context).unwrap(),
            "functionapps_premium"
        );
    }

    #[test]
    fn test_short_prefix_filter() {
        let mut context = Context::new();
        context.insert("prefix", "mysite-dev");
        assert_eq!(render("{{ prefix | short_prefix }}", &context).unwrap(), "mysite-d");
    }

    #[test]
    fn test_remove_filter() {
        let context = Context::new();
        assert_eq!(render(r#"{{ "abcabc" | remove(pattern="bc") }}"#, &context).unwrap(), "aa");
    }

    #[test]
    fn test_filters_reject_non_strings() {
        let context = Context::new();

        let err = render("{{ 42 | short_prefix }}", &context).unwrap_err();
        assert!(error_chain(&err).contains("only applicable on strings"));

        let err = render("{{ true | service_plan_resource_name }}", &context).unwrap_err();
        assert!(error_chain(&err).contains("only applicable on strings"));

        let err = render("{{ 42 | remove(pattern=\"4\") }}", &context).unwrap_err();
        assert!(error_chain(&err).contains("only applicable on strings"));
    }

    #[test]
    fn test_remove_requires_string_pattern() {
        let context = Context::new();

        let err = render(r#"{{ "abc" | remove(pattern=1) }}"#, &context).unwrap_err();
        assert!(error_chain(&err).contains("requires a string 'pattern'"));

        let err = render(r#"{{ "abc" | remove }}"#, &context).unwrap_err();
        assert!(error_chain(&err).contains("requires a string 'pattern'"));
    }

    #[test]
    fn test_filter_error_messages() {
        let error = FilterError::NotAString {
            filter: "short_prefix",
            actual: value_kind(&Value::Bool(true)),
        };
        assert_eq!(
            error.to_string(),
            "filter 'short_prefix' is only applicable on strings, got a boolean"
        );
    }
}
