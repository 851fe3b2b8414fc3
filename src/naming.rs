//! Resource naming helpers.
//!
//! Pure string functions that keep generated Azure resource names compatible
//! with resources created by earlier tooling. They are also exposed to
//! templates as filters (see [`crate::templating::filters`]).

use crate::constants::{DEFAULT_SERVICE_PLAN, DEFAULT_SERVICE_PLAN_RESOURCE};

/// Environment abbreviations, longest first within each letter.
const SHORT_PREFIXES: &[(&str, &str)] = &[
    ("test", "t"),
    ("prod", "p"),
    ("tst", "t"),
    ("prd", "p"),
    ("dev", "d"),
    ("acc", "a"),
];

/// Terraform resource name of an app service plan.
///
/// The `default` plan keeps the legacy `functionapps` name so existing
/// environments are not recreated.
///
/// ```rust
/// use mach_azure_minimal::naming::service_plan_resource_name;
///
/// assert_eq!(service_plan_resource_name("default"), "functionapps");
/// assert_eq!(service_plan_resource_name("premium"), "functionapps_premium");
/// ```
#[must_use]
pub fn service_plan_resource_name(plan: &str) -> String {
    if plan == DEFAULT_SERVICE_PLAN {
        DEFAULT_SERVICE_PLAN_RESOURCE.to_string()
    } else {
        format!("{DEFAULT_SERVICE_PLAN_RESOURCE}_{plan}")
    }
}

/// Abbreviate environment names inside a resource prefix.
///
/// Replaces `dev`, `test`/`tst`, `acc` and `prod`/`prd` with their first
/// letter in a single left-to-right pass. Replaced text is never scanned
/// again and matching is case-sensitive.
///
/// ```rust
/// use mach_azure_minimal::naming::short_prefix;
///
/// assert_eq!(short_prefix("dev-acc-prd-tst"), "d-a-p-t");
/// ```
#[must_use]
pub fn short_prefix(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    'scan: while !rest.is_empty() {
        for (long, short) in SHORT_PREFIXES {
            if let Some(after) = rest.strip_prefix(long) {
                output.push_str(short);
                rest = after;
                continue 'scan;
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            output.push(c);
        }
        rest = chars.as_str();
    }

    output
}

/// Delete every occurrence of `pattern` from `input`.
///
/// An empty pattern leaves the input unchanged.
#[must_use]
pub fn remove(input: &str, pattern: &str) -> String {
    if pattern.is_empty() {
        return input.to_string();
    }
    input.replace(pattern, "")
}
