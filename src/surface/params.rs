//! Query and cookie validation.
//!
//! Parameters arrive already deserialized as name/value pairs; the only
//! question here is whether each name is declared by the operation's
//! parameter list or suppressed by an ignore path.

use serde_json::Value;
use std::collections::HashSet;

use crate::ignore::IgnorePaths;
use crate::options::StrictOptions;
use crate::path::JsonPath;
use crate::report::{Direction, UndeclaredKind, UndeclaredValue};

/// Where an OpenAPI parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// One declared operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
}

impl Parameter {
    /// Creates a parameter declaration.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    /// Shorthand for a query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    /// Shorthand for a header parameter.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header)
    }

    /// Shorthand for a cookie parameter.
    pub fn cookie(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Cookie)
    }
}

/// Reports query parameters the contract does not declare.
///
/// Returns nothing when strict mode is disabled.
///
/// # Example
///
/// ```rust
/// use stickler::{validate_query_params, Parameter, StrictOptions};
///
/// let received = vec![("limit".to_string(), "10".to_string()),
///                     ("debug".to_string(), "1".to_string())];
/// let declared = vec![Parameter::query("limit")];
///
/// let findings = validate_query_params(&received, &declared, &StrictOptions::new());
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].path.to_string(), "$.query.debug");
/// ```
pub fn validate_query_params(
    values: &[(String, String)],
    params: &[Parameter],
    options: &StrictOptions,
) -> Vec<UndeclaredValue> {
    validate_pairs(
        values,
        params,
        ParameterLocation::Query,
        "$.query",
        UndeclaredKind::Query,
        options,
    )
}

/// Reports cookies the contract does not declare.
///
/// Returns nothing when strict mode is disabled.
pub fn validate_cookies(
    values: &[(String, String)],
    params: &[Parameter],
    options: &StrictOptions,
) -> Vec<UndeclaredValue> {
    validate_pairs(
        values,
        params,
        ParameterLocation::Cookie,
        "$.cookies",
        UndeclaredKind::Cookie,
        options,
    )
}

fn validate_pairs(
    values: &[(String, String)],
    params: &[Parameter],
    location: ParameterLocation,
    root: &str,
    kind: UndeclaredKind,
    options: &StrictOptions,
) -> Vec<UndeclaredValue> {
    if !options.strict_mode() {
        return Vec::new();
    }

    let declared: HashSet<&str> = params
        .iter()
        .filter(|p| p.location == location)
        .map(|p| p.name.as_str())
        .collect();
    let siblings: Vec<String> = declared.iter().map(|n| n.to_string()).collect();
    let ignore = IgnorePaths::compile(options.ignore_paths());

    let mut findings = Vec::new();
    for (name, value) in values {
        if declared.contains(name.as_str()) {
            continue;
        }
        let path = JsonPath::rooted(root).push_field(name);
        if ignore.should_ignore(&path.to_string()) {
            continue;
        }
        findings.push(
            UndeclaredValue::new(path, name, Direction::Request, kind)
                .with_value(&Value::String(value.clone()))
                .with_siblings(siblings.clone()),
        );
    }
    findings
}
