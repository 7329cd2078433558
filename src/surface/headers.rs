//! Request and response header validation.
//!
//! Header matching is case-insensitive throughout. Requests carry a
//! configurable ignored set of transport headers the contract never
//! declares, which can be replaced outright or extended; declared names
//! come from header-typed parameters plus whatever the active security
//! schemes contribute. Responses additionally always ignore `Set-Cookie`,
//! which belongs to the cookie machinery rather than the header contract.

use std::collections::HashSet;

use http::HeaderMap;
use once_cell::sync::Lazy;
use serde_json::Value;
use unicase::UniCase;

use crate::ignore::IgnorePaths;
use crate::options::StrictOptions;
use crate::path::JsonPath;
use crate::report::{Direction, UndeclaredKind, UndeclaredValue};

use super::params::{Parameter, ParameterLocation};

/// Transport headers ignored by default.
static DEFAULT_IGNORED_HEADERS: Lazy<HashSet<UniCase<&'static str>>> = Lazy::new(|| {
    [
        "accept",
        "accept-encoding",
        "accept-language",
        "authorization",
        "cache-control",
        "connection",
        "content-length",
        "content-type",
        "cookie",
        "date",
        "forwarded",
        "host",
        "origin",
        "pragma",
        "referer",
        "te",
        "trailer",
        "transfer-encoding",
        "upgrade",
        "user-agent",
        "via",
        "x-forwarded-for",
        "x-forwarded-proto",
    ]
    .into_iter()
    .map(UniCase::new)
    .collect()
});

/// Always ignored in responses, regardless of configuration.
const SET_COOKIE: &str = "set-cookie";

/// Builds the effective ignored-name set from the options.
fn ignored_names(options: &StrictOptions) -> HashSet<UniCase<String>> {
    match options.ignored_headers() {
        // Replace mode: exactly the configured set.
        Some(replacement) => replacement
            .iter()
            .map(|name| UniCase::new(name.clone()))
            .collect(),
        // Extend mode: defaults plus extras.
        None => DEFAULT_IGNORED_HEADERS
            .iter()
            .map(|name| UniCase::new(name.to_string()))
            .chain(
                options
                    .ignored_headers_extra()
                    .iter()
                    .map(|name| UniCase::new(name.clone())),
            )
            .collect(),
    }
}

fn header_record(
    headers: &HeaderMap,
    name: &str,
    path: JsonPath,
    direction: Direction,
    siblings: &[String],
) -> UndeclaredValue {
    let value = headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    UndeclaredValue::new(path, name, direction, UndeclaredKind::Header)
        .with_value(&Value::String(value.to_string()))
        .with_siblings(siblings.to_vec())
}

/// Reports request headers that are neither declared, security-relevant,
/// nor ignored.
///
/// Declared names are the header-typed parameters plus the names the
/// active security schemes contribute (API-key headers and the like), all
/// compared case-insensitively. Returns nothing when strict mode is
/// disabled.
pub fn validate_request_headers(
    headers: &HeaderMap,
    params: &[Parameter],
    security_headers: &[String],
    options: &StrictOptions,
) -> Vec<UndeclaredValue> {
    if !options.strict_mode() {
        return Vec::new();
    }

    let declared: HashSet<UniCase<String>> = params
        .iter()
        .filter(|p| p.location == ParameterLocation::Header)
        .map(|p| UniCase::new(p.name.clone()))
        .chain(
            security_headers
                .iter()
                .map(|name| UniCase::new(name.clone())),
        )
        .collect();
    let siblings: Vec<String> = declared.iter().map(|n| n.to_string()).collect();
    let ignored = ignored_names(options);
    let ignore_paths = IgnorePaths::compile(options.ignore_paths());

    let mut findings = Vec::new();
    for name in headers.keys() {
        let name = name.as_str();
        if ignored.contains(&UniCase::new(name.to_string())) {
            continue;
        }
        if declared.contains(&UniCase::new(name.to_string())) {
            continue;
        }
        let path = JsonPath::rooted("$.headers").push_field(name.to_lowercase());
        if ignore_paths.should_ignore(&path.to_string()) {
            continue;
        }
        findings.push(header_record(
            headers,
            name,
            path,
            Direction::Request,
            &siblings,
        ));
    }
    findings
}

/// Reports response headers the operation does not declare.
///
/// `Set-Cookie` is always ignored; other names go through the configured
/// ignored set and the declared list, compared case-insensitively. Returns
/// nothing when strict mode is disabled.
pub fn validate_response_headers(
    headers: &HeaderMap,
    declared: &[String],
    options: &StrictOptions,
) -> Vec<UndeclaredValue> {
    if !options.strict_mode() {
        return Vec::new();
    }

    let declared: HashSet<UniCase<String>> = declared
        .iter()
        .map(|name| UniCase::new(name.clone()))
        .collect();
    let siblings: Vec<String> = declared.iter().map(|n| n.to_string()).collect();
    let ignored = ignored_names(options);
    let ignore_paths = IgnorePaths::compile(options.ignore_paths());

    let mut findings = Vec::new();
    for name in headers.keys() {
        let name = name.as_str();
        if name.eq_ignore_ascii_case(SET_COOKIE) {
            continue;
        }
        if ignored.contains(&UniCase::new(name.to_string())) {
            continue;
        }
        if declared.contains(&UniCase::new(name.to_string())) {
            continue;
        }
        let path = JsonPath::rooted("$.headers").push_field(name.to_lowercase());
        if ignore_paths.should_ignore(&path.to_string()) {
            continue;
        }
        findings.push(header_record(
            headers,
            name,
            path,
            Direction::Response,
            &siblings,
        ));
    }
    findings
}
