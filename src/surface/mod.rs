//! HTTP surface validation.
//!
//! Bodies get the full schema walker; query parameters, cookies, and
//! headers only need name-level checks against the operation's
//! declarations, rooted at `$.query`, `$.cookies`, and `$.headers` for
//! ignore-path matching.

mod headers;
mod params;

pub use headers::{validate_request_headers, validate_response_headers};
pub use params::{validate_cookies, validate_query_params, Parameter, ParameterLocation};
