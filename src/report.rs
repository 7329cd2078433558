//! Undeclared-value records and report assembly.
//!
//! This module provides [`UndeclaredValue`], the single finding type the
//! walker and the HTTP surface validators produce, and
//! [`ValidationReport`], the result of a body validation call.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::path::JsonPath;
use crate::schema::SourceLocation;

/// Longest string kept verbatim in a record's example value.
const MAX_VALUE_CHARS: usize = 47;

/// Largest container rendered verbatim in a record's example value.
const MAX_CONTAINER_ENTRIES: usize = 3;

/// Whether a payload travels toward the server or away from it.
///
/// Direction decides which declared properties are visible: `readOnly`
/// properties do not exist for requests, `writeOnly` properties do not
/// exist for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// An HTTP request body, parameter, or header.
    Request,
    /// An HTTP response body or header.
    Response,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Request => write!(f, "request"),
            Direction::Response => write!(f, "response"),
        }
    }
}

/// What kind of member an undeclared record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndeclaredKind {
    /// An object property or array element in a body.
    Property,
    /// A query parameter.
    Query,
    /// A cookie.
    Cookie,
    /// An HTTP header.
    Header,
}

/// A member found in the data that the contract does not declare.
///
/// # Example
///
/// ```rust
/// use stickler::{Direction, JsonPath, UndeclaredKind, UndeclaredValue};
/// use serde_json::json;
///
/// let record = UndeclaredValue::new(
///     JsonPath::rooted("$.body").push_field("extra"),
///     "extra",
///     Direction::Request,
///     UndeclaredKind::Property,
/// )
/// .with_value(&json!("x"))
/// .with_siblings(vec!["name".to_string(), "age".to_string()]);
///
/// assert_eq!(record.path.to_string(), "$.body.extra");
/// assert_eq!(record.siblings, vec!["name", "age"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UndeclaredValue {
    /// Where in the payload the member was found.
    pub path: JsonPath,
    /// The member's name (or stringified index for array elements).
    pub name: String,
    /// The offending value, truncated when large.
    pub value: Value,
    /// The declared names the member was compared against.
    pub siblings: Vec<String>,
    /// Whether this was found in a request or a response.
    pub direction: Direction,
    /// What kind of member this is.
    pub kind: UndeclaredKind,
    /// Source position of the surrounding schema, when known.
    pub location: Option<SourceLocation>,
}

impl UndeclaredValue {
    /// Creates a new record with an empty value and no siblings.
    pub fn new(
        path: JsonPath,
        name: impl Into<String>,
        direction: Direction,
        kind: UndeclaredKind,
    ) -> Self {
        Self {
            path,
            name: name.into(),
            value: Value::Null,
            siblings: Vec::new(),
            direction,
            kind,
            location: None,
        }
    }

    /// Attaches the offending value, truncating large strings and containers.
    pub fn with_value(mut self, value: &Value) -> Self {
        self.value = truncate_value(value);
        self
    }

    /// Attaches the declared sibling names for caller hints.
    pub fn with_siblings(mut self, siblings: Vec<String>) -> Self {
        self.siblings = siblings;
        self
    }

    /// Attaches the surrounding schema's source position.
    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }
}

impl Display for UndeclaredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: undeclared {} '{}' in {}",
            self.path,
            match self.kind {
                UndeclaredKind::Property => "property",
                UndeclaredKind::Query => "query parameter",
                UndeclaredKind::Cookie => "cookie",
                UndeclaredKind::Header => "header",
            },
            self.name,
            self.direction,
        )?;
        if let Some(loc) = self.location {
            write!(f, " (declared at line {}, col {})", loc.line, loc.col)?;
        }
        Ok(())
    }
}

/// The result of one body validation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// True when no undeclared values were found.
    pub valid: bool,
    /// Every undeclared member, in data-iteration order.
    pub undeclared: Vec<UndeclaredValue>,
}

impl ValidationReport {
    /// Builds a report from a list of findings.
    pub fn from_findings(undeclared: Vec<UndeclaredValue>) -> Self {
        Self {
            valid: undeclared.is_empty(),
            undeclared,
        }
    }

    /// A report with no findings.
    pub fn valid() -> Self {
        Self {
            valid: true,
            undeclared: Vec::new(),
        }
    }
}

/// Shrinks a value to a reportable example.
///
/// Strings longer than 47 characters keep their first 47 characters plus an
/// ellipsis; objects and arrays with more than three entries collapse to
/// `{...}` / `[...]`; everything else is kept as-is.
pub(crate) fn truncate_value(value: &Value) -> Value {
    match value {
        Value::String(s) if s.chars().count() > MAX_VALUE_CHARS => {
            let mut truncated: String = s.chars().take(MAX_VALUE_CHARS).collect();
            truncated.push_str("...");
            Value::String(truncated)
        }
        Value::Object(map) if map.len() > MAX_CONTAINER_ENTRIES => {
            Value::String("{...}".to_string())
        }
        Value::Array(items) if items.len() > MAX_CONTAINER_ENTRIES => {
            Value::String("[...]".to_string())
        }
        other => other.clone(),
    }
}
