//! String-to-scalar coercion.
//!
//! Query, header, and path parameters arrive as strings even when the
//! contract declares a scalar. With coercion enabled the vocabulary takes
//! over the `type` keyword: a string instance against a scalar-typed
//! subschema passes only when it is a valid lexical form of the target
//! type, and everything else falls through to normal type checking.

use jsonschema::paths::{LazyLocation, Location};
use jsonschema::{Keyword, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::KeywordError;

/// JSON integer literal: optional minus, no leading zeros, no fraction,
/// no exponent, no plus sign.
static INTEGER_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(0|[1-9][0-9]*)$").expect("integer literal pattern"));

/// JSON number literal: signed decimal with optional fraction and
/// optional exponent; no `Infinity`, `NaN`, or plus sign.
static NUMBER_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$")
        .expect("number literal pattern")
});

/// One name from a `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonType {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    String,
    Integer,
}

impl JsonType {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "null" => Some(JsonType::Null),
            "boolean" => Some(JsonType::Boolean),
            "object" => Some(JsonType::Object),
            "array" => Some(JsonType::Array),
            "number" => Some(JsonType::Number),
            "string" => Some(JsonType::String),
            "integer" => Some(JsonType::Integer),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Integer => "integer",
        }
    }

    /// Whether this is a coercible scalar type.
    fn is_scalar(&self) -> bool {
        matches!(self, JsonType::Boolean | JsonType::Integer | JsonType::Number)
    }

    /// Standard JSON type membership.
    fn matches(&self, instance: &Value) -> bool {
        match self {
            JsonType::Null => instance.is_null(),
            JsonType::Boolean => instance.is_boolean(),
            JsonType::Object => instance.is_object(),
            JsonType::Array => instance.is_array(),
            JsonType::String => instance.is_string(),
            JsonType::Number => instance.is_number(),
            JsonType::Integer => match instance.as_f64() {
                Some(n) => n.fract() == 0.0,
                None => false,
            },
        }
    }

    /// Whether a string is a valid lexical form of this scalar.
    fn lexical_match(&self, s: &str) -> bool {
        match self {
            JsonType::Boolean => s == "true" || s == "false",
            JsonType::Integer => INTEGER_LITERAL.is_match(s),
            JsonType::Number => NUMBER_LITERAL.is_match(s),
            _ => false,
        }
    }

    fn coercion_reason(&self) -> &'static str {
        match self {
            JsonType::Boolean => "expected 'true' or 'false'",
            JsonType::Integer => "not an integer literal",
            JsonType::Number => "not a number literal",
            _ => "not a scalar type",
        }
    }
}

/// The coercion-aware replacement for the `type` keyword.
struct ScalarTypeKeyword {
    types: Vec<JsonType>,
    schema_path: Location,
}

impl ScalarTypeKeyword {
    fn check(&self, instance: &Value) -> Result<(), KeywordError> {
        if let Value::String(s) = instance {
            let scalars: Vec<JsonType> = self
                .types
                .iter()
                .copied()
                .filter(JsonType::is_scalar)
                .collect();
            if let Some(&first) = scalars.first() {
                // Strings against a scalar-typed schema are judged by
                // their lexical form, even when `string` is also declared.
                if scalars.iter().any(|t| t.lexical_match(s)) {
                    return Ok(());
                }
                return Err(KeywordError::Coercion {
                    source_type: "string",
                    target_type: first.name(),
                    value: s.clone(),
                    reason: first.coercion_reason().to_string(),
                });
            }
        }

        if self.types.iter().any(|t| t.matches(instance)) {
            Ok(())
        } else {
            Err(KeywordError::invalid("type", self.mismatch_message(instance)))
        }
    }

    fn mismatch_message(&self, instance: &Value) -> String {
        let names: Vec<&str> = self.types.iter().map(|t| t.name()).collect();
        format!("{} is not of type {}", instance, names.join(", "))
    }
}

impl Keyword for ScalarTypeKeyword {
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        self.check(instance).map_err(|error| {
            ValidationError::custom(
                self.schema_path.clone(),
                location.into(),
                instance,
                error.to_string(),
            )
        })
    }

    fn is_valid(&self, instance: &Value) -> bool {
        self.check(instance).is_ok()
    }
}

/// Compiles the `type` keyword in coercion mode.
pub(super) fn scalar_type<'a>(
    _parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    let names: Vec<&str> = match value {
        Value::String(name) => vec![name.as_str()],
        Value::Array(entries) => {
            let mut names = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry.as_str() {
                    Some(name) => names.push(name),
                    None => {
                        return Err(compile_error(
                            path,
                            value,
                            "type must be a string or an array of strings",
                        ));
                    }
                }
            }
            names
        }
        _ => {
            return Err(compile_error(
                path,
                value,
                "type must be a string or an array of strings",
            ));
        }
    };

    let mut types = Vec::with_capacity(names.len());
    for name in names {
        match JsonType::parse(name) {
            Some(t) => types.push(t),
            None => {
                return Err(compile_error(
                    path,
                    value,
                    format!("'{name}' is not a valid type"),
                ));
            }
        }
    }

    Ok(Box::new(ScalarTypeKeyword {
        types,
        schema_path: path,
    }))
}

fn compile_error<'a>(
    path: Location,
    value: &'a Value,
    message: impl Into<String>,
) -> ValidationError<'a> {
    ValidationError::custom(
        Location::new(),
        path,
        value,
        KeywordError::invalid("type", message.into()).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_literals() {
        for ok in ["0", "7", "-3", "1200"] {
            assert!(JsonType::Integer.lexical_match(ok), "{ok} should match");
        }
        for bad in ["", "007", "+1", "1.5", "1e3", "-", "abc"] {
            assert!(!JsonType::Integer.lexical_match(bad), "{bad} should not match");
        }
    }

    #[test]
    fn test_number_literals() {
        for ok in ["0", "-0.5", "3.25", "1e10", "6.02E23", "2e-3"] {
            assert!(JsonType::Number.lexical_match(ok), "{ok} should match");
        }
        for bad in ["", "+1", ".5", "1.", "NaN", "Infinity", "0x10"] {
            assert!(!JsonType::Number.lexical_match(bad), "{bad} should not match");
        }
    }

    #[test]
    fn test_boolean_literals() {
        assert!(JsonType::Boolean.lexical_match("true"));
        assert!(JsonType::Boolean.lexical_match("false"));
        assert!(!JsonType::Boolean.lexical_match("True"));
        assert!(!JsonType::Boolean.lexical_match("1"));
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        assert!(JsonType::Integer.matches(&serde_json::json!(1.0)));
        assert!(!JsonType::Integer.matches(&serde_json::json!(1.5)));
    }
}
