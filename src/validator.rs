//! Top-level validation entry points.

use serde_json::Value;

use crate::options::StrictOptions;
use crate::path::JsonPath;
use crate::report::{Direction, ValidationReport};
use crate::schema::{SchemaProxy, SchemaStore};
use crate::version::OpenApiVersion;
use crate::walker::{WalkContext, Walker};

/// Strict conformance validation for one OpenAPI document.
///
/// Ties together the document's component schemas, the shared options, and
/// the declared version. The validator is cheap to clone and safe to use
/// from multiple threads; each `validate_body` call runs an independent
/// traversal over the shared immutable schema tree.
///
/// # Example
///
/// ```rust
/// use stickler::{
///     Direction, OpenApiVersion, SchemaNode, SchemaProxy, SchemaStore, StrictOptions,
///     StrictValidator,
/// };
/// use serde_json::json;
///
/// let store = SchemaStore::new();
/// let validator = StrictValidator::new(store, StrictOptions::new(), OpenApiVersion::V31);
///
/// let schema = SchemaProxy::inline(SchemaNode::new(json!({
///     "type": "object",
///     "properties": {"name": {"type": "string"}, "age": {"type": "integer"}}
/// })));
/// let report = validator.validate_body(
///     &schema,
///     &json!({"name": "John", "age": 30, "extra": "x"}),
///     Direction::Request,
///     "$.body",
/// );
///
/// assert!(!report.valid);
/// assert_eq!(report.undeclared[0].path.to_string(), "$.body.extra");
/// ```
#[derive(Clone)]
pub struct StrictValidator {
    store: SchemaStore,
    options: StrictOptions,
    version: OpenApiVersion,
}

impl StrictValidator {
    /// Creates a validator over a document's component schemas.
    pub fn new(store: SchemaStore, options: StrictOptions, version: OpenApiVersion) -> Self {
        Self {
            store,
            options,
            version,
        }
    }

    /// The component schema store this validator resolves references through.
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// The shared options.
    pub fn options(&self) -> &StrictOptions {
        &self.options
    }

    /// Walks a body value against its schema and reports every undeclared
    /// member.
    ///
    /// `base_path` roots the reported JSON paths, conventionally `$.body`.
    /// A missing schema, or strict mode being off, yields a valid, empty
    /// report: there is no contract to be stricter than.
    pub fn validate_body(
        &self,
        schema: &SchemaProxy,
        data: &Value,
        direction: Direction,
        base_path: &str,
    ) -> ValidationReport {
        if !self.options.strict_mode() {
            return ValidationReport::valid();
        }
        let Some(node) = schema.resolve(&self.store) else {
            return ValidationReport::valid();
        };

        let walker = Walker::new(&self.store, &self.options, direction, self.version);
        let ctx = WalkContext {
            path: JsonPath::rooted(base_path),
            depth: 0,
        };
        ValidationReport::from_findings(walker.validate_value(&ctx, &node, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;
    use serde_json::json;

    fn validator() -> StrictValidator {
        StrictValidator::new(
            SchemaStore::new(),
            StrictOptions::new(),
            OpenApiVersion::V31,
        )
    }

    #[test]
    fn test_missing_schema_is_valid() {
        let report = validator().validate_body(
            &SchemaProxy::Missing,
            &json!({"anything": 1}),
            Direction::Request,
            "$.body",
        );
        assert!(report.valid);
        assert!(report.undeclared.is_empty());
    }

    #[test]
    fn test_unresolvable_reference_is_valid() {
        let report = validator().validate_body(
            &SchemaProxy::reference("Nowhere"),
            &json!({"anything": 1}),
            Direction::Request,
            "$.body",
        );
        assert!(report.valid);
    }

    #[test]
    fn test_strict_mode_off_is_pass_through() {
        let validator = StrictValidator::new(
            SchemaStore::new(),
            StrictOptions::new().with_strict_mode(false),
            OpenApiVersion::V31,
        );
        let schema = SchemaProxy::inline(SchemaNode::new(json!({"properties": {}})));
        let report =
            validator.validate_body(&schema, &json!({"x": 1}), Direction::Request, "$.body");
        assert!(report.valid);
    }

    #[test]
    fn test_base_path_roots_findings() {
        let schema = SchemaProxy::inline(SchemaNode::new(json!({
            "type": "object",
            "properties": {"name": {"type": "string"}}
        })));
        let report = validator().validate_body(
            &schema,
            &json!({"name": "a", "extra": 1}),
            Direction::Response,
            "$.response.body",
        );
        assert_eq!(report.undeclared.len(), 1);
        assert_eq!(
            report.undeclared[0].path.to_string(),
            "$.response.body.extra"
        );
        assert_eq!(report.undeclared[0].direction, Direction::Response);
    }
}
