//! Read-only schema tree nodes.
//!
//! The document loader hands the validator a tree of [`SchemaNode`]s, each
//! wrapping the raw subschema as parsed JSON. Children are reached through
//! [`SchemaProxy`] handles: either inline nodes, named references into the
//! shared [`SchemaStore`](crate::SchemaStore) (which is how recursive
//! schemas cycle), or missing, a hole the walker must skip.
//!
//! Nodes are immutable once built. Each node carries a stable 64-bit hash
//! computed at construction, used as the cache key for compiled schemas and
//! as the visited-set identity during traversal.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// The prefix of internal component references.
const COMPONENT_REF_PREFIX: &str = "#/components/schemas/";

/// Source position of a schema's anchoring node in the OpenAPI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: u32,
    pub col: u32,
}

/// An OpenAPI discriminator object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminator {
    /// The property whose string value selects a variant.
    pub property_name: String,
    /// Optional map from discriminator value to schema reference or name.
    pub mapping: IndexMap<String, String>,
}

/// The tri-state `additionalProperties` keyword.
pub enum AdditionalProperties {
    /// Keyword absent.
    Unset,
    /// `additionalProperties: true`.
    Allowed,
    /// `additionalProperties: false`.
    Denied,
    /// A schema that permitted-but-unnamed members must satisfy.
    Schema(SchemaProxy),
}

/// The `items` keyword: absent, `false`, or a schema.
pub enum Items {
    Unset,
    Disallowed,
    Schema(SchemaProxy),
}

/// A single node of a parsed OpenAPI schema tree.
///
/// Wraps the raw subschema value (with `$ref`s left intact) plus the
/// identity and source metadata the walker needs. Accessors parse the raw
/// value on demand; a node whose raw value is not an object answers every
/// accessor with the natural empty result.
#[derive(Debug)]
pub struct SchemaNode {
    raw: Value,
    name: Option<String>,
    location: Option<SourceLocation>,
    hash: u64,
}

impl SchemaNode {
    /// Wraps a raw subschema value.
    pub fn new(raw: Value) -> Self {
        let hash = hash_value(&raw);
        Self {
            raw,
            name: None,
            location: None,
            hash,
        }
    }

    /// Attaches the component name this node is registered under.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches the node's source position in the OpenAPI document.
    pub fn with_location(mut self, line: u32, col: u32) -> Self {
        self.location = Some(SourceLocation { line, col });
        self
    }

    /// The raw subschema as parsed JSON.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The component name, when this node was registered in a store.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Stable 64-bit identity derived from the schema content.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Source position, when the parser recorded one.
    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }

    fn object(&self) -> Option<&Map<String, Value>> {
        self.raw.as_object()
    }

    fn child(&self, key: &str) -> Option<SchemaProxy> {
        self.object()?.get(key).map(SchemaProxy::from_value)
    }

    fn child_list(&self, key: &str) -> Vec<SchemaProxy> {
        self.object()
            .and_then(|o| o.get(key))
            .and_then(Value::as_array)
            .map(|items| items.iter().map(SchemaProxy::from_value).collect())
            .unwrap_or_default()
    }

    fn child_map(&self, key: &str) -> IndexMap<String, SchemaProxy> {
        self.object()
            .and_then(|o| o.get(key))
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), SchemaProxy::from_value(v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn flag(&self, key: &str) -> bool {
        self.object()
            .and_then(|o| o.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> IndexMap<String, SchemaProxy> {
        self.child_map("properties")
    }

    /// Looks up one of the node's own declared properties.
    pub fn property(&self, name: &str) -> Option<SchemaProxy> {
        self.object()?
            .get("properties")?
            .as_object()?
            .get(name)
            .map(SchemaProxy::from_value)
    }

    /// The `additionalProperties` keyword.
    pub fn additional_properties(&self) -> AdditionalProperties {
        match self.object().and_then(|o| o.get("additionalProperties")) {
            None => AdditionalProperties::Unset,
            Some(Value::Bool(true)) => AdditionalProperties::Allowed,
            Some(Value::Bool(false)) => AdditionalProperties::Denied,
            Some(v) => AdditionalProperties::Schema(SchemaProxy::from_value(v)),
        }
    }

    /// True when this node closes with `additionalProperties: false`.
    pub fn closes_additional_properties(&self) -> bool {
        matches!(self.additional_properties(), AdditionalProperties::Denied)
    }

    /// True when this node closes with `unevaluatedProperties: false`.
    pub fn closes_unevaluated_properties(&self) -> bool {
        matches!(
            self.object().and_then(|o| o.get("unevaluatedProperties")),
            Some(Value::Bool(false))
        )
    }

    /// Pattern properties as (source regex, child schema) pairs.
    pub fn pattern_properties(&self) -> Vec<(String, SchemaProxy)> {
        self.object()
            .and_then(|o| o.get("patternProperties"))
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), SchemaProxy::from_value(v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `allOf` members in declaration order.
    pub fn all_of(&self) -> Vec<SchemaProxy> {
        self.child_list("allOf")
    }

    /// `oneOf` variants in declaration order.
    pub fn one_of(&self) -> Vec<SchemaProxy> {
        self.child_list("oneOf")
    }

    /// `anyOf` variants in declaration order.
    pub fn any_of(&self) -> Vec<SchemaProxy> {
        self.child_list("anyOf")
    }

    /// The `if` subschema.
    pub fn if_schema(&self) -> Option<SchemaProxy> {
        self.child("if")
    }

    /// The `then` subschema.
    pub fn then_schema(&self) -> Option<SchemaProxy> {
        self.child("then")
    }

    /// The `else` subschema.
    pub fn else_schema(&self) -> Option<SchemaProxy> {
        self.child("else")
    }

    /// `dependentSchemas`, keyed by trigger property name.
    pub fn dependent_schemas(&self) -> IndexMap<String, SchemaProxy> {
        self.child_map("dependentSchemas")
    }

    /// The discriminator, when present and structurally usable.
    pub fn discriminator(&self) -> Option<Discriminator> {
        let raw = self.object()?.get("discriminator")?.as_object()?;
        let property_name = raw.get("propertyName")?.as_str()?.to_string();
        let mapping = raw
            .get("mapping")
            .and_then(Value::as_object)
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        Some(Discriminator {
            property_name,
            mapping,
        })
    }

    /// `prefixItems` in declaration order.
    pub fn prefix_items(&self) -> Vec<SchemaProxy> {
        self.child_list("prefixItems")
    }

    /// The `items` keyword.
    pub fn items(&self) -> Items {
        match self.object().and_then(|o| o.get("items")) {
            None => Items::Unset,
            Some(Value::Bool(false)) => Items::Disallowed,
            Some(v) => Items::Schema(SchemaProxy::from_value(v)),
        }
    }

    /// The `unevaluatedItems` subschema, when it is a schema.
    pub fn unevaluated_items(&self) -> Option<SchemaProxy> {
        match self.object()?.get("unevaluatedItems")? {
            Value::Bool(_) => None,
            v => Some(SchemaProxy::from_value(v)),
        }
    }

    /// True when this property schema is marked `readOnly`.
    pub fn read_only(&self) -> bool {
        self.flag("readOnly")
    }

    /// True when this property schema is marked `writeOnly`.
    pub fn write_only(&self) -> bool {
        self.flag("writeOnly")
    }
}

/// A lazy handle to a schema node.
///
/// Proxies may legitimately be missing in well-formed input (a loader gap,
/// an unresolvable reference); the walker skips them.
#[derive(Clone)]
pub enum SchemaProxy {
    /// A schema carried inline.
    Inline(Arc<SchemaNode>),
    /// A reference to a named component schema, resolved through the store.
    Ref(String),
    /// No schema; resolution yields nothing.
    Missing,
}

impl SchemaProxy {
    /// Wraps an already-built node.
    pub fn inline(node: SchemaNode) -> Self {
        SchemaProxy::Inline(Arc::new(node))
    }

    /// References a component schema by name.
    pub fn reference(name: impl Into<String>) -> Self {
        SchemaProxy::Ref(name.into())
    }

    /// Builds a proxy from a raw subschema value.
    ///
    /// `$ref` objects become references; `null` becomes a missing proxy.
    pub fn from_value(value: &Value) -> Self {
        if value.is_null() {
            return SchemaProxy::Missing;
        }
        if let Some(reference) = value.get("$ref").and_then(Value::as_str) {
            return SchemaProxy::Ref(short_ref_name(reference).to_string());
        }
        SchemaProxy::Inline(Arc::new(SchemaNode::new(value.clone())))
    }

    /// Resolves the proxy against a store of named schemas.
    pub fn resolve(&self, store: &crate::SchemaStore) -> Option<Arc<SchemaNode>> {
        match self {
            SchemaProxy::Inline(node) => Some(Arc::clone(node)),
            SchemaProxy::Ref(name) => store.get(name),
            SchemaProxy::Missing => None,
        }
    }

    /// The component name this proxy resolves through, when known.
    ///
    /// Inline nodes answer with their registered name, so discriminator
    /// matching works for both reference and inline variants.
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            SchemaProxy::Ref(name) => Some(name),
            SchemaProxy::Inline(node) => node.name(),
            SchemaProxy::Missing => None,
        }
    }

    /// True when resolution can never produce a node.
    pub fn is_missing(&self) -> bool {
        matches!(self, SchemaProxy::Missing)
    }
}

/// Reduces `#/components/schemas/Pet` to `Pet`; other strings pass through.
pub(crate) fn short_ref_name(reference: &str) -> &str {
    reference
        .strip_prefix(COMPONENT_REF_PREFIX)
        .unwrap_or(reference)
}

fn hash_value(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.to_string().hash(&mut hasher);
    hasher.finish()
}
