//! Named schema storage and reference resolution.
//!
//! This module provides the [`SchemaStore`] type that holds the component
//! schemas of an OpenAPI document and resolves `$ref` proxies during
//! traversal and compilation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use super::node::SchemaNode;

/// Type alias for the schema storage map.
type SchemaMap = Arc<RwLock<HashMap<String, Arc<SchemaNode>>>>;

/// A thread-safe store of named component schemas.
///
/// Recursive schemas are expressed through references: a node's child proxy
/// names another component, and resolution happens lazily at walk time, so
/// cycles in the schema graph never require cycles in memory.
///
/// # Thread Safety
///
/// The store uses `Arc<RwLock<...>>`:
/// - Multiple validation calls resolve references concurrently
/// - Registration is serialized (write access)
///
/// Cloning a store produces a handle onto the same underlying map.
///
/// # Example
///
/// ```rust
/// use stickler::{SchemaNode, SchemaStore};
/// use serde_json::json;
///
/// let store = SchemaStore::new();
/// store
///     .register("Pet", SchemaNode::new(json!({
///         "type": "object",
///         "properties": {"name": {"type": "string"}}
///     })))
///     .unwrap();
///
/// assert!(store.get("Pet").is_some());
/// assert!(store.get("Unknown").is_none());
/// ```
pub struct SchemaStore {
    schemas: SchemaMap,
}

impl SchemaStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a schema under a component name.
    ///
    /// The node is tagged with the name so discriminator matching can
    /// identify it later. Returns the stored handle.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateName` if the name is already taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        node: SchemaNode,
    ) -> Result<Arc<SchemaNode>, StoreError> {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(StoreError::DuplicateName(name));
        }

        let node = Arc::new(node.with_name(name.clone()));
        schemas.insert(name, Arc::clone(&node));
        Ok(node)
    }

    /// Retrieves a schema by component name.
    pub fn get(&self, name: &str) -> Option<Arc<SchemaNode>> {
        self.schemas.read().get(name).cloned()
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Returns true when no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Renders the registered schemas as a `components`-shaped document.
    ///
    /// Embedding this next to a schema makes `#/components/schemas/...`
    /// references resolvable when the schema is compiled standalone.
    pub fn components_document(&self) -> Value {
        let schemas = self.schemas.read();
        let mut rendered = Map::new();
        for (name, node) in schemas.iter() {
            rendered.insert(name.clone(), node.raw().clone());
        }
        let mut components = Map::new();
        components.insert("schemas".to_string(), Value::Object(rendered));
        Value::Object(components)
    }
}

impl Default for SchemaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaStore {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
        }
    }
}

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Attempted to register a schema with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),
}
