//! Schema matching.
//!
//! Variant selection and `if/then/else` gating both need the answer to one
//! question: does standard JSON Schema validation of this value against
//! this schema succeed? The matcher compiles schema nodes through the
//! shared [`SchemaCache`] and answers with the base validator's verdict.
//! OpenAPI-only keywords are plain annotations here, so matcher verdicts
//! stay orthogonal to vocabulary enforcement.

use std::cell::RefCell;
use std::sync::Arc;

use jsonschema::Draft;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, SchemaCache};
use crate::schema::{SchemaNode, SchemaStore};

/// Errors produced while preparing a schema for matching.
///
/// Compilation failures are recoverable: callers treat them as "no match"
/// and may surface the message for diagnostics.
#[derive(Debug, thiserror::Error)]
pub(crate) enum MatchError {
    #[error("schema compilation failed: {0}")]
    Compilation(String),
}

/// Cache-backed answer to "does this value validate against this schema?".
pub(crate) struct Matcher {
    store: SchemaStore,
    cache: SchemaCache,
    draft: Draft,
    /// Last compiled schema, to short-circuit repeated hits during a single
    /// validation pass without touching the shared cache's lock.
    last: RefCell<Option<(u64, Arc<CacheEntry>)>>,
}

impl Matcher {
    pub(crate) fn new(store: SchemaStore, cache: SchemaCache, draft: Draft) -> Self {
        Self {
            store,
            cache,
            draft,
            last: RefCell::new(None),
        }
    }

    /// Whether standard JSON Schema validation of `value` against `node`
    /// produces zero errors.
    pub(crate) fn data_matches_schema(
        &self,
        node: &SchemaNode,
        value: &Value,
    ) -> Result<bool, MatchError> {
        let entry = self.compiled(node)?;
        Ok(entry.compiled.is_valid(value))
    }

    fn compiled(&self, node: &SchemaNode) -> Result<Arc<CacheEntry>, MatchError> {
        let key = node.hash();

        if let Some((last_key, entry)) = self.last.borrow().as_ref() {
            if *last_key == key {
                return Ok(Arc::clone(entry));
            }
        }

        if let Some(entry) = self.cache.load(key) {
            *self.last.borrow_mut() = Some((key, Arc::clone(&entry)));
            return Ok(entry);
        }

        let rendered = self.render_inline(node);
        let compiled = jsonschema::options()
            .with_draft(self.draft)
            .build(&rendered)
            .map_err(|err| {
                debug!(schema = %rendered, error = %err, "schema failed to compile for matching");
                MatchError::Compilation(err.to_string())
            })?;

        let entry = Arc::new(CacheEntry {
            source: node.raw().clone(),
            rendered,
            compiled: Arc::new(compiled),
        });
        self.cache.store(key, Arc::clone(&entry));
        *self.last.borrow_mut() = Some((key, Arc::clone(&entry)));
        Ok(entry)
    }

    /// Renders a node as a self-contained document.
    ///
    /// Component schemas are embedded so `#/components/schemas/...`
    /// references resolve against the rendered document itself.
    fn render_inline(&self, node: &SchemaNode) -> Value {
        let mut rendered = node.raw().clone();
        if let Value::Object(map) = &mut rendered {
            if !self.store.is_empty() && !map.contains_key("components") {
                map.insert("components".to_string(), self.store.components_document());
            }
        }
        rendered
    }
}
