//! Validation configuration.

use crate::cache::SchemaCache;

/// Default depth cap for the schema walker.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Configuration for strict validation.
///
/// Options are shared by the body walker and the HTTP surface validators.
/// A freshly constructed `StrictOptions` has strict mode enabled, the
/// default depth cap, and a private schema cache; use the builder methods
/// to share a cache across validators or to suppress subtrees.
///
/// # Example
///
/// ```rust
/// use stickler::{SchemaCache, StrictOptions};
///
/// let cache = SchemaCache::new();
/// let options = StrictOptions::new()
///     .with_ignore_paths(["$.body.metadata.**".to_string()])
///     .with_schema_cache(cache.clone());
///
/// assert!(options.strict_mode());
/// ```
#[derive(Clone)]
pub struct StrictOptions {
    strict_mode: bool,
    ignore_paths: Vec<String>,
    ignored_headers: Option<Vec<String>>,
    ignored_headers_extra: Vec<String>,
    max_depth: usize,
    schema_cache: SchemaCache,
}

impl StrictOptions {
    /// Creates options with strict mode enabled and defaults everywhere else.
    pub fn new() -> Self {
        Self {
            strict_mode: true,
            ignore_paths: Vec::new(),
            ignored_headers: None,
            ignored_headers_extra: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            schema_cache: SchemaCache::new(),
        }
    }

    /// Enables or disables strict mode.
    ///
    /// With strict mode off, every validation entry point is a pass-through
    /// that reports nothing.
    pub fn with_strict_mode(mut self, enabled: bool) -> Self {
        self.strict_mode = enabled;
        self
    }

    /// Sets the glob patterns whose matching subtrees are never reported.
    pub fn with_ignore_paths(mut self, patterns: impl IntoIterator<Item = String>) -> Self {
        self.ignore_paths = patterns.into_iter().collect();
        self
    }

    /// Replaces the default ignored-header set entirely.
    pub fn with_ignored_headers(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.ignored_headers = Some(names.into_iter().collect());
        self
    }

    /// Extends the default ignored-header set with additional names.
    pub fn with_ignored_headers_extra(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.ignored_headers_extra = names.into_iter().collect();
        self
    }

    /// Sets the maximum traversal depth.
    ///
    /// Subtrees deeper than the cap silently report nothing.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Shares a compiled-schema cache with other validators.
    pub fn with_schema_cache(mut self, cache: SchemaCache) -> Self {
        self.schema_cache = cache;
        self
    }

    /// Whether strict mode is enabled.
    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// The configured ignore-path glob patterns.
    pub fn ignore_paths(&self) -> &[String] {
        &self.ignore_paths
    }

    /// The replacement ignored-header set, when one was configured.
    pub fn ignored_headers(&self) -> Option<&[String]> {
        self.ignored_headers.as_deref()
    }

    /// Names added on top of the default ignored-header set.
    pub fn ignored_headers_extra(&self) -> &[String] {
        &self.ignored_headers_extra
    }

    /// The maximum traversal depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The compiled-schema cache handle.
    pub fn schema_cache(&self) -> &SchemaCache {
        &self.schema_cache
    }
}

impl Default for StrictOptions {
    fn default() -> Self {
        Self::new()
    }
}
