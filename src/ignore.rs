//! Ignore-path matching.
//!
//! Strict mode can be told to leave entire subtrees alone through a small
//! glob language over JSON paths:
//!
//! | Token | Meaning |
//! |---|---|
//! | `*` | any characters within a single path segment |
//! | `**` | any characters, including segment separators |
//! | `[*]` | any array index |
//! | `\*` | a literal asterisk |
//!
//! Everything else matches literally. Patterns are anchored to the whole
//! path; a pattern that fails to compile is dropped with a debug log and
//! never fails validation.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use tracing::debug;

/// Process-wide glob-to-regex compile cache, keyed by the source pattern.
///
/// First compile and subsequent loads may race; last writer wins, which is
/// harmless because compilation is deterministic for a given pattern.
static PATTERN_CACHE: Lazy<RwLock<HashMap<String, Option<Regex>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// A compiled set of ignore-path patterns.
///
/// # Example
///
/// ```rust
/// use stickler::IgnorePaths;
///
/// let ignore = IgnorePaths::compile(&["$.body.meta.**".to_string()]);
/// assert!(ignore.should_ignore("$.body.meta.build.timestamp"));
/// assert!(!ignore.should_ignore("$.body.name"));
/// ```
pub struct IgnorePaths {
    patterns: Vec<Regex>,
}

impl IgnorePaths {
    /// Compiles a list of glob patterns.
    ///
    /// Invalid patterns are dropped; compilation itself never fails.
    pub fn compile(globs: &[String]) -> Self {
        let mut patterns = Vec::with_capacity(globs.len());
        for glob in globs {
            if let Some(regex) = compile_pattern(glob) {
                patterns.push(regex);
            }
        }
        Self { patterns }
    }

    /// Returns true when any pattern matches the given path.
    pub fn should_ignore(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }

    /// Returns true when no patterns were compiled.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Compiles one glob through the process-wide cache.
fn compile_pattern(glob: &str) -> Option<Regex> {
    if let Some(cached) = PATTERN_CACHE.read().get(glob) {
        return cached.clone();
    }

    let compiled = match Regex::new(&translate(glob)) {
        Ok(regex) => Some(regex),
        Err(err) => {
            debug!(pattern = glob, error = %err, "dropping invalid ignore-path pattern");
            None
        }
    };

    PATTERN_CACHE
        .write()
        .insert(glob.to_string(), compiled.clone());
    compiled
}

/// Translates one glob into an anchored regular expression.
fn translate(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');

    let mut rest = glob;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("\\*") {
            out.push_str(r"\*");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("[*]") {
            out.push_str(r"\[\d+\]");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("**") {
            out.push_str(".*");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('*') {
            // A single segment: stop at `.` and `[` separators.
            out.push_str(r"[^.\[]*");
            rest = tail;
        } else {
            let c = rest.chars().next().expect("rest is non-empty");
            let mut buf = [0u8; 4];
            out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            rest = &rest[c.len_utf8()..];
        }
    }

    out.push('$');
    out
}
