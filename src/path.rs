//! JSON path representation for locating values in nested structures.
//!
//! This module provides [`JsonPath`] and [`PathSegment`] types for building
//! and rendering paths to values in nested JSON-like structures. Paths can
//! carry a printable root such as `$.body` or `$.headers`, and field names
//! that are not identifier-safe are rendered with bracket quoting
//! (`$.body['x-custom']`).

use std::fmt::{self, Display};

/// A segment of a JSON path.
///
/// Paths are built from segments that represent either field access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in a nested JSON-like structure.
///
/// `JsonPath` represents locations like `$.body.users[0].email` and provides
/// methods for building paths incrementally. Each push returns a new path,
/// leaving the original untouched, so a path can be extended down several
/// branches of the same traversal.
///
/// # Example
///
/// ```rust
/// use stickler::JsonPath;
///
/// let path = JsonPath::rooted("$.body")
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "$.body.users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    root: String,
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path with no printable root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates an empty path anchored at a printable root such as `$.body`.
    ///
    /// The root is rendered verbatim in front of all segments.
    pub fn rooted(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            segments: Vec::new(),
        }
    }

    /// Returns a new path with a field segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self {
            root: self.root.clone(),
            segments,
        }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self {
            root: self.root.clone(),
            segments,
        }
    }

    /// Returns true if this path has no segments beyond its root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path, excluding the root.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                root: self.root.clone(),
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

/// Whether a field name can be rendered in dotted form.
///
/// Only identifier-shaped names (an ASCII letter, `_` or `$`, followed by
/// alphanumerics, `_` or `$`) are dotted; everything else, including
/// names with dots, brackets, dashes, or a leading digit, is bracket-quoted.
fn is_identifier_safe(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if is_identifier_safe(name) {
                        if i > 0 || !self.root.is_empty() {
                            write!(f, ".")?;
                        }
                        write!(f, "{}", name)?;
                    } else {
                        write!(f, "['{}']", name.replace('\'', "\\'"))?;
                    }
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_rooted_path_renders_root() {
        let path = JsonPath::rooted("$.body");
        assert!(path.is_root());
        assert_eq!(path.to_string(), "$.body");
    }

    #[test]
    fn test_single_field() {
        let path = JsonPath::root().push_field("user");
        assert_eq!(path.to_string(), "user");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_rooted_field() {
        let path = JsonPath::rooted("$.body").push_field("user");
        assert_eq!(path.to_string(), "$.body.user");
    }

    #[test]
    fn test_field_with_index() {
        let path = JsonPath::rooted("$.body").push_field("users").push_index(0);
        assert_eq!(path.to_string(), "$.body.users[0]");
    }

    #[test]
    fn test_complex_path() {
        let path = JsonPath::rooted("$.body")
            .push_field("users")
            .push_index(0)
            .push_field("email");
        assert_eq!(path.to_string(), "$.body.users[0].email");
    }

    #[test]
    fn test_bracket_quoting_for_unsafe_names() {
        let path = JsonPath::rooted("$.body").push_field("x-c");
        assert_eq!(path.to_string(), "$.body['x-c']");

        let path = JsonPath::rooted("$.body").push_field("a.b");
        assert_eq!(path.to_string(), "$.body['a.b']");

        let path = JsonPath::rooted("$.body").push_field("0leading");
        assert_eq!(path.to_string(), "$.body['0leading']");

        let path = JsonPath::rooted("$.body").push_field("odd[0]");
        assert_eq!(path.to_string(), "$.body['odd[0]']");
    }

    #[test]
    fn test_path_immutability() {
        let base = JsonPath::rooted("$.body").push_field("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "$.body.users");
        assert_eq!(path_a.to_string(), "$.body.users[0]");
        assert_eq!(path_b.to_string(), "$.body.users[1]");
    }

    #[test]
    fn test_parent_path() {
        let path = JsonPath::rooted("$.body")
            .push_field("users")
            .push_index(0)
            .push_field("email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "$.body.users[0]");

        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.to_string(), "$.body.users");

        let root = grandparent.parent().unwrap();
        assert!(root.is_root());

        assert!(root.parent().is_none());
    }

    #[test]
    fn test_last_segment() {
        let path = JsonPath::root().push_field("users").push_index(0);
        assert_eq!(path.last(), Some(&PathSegment::Index(0)));

        let root = JsonPath::root();
        assert_eq!(root.last(), None);
    }

    #[test]
    fn test_equality() {
        let path1 = JsonPath::rooted("$.body").push_field("a").push_index(0);
        let path2 = JsonPath::rooted("$.body").push_field("a").push_index(0);
        let path3 = JsonPath::rooted("$.query").push_field("a").push_index(0);

        assert_eq!(path1, path2);
        assert_ne!(path1, path3);
    }
}
