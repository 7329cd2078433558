//! OpenAPI minor version handling.
//!
//! The declared OpenAPI version decides which JSON Schema draft the matcher
//! compiles against and which vocabulary keywords are legal (`nullable` is a
//! 3.0-only keyword).

use std::fmt::{self, Display};
use std::str::FromStr;

use jsonschema::Draft;

/// The OpenAPI minor version a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenApiVersion {
    /// OpenAPI 3.0.x, whose schema dialect derives from JSON Schema draft 4.
    V30,
    /// OpenAPI 3.1.x, whose schema dialect is JSON Schema draft 2020-12.
    V31,
}

impl OpenApiVersion {
    /// Returns the JSON Schema draft used to compile schemas of this version.
    pub fn draft(&self) -> Draft {
        match self {
            OpenApiVersion::V30 => Draft::Draft4,
            OpenApiVersion::V31 => Draft::Draft202012,
        }
    }

    /// Returns true for OpenAPI 3.1 and later dialects.
    pub fn is_31_or_later(&self) -> bool {
        matches!(self, OpenApiVersion::V31)
    }
}

impl Display for OpenApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenApiVersion::V30 => write!(f, "3.0"),
            OpenApiVersion::V31 => write!(f, "3.1"),
        }
    }
}

/// Error produced when a version string is not a supported OpenAPI version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported OpenAPI version '{0}'")]
pub struct UnsupportedVersion(pub String);

impl FromStr for OpenApiVersion {
    type Err = UnsupportedVersion;

    /// Parses a full version string such as `3.0.3` or `3.1.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "3.0" || s.starts_with("3.0.") {
            Ok(OpenApiVersion::V30)
        } else if s == "3.1" || s.starts_with("3.1.") {
            Ok(OpenApiVersion::V31)
        } else {
            Err(UnsupportedVersion(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_patch_versions() {
        assert_eq!("3.0.3".parse::<OpenApiVersion>().unwrap(), OpenApiVersion::V30);
        assert_eq!("3.1.0".parse::<OpenApiVersion>().unwrap(), OpenApiVersion::V31);
        assert_eq!("3.1".parse::<OpenApiVersion>().unwrap(), OpenApiVersion::V31);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("2.0".parse::<OpenApiVersion>().is_err());
        assert!("3.2.0".parse::<OpenApiVersion>().is_err());
    }

    #[test]
    fn test_draft_mapping() {
        assert!(matches!(OpenApiVersion::V30.draft(), Draft::Draft4));
        assert!(matches!(OpenApiVersion::V31.draft(), Draft::Draft202012));
    }
}
