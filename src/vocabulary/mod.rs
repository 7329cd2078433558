//! The OpenAPI schema vocabulary.
//!
//! JSON Schema alone does not know `nullable`, `discriminator`, `example`,
//! or `deprecated`. This module teaches the base compiler about them
//! through per-keyword factories: structural misuse fails compilation,
//! legal usage installs small validate-time hooks whose findings surface
//! as ordinary base-validator errors. An optional coercion mode replaces
//! `type` checking for scalar-typed subschemas so string-carried query and
//! header values can be judged by their lexical form.

mod coercion;
mod keywords;

use jsonschema::ValidationOptions;

use crate::version::OpenApiVersion;

/// Stable identifier for this vocabulary.
pub const VOCABULARY_URI: &str = "urn:stickler:vocabulary:openapi";

/// The OpenAPI keyword vocabulary for one document.
///
/// # Example
///
/// ```rust
/// use stickler::{OpenApiVersion, OpenApiVocabulary};
/// use serde_json::json;
///
/// let vocabulary = OpenApiVocabulary::new(OpenApiVersion::V30);
/// let validator = vocabulary
///     .options()
///     .build(&json!({"type": "string", "nullable": true}))
///     .unwrap();
///
/// assert!(validator.is_valid(&json!("hello")));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OpenApiVocabulary {
    version: OpenApiVersion,
    coerce_scalars: bool,
}

impl OpenApiVocabulary {
    /// Creates the vocabulary for a document of the given version.
    pub fn new(version: OpenApiVersion) -> Self {
        Self {
            version,
            coerce_scalars: false,
        }
    }

    /// Enables string-to-scalar coercion for parameter-style validation.
    pub fn with_scalar_coercion(mut self, enabled: bool) -> Self {
        self.coerce_scalars = enabled;
        self
    }

    /// The document version this vocabulary enforces.
    pub fn version(&self) -> OpenApiVersion {
        self.version
    }

    /// Registers the vocabulary's keywords on compiler options.
    pub fn apply(&self, options: ValidationOptions) -> ValidationOptions {
        let options = match self.version {
            OpenApiVersion::V30 => options.with_keyword("nullable", keywords::nullable_30),
            OpenApiVersion::V31 => options.with_keyword("nullable", keywords::nullable_31),
        };
        let options = options
            .with_keyword("discriminator", keywords::discriminator)
            .with_keyword("example", keywords::example)
            .with_keyword("deprecated", keywords::deprecated);
        if self.coerce_scalars {
            options.with_keyword("type", coercion::scalar_type)
        } else {
            options
        }
    }

    /// Compiler options with the version's draft and this vocabulary.
    pub fn options(&self) -> ValidationOptions {
        self.apply(jsonschema::options().with_draft(self.version.draft()))
    }
}

/// Errors raised by OpenAPI keywords.
///
/// Structural misuse (`Invalid`) is fatal at compile time; the other two
/// arise while validating data and are appended to the base validator's
/// error list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeywordError {
    /// An OpenAPI keyword was used in a structurally invalid way.
    #[error("{keyword}: {message}")]
    Invalid {
        keyword: &'static str,
        message: String,
    },

    /// An object reached a discriminator without its selecting property.
    #[error("discriminator property '{0}' is missing")]
    DiscriminatorPropertyMissing(String),

    /// A string is not a valid lexical form of its declared scalar type.
    #[error("cannot coerce {source_type} '{value}' to {target_type}: {reason}")]
    Coercion {
        source_type: &'static str,
        target_type: &'static str,
        value: String,
        reason: String,
    },
}

impl KeywordError {
    pub(crate) fn invalid(keyword: &'static str, message: impl Into<String>) -> Self {
        KeywordError::Invalid {
            keyword,
            message: message.into(),
        }
    }
}
