//! # Stickler
//!
//! Strict OpenAPI conformance validation: finds the values a payload
//! carries that the contract never declared, even where the schema itself
//! would let them through.
//!
//! ## Overview
//!
//! JSON Schema can only close an object with `additionalProperties: false`.
//! Real OpenAPI contracts are usually open, composed from `allOf` chains
//! and `oneOf` variants behind discriminators, and a
//! standard validator happily accepts any extra member they do not forbid.
//! Stickler walks the data and the schema tree in parallel, computes the
//! set of declared members at every node, and reports everything outside
//! that set with its JSON path, direction, and the schema's source
//! position. The walker never fails: subtrees it cannot analyse simply
//! produce no findings.
//!
//! A companion vocabulary teaches the base JSON Schema compiler the
//! OpenAPI-only keywords (`nullable`, `discriminator`, `example`,
//! `deprecated`) and an optional string-to-scalar coercion mode for
//! parameter validation.
//!
//! ## Core Types
//!
//! - [`StrictValidator`]: body validation over a document's schemas
//! - [`UndeclaredValue`]: a single finding with full path context
//! - [`SchemaStore`] / [`SchemaNode`] / [`SchemaProxy`]: the read-only
//!   schema tree the document loader populates
//! - [`OpenApiVocabulary`]: the keyword extension for the base compiler
//!
//! ## Example
//!
//! ```rust
//! use stickler::{
//!     Direction, OpenApiVersion, SchemaNode, SchemaProxy, SchemaStore, StrictOptions,
//!     StrictValidator,
//! };
//! use serde_json::json;
//!
//! let store = SchemaStore::new();
//! let validator = StrictValidator::new(store, StrictOptions::new(), OpenApiVersion::V31);
//!
//! let schema = SchemaProxy::inline(SchemaNode::new(json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string"},
//!         "age": {"type": "integer"}
//!     }
//! })));
//!
//! let report = validator.validate_body(
//!     &schema,
//!     &json!({"name": "John", "age": 30, "debug": true}),
//!     Direction::Request,
//!     "$.body",
//! );
//!
//! assert!(!report.valid);
//! assert_eq!(report.undeclared[0].path.to_string(), "$.body.debug");
//! ```

pub mod cache;
pub mod ignore;
pub mod options;
pub mod path;
pub mod report;
pub mod schema;
pub mod surface;
pub mod validator;
pub mod version;
pub mod vocabulary;

mod matcher;
mod walker;

pub use cache::{CacheEntry, SchemaCache};
pub use ignore::IgnorePaths;
pub use options::{StrictOptions, DEFAULT_MAX_DEPTH};
pub use path::{JsonPath, PathSegment};
pub use report::{Direction, UndeclaredKind, UndeclaredValue, ValidationReport};
pub use schema::{
    AdditionalProperties, Discriminator, Items, SchemaNode, SchemaProxy, SchemaStore,
    SourceLocation, StoreError,
};
pub use surface::{
    validate_cookies, validate_query_params, validate_request_headers, validate_response_headers,
    Parameter, ParameterLocation,
};
pub use validator::StrictValidator;
pub use version::{OpenApiVersion, UnsupportedVersion};
pub use vocabulary::{KeywordError, OpenApiVocabulary, VOCABULARY_URI};
