//! Schema tree types consumed by the walker.
//!
//! The OpenAPI document loader populates these types before validation
//! starts; the validator only ever reads them. [`SchemaNode`] wraps one
//! subschema, [`SchemaProxy`] is a lazy child handle, and [`SchemaStore`]
//! holds the named component schemas that references resolve through.

mod node;
mod store;

pub use node::{
    AdditionalProperties, Discriminator, Items, SchemaNode, SchemaProxy, SourceLocation,
};
pub use store::{SchemaStore, StoreError};

pub(crate) use node::short_ref_name;
