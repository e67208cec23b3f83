//! Inbound JSON:API deserialization.
//!
//! This module turns a parsed JSON:API document into a flat attribute map
//! plus a provenance map from each output key to the JSON Pointer of its
//! source.
//!
//! - [`KeyFormat`]: casing policy applied to extracted keys
//! - [`FieldSpec`] / [`RelationshipSpec`]: per-member rules
//! - [`ResourceSchema`] / [`ResourceSchemaBuilder`]: per-type rule sets
//! - [`deserialize`] / [`deserialize_collection`]: the engine
//! - [`DeserializationResult`]: attributes and pointers
//! - [`MalformedDocumentError`]: the only failure mode

mod engine;
mod errors;
mod field;
mod key_format;
mod result;
mod schema;

pub use engine::{deserialize, deserialize_collection};
pub use errors::MalformedDocumentError;
pub use field::{
    AttributeTransform, FieldSpec, Linkage, RelationshipSpec, RelationshipTransform,
    ResourceIdentifier,
};
pub use key_format::KeyFormat;
pub use result::DeserializationResult;
pub use schema::{ResourceSchema, ResourceSchemaBuilder};
