//! Declarative per-resource-type deserialization schemas.
//!
//! A [`ResourceSchema`] is assembled through a [`ResourceSchemaBuilder`] and
//! is immutable once built. Share it behind an [`Arc`](std::sync::Arc) (the
//! [`SchemaRegistry`](crate::SchemaRegistry) does this) and read it from as
//! many request handlers as needed without locking.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_adapter::{FieldSpec, KeyFormat, RelationshipSpec, ResourceSchema, ResourceType};
//! use serde_json::{Map, Value};
//!
//! let schema = ResourceSchema::builder(ResourceType::new("users").unwrap())
//!     .key_format(KeyFormat::SnakeCase)
//!     .attribute("fullName", FieldSpec::new().transform(|value: &Value| {
//!         let full = value.as_str().unwrap_or_default();
//!         let (first, last) = full.split_once(' ').unwrap_or((full, ""));
//!         let mut out = Map::new();
//!         out.insert("first_name".to_string(), Value::from(first));
//!         out.insert("last_name".to_string(), Value::from(last));
//!         out
//!     }))
//!     .attribute("email", FieldSpec::renamed("emailAddress"))
//!     .relationship("team", RelationshipSpec::new())
//!     .build();
//!
//! assert_eq!(schema.resource_type().as_ref(), "users");
//! assert!(schema.field("fullName").is_some());
//! assert!(schema.field("unknown").is_none());
//! ```

use std::collections::HashMap;

use crate::config::ResourceType;

use super::field::{FieldSpec, RelationshipSpec};
use super::key_format::KeyFormat;

/// How one resource type is deserialized.
///
/// At most one [`FieldSpec`] is held per attribute key and one
/// [`RelationshipSpec`] per relationship key. Attribute keys with no spec
/// use the default behaviour: the key format is applied to the raw key and
/// the value passes through unchanged.
#[derive(Clone, Debug)]
pub struct ResourceSchema {
    resource_type: ResourceType,
    key_format: KeyFormat,
    fields: HashMap<String, FieldSpec>,
    relationships: HashMap<String, RelationshipSpec>,
    default_relationships: bool,
}

// Verify ResourceSchema is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceSchema>();
};

impl ResourceSchema {
    /// Creates a builder for a schema describing `resource_type`.
    #[must_use]
    pub fn builder(resource_type: ResourceType) -> ResourceSchemaBuilder {
        ResourceSchemaBuilder::new(resource_type)
    }

    /// Returns the resource type this schema describes.
    #[must_use]
    pub const fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    /// Returns the key format.
    #[must_use]
    pub const fn key_format(&self) -> &KeyFormat {
        &self.key_format
    }

    /// Looks up the spec registered for an attribute key.
    #[must_use]
    pub fn field(&self, source_key: &str) -> Option<&FieldSpec> {
        self.fields.get(source_key)
    }

    /// Looks up the spec registered for a relationship key.
    #[must_use]
    pub fn relationship(&self, source_key: &str) -> Option<&RelationshipSpec> {
        self.relationships.get(source_key)
    }

    /// Returns the number of attribute specs.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the number of relationship specs.
    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Returns whether undeclared relationships get the default expansion.
    #[must_use]
    pub const fn default_relationships(&self) -> bool {
        self.default_relationships
    }
}

/// Builder for [`ResourceSchema`].
///
/// Registering a key twice replaces the earlier spec.
#[derive(Debug)]
pub struct ResourceSchemaBuilder {
    resource_type: ResourceType,
    key_format: KeyFormat,
    fields: HashMap<String, FieldSpec>,
    relationships: HashMap<String, RelationshipSpec>,
    default_relationships: bool,
}

impl ResourceSchemaBuilder {
    /// Creates a builder with the identity key format and no specs.
    #[must_use]
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            key_format: KeyFormat::Identity,
            fields: HashMap::new(),
            relationships: HashMap::new(),
            default_relationships: false,
        }
    }

    /// Sets the key format applied to every non-transformed output key.
    #[must_use]
    pub fn key_format(mut self, key_format: KeyFormat) -> Self {
        self.key_format = key_format;
        self
    }

    /// Registers the spec for an attribute.
    #[must_use]
    pub fn attribute(mut self, source_key: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(source_key.into(), spec);
        self
    }

    /// Registers the spec for a relationship.
    #[must_use]
    pub fn relationship(mut self, source_key: impl Into<String>, spec: RelationshipSpec) -> Self {
        self.relationships.insert(source_key.into(), spec);
        self
    }

    /// Opts undeclared relationships into the default id/type expansion.
    #[must_use]
    pub const fn default_relationships(mut self, enabled: bool) -> Self {
        self.default_relationships = enabled;
        self
    }

    /// Finalizes the schema.
    #[must_use]
    pub fn build(self) -> ResourceSchema {
        ResourceSchema {
            resource_type: self.resource_type,
            key_format: self.key_format,
            fields: self.fields,
            relationships: self.relationships,
            default_relationships: self.default_relationships,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> ResourceType {
        ResourceType::new("users").unwrap()
    }

    #[test]
    fn test_empty_schema_defaults() {
        let schema = ResourceSchema::builder(users()).build();
        assert_eq!(schema.resource_type().as_ref(), "users");
        assert!(schema.key_format().is_identity());
        assert_eq!(schema.field_count(), 0);
        assert_eq!(schema.relationship_count(), 0);
        assert!(!schema.default_relationships());
    }

    #[test]
    fn test_registering_a_key_twice_replaces_the_spec() {
        let schema = ResourceSchema::builder(users())
            .attribute("name", FieldSpec::renamed("first"))
            .attribute("name", FieldSpec::renamed("second"))
            .build();
        assert_eq!(schema.field_count(), 1);
        assert_eq!(schema.field("name").unwrap().renamed_to(), Some("second"));
    }

    #[test]
    fn test_relationships_are_kept_apart_from_attributes() {
        let schema = ResourceSchema::builder(users())
            .attribute("team", FieldSpec::new())
            .relationship("team", RelationshipSpec::new().rename("squad"))
            .default_relationships(true)
            .build();
        assert_eq!(schema.field_count(), 1);
        assert_eq!(schema.relationship("team").unwrap().renamed_to(), Some("squad"));
        assert!(schema.default_relationships());
    }
}
