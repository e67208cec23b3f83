//! Registry of resource schemas keyed by resource name.
//!
//! Schemas are registered at startup under the parameter name they are
//! exposed as (e.g. `user`), then looked up per request by that name.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_adapter::{ResourceName, ResourceSchema, ResourceType, SchemaRegistry};
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register(
//!     ResourceName::new("user").unwrap(),
//!     ResourceSchema::builder(ResourceType::new("users").unwrap()).build(),
//! );
//!
//! let document = json!({"data": {"type": "users", "attributes": {"name": "Lucas"}}});
//! let result = registry.deserialize("user", &document).unwrap();
//! assert_eq!(result.get("name"), Some(&json!("Lucas")));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::config::ResourceName;
use crate::deserialize::{deserialize, DeserializationResult, MalformedDocumentError, ResourceSchema};

/// Errors from registry lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No schema is registered under the requested name.
    #[error("No resource schema registered for '{name}'")]
    SchemaNotFound {
        /// The requested name.
        name: String,
    },

    /// The document was malformed.
    #[error(transparent)]
    Malformed(#[from] MalformedDocumentError),
}

/// Maps resource names to shared, immutable schemas.
///
/// # Thread Safety
///
/// `SchemaRegistry` is `Send + Sync`. Populate it before serving requests,
/// then share it read-only.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<ResourceName, Arc<ResourceSchema>>,
}

// Verify SchemaRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SchemaRegistry>();
};

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Registers `schema` under `name`, replacing any earlier registration.
    ///
    /// Returns `&mut Self` to allow chaining.
    pub fn register(&mut self, name: ResourceName, schema: ResourceSchema) -> &mut Self {
        self.register_shared(name, Arc::new(schema))
    }

    /// Registers an already shared schema under `name`.
    pub fn register_shared(&mut self, name: ResourceName, schema: Arc<ResourceSchema>) -> &mut Self {
        if self.schemas.insert(name.clone(), schema).is_some() {
            tracing::debug!(resource = %name, "Replaced resource schema registration");
        }
        self
    }

    /// Returns the schema registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ResourceSchema>> {
        self.schemas.get(name).map(Arc::clone)
    }

    /// Returns `true` if a schema is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&ResourceName> {
        let mut names: Vec<_> = self.schemas.keys().collect();
        names.sort();
        names
    }

    /// Returns the number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Deserializes `document` with the schema registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SchemaNotFound`] if `name` is unknown, or
    /// [`RegistryError::Malformed`] if the document is malformed.
    pub fn deserialize(
        &self,
        name: &str,
        document: &Value,
    ) -> Result<DeserializationResult, RegistryError> {
        let schema = self.get(name).ok_or_else(|| RegistryError::SchemaNotFound {
            name: name.to_string(),
        })?;
        Ok(deserialize(document, &schema)?)
    }
}
