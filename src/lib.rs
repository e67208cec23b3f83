//! # JSON:API Adapter
//!
//! Framework-neutral JSON:API request deserialization and response render
//! dispatch, with JSON Pointer provenance for every deserialized field.
//!
//! ## Overview
//!
//! This crate provides:
//! - Schema-driven deserialization of JSON:API documents into flat attribute
//!   maps via [`deserialize`] and [`ResourceSchema`]
//! - A [`PointerPath`] for every output key, naming where in the request
//!   document the value came from
//! - Key renaming, key formatting ([`KeyFormat`]) and custom transforms
//! - A [`SchemaRegistry`] of schemas keyed by resource name
//! - Request integration: media type recognition, body parsing and
//!   per-action deserialization via [`request`]
//! - Render dispatch to pluggable renderers via [`render`]
//! - Explicit configuration via [`JsonApiConfig`] and the [`JsonApi`] context
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonapi_adapter::{deserialize, FieldSpec, ResourceSchema, ResourceType};
//! use serde_json::json;
//!
//! let schema = ResourceSchema::builder(ResourceType::new("users").unwrap())
//!     .attribute("name", FieldSpec::renamed("first_name"))
//!     .build();
//!
//! let document = json!({
//!     "data": {
//!         "type": "users",
//!         "attributes": {"name": "Lucas", "email": "lucas@example.com"}
//!     }
//! });
//!
//! let result = deserialize(&document, &schema).unwrap();
//! assert_eq!(result.get("first_name"), Some(&json!("Lucas")));
//! assert_eq!(result.pointer("first_name").unwrap().to_string(), "/data/attributes/name");
//! assert_eq!(result.pointer("type").unwrap().to_string(), "/data/type");
//! ```
//!
//! ## Request Handling
//!
//! ```rust
//! use jsonapi_adapter::request::{ActionParams, DeserializableResource};
//! use jsonapi_adapter::{JsonApi, JsonApiConfig, ResourceName, ResourceType, SchemaRegistry};
//! use jsonapi_adapter::render::Renderers;
//! use serde_json::json;
//!
//! let jsonapi = JsonApi::new(JsonApiConfig::default(), SchemaRegistry::new(), Renderers::new());
//! let schema = jsonapi.schema_builder(ResourceType::new("users").unwrap()).build();
//! let user = DeserializableResource::new(ResourceName::new("user").unwrap(), schema);
//!
//! let parser = jsonapi.parser().unwrap();
//! let params = parser
//!     .parse_request(
//!         Some("application/vnd.api+json"),
//!         br#"{"data": {"type": "users", "attributes": {"name": "Lucas"}}}"#,
//!     )
//!     .unwrap();
//!
//! let mut action = ActionParams::new(params);
//! user.apply("create", &mut action).unwrap();
//! assert_eq!(action.get("user"), Some(&json!({"type": "users", "name": "Lucas"})));
//! assert_eq!(action.jsonapi_pointers()["name"].to_string(), "/data/attributes/name");
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration, schemas and renderers are passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: schemas, registries and the context are `Send + Sync`
//! - **Provenance is total**: every output key has exactly one pointer

pub mod config;
pub mod deserialize;
pub mod error;
mod integration;
pub mod pointer;
pub mod registry;
pub mod render;
pub mod request;

// Re-export public types at crate root for convenience
pub use config::{JsonApiConfig, JsonApiConfigBuilder, ResourceName, ResourceType};
pub use error::ConfigError;
pub use integration::JsonApi;
pub use pointer::{PointerParseError, PointerPath, Segment};
pub use registry::{RegistryError, SchemaRegistry};

// Re-export deserialization types
pub use deserialize::{
    deserialize, deserialize_collection, AttributeTransform, DeserializationResult, FieldSpec,
    KeyFormat, Linkage, MalformedDocumentError, RelationshipSpec, RelationshipTransform,
    ResourceIdentifier, ResourceSchema, ResourceSchemaBuilder,
};
