//! Inbound request integration.
//!
//! This module covers the path from raw request body to action parameters:
//!
//! 1. [`RequestParser`] checks the media type and parses the body into a
//!    [`Params`] map holding the document under [`JSONAPI_PARAM_KEY`]
//! 2. [`DeserializableResource::apply`] deserializes that document with a
//!    schema and stores the attributes under the resource name
//! 3. [`ActionParams::jsonapi_pointers`] exposes the provenance map
//!
//! # Example
//!
//! ```rust
//! use jsonapi_adapter::request::{ActionParams, DeserializableResource, RequestParser};
//! use jsonapi_adapter::{FieldSpec, ResourceName, ResourceSchema, ResourceType};
//! use serde_json::{json, Map, Value};
//!
//! let user = DeserializableResource::new(
//!     ResourceName::new("user").unwrap(),
//!     ResourceSchema::builder(ResourceType::new("users").unwrap())
//!         .attribute("name", FieldSpec::new().transform(|value: &Value| {
//!             let mut out = Map::new();
//!             out.insert("first_name".to_string(), value.clone());
//!             out
//!         }))
//!         .build(),
//! )
//! .only(["create", "update"]);
//!
//! let body = br#"{"data": {"type": "users", "attributes": {"name": "Lucas"}}}"#;
//! let params = RequestParser::new()
//!     .parse_request(Some("application/vnd.api+json"), body)
//!     .unwrap();
//!
//! let mut action = ActionParams::new(params);
//! user.apply("create", &mut action).unwrap();
//! assert_eq!(action.get("user"), Some(&json!({"type": "users", "first_name": "Lucas"})));
//! ```

mod controller;
mod errors;
mod media;
mod parser;

pub use controller::{ActionFilter, ActionParams, DeserializableResource};
pub use errors::{ActionError, ParseError};
pub use media::is_jsonapi_media_type;
pub use parser::RequestParser;

/// The JSON:API media type.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// The parameter key the parsed document is stored under.
pub const JSONAPI_PARAM_KEY: &str = "_jsonapi";

/// Framework-native request parameters.
pub type Params = serde_json::Map<String, serde_json::Value>;

pub(crate) use media::{jsonapi_mime, matches_media_type};
