//! Configuration types for the JSON:API adapter.
//!
//! # Overview
//!
//! - [`JsonApiConfig`]: process-wide settings, built once at startup
//! - [`JsonApiConfigBuilder`]: a builder for [`JsonApiConfig`]
//! - [`ResourceName`]: a validated parameter name for a deserialized resource
//! - [`ResourceType`]: a validated JSON:API resource type
//!
//! The configuration replaces implicit framework-global registration: the
//! host builds one [`JsonApiConfig`], hands it to [`JsonApi`](crate::JsonApi),
//! and never mutates it afterwards.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_adapter::{JsonApiConfig, KeyFormat};
//! use serde_json::json;
//!
//! let config = JsonApiConfig::builder()
//!     .default_key_format(KeyFormat::SnakeCase)
//!     .jsonapi_object(json!({"version": "1.0"}))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.media_type(), "application/vnd.api+json");
//! assert!(config.register_renderers());
//! ```

mod newtypes;

pub use newtypes::{ResourceName, ResourceType};

use serde_json::Value;

use crate::deserialize::KeyFormat;
use crate::error::ConfigError;
use crate::request::jsonapi_mime;

/// Settings consumed by the request and render integration.
///
/// # Thread Safety
///
/// `JsonApiConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct JsonApiConfig {
    media_type: mime::Mime,
    register_mime_type: bool,
    register_parameter_parser: bool,
    register_renderers: bool,
    default_key_format: KeyFormat,
    jsonapi_object: Option<Value>,
}

impl JsonApiConfig {
    /// Creates a new builder for constructing a `JsonApiConfig`.
    #[must_use]
    pub fn builder() -> JsonApiConfigBuilder {
        JsonApiConfigBuilder::new()
    }

    /// Returns the media type set on rendered responses.
    #[must_use]
    pub fn media_type(&self) -> &str {
        self.media_type.as_ref()
    }

    /// Returns the parsed media type.
    #[must_use]
    pub const fn mime(&self) -> &mime::Mime {
        &self.media_type
    }

    /// Returns whether incoming requests with the media type are recognised.
    #[must_use]
    pub const fn register_mime_type(&self) -> bool {
        self.register_mime_type
    }

    /// Returns whether a request body parser is exposed.
    #[must_use]
    pub const fn register_parameter_parser(&self) -> bool {
        self.register_parameter_parser
    }

    /// Returns whether render dispatch is exposed.
    #[must_use]
    pub const fn register_renderers(&self) -> bool {
        self.register_renderers
    }

    /// Returns the key format seeded into new schema builders.
    #[must_use]
    pub const fn default_key_format(&self) -> &KeyFormat {
        &self.default_key_format
    }

    /// Returns the default top-level `jsonapi` object for success documents.
    #[must_use]
    pub const fn jsonapi_object(&self) -> Option<&Value> {
        self.jsonapi_object.as_ref()
    }
}

impl Default for JsonApiConfig {
    fn default() -> Self {
        Self {
            media_type: jsonapi_mime().clone(),
            register_mime_type: true,
            register_parameter_parser: true,
            register_renderers: true,
            default_key_format: KeyFormat::Identity,
            jsonapi_object: None,
        }
    }
}

// Verify JsonApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JsonApiConfig>();
};

/// Builder for constructing [`JsonApiConfig`] instances.
///
/// # Defaults
///
/// - `media_type`: `application/vnd.api+json`
/// - `register_mime_type`, `register_parameter_parser`, `register_renderers`: `true`
/// - `default_key_format`: [`KeyFormat::Identity`]
/// - `jsonapi_object`: `None`
#[derive(Debug, Default)]
pub struct JsonApiConfigBuilder {
    media_type: Option<String>,
    register_mime_type: Option<bool>,
    register_parameter_parser: Option<bool>,
    register_renderers: Option<bool>,
    default_key_format: Option<KeyFormat>,
    jsonapi_object: Option<Value>,
}

impl JsonApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the media type (validated on [`build`](Self::build)).
    #[must_use]
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Sets whether the media type is recognised on incoming requests.
    #[must_use]
    pub const fn register_mime_type(mut self, register: bool) -> Self {
        self.register_mime_type = Some(register);
        self
    }

    /// Sets whether a request body parser is exposed.
    #[must_use]
    pub const fn register_parameter_parser(mut self, register: bool) -> Self {
        self.register_parameter_parser = Some(register);
        self
    }

    /// Sets whether render dispatch is exposed.
    #[must_use]
    pub const fn register_renderers(mut self, register: bool) -> Self {
        self.register_renderers = Some(register);
        self
    }

    /// Sets the key format seeded into schema builders.
    #[must_use]
    pub fn default_key_format(mut self, key_format: KeyFormat) -> Self {
        self.default_key_format = Some(key_format);
        self
    }

    /// Sets the default top-level `jsonapi` object (e.g. `{"version": "1.0"}`).
    #[must_use]
    pub fn jsonapi_object(mut self, object: Value) -> Self {
        self.jsonapi_object = Some(object);
        self
    }

    /// Builds the [`JsonApiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMediaType`] if a custom media type does
    /// not parse as a MIME type.
    pub fn build(self) -> Result<JsonApiConfig, ConfigError> {
        let defaults = JsonApiConfig::default();

        let media_type = match self.media_type {
            Some(media_type) => media_type
                .parse::<mime::Mime>()
                .map_err(|_| ConfigError::InvalidMediaType { media_type })?,
            None => defaults.media_type,
        };

        Ok(JsonApiConfig {
            media_type,
            register_mime_type: self.register_mime_type.unwrap_or(defaults.register_mime_type),
            register_parameter_parser: self
                .register_parameter_parser
                .unwrap_or(defaults.register_parameter_parser),
            register_renderers: self.register_renderers.unwrap_or(defaults.register_renderers),
            default_key_format: self.default_key_format.unwrap_or_default(),
            jsonapi_object: self.jsonapi_object,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = JsonApiConfig::builder().build().unwrap();
        assert_eq!(config.media_type(), "application/vnd.api+json");
        assert!(config.register_mime_type());
        assert!(config.register_parameter_parser());
        assert!(config.register_renderers());
        assert!(config.default_key_format().is_identity());
        assert!(config.jsonapi_object().is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = JsonApiConfig::builder()
            .register_mime_type(false)
            .register_parameter_parser(false)
            .register_renderers(false)
            .default_key_format(KeyFormat::CamelCase)
            .jsonapi_object(json!({"version": "1.1"}))
            .build()
            .unwrap();
        assert!(!config.register_mime_type());
        assert!(!config.register_parameter_parser());
        assert!(!config.register_renderers());
        assert_eq!(config.default_key_format().apply("a_b"), "aB");
        assert_eq!(config.jsonapi_object(), Some(&json!({"version": "1.1"})));
    }

    #[test]
    fn test_custom_media_type() {
        let config = JsonApiConfig::builder()
            .media_type("application/vnd.example+json")
            .build()
            .unwrap();
        assert_eq!(config.media_type(), "application/vnd.example+json");
        assert_eq!(config.mime().suffix(), Some(mime::JSON));
    }

    #[test]
    fn test_invalid_media_type_is_rejected() {
        let result = JsonApiConfig::builder().media_type("not a mime").build();
        assert!(matches!(result, Err(ConfigError::InvalidMediaType { .. })));
    }
}
