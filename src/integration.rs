//! The host-facing context tying configuration, schemas and renderers together.

use crate::config::{JsonApiConfig, ResourceType};
use crate::deserialize::ResourceSchemaBuilder;
use crate::registry::SchemaRegistry;
use crate::render::{RenderDispatch, Renderers};
use crate::request::{matches_media_type, RequestParser};

/// Explicit replacement for framework-global registration.
///
/// Built once at startup from a [`JsonApiConfig`], a populated
/// [`SchemaRegistry`] and the [`Renderers`]; shared read-only afterwards.
/// Each integration point is only exposed when its configuration flag is on.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::render::{RenderError, RenderOptions, Renderers};
/// use jsonapi_adapter::{JsonApi, JsonApiConfig, ResourceType, SchemaRegistry};
/// use serde_json::{json, Value};
///
/// let config = JsonApiConfig::builder()
///     .jsonapi_object(json!({"version": "1.0"}))
///     .build()
///     .unwrap();
/// let renderers = Renderers::new().with_success(
///     |resources: &Value, _: &RenderOptions| -> Result<Value, RenderError> {
///         Ok(json!({"data": resources}))
///     },
/// );
/// let jsonapi = JsonApi::new(config, SchemaRegistry::new(), renderers);
///
/// assert!(jsonapi.accepts_content_type("application/vnd.api+json"));
/// let response = jsonapi
///     .render_dispatch()
///     .unwrap()
///     .render_success(&Value::Null, &RenderOptions::new())
///     .unwrap();
/// assert_eq!(response.body, r#"{"data":null,"jsonapi":{"version":"1.0"}}"#);
/// ```
#[derive(Clone, Debug)]
pub struct JsonApi {
    config: JsonApiConfig,
    registry: SchemaRegistry,
    renderers: Renderers,
}

// Verify JsonApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JsonApi>();
};

impl JsonApi {
    /// Creates the context.
    #[must_use]
    pub fn new(config: JsonApiConfig, registry: SchemaRegistry, renderers: Renderers) -> Self {
        tracing::debug!(
            media_type = %config.media_type(),
            schemas = registry.len(),
            register_mime_type = config.register_mime_type(),
            register_parameter_parser = config.register_parameter_parser(),
            register_renderers = config.register_renderers(),
            "JSON:API integration initialised"
        );
        Self {
            config,
            registry,
            renderers,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &JsonApiConfig {
        &self.config
    }

    /// Returns the schema registry.
    #[must_use]
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Returns whether `content_type` is recognised as the JSON:API media type.
    ///
    /// Always `false` when `register_mime_type` is off.
    #[must_use]
    pub fn accepts_content_type(&self, content_type: &str) -> bool {
        self.config.register_mime_type()
            && matches_media_type(content_type, self.config.mime())
    }

    /// Returns a body parser, or `None` when `register_parameter_parser` is off.
    #[must_use]
    pub fn parser(&self) -> Option<RequestParser> {
        self.config
            .register_parameter_parser()
            .then(|| RequestParser::with_media_type(self.config.mime().clone()))
    }

    /// Returns the render dispatcher, or `None` when `register_renderers` is off.
    #[must_use]
    pub fn render_dispatch(&self) -> Option<RenderDispatch<'_>> {
        self.config.register_renderers().then(|| {
            RenderDispatch::new(&self.renderers, self.config.media_type())
                .with_jsonapi_object(self.config.jsonapi_object())
        })
    }

    /// Starts a schema builder seeded with the configured default key format.
    #[must_use]
    pub fn schema_builder(&self, resource_type: ResourceType) -> ResourceSchemaBuilder {
        ResourceSchemaBuilder::new(resource_type).key_format(self.config.default_key_format().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deserialize::{deserialize, KeyFormat};
    use crate::render::{RenderError, RenderOptions};
    use serde_json::{json, Value};

    fn context(config: JsonApiConfig) -> JsonApi {
        let renderers = Renderers::new().with_success(
            |resources: &Value, _: &RenderOptions| -> Result<Value, RenderError> {
                Ok(json!({"data": resources}))
            },
        );
        JsonApi::new(config, SchemaRegistry::new(), renderers)
    }

    #[test]
    fn test_defaults_expose_everything() {
        let jsonapi = context(JsonApiConfig::default());
        assert!(jsonapi.parser().is_some());
        assert!(jsonapi.render_dispatch().is_some());
        assert!(jsonapi.accepts_content_type("application/vnd.api+json; charset=utf-8"));
        assert!(!jsonapi.accepts_content_type("application/json"));
    }

    #[test]
    fn test_flags_gate_integration_points() {
        let config = JsonApiConfig::builder()
            .register_mime_type(false)
            .register_parameter_parser(false)
            .register_renderers(false)
            .build()
            .unwrap();
        let jsonapi = context(config);
        assert!(jsonapi.parser().is_none());
        assert!(jsonapi.render_dispatch().is_none());
        assert!(!jsonapi.accepts_content_type("application/vnd.api+json"));
    }

    #[test]
    fn test_parser_uses_configured_media_type() {
        let config = JsonApiConfig::builder()
            .media_type("application/vnd.custom+json")
            .build()
            .unwrap();
        let parser = context(config).parser().unwrap();
        assert_eq!(parser.media_type().essence_str(), "application/vnd.custom+json");
        assert!(parser
            .parse_request(Some("application/vnd.custom+json"), b"{}")
            .is_ok());
    }

    #[test]
    fn test_render_dispatch_applies_configured_jsonapi_object() {
        let config = JsonApiConfig::builder()
            .jsonapi_object(json!({"version": "1.0"}))
            .build()
            .unwrap();
        let jsonapi = context(config);
        let response = jsonapi
            .render_dispatch()
            .unwrap()
            .render_success(&Option::<Value>::None, &RenderOptions::new())
            .unwrap();
        assert_eq!(response.content_type, "application/vnd.api+json");
        assert_eq!(
            response.json().unwrap(),
            json!({"data": null, "jsonapi": {"version": "1.0"}})
        );
    }

    #[test]
    fn test_schema_builder_uses_default_key_format() {
        let config = JsonApiConfig::builder()
            .default_key_format(KeyFormat::Capitalize)
            .build()
            .unwrap();
        let jsonapi = context(config);
        let schema = jsonapi
            .schema_builder(ResourceType::new("users").unwrap())
            .build();
        let document = json!({"data": {"type": "users", "attributes": {"name": "Lucas"}}});
        let result = deserialize(&document, &schema).unwrap();
        assert_eq!(result.get("Name"), Some(&json!("Lucas")));
    }
}
