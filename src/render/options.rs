//! Options passed through to renderers.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Options for one render call.
///
/// Apart from `content_type` and `jsonapi`, these are passed to the renderer
/// untouched; their meaning is the renderer's business.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::render::RenderOptions;
/// use serde_json::json;
///
/// let options = RenderOptions::new()
///     .serializer("SerializableUser")
///     .include(["posts", "posts.comments"])
///     .fields("users", ["name", "email"])
///     .meta(json!({"total": 1}));
///
/// assert_eq!(options.include, vec!["posts", "posts.comments"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOptions {
    /// Name of the serializer the renderer should use.
    pub serializer: Option<String>,
    /// Relationship paths to include.
    pub include: Vec<String>,
    /// Sparse fieldsets, by resource type.
    pub fields: HashMap<String, Vec<String>>,
    /// Extra values exposed to serializers.
    pub expose: Map<String, Value>,
    /// Top-level `meta`.
    pub meta: Option<Value>,
    /// Top-level `links`.
    pub links: Option<Value>,
    /// Top-level `jsonapi` object; defaults to the configured one.
    pub jsonapi: Option<Value>,
    /// Content type already chosen for the response, kept if set.
    pub content_type: Option<String>,
}

impl RenderOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the serializer name.
    #[must_use]
    pub fn serializer(mut self, name: impl Into<String>) -> Self {
        self.serializer = Some(name.into());
        self
    }

    /// Sets the include paths.
    #[must_use]
    pub fn include<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the sparse fieldset of one resource type.
    #[must_use]
    pub fn fields<I, S>(mut self, resource_type: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(resource_type.into(), fields.into_iter().map(Into::into).collect());
        self
    }

    /// Exposes a value to serializers.
    #[must_use]
    pub fn expose(mut self, key: impl Into<String>, value: Value) -> Self {
        self.expose.insert(key.into(), value);
        self
    }

    /// Sets top-level `meta`.
    #[must_use]
    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Sets top-level `links`.
    #[must_use]
    pub fn links(mut self, links: Value) -> Self {
        self.links = Some(links);
        self
    }

    /// Sets the top-level `jsonapi` object.
    #[must_use]
    pub fn jsonapi(mut self, jsonapi: Value) -> Self {
        self.jsonapi = Some(jsonapi);
        self
    }

    /// Keeps an already chosen response content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
