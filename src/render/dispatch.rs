//! Render dispatch: pick a renderer, apply defaults, produce response text.

use serde::Serialize;
use serde_json::Value;

use super::errors::RenderError;
use super::options::RenderOptions;
use super::renderer::{RendererKind, Renderers};

/// A rendered response ready to be written by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedResponse {
    /// The `Content-Type` header value.
    pub content_type: String,
    /// The serialized document.
    pub body: String,
}

impl RenderedResponse {
    /// Parses the body back into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialization`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, RenderError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Dispatches render calls to the registered renderers.
///
/// Obtained from [`JsonApi::render_dispatch`](crate::JsonApi::render_dispatch)
/// or built directly.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::render::{RenderDispatch, RenderError, RenderOptions, Renderers};
/// use serde_json::{json, Value};
///
/// let renderers = Renderers::new().with_success(
///     |resources: &Value, _: &RenderOptions| -> Result<Value, RenderError> {
///         Ok(json!({"data": resources}))
///     },
/// );
/// let jsonapi = json!({"version": "1.0"});
/// let dispatch = RenderDispatch::new(&renderers, "application/vnd.api+json")
///     .with_jsonapi_object(Some(&jsonapi));
///
/// let response = dispatch.render_success(&Value::Null, &RenderOptions::new()).unwrap();
/// assert_eq!(response.content_type, "application/vnd.api+json");
/// assert_eq!(
///     response.json().unwrap(),
///     json!({"data": null, "jsonapi": {"version": "1.0"}})
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RenderDispatch<'a> {
    renderers: &'a Renderers,
    media_type: &'a str,
    jsonapi_object: Option<&'a Value>,
}

impl<'a> RenderDispatch<'a> {
    /// Creates a dispatcher over `renderers` responding with `media_type`.
    #[must_use]
    pub const fn new(renderers: &'a Renderers, media_type: &'a str) -> Self {
        Self {
            renderers,
            media_type,
            jsonapi_object: None,
        }
    }

    /// Sets the default top-level `jsonapi` object.
    #[must_use]
    pub const fn with_jsonapi_object(mut self, jsonapi_object: Option<&'a Value>) -> Self {
        self.jsonapi_object = jsonapi_object;
        self
    }

    /// Renders a success document for `resources`.
    ///
    /// `resources` may be a single object, a collection, or `None`/null.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RendererNotRegistered`] if no success renderer
    /// is registered, [`RenderError::Serialization`] if `resources` cannot be
    /// serialized, or whatever the renderer returns.
    pub fn render_success<T>(
        &self,
        resources: &T,
        options: &RenderOptions,
    ) -> Result<RenderedResponse, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let renderer = self
            .renderers
            .success()
            .ok_or_else(|| not_registered(RendererKind::Jsonapi))?;
        let resources = serde_json::to_value(resources)?;
        let options = self.effective_options(options);
        let document = renderer.render(&resources, &options)?;
        self.finish(document, &options)
    }

    /// Renders an error document for `errors`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RendererNotRegistered`] if no error renderer is
    /// registered, [`RenderError::Serialization`] if `errors` cannot be
    /// serialized, or whatever the renderer returns.
    pub fn render_error<T>(
        &self,
        errors: &T,
        options: &RenderOptions,
    ) -> Result<RenderedResponse, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let renderer = self
            .renderers
            .error()
            .ok_or_else(|| not_registered(RendererKind::JsonapiError))?;
        let errors = serde_json::to_value(errors)?;
        let options = self.effective_options(options);
        let document = renderer.render(&errors, &options)?;
        self.finish(document, &options)
    }

    fn effective_options(&self, options: &RenderOptions) -> RenderOptions {
        let mut options = options.clone();
        if options.jsonapi.is_none() {
            options.jsonapi = self.jsonapi_object.cloned();
        }
        options
    }

    fn finish(
        &self,
        mut document: Value,
        options: &RenderOptions,
    ) -> Result<RenderedResponse, RenderError> {
        if let (Value::Object(map), Some(jsonapi)) = (&mut document, &options.jsonapi) {
            map.entry("jsonapi").or_insert_with(|| jsonapi.clone());
        }
        let content_type = options
            .content_type
            .clone()
            .unwrap_or_else(|| self.media_type.to_string());
        Ok(RenderedResponse {
            content_type,
            body: serde_json::to_string(&document)?,
        })
    }
}

fn not_registered(kind: RendererKind) -> RenderError {
    tracing::warn!(renderer = %kind, "Render requested without a registered renderer");
    RenderError::RendererNotRegistered { kind }
}
