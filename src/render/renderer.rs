//! Renderer traits and the explicit renderer registry.
//!
//! The renderers themselves (turning domain objects into resource objects)
//! live outside this crate. They plug in through [`SuccessRenderer`] and
//! [`ErrorRenderer`]; closures of the right shape implement both.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::errors::RenderError;
use super::options::RenderOptions;

/// Renders resources (or a collection, or null) into a success document.
pub trait SuccessRenderer: Send + Sync {
    /// Renders `resources` into a JSON:API document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if rendering fails.
    fn render(&self, resources: &Value, options: &RenderOptions) -> Result<Value, RenderError>;
}

/// Renders errors into an error document.
pub trait ErrorRenderer: Send + Sync {
    /// Renders `errors` into a JSON:API error document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if rendering fails.
    fn render(&self, errors: &Value, options: &RenderOptions) -> Result<Value, RenderError>;
}

impl<F> SuccessRenderer for F
where
    F: Fn(&Value, &RenderOptions) -> Result<Value, RenderError> + Send + Sync,
{
    fn render(&self, resources: &Value, options: &RenderOptions) -> Result<Value, RenderError> {
        self(resources, options)
    }
}

impl<F> ErrorRenderer for F
where
    F: Fn(&Value, &RenderOptions) -> Result<Value, RenderError> + Send + Sync,
{
    fn render(&self, errors: &Value, options: &RenderOptions) -> Result<Value, RenderError> {
        self(errors, options)
    }
}

/// The render entry points a host exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RendererKind {
    /// Success documents (`render jsonapi: ...`).
    Jsonapi,
    /// Error documents (`render jsonapi_error: ...`).
    JsonapiError,
}

impl RendererKind {
    /// Returns the renderer name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jsonapi => "jsonapi",
            Self::JsonapiError => "jsonapi_error",
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The renderers available to [`RenderDispatch`](super::RenderDispatch).
///
/// Built at startup and handed to [`JsonApi`](crate::JsonApi); there is no
/// process-global registry.
#[derive(Clone, Default)]
pub struct Renderers {
    success: Option<Arc<dyn SuccessRenderer>>,
    error: Option<Arc<dyn ErrorRenderer>>,
}

// Verify Renderers is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Renderers>();
};

impl fmt::Debug for Renderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderers")
            .field("success", &self.success.as_ref().map(|_| "<renderer>"))
            .field("error", &self.error.as_ref().map(|_| "<renderer>"))
            .finish()
    }
}

impl Renderers {
    /// Creates an empty set of renderers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the success renderer.
    #[must_use]
    pub fn with_success(mut self, renderer: impl SuccessRenderer + 'static) -> Self {
        self.success = Some(Arc::new(renderer));
        self
    }

    /// Sets the error renderer.
    #[must_use]
    pub fn with_error(mut self, renderer: impl ErrorRenderer + 'static) -> Self {
        self.error = Some(Arc::new(renderer));
        self
    }

    /// Returns the success renderer.
    #[must_use]
    pub fn success(&self) -> Option<&dyn SuccessRenderer> {
        self.success.as_deref()
    }

    /// Returns the error renderer.
    #[must_use]
    pub fn error(&self) -> Option<&dyn ErrorRenderer> {
        self.error.as_deref()
    }

    /// Returns `true` if a renderer is registered for `kind`.
    #[must_use]
    pub const fn contains(&self, kind: RendererKind) -> bool {
        match kind {
            RendererKind::Jsonapi => self.success.is_some(),
            RendererKind::JsonapiError => self.error.is_some(),
        }
    }
}
