//! Outbound rendering dispatch.
//!
//! Building resource objects from domain objects is delegated to external
//! renderers. This module selects the renderer, fills in configured defaults
//! (the top-level `jsonapi` object), sets the response content type and
//! serializes the document to text.
//!
//! - [`SuccessRenderer`] / [`ErrorRenderer`]: the renderer seam
//! - [`Renderers`]: the explicit renderer registry
//! - [`RenderOptions`]: per-call options
//! - [`RenderDispatch`]: the dispatcher
//! - [`RenderedResponse`]: content type plus body
//! - [`RenderError`]: failures

mod dispatch;
mod errors;
mod options;
mod renderer;

pub use dispatch::{RenderDispatch, RenderedResponse};
pub use errors::RenderError;
pub use options::RenderOptions;
pub use renderer::{ErrorRenderer, RendererKind, Renderers, SuccessRenderer};
