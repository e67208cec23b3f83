//! Render-side error types.

use thiserror::Error;

use super::renderer::RendererKind;

/// Errors raised while rendering a response document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No renderer is registered for the requested kind.
    #[error("No renderer registered for '{kind}'. Register one in Renderers before rendering.")]
    RendererNotRegistered {
        /// The kind that was requested.
        kind: RendererKind,
    },

    /// The domain object or rendered document could not be serialized.
    #[error("Failed to serialize JSON:API document: {message}")]
    Serialization {
        /// The underlying serializer message.
        message: String,
    },

    /// The renderer itself failed.
    #[error("Renderer failed: {message}")]
    Renderer {
        /// The renderer's message.
        message: String,
    },
}

impl From<serde_json::Error> for RenderError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_not_registered_message() {
        let error = RenderError::RendererNotRegistered {
            kind: RendererKind::JsonapiError,
        };
        assert!(error.to_string().contains("jsonapi_error"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = RenderError::from(serde_error);
        assert!(matches!(error, RenderError::Serialization { .. }));
    }
}
