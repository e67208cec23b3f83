//! Request-side error types.
//!
//! - [`ParseError`]: the body could not be turned into parameters
//! - [`ActionError`]: a [`DeserializableResource`](super::DeserializableResource)
//!   could not populate the action's parameters
//!
//! Both are client errors. [`ActionError::to_error_document`] builds the
//! JSON:API error document a host would send back.

use serde_json::{json, Value};
use thiserror::Error;

use crate::deserialize::MalformedDocumentError;
use crate::pointer::PointerPath;

/// Errors raised while parsing a request body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The body is not valid JSON.
    #[error("Request body is not valid JSON: {message}")]
    InvalidJson {
        /// The underlying parser message.
        message: String,
    },

    /// The request's content type is not the configured media type.
    #[error("Unsupported media type '{content_type}'. Expected '{expected}'.")]
    UnsupportedMediaType {
        /// The content type that was sent.
        content_type: String,
        /// The media type that is accepted.
        expected: String,
    },
}

impl ParseError {
    /// Returns the HTTP status code a host should respond with.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidJson { .. } => 400,
            Self::UnsupportedMediaType { .. } => 415,
        }
    }
}

/// Errors raised while deserializing a resource into action parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The parameters hold no parsed JSON:API document.
    #[error("No JSON:API document found in request parameters (expected '_jsonapi')")]
    MissingDocument,

    /// The document was malformed.
    #[error(transparent)]
    Malformed(#[from] MalformedDocumentError),
}

impl ActionError {
    /// Returns the JSON Pointer to the offending part of the document.
    #[must_use]
    pub fn pointer(&self) -> PointerPath {
        match self {
            Self::MissingDocument => PointerPath::root(),
            Self::Malformed(error) => error.pointer(),
        }
    }

    /// Builds a JSON:API error document describing this error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonapi_adapter::request::ActionError;
    /// use jsonapi_adapter::MalformedDocumentError;
    /// use serde_json::json;
    ///
    /// let error = ActionError::from(MalformedDocumentError::MissingData);
    /// let document = error.to_error_document();
    /// assert_eq!(document["errors"][0]["status"], json!("400"));
    /// assert_eq!(document["errors"][0]["source"]["pointer"], json!(""));
    /// ```
    #[must_use]
    pub fn to_error_document(&self) -> Value {
        json!({
            "errors": [{
                "status": "400",
                "title": "Invalid JSON:API document",
                "detail": self.to_string(),
                "source": { "pointer": self.pointer().to_string() },
            }]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_statuses() {
        let invalid = ParseError::InvalidJson {
            message: "EOF".to_string(),
        };
        assert_eq!(invalid.status(), 400);
        assert!(invalid.to_string().contains("EOF"));

        let unsupported = ParseError::UnsupportedMediaType {
            content_type: "text/plain".to_string(),
            expected: "application/vnd.api+json".to_string(),
        };
        assert_eq!(unsupported.status(), 415);
        assert!(unsupported.to_string().contains("text/plain"));
    }

    #[test]
    fn test_action_error_document_points_at_member() {
        let error = ActionError::Malformed(MalformedDocumentError::InvalidMember {
            pointer: PointerPath::parse("/data/attributes").unwrap(),
            expected: "an object",
            found: "a string",
        });
        let document = error.to_error_document();
        assert_eq!(
            document["errors"][0]["source"]["pointer"],
            json!("/data/attributes")
        );
        assert!(document["errors"][0]["detail"]
            .as_str()
            .unwrap()
            .contains("a string"));
    }

    #[test]
    fn test_missing_document_message() {
        assert!(ActionError::MissingDocument.to_string().contains("_jsonapi"));
    }
}
