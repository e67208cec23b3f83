//! Errors raised while deserializing a JSON:API document.
//!
//! Malformed input is a client error: nothing is retried and no partial
//! result is returned. The pointer carried by [`MalformedDocumentError::InvalidMember`]
//! can be used directly as the `source.pointer` of a JSON:API error object.

use thiserror::Error;

use crate::pointer::PointerPath;

/// The document lacks the shape needed to locate the resource.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::{deserialize, MalformedDocumentError, ResourceSchema, ResourceType};
/// use serde_json::json;
///
/// let schema = ResourceSchema::builder(ResourceType::new("users").unwrap()).build();
/// let result = deserialize(&json!({"meta": {}}), &schema);
/// assert!(matches!(result, Err(MalformedDocumentError::MissingData)));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedDocumentError {
    /// The document is not an object or has no `data` member.
    #[error("Malformed JSON:API document: missing top-level 'data' member")]
    MissingData,

    /// `data` has an unexpected JSON kind.
    #[error("Malformed JSON:API document: expected 'data' to be {expected}, found {found}")]
    InvalidData {
        /// What was accepted (e.g. "an object or null").
        expected: &'static str,
        /// The JSON kind found.
        found: &'static str,
    },

    /// A nested member has an unexpected JSON kind.
    #[error("Malformed JSON:API document: expected {expected} at '{pointer}', found {found}")]
    InvalidMember {
        /// Location of the offending member.
        pointer: PointerPath,
        /// What was accepted.
        expected: &'static str,
        /// The JSON kind found.
        found: &'static str,
    },
}

impl MalformedDocumentError {
    /// Returns the pointer to the offending location.
    #[must_use]
    pub fn pointer(&self) -> PointerPath {
        match self {
            Self::MissingData => PointerPath::root(),
            Self::InvalidData { .. } => PointerPath::root().append("data"),
            Self::InvalidMember { pointer, .. } => pointer.clone(),
        }
    }
}

/// Names the JSON kind of a value for error messages.
pub(crate) const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_data_message() {
        let message = MalformedDocumentError::MissingData.to_string();
        assert!(message.contains("'data'"));
    }

    #[test]
    fn test_invalid_member_message_and_pointer() {
        let error = MalformedDocumentError::InvalidMember {
            pointer: PointerPath::parse("/data/attributes").unwrap(),
            expected: "an object",
            found: "an array",
        };
        let message = error.to_string();
        assert!(message.contains("/data/attributes"));
        assert!(message.contains("an array"));
        assert_eq!(error.pointer().to_string(), "/data/attributes");
    }

    #[test]
    fn test_error_pointers() {
        assert!(MalformedDocumentError::MissingData.pointer().is_root());
        let error = MalformedDocumentError::InvalidData {
            expected: "an object or null",
            found: "a string",
        };
        assert_eq!(error.pointer().to_string(), "/data");
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!([1])), "an array");
        assert_eq!(json_kind(&json!({})), "an object");
    }
}
