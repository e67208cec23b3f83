//! Body parsing into framework parameters.

use mime::Mime;
use serde_json::{Map, Value};

use super::errors::ParseError;
use super::media::{jsonapi_mime, matches_media_type};
use super::{Params, JSONAPI_PARAM_KEY};

/// Parses JSON:API request bodies into a parameter map.
///
/// The parsed document is stored whole under the reserved `_jsonapi` key;
/// [`DeserializableResource`](super::DeserializableResource) reads it from
/// there. Obtain one from [`JsonApi::parser`](crate::JsonApi::parser) or build
/// it directly.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::request::RequestParser;
/// use serde_json::json;
///
/// let parser = RequestParser::new();
/// let params = parser
///     .parse(br#"{"data": {"type": "users", "attributes": {"name": "Lucas"}}}"#)
///     .unwrap();
/// assert_eq!(params["_jsonapi"]["data"]["type"], json!("users"));
/// ```
#[derive(Clone, Debug)]
pub struct RequestParser {
    media_type: Mime,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self {
            media_type: jsonapi_mime().clone(),
        }
    }
}

impl RequestParser {
    /// Creates a parser accepting the standard JSON:API media type.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser accepting `media_type`.
    #[must_use]
    pub const fn with_media_type(media_type: Mime) -> Self {
        Self { media_type }
    }

    /// Returns the accepted media type.
    #[must_use]
    pub const fn media_type(&self) -> &Mime {
        &self.media_type
    }

    /// Parses `body` into parameters.
    ///
    /// An empty (or whitespace-only) body yields empty parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidJson`] if the body is not valid JSON.
    pub fn parse(&self, body: &[u8]) -> Result<Params, ParseError> {
        let mut params = Map::new();
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(params);
        }
        let document: Value =
            serde_json::from_slice(body).map_err(|e| ParseError::InvalidJson {
                message: e.to_string(),
            })?;
        params.insert(JSONAPI_PARAM_KEY.to_string(), document);
        Ok(params)
    }

    /// Checks the request's content type, then parses `body`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnsupportedMediaType`] if `content_type` is
    /// missing or differs from the accepted media type, and
    /// [`ParseError::InvalidJson`] if the body is not valid JSON.
    pub fn parse_request(
        &self,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<Params, ParseError> {
        let content_type = content_type.unwrap_or_default();
        if !matches_media_type(content_type, &self.media_type) {
            tracing::warn!(
                content_type = %content_type,
                expected = %self.media_type,
                "Rejecting request with unsupported media type"
            );
            return Err(ParseError::UnsupportedMediaType {
                content_type: content_type.to_string(),
                expected: self.media_type.to_string(),
            });
        }
        self.parse(body)
    }
}
