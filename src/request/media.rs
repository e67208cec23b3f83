//! Media type recognition for incoming requests.

use std::sync::OnceLock;

use mime::Mime;

use super::MEDIA_TYPE;

/// Returns [`MEDIA_TYPE`] as a parsed [`Mime`].
pub(crate) fn jsonapi_mime() -> &'static Mime {
    static JSONAPI_MIME: OnceLock<Mime> = OnceLock::new();
    JSONAPI_MIME.get_or_init(|| {
        MEDIA_TYPE
            .parse()
            .expect("MEDIA_TYPE is a valid MIME type")
    })
}

/// Returns `true` if `content_type` is the JSON:API media type.
///
/// Only the essence (`type/subtype+suffix`) is compared, case-insensitively;
/// parameters such as `charset` are ignored. Unparseable values never match.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::request::is_jsonapi_media_type;
///
/// assert!(is_jsonapi_media_type("application/vnd.api+json"));
/// assert!(is_jsonapi_media_type("Application/VND.API+JSON; charset=utf-8"));
/// assert!(!is_jsonapi_media_type("application/json"));
/// assert!(!is_jsonapi_media_type(""));
/// ```
#[must_use]
pub fn is_jsonapi_media_type(content_type: &str) -> bool {
    matches_media_type(content_type, jsonapi_mime())
}

/// Returns `true` if `content_type` has the same essence as `expected`.
pub(crate) fn matches_media_type(content_type: &str, expected: &Mime) -> bool {
    content_type
        .trim()
        .parse::<Mime>()
        .is_ok_and(|actual| actual.essence_str().eq_ignore_ascii_case(expected.essence_str()))
}
