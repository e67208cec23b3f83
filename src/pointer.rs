//! JSON Pointer (RFC 6901) paths used for provenance tracking.
//!
//! A [`PointerPath`] identifies a location inside a JSON document as an
//! ordered list of [`Segment`]s. It renders to and parses from the canonical
//! `/a/b/c` string form, escaping `~` as `~0` and `/` as `~1`.
//!
//! Paths are immutable: [`PointerPath::append`] returns a new path and leaves
//! the receiver untouched, so a base pointer can be shared while building the
//! pointers of its children.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_adapter::PointerPath;
//!
//! let base = PointerPath::from_segments(["data", "attributes"]);
//! let name = base.append("name");
//!
//! assert_eq!(base.to_string(), "/data/attributes");
//! assert_eq!(name.to_string(), "/data/attributes/name");
//! assert_eq!(PointerPath::root().to_string(), "");
//!
//! let escaped = PointerPath::root().append("a/b~c");
//! assert_eq!(escaped.to_string(), "/a~1b~0c");
//! assert_eq!(escaped.to_string().parse::<PointerPath>().unwrap(), escaped);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// One reference token of a [`PointerPath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An object member name.
    Key(String),
    /// An array index.
    Index(usize),
}

impl Segment {
    /// Returns the unescaped token text.
    #[must_use]
    pub fn as_token(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Self::Key(key) => std::borrow::Cow::Borrowed(key),
            Self::Index(index) => std::borrow::Cow::Owned(index.to_string()),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for Segment {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape_token(&self.as_token()))
    }
}

/// Error returned when a string is not a valid JSON Pointer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerParseError {
    /// Non-empty pointers must start with `/`.
    #[error("Invalid JSON Pointer '{pointer}': must be empty or start with '/'")]
    MissingLeadingSlash {
        /// The rejected pointer string.
        pointer: String,
    },

    /// A `~` was not followed by `0` or `1`.
    #[error("Invalid JSON Pointer '{pointer}': '~' must be followed by '0' or '1'")]
    InvalidEscape {
        /// The rejected pointer string.
        pointer: String,
    },
}

/// An immutable location inside a JSON document.
///
/// Equality is structural: two paths are equal when their segments are.
/// Note that `Segment::Index(0)` and `Segment::Key("0")` render identically
/// but compare unequal; paths parsed from strings always hold `Key` segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerPath {
    segments: Vec<Segment>,
}

impl PointerPath {
    /// Returns the path of the document root (`""`).
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Builds a path from a sequence of segments.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses the canonical RFC 6901 string form.
    ///
    /// # Errors
    ///
    /// Returns [`PointerParseError`] if the string is non-empty and does not
    /// start with `/`, or if it contains an invalid `~` escape.
    pub fn parse(pointer: &str) -> Result<Self, PointerParseError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PointerParseError::MissingLeadingSlash {
                pointer: pointer.to_string(),
            });
        };

        let segments = rest
            .split('/')
            .map(|token| {
                unescape_token(token)
                    .map(Segment::Key)
                    .ok_or_else(|| PointerParseError::InvalidEscape {
                        pointer: pointer.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn append(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns the segments of this path.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if this path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if this path points at the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Returns the last segment, or `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Returns the parent path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// Resolves this path against `document`.
    ///
    /// Key segments address object members, or array elements when the token
    /// is a canonical decimal index. Returns `None` when any step is missing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonapi_adapter::PointerPath;
    /// use serde_json::json;
    ///
    /// let doc = json!({"data": [{"id": "1"}]});
    /// let pointer: PointerPath = "/data/0/id".parse().unwrap();
    /// assert_eq!(pointer.resolve(&doc), Some(&json!("1")));
    /// ```
    #[must_use]
    pub fn resolve<'v>(&self, document: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| match (current, segment) {
                (Value::Object(map), segment) => map.get(segment.as_token().as_ref()),
                (Value::Array(items), Segment::Index(index)) => items.get(*index),
                (Value::Array(items), Segment::Key(key)) => {
                    parse_array_index(key).and_then(|index| items.get(index))
                }
                _ => None,
            })
    }
}

impl fmt::Display for PointerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for PointerPath {
    type Err = PointerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PointerPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PointerPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

/// Escapes a reference token. `~` must be escaped before `/`.
fn escape_token(token: &str) -> String {
    if !token.contains(['~', '/']) {
        return token.to_string();
    }
    token.replace('~', "~0").replace('/', "~1")
}

/// Unescapes a reference token, returning `None` on a dangling or unknown escape.
fn unescape_token(token: &str) -> Option<String> {
    if !token.contains('~') {
        return Some(token.to_string());
    }
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Array indices are canonical decimals: no sign, no leading zeros.
fn parse_array_index(token: &str) -> Option<usize> {
    if token.is_empty() || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
