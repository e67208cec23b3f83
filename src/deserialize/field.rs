//! Per-member transformation rules.
//!
//! A [`FieldSpec`] describes how one attribute is turned into output entries;
//! a [`RelationshipSpec`] does the same for one relationship. Both are built
//! once at schema-registration time and then shared, read-only, by every
//! deserialization that uses the schema.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::key_format::KeyFormat;

/// Maps one raw attribute value to one or more output entries.
///
/// Transforms must be pure functions of their input: they are shared across
/// concurrent requests and may be invoked any number of times.
pub type AttributeTransform = Arc<dyn Fn(&Value) -> Map<String, Value> + Send + Sync>;

/// Maps the linkage of one relationship to one or more output entries.
pub type RelationshipTransform = Arc<dyn Fn(&Linkage) -> Map<String, Value> + Send + Sync>;

/// Rule for a single attribute.
///
/// `rename` and `transform` compose as follows:
///
/// - `transform` set: its output map is used verbatim (keys are final).
/// - only `rename` set: `{ key_format(rename): raw_value }`.
/// - neither: `{ key_format(source_key): raw_value }`.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::FieldSpec;
/// use serde_json::{Map, Value};
///
/// let spec = FieldSpec::new().transform(|value: &Value| {
///     let mut out = Map::new();
///     out.insert("first_name".to_string(), value.clone());
///     out
/// });
/// assert!(spec.has_transform());
/// ```
#[derive(Clone, Default)]
pub struct FieldSpec {
    rename: Option<String>,
    transform: Option<AttributeTransform>,
}

impl FieldSpec {
    /// Creates a spec with default pass-through behaviour.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a spec that only renames.
    #[must_use]
    pub fn renamed(name: impl Into<String>) -> Self {
        Self::new().rename(name)
    }

    /// Sets the output name used when no transform is given.
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Sets the value transform.
    #[must_use]
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Value) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Returns the rename, if any.
    #[must_use]
    pub fn renamed_to(&self) -> Option<&str> {
        self.rename.as_deref()
    }

    /// Returns `true` if a transform is set.
    #[must_use]
    pub const fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Produces the output entries for `value` read from `source_key`.
    pub(crate) fn apply(
        &self,
        source_key: &str,
        value: &Value,
        key_format: &KeyFormat,
    ) -> Map<String, Value> {
        if let Some(transform) = &self.transform {
            return transform(value);
        }
        let name = self.rename.as_deref().unwrap_or(source_key);
        let mut out = Map::new();
        out.insert(key_format.apply(name), value.clone());
        out
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("rename", &self.rename)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// A `{ "type": ..., "id": ... }` resource identifier object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The resource id.
    pub id: String,
}

impl ResourceIdentifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

/// The resource linkage found in a relationship's `data` member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Linkage {
    /// A to-one relationship; `None` when `data` is `null`.
    ToOne(Option<ResourceIdentifier>),
    /// A to-many relationship.
    ToMany(Vec<ResourceIdentifier>),
}

impl Linkage {
    /// Returns the linked identifiers, whatever the cardinality.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        match self {
            Self::ToOne(one) => one.iter().collect(),
            Self::ToMany(many) => many.iter().collect(),
        }
    }
}

/// Rule for a single relationship.
///
/// Without a transform, a to-one relationship `author` produces
/// `author_id`/`author_type` and a to-many relationship `tags` produces
/// `tags_ids`/`tags_types`; `rename` replaces the stem, and the schema's key
/// format is applied to the suffixed name.
#[derive(Clone, Default)]
pub struct RelationshipSpec {
    rename: Option<String>,
    transform: Option<RelationshipTransform>,
}

impl RelationshipSpec {
    /// Creates a spec with the default id/type expansion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the relationship name used as the stem of output keys.
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Sets the linkage transform.
    #[must_use]
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Linkage) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Returns the rename, if any.
    #[must_use]
    pub fn renamed_to(&self) -> Option<&str> {
        self.rename.as_deref()
    }

    pub(crate) fn apply(
        &self,
        source_key: &str,
        linkage: &Linkage,
        key_format: &KeyFormat,
    ) -> Map<String, Value> {
        if let Some(transform) = &self.transform {
            return transform(linkage);
        }
        let stem = self.rename.as_deref().unwrap_or(source_key);
        let mut out = Map::new();
        match linkage {
            Linkage::ToOne(identifier) => {
                let (id, resource_type) = identifier.as_ref().map_or((Value::Null, Value::Null), |ri| {
                    (
                        Value::String(ri.id.clone()),
                        Value::String(ri.resource_type.clone()),
                    )
                });
                out.insert(key_format.apply(&format!("{stem}_id")), id);
                out.insert(key_format.apply(&format!("{stem}_type")), resource_type);
            }
            Linkage::ToMany(identifiers) => {
                let ids = identifiers.iter().map(|ri| Value::String(ri.id.clone())).collect();
                let types = identifiers
                    .iter()
                    .map(|ri| Value::String(ri.resource_type.clone()))
                    .collect();
                out.insert(key_format.apply(&format!("{stem}_ids")), Value::Array(ids));
                out.insert(key_format.apply(&format!("{stem}_types")), Value::Array(types));
            }
        }
        out
    }
}

impl fmt::Debug for RelationshipSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationshipSpec")
            .field("rename", &self.rename)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
