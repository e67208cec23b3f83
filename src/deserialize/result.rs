//! The output of a deserialization call.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::pointer::PointerPath;

/// Flattened attributes plus their provenance.
///
/// Every key in [`attributes`](Self::attributes) has exactly one entry in
/// [`pointers`](Self::pointers) and vice versa. When two rules emit the same
/// output key the later one wins in both maps.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::{deserialize, ResourceSchema, ResourceType};
/// use serde_json::json;
///
/// let schema = ResourceSchema::builder(ResourceType::new("users").unwrap()).build();
/// let document = json!({"data": {"type": "users", "attributes": {"name": "Lucas"}}});
///
/// let result = deserialize(&document, &schema).unwrap();
/// assert_eq!(result.attributes()["name"], json!("Lucas"));
/// assert_eq!(result.pointer("name").unwrap().to_string(), "/data/attributes/name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DeserializationResult {
    attributes: Map<String, Value>,
    pointers: HashMap<String, PointerPath>,
}

impl DeserializationResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` under `key`, attributed to `pointer`.
    pub(crate) fn insert(&mut self, key: String, value: Value, pointer: PointerPath) {
        self.pointers.insert(key.clone(), pointer);
        self.attributes.insert(key, value);
    }

    /// Records every entry of `entries`, all attributed to `pointer`.
    pub(crate) fn extend(&mut self, entries: Map<String, Value>, pointer: &PointerPath) {
        for (key, value) in entries {
            self.insert(key, value, pointer.clone());
        }
    }

    /// Returns the flattened attributes in traversal order.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns the provenance of every attribute.
    #[must_use]
    pub const fn pointers(&self) -> &HashMap<String, PointerPath> {
        &self.pointers
    }

    /// Returns the provenance of one output key.
    #[must_use]
    pub fn pointer(&self, key: &str) -> Option<&PointerPath> {
        self.pointers.get(key)
    }

    /// Returns the value of one output key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the number of output keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` when nothing was extracted (e.g. `data: null`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the pointers rendered as a JSON object of strings.
    ///
    /// Useful for hosts that expose provenance next to request parameters.
    #[must_use]
    pub fn pointers_to_value(&self) -> Value {
        let map = self
            .attributes
            .keys()
            .filter_map(|key| {
                self.pointers
                    .get(key)
                    .map(|pointer| (key.clone(), Value::String(pointer.to_string())))
            })
            .collect();
        Value::Object(map)
    }

    /// Splits the result into its attribute and pointer maps.
    #[must_use]
    pub fn into_parts(self) -> (Map<String, Value>, HashMap<String, PointerPath>) {
        (self.attributes, self.pointers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_maps_in_step() {
        let mut result = DeserializationResult::new();
        result.insert("a".into(), json!(1), PointerPath::parse("/data/attributes/a").unwrap());
        result.insert("a".into(), json!(2), PointerPath::parse("/data/attributes/b").unwrap());
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("a"), Some(&json!(2)));
        assert_eq!(result.pointer("a").unwrap().to_string(), "/data/attributes/b");
    }

    #[test]
    fn test_extend_shares_one_pointer() {
        let mut result = DeserializationResult::new();
        let mut entries = Map::new();
        entries.insert("first".into(), json!("A"));
        entries.insert("last".into(), json!("B"));
        let pointer = PointerPath::parse("/data/attributes/name").unwrap();
        result.extend(entries, &pointer);
        assert_eq!(result.pointer("first"), Some(&pointer));
        assert_eq!(result.pointer("last"), Some(&pointer));
    }

    #[test]
    fn test_pointers_to_value_follows_attribute_order() {
        let mut result = DeserializationResult::new();
        result.insert("type".into(), json!("users"), PointerPath::parse("/data/type").unwrap());
        result.insert("name".into(), json!("x"), PointerPath::parse("/data/attributes/name").unwrap());
        assert_eq!(
            result.pointers_to_value(),
            json!({"type": "/data/type", "name": "/data/attributes/name"})
        );
    }

    #[test]
    fn test_empty_result() {
        let result = DeserializationResult::new();
        assert!(result.is_empty());
        let (attributes, pointers) = result.into_parts();
        assert!(attributes.is_empty());
        assert!(pointers.is_empty());
    }
}
