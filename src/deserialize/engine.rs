//! The deserialization engine.
//!
//! Walks the primary `data` of a JSON:API document, applies a
//! [`ResourceSchema`], and records for every output key the JSON Pointer of
//! the input it came from.
//!
//! # Provenance
//!
//! | Output | Pointer |
//! |---|---|
//! | `type` | `/data/type` |
//! | `id` | `/data/id` |
//! | attribute `k` (and every key a transform of `k` emits) | `/data/attributes/k` |
//! | relationship `r` (every key emitted for it) | `/data/relationships/r/data` |
//!
//! Collection documents use `/data/<index>/...` instead of `/data/...`.

use serde_json::{Map, Value};

use crate::pointer::PointerPath;

use super::errors::{json_kind, MalformedDocumentError};
use super::field::{Linkage, RelationshipSpec, ResourceIdentifier};
use super::result::DeserializationResult;
use super::schema::ResourceSchema;

/// Deserializes a single-resource document.
///
/// `data: null` yields an empty result. Unknown attributes pass through with
/// the schema's key format applied; a missing `attributes` member behaves as
/// an empty one. The `type` and `id` members are copied under the literal
/// keys `type` and `id` when present; attributes named `type` or `id` are
/// skipped, so those keys always point at `/data/type` and `/data/id`.
///
/// # Errors
///
/// Returns [`MalformedDocumentError`] if the document has no `data` member,
/// if `data` is neither an object nor null, or if `attributes`,
/// `relationships` or a relationship linkage has the wrong shape.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::{deserialize, FieldSpec, ResourceSchema, ResourceType};
/// use serde_json::{json, Map, Value};
///
/// let schema = ResourceSchema::builder(ResourceType::new("users").unwrap())
///     .attribute("name", FieldSpec::new().transform(|value: &Value| {
///         let mut out = Map::new();
///         out.insert("first_name".to_string(), value.clone());
///         out
///     }))
///     .build();
/// let document = json!({"data": {"type": "users", "attributes": {"name": "Lucas"}}});
///
/// let result = deserialize(&document, &schema).unwrap();
/// assert_eq!(
///     Value::Object(result.attributes().clone()),
///     json!({"type": "users", "first_name": "Lucas"})
/// );
/// assert_eq!(
///     result.pointers_to_value(),
///     json!({"type": "/data/type", "first_name": "/data/attributes/name"})
/// );
/// ```
pub fn deserialize(
    document: &Value,
    schema: &ResourceSchema,
) -> Result<DeserializationResult, MalformedDocumentError> {
    let data = locate_data(document)?;
    let base = PointerPath::root().append("data");

    match data {
        Value::Null => {
            tracing::debug!(
                resource_type = %schema.resource_type(),
                "JSON:API document has null data, nothing to deserialize"
            );
            Ok(DeserializationResult::new())
        }
        Value::Object(resource) => deserialize_resource(resource, &base, schema),
        other => Err(MalformedDocumentError::InvalidData {
            expected: "an object or null",
            found: json_kind(other),
        }),
    }
}

/// Deserializes a collection document (`data` is an array).
///
/// Returns one result per element, with pointers rooted at `/data/<index>`.
/// `data: null` yields an empty vector.
///
/// # Errors
///
/// Returns [`MalformedDocumentError`] if `data` is missing or is neither an
/// array nor null, or if any element is malformed. No partial results are
/// returned.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::{deserialize_collection, ResourceSchema, ResourceType};
/// use serde_json::json;
///
/// let schema = ResourceSchema::builder(ResourceType::new("users").unwrap()).build();
/// let document = json!({"data": [
///     {"type": "users", "id": "1", "attributes": {"name": "Ana"}},
///     {"type": "users", "id": "2", "attributes": {"name": "Bo"}}
/// ]});
///
/// let results = deserialize_collection(&document, &schema).unwrap();
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[1].pointer("name").unwrap().to_string(), "/data/1/attributes/name");
/// ```
pub fn deserialize_collection(
    document: &Value,
    schema: &ResourceSchema,
) -> Result<Vec<DeserializationResult>, MalformedDocumentError> {
    let data = locate_data(document)?;
    let base = PointerPath::root().append("data");

    match data {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let pointer = base.append(index);
                match item {
                    Value::Object(resource) => deserialize_resource(resource, &pointer, schema),
                    other => Err(MalformedDocumentError::InvalidMember {
                        pointer,
                        expected: "an object",
                        found: json_kind(other),
                    }),
                }
            })
            .collect(),
        other => Err(MalformedDocumentError::InvalidData {
            expected: "an array or null",
            found: json_kind(other),
        }),
    }
}

/// Attribute names that would shadow the resource's own `type` and `id`.
const RESERVED_MEMBERS: [&str; 2] = ["type", "id"];

fn locate_data(document: &Value) -> Result<&Value, MalformedDocumentError> {
    document
        .as_object()
        .and_then(|root| root.get("data"))
        .ok_or(MalformedDocumentError::MissingData)
}

fn deserialize_resource(
    resource: &Map<String, Value>,
    base: &PointerPath,
    schema: &ResourceSchema,
) -> Result<DeserializationResult, MalformedDocumentError> {
    let mut result = DeserializationResult::new();

    if let Some(resource_type) = resource.get("type") {
        if resource_type.as_str() != Some(schema.resource_type().as_ref()) {
            tracing::debug!(
                expected = %schema.resource_type(),
                found = %resource_type,
                "JSON:API resource type differs from schema type"
            );
        }
        result.insert("type".to_string(), resource_type.clone(), base.append("type"));
    }
    if let Some(id) = resource.get("id") {
        result.insert("id".to_string(), id.clone(), base.append("id"));
    }

    let attributes_pointer = base.append("attributes");
    if let Some(attributes) = optional_object(resource, "attributes", &attributes_pointer)? {
        for (key, value) in attributes {
            if RESERVED_MEMBERS.contains(&key.as_str()) {
                tracing::debug!(attribute = %key, "Skipping attribute named after a resource member");
                continue;
            }
            let pointer = attributes_pointer.append(key);
            match schema.field(key) {
                Some(spec) => result.extend(spec.apply(key, value, schema.key_format()), &pointer),
                None => result.insert(schema.key_format().apply(key), value.clone(), pointer),
            }
        }
    }

    let relationships_pointer = base.append("relationships");
    if let Some(relationships) = optional_object(resource, "relationships", &relationships_pointer)?
    {
        let default_spec = RelationshipSpec::new();
        for (key, relationship) in relationships {
            let spec = match schema.relationship(key) {
                Some(spec) => spec,
                None if schema.default_relationships() => &default_spec,
                None => {
                    tracing::trace!(relationship = %key, "Skipping undeclared relationship");
                    continue;
                }
            };

            let relationship_pointer = relationships_pointer.append(key);
            let Value::Object(relationship) = relationship else {
                return Err(MalformedDocumentError::InvalidMember {
                    pointer: relationship_pointer,
                    expected: "an object",
                    found: json_kind(relationship),
                });
            };
            let Some(linkage) = relationship.get("data") else {
                tracing::trace!(relationship = %key, "Skipping relationship without data");
                continue;
            };

            let pointer = relationship_pointer.append("data");
            let linkage = parse_linkage(linkage, &pointer)?;
            result.extend(spec.apply(key, &linkage, schema.key_format()), &pointer);
        }
    }

    tracing::debug!(
        resource_type = %schema.resource_type(),
        pointer = %base,
        attributes = result.len(),
        "Deserialized JSON:API resource"
    );

    Ok(result)
}

/// Reads an optional object member; absent or `null` reads as `None`.
fn optional_object<'a>(
    resource: &'a Map<String, Value>,
    member: &str,
    pointer: &PointerPath,
) -> Result<Option<&'a Map<String, Value>>, MalformedDocumentError> {
    match resource.get(member) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(MalformedDocumentError::InvalidMember {
            pointer: pointer.clone(),
            expected: "an object",
            found: json_kind(other),
        }),
    }
}

fn parse_linkage(value: &Value, pointer: &PointerPath) -> Result<Linkage, MalformedDocumentError> {
    match value {
        Value::Null => Ok(Linkage::ToOne(None)),
        Value::Object(_) => parse_identifier(value, pointer).map(|ri| Linkage::ToOne(Some(ri))),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_identifier(item, &pointer.append(index)))
            .collect::<Result<Vec<_>, _>>()
            .map(Linkage::ToMany),
        other => Err(MalformedDocumentError::InvalidMember {
            pointer: pointer.clone(),
            expected: "an object, an array or null",
            found: json_kind(other),
        }),
    }
}

fn parse_identifier(
    value: &Value,
    pointer: &PointerPath,
) -> Result<ResourceIdentifier, MalformedDocumentError> {
    let Value::Object(identifier) = value else {
        return Err(MalformedDocumentError::InvalidMember {
            pointer: pointer.clone(),
            expected: "a resource identifier object",
            found: json_kind(value),
        });
    };
    let member = |name: &str| match identifier.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(MalformedDocumentError::InvalidMember {
            pointer: pointer.append(name),
            expected: "a string",
            found: other.map_or("nothing", json_kind),
        }),
    };
    Ok(ResourceIdentifier {
        resource_type: member("type")?,
        id: member("id")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceType;
    use crate::deserialize::{FieldSpec, KeyFormat};
    use serde_json::json;

    fn users() -> ResourceSchema {
        ResourceSchema::builder(ResourceType::new("users").unwrap()).build()
    }

    fn lucas() -> Value {
        json!({"data": {"type": "users", "attributes": {"name": "Lucas"}}})
    }

    fn pointer_strings(result: &DeserializationResult) -> Value {
        result.pointers_to_value()
    }

    #[test]
    fn test_null_data_yields_empty_result() {
        let result = deserialize(&json!({"data": null}), &users()).unwrap();
        assert!(result.is_empty());
        assert!(result.pointers().is_empty());
    }

    #[test]
    fn test_missing_data_is_malformed() {
        assert_eq!(
            deserialize(&json!({"meta": {}}), &users()),
            Err(MalformedDocumentError::MissingData)
        );
        assert_eq!(
            deserialize(&json!("data"), &users()),
            Err(MalformedDocumentError::MissingData)
        );
    }

    #[test]
    fn test_array_data_is_rejected_for_single_resource() {
        let result = deserialize(&json!({"data": []}), &users());
        assert!(matches!(
            result,
            Err(MalformedDocumentError::InvalidData { found: "an array", .. })
        ));
    }

    #[test]
    fn test_default_schema_passes_attributes_through() {
        let result = deserialize(&lucas(), &users()).unwrap();
        assert_eq!(
            Value::Object(result.attributes().clone()),
            json!({"type": "users", "name": "Lucas"})
        );
        assert_eq!(
            pointer_strings(&result),
            json!({"type": "/data/type", "name": "/data/attributes/name"})
        );
    }

    #[test]
    fn test_id_is_extracted_with_its_pointer() {
        let document = json!({"data": {"type": "users", "id": "7"}});
        let result = deserialize(&document, &users()).unwrap();
        assert_eq!(result.get("id"), Some(&json!("7")));
        assert_eq!(result.pointer("id").unwrap().to_string(), "/data/id");
    }

    #[test]
    fn test_key_format_does_not_touch_type_and_id() {
        let schema = ResourceSchema::builder(ResourceType::new("users").unwrap())
            .key_format(KeyFormat::Capitalize)
            .build();
        let document = json!({"data": {"type": "users", "id": "1", "attributes": {"name": "Lucas"}}});
        let result = deserialize(&document, &schema).unwrap();
        let keys: Vec<_> = result.attributes().keys().cloned().collect();
        assert_eq!(keys, vec!["type", "id", "Name"]);
    }

    #[test]
    fn test_fan_out_transform_shares_source_pointer() {
        let schema = ResourceSchema::builder(ResourceType::new("users").unwrap())
            .attribute(
                "name",
                FieldSpec::new().transform(|value| {
                    let full = value.as_str().unwrap_or_default();
                    let (first, last) = full.split_once(' ').unwrap_or((full, ""));
                    let mut out = Map::new();
                    out.insert("first_name".to_string(), json!(first));
                    out.insert("last_name".to_string(), json!(last));
                    out
                }),
            )
            .build();
        let document = json!({"data": {"type": "users", "attributes": {"name": "Lucas Hosseini"}}});
        let result = deserialize(&document, &schema).unwrap();
        assert_eq!(result.get("first_name"), Some(&json!("Lucas")));
        assert_eq!(result.get("last_name"), Some(&json!("Hosseini")));
        assert_eq!(result.get("name"), None);
        assert_eq!(result.pointer("first_name"), result.pointer("last_name"));
        assert_eq!(
            result.pointer("last_name").unwrap().to_string(),
            "/data/attributes/name"
        );
    }

    #[test]
    fn test_empty_transform_output_drops_the_attribute() {
        let schema = ResourceSchema::builder(ResourceType::new("users").unwrap())
            .attribute("password", FieldSpec::new().transform(|_| Map::new()))
            .build();
        let document = json!({"data": {"type": "users", "attributes": {"password": "x"}}});
        let result = deserialize(&document, &schema).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.pointer("password").is_none());
    }

    #[test]
    fn test_output_key_collision_last_write_wins() {
        let schema = ResourceSchema::builder(ResourceType::new("users").unwrap())
            .attribute("nickname", FieldSpec::renamed("name"))
            .build();
        let document = json!({"data": {"type": "users", "attributes": {
            "name": "first", "nickname": "second"
        }}});
        let result = deserialize(&document, &schema).unwrap();
        assert_eq!(result.get("name"), Some(&json!("second")));
        assert_eq!(
            result.pointer("name").unwrap().to_string(),
            "/data/attributes/nickname"
        );
    }

    #[test]
    fn test_attribute_keys_are_escaped_in_pointers() {
        let document = json!({"data": {"type": "users", "attributes": {"a/b~c": 1}}});
        let result = deserialize(&document, &users()).unwrap();
        assert_eq!(
            result.pointer("a/b~c").unwrap().to_string(),
            "/data/attributes/a~1b~0c"
        );
        let pointer = result.pointer("a/b~c").unwrap();
        assert_eq!(pointer.resolve(&document), Some(&json!(1)));
    }

    #[test]
    fn test_null_attributes_behaves_as_empty() {
        let document = json!({"data": {"type": "users", "attributes": null}});
        let result = deserialize(&document, &users()).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_non_object_attributes_is_malformed() {
        let document = json!({"data": {"type": "users", "attributes": [1, 2]}});
        let error = deserialize(&document, &users()).unwrap_err();
        assert_eq!(error.pointer().to_string(), "/data/attributes");
    }

    #[test]
    fn test_undeclared_relationships_are_ignored_by_default() {
        let document = json!({"data": {"type": "posts", "relationships": {
            "author": {"data": {"type": "people", "id": "9"}}
        }}});
        let result = deserialize(&document, &users()).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_declared_relationship_pointers() {
        let schema = ResourceSchema::builder(ResourceType::new("posts").unwrap())
            .relationship("author", RelationshipSpec::new())
            .relationship("tags", RelationshipSpec::new().rename("tag"))
            .build();
        let document = json!({"data": {"type": "posts", "relationships": {
            "author": {"data": {"type": "people", "id": "9"}},
            "tags": {"data": [{"type": "tags", "id": "1"}, {"type": "tags", "id": "2"}]}
        }}});
        let result = deserialize(&document, &schema).unwrap();
        assert_eq!(result.get("author_id"), Some(&json!("9")));
        assert_eq!(result.get("author_type"), Some(&json!("people")));
        assert_eq!(result.get("tag_ids"), Some(&json!(["1", "2"])));
        assert_eq!(
            result.pointer("author_id").unwrap().to_string(),
            "/data/relationships/author/data"
        );
        assert_eq!(
            result.pointer("tag_types").unwrap().to_string(),
            "/data/relationships/tags/data"
        );
    }

    #[test]
    fn test_default_relationships_opt_in() {
        let schema = ResourceSchema::builder(ResourceType::new("posts").unwrap())
            .default_relationships(true)
            .key_format(KeyFormat::CamelCase)
            .build();
        let document = json!({"data": {"type": "posts", "relationships": {
            "author": {"data": null},
            "comments": {"links": {"related": "/posts/1/comments"}}
        }}});
        let result = deserialize(&document, &schema).unwrap();
        assert_eq!(result.get("authorId"), Some(&Value::Null));
        assert_eq!(result.get("authorType"), Some(&Value::Null));
        assert!(result.get("commentsIds").is_none());
    }

    #[test]
    fn test_relationship_transform_receives_linkage() {
        let schema = ResourceSchema::builder(ResourceType::new("posts").unwrap())
            .relationship(
                "tags",
                RelationshipSpec::new().transform(|linkage| {
                    let mut out = Map::new();
                    out.insert("tag_count".to_string(), json!(linkage.identifiers().len()));
                    out
                }),
            )
            .build();
        let document = json!({"data": {"type": "posts", "relationships": {
            "tags": {"data": [{"type": "tags", "id": "1"}]}
        }}});
        let result = deserialize(&document, &schema).unwrap();
        assert_eq!(result.get("tag_count"), Some(&json!(1)));
    }

    #[test]
    fn test_malformed_identifier_reports_member_pointer() {
        let schema = ResourceSchema::builder(ResourceType::new("posts").unwrap())
            .relationship("tags", RelationshipSpec::new())
            .build();
        let document = json!({"data": {"type": "posts", "relationships": {
            "tags": {"data": [{"type": "tags", "id": 1}]}
        }}});
        let error = deserialize(&document, &schema).unwrap_err();
        assert_eq!(
            error,
            MalformedDocumentError::InvalidMember {
                pointer: PointerPath::from_segments(["data", "relationships", "tags", "data"])
                    .append(0)
                    .append("id"),
                expected: "a string",
                found: "a number",
            }
        );
        assert_eq!(error.pointer().to_string(), "/data/relationships/tags/data/0/id");
    }

    #[test]
    fn test_collection_rejects_non_object_items() {
        let error = deserialize_collection(&json!({"data": [{"type": "users"}, 3]}), &users())
            .unwrap_err();
        assert_eq!(error.pointer().to_string(), "/data/1");
    }

    #[test]
    fn test_collection_null_and_object_data() {
        assert!(deserialize_collection(&json!({"data": null}), &users())
            .unwrap()
            .is_empty());
        assert!(matches!(
            deserialize_collection(&json!({"data": {"type": "users"}}), &users()),
            Err(MalformedDocumentError::InvalidData { .. })
        ));
    }

    #[test]
    fn test_attributes_named_type_or_id_are_skipped() {
        let document = json!({
            "data": {
                "type": "users",
                "id": "1",
                "attributes": {"type": "admin", "id": "other", "name": "Lucas"}
            }
        });
        let result = deserialize(&document, &users()).unwrap();
        assert_eq!(
            Value::Object(result.attributes().clone()),
            json!({"type": "users", "id": "1", "name": "Lucas"})
        );
        assert_eq!(result.pointer("type").unwrap().to_string(), "/data/type");
        assert_eq!(result.pointer("id").unwrap().to_string(), "/data/id");
    }
}
