//! Binding a resource schema to controller actions.
//!
//! A [`DeserializableResource`] is declared once per controller (for example
//! "the `create` and `update` actions take a `user`"). Per request, the host
//! wraps the parsed parameters in [`ActionParams`] and calls
//! [`DeserializableResource::apply`], which replaces the raw document with
//! the flattened attributes under the resource name and records the
//! provenance pointers.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ResourceName;
use crate::deserialize::{deserialize, ResourceSchema};
use crate::pointer::PointerPath;

use super::errors::ActionError;
use super::{Params, JSONAPI_PARAM_KEY};

/// Which actions a [`DeserializableResource`] runs for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActionFilter {
    /// Every action.
    #[default]
    All,
    /// Only the listed actions.
    Only(Vec<String>),
    /// Every action except the listed ones.
    Except(Vec<String>),
}

impl ActionFilter {
    /// Returns `true` if the filter admits `action`.
    #[must_use]
    pub fn admits(&self, action: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(actions) => actions.iter().any(|a| a == action),
            Self::Except(actions) => !actions.iter().any(|a| a == action),
        }
    }
}

/// A resource name bound to the schema used to deserialize it.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::request::{ActionParams, DeserializableResource, RequestParser};
/// use jsonapi_adapter::{ResourceName, ResourceSchema, ResourceType};
/// use serde_json::json;
///
/// let user = DeserializableResource::new(
///     ResourceName::new("user").unwrap(),
///     ResourceSchema::builder(ResourceType::new("users").unwrap()).build(),
/// );
///
/// let params = RequestParser::new()
///     .parse(br#"{"data": {"type": "users", "attributes": {"name": "Lucas"}}}"#)
///     .unwrap();
/// let mut action = ActionParams::new(params);
/// user.apply("create", &mut action).unwrap();
///
/// assert_eq!(action.get("user"), Some(&json!({"type": "users", "name": "Lucas"})));
/// assert_eq!(
///     action.jsonapi_pointers()["name"].to_string(),
///     "/data/attributes/name"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct DeserializableResource {
    name: ResourceName,
    schema: Arc<ResourceSchema>,
    actions: ActionFilter,
}

impl DeserializableResource {
    /// Binds `schema` to `name` for every action.
    #[must_use]
    pub fn new(name: ResourceName, schema: impl Into<Arc<ResourceSchema>>) -> Self {
        Self {
            name,
            schema: schema.into(),
            actions: ActionFilter::All,
        }
    }

    /// Restricts the binding to the listed actions.
    #[must_use]
    pub fn only<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = ActionFilter::Only(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Excludes the listed actions from the binding.
    #[must_use]
    pub fn except<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = ActionFilter::Except(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the resource name.
    #[must_use]
    pub const fn name(&self) -> &ResourceName {
        &self.name
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// Returns the action filter.
    #[must_use]
    pub const fn actions(&self) -> &ActionFilter {
        &self.actions
    }

    /// Deserializes the `_jsonapi` document in `params` for `action`.
    ///
    /// On success `params[name]` holds the flattened attributes and
    /// [`ActionParams::jsonapi_pointers`] their provenance. Actions excluded
    /// by the filter leave `params` untouched. On failure `params` is left
    /// untouched as well.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingDocument`] if `_jsonapi` is absent, or
    /// [`ActionError::Malformed`] if the document is malformed.
    pub fn apply(&self, action: &str, params: &mut ActionParams) -> Result<(), ActionError> {
        if !self.actions.admits(action) {
            return Ok(());
        }
        let document = params
            .params
            .get(JSONAPI_PARAM_KEY)
            .ok_or(ActionError::MissingDocument)?;

        let (attributes, pointers) = deserialize(document, &self.schema)?.into_parts();

        params
            .params
            .insert(self.name.to_string(), Value::Object(attributes));
        params.jsonapi_pointers = pointers;
        Ok(())
    }
}

/// The parameters of one request as seen by an action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionParams {
    params: Params,
    jsonapi_pointers: HashMap<String, PointerPath>,
}

impl ActionParams {
    /// Wraps parsed request parameters.
    #[must_use]
    pub fn new(params: Params) -> Self {
        Self {
            params,
            jsonapi_pointers: HashMap::new(),
        }
    }

    /// Returns all parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Returns one parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Returns the provenance of the deserialized resource's keys.
    ///
    /// Empty until a [`DeserializableResource`] has been applied.
    #[must_use]
    pub const fn jsonapi_pointers(&self) -> &HashMap<String, PointerPath> {
        &self.jsonapi_pointers
    }

    /// Unwraps the parameters.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }
}

impl From<Params> for ActionParams {
    fn from(params: Params) -> Self {
        Self::new(params)
    }
}
