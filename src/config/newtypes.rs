//! Validated newtype wrappers for configuration values.
//!
//! These wrap strings that name things at registration time. Invalid values
//! are rejected on construction, including when deserialized.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// The parameter name a deserialized resource is exposed under (e.g. `user`).
///
/// Allowed characters are ASCII letters, digits, `_` and `-`. The reserved
/// parameter key `_jsonapi` is rejected since it holds the raw document.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::ResourceName;
///
/// let name = ResourceName::new("user").unwrap();
/// assert_eq!(name.as_ref(), "user");
/// assert!(ResourceName::new("user name").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName(String);

impl ResourceName {
    /// Creates a new validated resource name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyResourceName`] if the name is empty, or
    /// [`ConfigError::InvalidResourceName`] if it contains other characters
    /// than ASCII alphanumerics, `_` and `-`, or is the reserved `_jsonapi`.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyResourceName);
        }
        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_chars || name == crate::request::JSONAPI_PARAM_KEY {
            return Err(ConfigError::InvalidResourceName { name });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Hashes like the inner `String`, so map lookups by `&str` are consistent.
impl Borrow<str> for ResourceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ResourceName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A JSON:API resource `type` (e.g. `users`).
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::ResourceType;
///
/// let resource_type = ResourceType::new("users").unwrap();
/// assert_eq!(resource_type.as_ref(), "users");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceType(String);

impl ResourceType {
    /// Creates a new validated resource type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyResourceType`] if the type is empty.
    pub fn new(resource_type: impl Into<String>) -> Result<Self, ConfigError> {
        let resource_type = resource_type.into();
        if resource_type.is_empty() {
            return Err(ConfigError::EmptyResourceType);
        }
        Ok(Self(resource_type))
    }
}

impl AsRef<str> for ResourceType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ResourceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
