//! Error types for configuration and schema construction.
//!
//! Deserialization, request parsing and rendering each have their own error
//! types next to the code that produces them. This module only holds the
//! errors raised while *building* things at startup.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured application fails at boot instead of on the first request.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_adapter::{ConfigError, ResourceName};
//!
//! let result = ResourceName::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyResourceName)));
//! ```

use thiserror::Error;

/// Errors that can occur while building configuration or schemas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Resource name cannot be empty.
    #[error("Resource name cannot be empty. Please provide the parameter name the resource is exposed under (e.g., 'user').")]
    EmptyResourceName,

    /// Resource name contains characters that cannot be used as a parameter key.
    #[error("Invalid resource name '{name}'. Expected letters, digits, '_' or '-' only.")]
    InvalidResourceName {
        /// The invalid name that was provided.
        name: String,
    },

    /// Resource type cannot be empty.
    #[error("Resource type cannot be empty. Please provide the JSON:API type (e.g., 'users').")]
    EmptyResourceType,

    /// The configured media type does not parse as a MIME type.
    #[error("Invalid media type '{media_type}'. Expected a MIME type such as 'application/vnd.api+json'.")]
    InvalidMediaType {
        /// The media type that failed to parse.
        media_type: String,
    },
}
