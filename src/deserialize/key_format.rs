//! Key casing policy applied to every extracted key.

use std::fmt;
use std::sync::Arc;

use convert_case::{Case, Casing};

/// A pure, position-independent mapping from input key to output key.
///
/// The same key always maps to the same output regardless of where or when
/// it is encountered, so attribute and pointer maps can be filled in any
/// order without diverging.
///
/// # Example
///
/// ```rust
/// use jsonapi_adapter::KeyFormat;
///
/// assert_eq!(KeyFormat::Identity.apply("first_name"), "first_name");
/// assert_eq!(KeyFormat::Capitalize.apply("name"), "Name");
/// assert_eq!(KeyFormat::CamelCase.apply("first_name"), "firstName");
/// assert_eq!(KeyFormat::SnakeCase.apply("firstName"), "first_name");
/// assert_eq!(KeyFormat::Dasherize.apply("firstName"), "first-name");
/// assert_eq!(KeyFormat::custom(|key| key.to_uppercase()).apply("id"), "ID");
/// ```
#[derive(Clone, Default)]
pub enum KeyFormat {
    /// Keys pass through unchanged.
    #[default]
    Identity,
    /// First character upper-cased, the rest lower-cased (`nAME` -> `Name`).
    Capitalize,
    /// `first_name` / `first-name` / `FIRST_NAME` -> `firstName`.
    CamelCase,
    /// `first_name` / `first-name` -> `FirstName`.
    PascalCase,
    /// `firstName` / `first-name` / `HTMLBody` -> `first_name` / `html_body`.
    SnakeCase,
    /// `first_name` / `firstName` -> `first-name`.
    Dasherize,
    /// A caller-supplied transform.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl KeyFormat {
    /// Wraps a closure as a [`KeyFormat::Custom`].
    #[must_use]
    pub fn custom<F>(format: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(format))
    }

    /// Applies the policy to `key`.
    #[must_use]
    pub fn apply(&self, key: &str) -> String {
        match self {
            Self::Identity => key.to_string(),
            Self::Capitalize => capitalize(key),
            Self::CamelCase => key.to_case(Case::Camel),
            Self::PascalCase => key.to_case(Case::Pascal),
            Self::SnakeCase => key.to_case(Case::Snake),
            Self::Dasherize => key.to_case(Case::Kebab),
            Self::Custom(format) => format(key),
        }
    }

    /// Returns `true` for [`KeyFormat::Identity`].
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }
}

impl fmt::Debug for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Capitalize => f.write_str("Capitalize"),
            Self::CamelCase => f.write_str("CamelCase"),
            Self::PascalCase => f.write_str("PascalCase"),
            Self::SnakeCase => f.write_str("SnakeCase"),
            Self::Dasherize => f.write_str("Dasherize"),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
