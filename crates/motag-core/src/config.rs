//! Reconciler configuration.

use serde::{Deserialize, Serialize};

/// The five settings that drive annotation.
///
/// Every field has a default, so a TOML file only needs to name what it
/// changes:
///
/// ```toml
/// tags = ["p", "span"]
/// id_format = "f%06d"
/// id_pattern = "^f[0-9]{6}$"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tag names to process, compared ASCII case-insensitively.
    pub tags: Vec<String>,
    /// Class token marking an element as managed by this tool.
    pub mo_class: String,
    /// Class token that opts an element out.
    pub nomo_class: String,
    /// Regular expression recognizing ids this tool generated. It must
    /// match at the start of the id.
    pub id_pattern: String,
    /// printf-style template with one integer placeholder, e.g. `mo_id_%d`.
    pub id_format: String,
}

impl Config {
    /// Build a configuration from explicit values.
    pub fn new<T: Into<String>>(
        tags: impl IntoIterator<Item = T>,
        mo_class: impl Into<String>,
        nomo_class: impl Into<String>,
        id_pattern: impl Into<String>,
        id_format: impl Into<String>,
    ) -> Self {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            mo_class: mo_class.into(),
            nomo_class: nomo_class.into(),
            id_pattern: id_pattern.into(),
            id_format: id_format.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            ["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "span"],
            "mo",
            "nomo",
            "^mo_id_[0-9]+$",
            "mo_id_%d",
        )
    }
}

/// A configuration that cannot be turned into a reconciler.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `id_pattern` is not a valid regular expression.
    #[error("invalid id pattern '{pattern}'")]
    InvalidIdPattern {
        /// The pattern as configured.
        pattern: String,
        /// Why the regex crate rejected it.
        #[source]
        source: regex::Error,
    },

    /// A class setting is empty or contains whitespace.
    #[error("{field} must be a single class token, got '{value}'")]
    InvalidClass {
        /// Which setting (`mo_class` or `nomo_class`).
        field: &'static str,
        /// The value as configured.
        value: String,
    },
}
