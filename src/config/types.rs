use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::flatten::{
    FLATTEN_SEPARATOR,
    SEPARATOR_ESCAPE_CHAR,
};
use crate::input::DEFAULT_ALIAS_PREFIX;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "defaultSeparator")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlattenSettings {
    /// Separator assumed for lookup keys when the caller passes none.
    pub default_separator: String,

    /// Marker that turns a JSON string into an alias reference.
    /// `None` disables alias detection.
    pub alias_prefix: Option<String>,

    /// Keep intermediate subtrees as entries of the flat mapping.
    pub subtree: bool,

    /// Escape literal separators inside key segments while flattening.
    pub escape_keys: bool,
}

impl FlattenSettings {
    /// The validated default separator as a `char`.
    ///
    /// Falls back to [`FLATTEN_SEPARATOR`] for settings that did not pass
    /// [`validate`](Self::validate).
    #[must_use]
    pub fn separator(&self) -> char {
        let mut chars = self.default_separator.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != SEPARATOR_ESCAPE_CHAR => c,
            _ => FLATTEN_SEPARATOR,
        }
    }

    /// # Errors
    /// - Separator is not exactly one character
    /// - Separator is the reserved escape character
    /// - Alias prefix is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match self.default_separator.chars().count() {
            0 => errors.push(ValidationError::new(
                "defaultSeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            )),
            1 => {
                if self.default_separator.contains(SEPARATOR_ESCAPE_CHAR) {
                    errors.push(ValidationError::new(
                        "defaultSeparator",
                        "The separator cannot be the reserved escape character U+0001",
                    ));
                }
            }
            _ => errors.push(ValidationError::new(
                "defaultSeparator",
                format!(
                    "The separator must be a single character, got '{}'",
                    self.default_separator
                ),
            )),
        }

        if let Some(prefix) = &self.alias_prefix
            && prefix.is_empty()
        {
            errors.push(ValidationError::new(
                "aliasPrefix",
                "The prefix cannot be empty. Please specify a prefix (e.g., \":\"), or set it to null",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for FlattenSettings {
    fn default() -> Self {
        Self {
            default_separator: FLATTEN_SEPARATOR.to_string(),
            alias_prefix: Some(DEFAULT_ALIAS_PREFIX.to_string()),
            subtree: false,
            escape_keys: true,
        }
    }
}
