//! Error types for device profile parsing and CLI operations.

use serde_json::Value;
use thiserror::Error;

/// Schema violation found while reading a device profile document.
///
/// Parsing is fail-fast: the first violation aborts the whole object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("json must be object, but is `{actual}`")]
    NotAnObject { actual: String },

    #[error("json must be array, but is `{actual}`")]
    NotAnArray { actual: String },

    #[error("`{key}` must be {expected}, but is `{actual}`")]
    WrongFieldType {
        key: String,
        expected: &'static str,
        actual: String,
    },

    #[error("`{key}` must be specified")]
    MissingField { key: String },

    /// A nested document (identifiers, a rule list, a device entry) failed.
    #[error("`{key}` error: {inner}")]
    CollaboratorError {
        key: String,
        inner: Box<SchemaError>,
    },
}

impl SchemaError {
    pub(crate) fn not_an_object(value: &Value) -> Self {
        Self::NotAnObject {
            actual: value.to_string(),
        }
    }

    pub(crate) fn not_an_array(value: &Value) -> Self {
        Self::NotAnArray {
            actual: value.to_string(),
        }
    }

    pub(crate) fn wrong_type(key: &str, expected: &'static str, value: &Value) -> Self {
        Self::WrongFieldType {
            key: key.to_string(),
            expected,
            actual: value.to_string(),
        }
    }

    pub(crate) fn missing(key: &str) -> Self {
        Self::MissingField {
            key: key.to_string(),
        }
    }

    /// Prefix this error with the key of the enclosing field.
    #[must_use]
    pub fn within(self, key: impl Into<String>) -> Self {
        Self::CollaboratorError {
            key: key.into(),
            inner: Box::new(self),
        }
    }

    /// The offending key at this level, if the error names one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::NotAnObject { .. } | Self::NotAnArray { .. } => None,
            Self::WrongFieldType { key, .. }
            | Self::MissingField { key }
            | Self::CollaboratorError { key, .. } => Some(key),
        }
    }

    /// The innermost error, skipping every `CollaboratorError` wrapper.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::CollaboratorError { inner, .. } => inner.root_cause(),
            other => other,
        }
    }
}

/// Convenience type alias for schema parsing results.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Primary error type for `rp` CLI operations.
#[derive(Error, Debug)]
pub enum RpError {
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid device profile: {0}")]
    Schema(#[from] SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl RpError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::ConfigParse(_) | Self::Schema(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } => Some("Check the path to the profile document"),
            Self::ConfigParse(_) => Some("The file must contain a JSON object or array"),
            Self::Schema(SchemaError::MissingField { .. }) => {
                Some("Every device entry needs an `identifiers` object")
            }
            Self::Schema(_) => Some("Use --skip-invalid to continue past invalid entries"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using RpError.
pub type Result<T> = std::result::Result<T, RpError>;
