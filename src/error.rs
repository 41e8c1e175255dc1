//! Structured error types for settings composition.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Variant selection
    GamemodeNotFound,
    GamemodeAmbiguous,

    // Shape registration
    InvalidShape,
    ShapeNotRegistered,

    // Lifecycle
    NotLoaded,

    // Input errors
    ParseError,
    IoError,
}

/// Variant selection failure.
///
/// Both cases are authoring bugs in the settings document and abort the
/// load that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no settings variant found for {kind}")]
    NotFound { kind: String },

    #[error("{count} settings variants share the discriminator {kind}")]
    Ambiguous { kind: String, count: usize },
}

/// A shape's field table is malformed or missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeRegistrationError {
    #[error("shape {shape} declares a field with an empty name")]
    EmptyName { shape: &'static str },

    #[error("shape {shape} declares field {field} more than once")]
    DuplicateField {
        shape: &'static str,
        field: &'static str,
    },

    #[error("accessors of {shape}.{field} do not address the same storage")]
    AccessorMismatch {
        shape: &'static str,
        field: &'static str,
    },

    #[error("shape {shape} was never registered")]
    Unregistered { shape: &'static str },
}

/// A nested block could not be read from a source because it was never
/// assigned. Absorbed by the merge engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} of {type_name} is unassigned in {shape}")]
pub struct FieldReadError {
    pub shape: &'static str,
    pub field: &'static str,
    pub type_name: &'static str,
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Registration(#[from] ShapeRegistrationError),

    #[error("settings document has not been loaded")]
    NotLoaded,

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SettingsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SettingsError::Configuration(ConfigurationError::NotFound { .. }) => {
                ErrorCode::GamemodeNotFound
            }
            SettingsError::Configuration(ConfigurationError::Ambiguous { .. }) => {
                ErrorCode::GamemodeAmbiguous
            }
            SettingsError::Registration(ShapeRegistrationError::Unregistered { .. }) => {
                ErrorCode::ShapeNotRegistered
            }
            SettingsError::Registration(_) => ErrorCode::InvalidShape,
            SettingsError::NotLoaded => ErrorCode::NotLoaded,
            SettingsError::Json(_) | SettingsError::Yaml(_) => ErrorCode::ParseError,
            SettingsError::Io { .. } => ErrorCode::IoError,
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        SettingsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for settings operations.
pub type SettingsResult<T> = std::result::Result<T, SettingsError>;
