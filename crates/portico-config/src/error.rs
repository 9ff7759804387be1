//! Errors raised while loading a site configuration.

use std::path::PathBuf;

use crate::loader::ConfigFormat;

/// Errors that can occur when loading or validating a site configuration.
///
/// Every variant is fatal: the build cannot continue without a valid
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    #[error("Unsupported configuration format: {0} (expected .toml, .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("Missing required field `{field}`")]
    MissingField { field: String },

    #[error("Invalid value for `{field}`: '{value}' (expected one of: throw, warn, log, ignore)")]
    InvalidPolicy { field: String, value: String },

    #[error("Invalid value for `{field}`: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The configuration key this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::InvalidPolicy { field, .. }
            | Self::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}
