//! Error types for packit-config

use std::path::PathBuf;

/// Result type for packit-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or resolving a package configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No recognized config file in any searched location
    #[error("No packit config found in {searched:?}")]
    ConfigNotFound { searched: Vec<PathBuf> },

    /// The document exists but could not be turned into a configuration.
    ///
    /// This is the only failure the resolver reports for bad input, apart
    /// from [`Error::MissingSpecFile`]; the underlying cause is kept as the
    /// error source.
    #[error("Cannot parse package config: {source}")]
    ConfigParse {
        #[source]
        source: Box<Error>,
    },

    /// Neither the document nor the caller supplied a spec file path
    #[error("Spec file was not found")]
    MissingSpecFile,

    /// A job configuration was compared with a value of another type
    #[error("Provided object is not a JobConfig instance")]
    ComparisonType,

    /// A field failed structural or type validation
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Fs(#[from] packit_fs::Error),

    #[error(transparent)]
    Git(#[from] packit_git::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap `self` as a [`Error::ConfigParse`] unless it already is one.
    pub fn into_parse_error(self) -> Self {
        match self {
            Self::ConfigParse { .. } => self,
            other => Self::ConfigParse {
                source: Box::new(other),
            },
        }
    }

    /// Prefix the field of a validation error, e.g. `jobs[1]`.
    pub(crate) fn within(self, prefix: &str) -> Self {
        match self {
            Self::Validation { field, message } => Self::Validation {
                field: format!("{prefix}.{field}"),
                message,
            },
            other => other,
        }
    }
}
