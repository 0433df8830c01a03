//! Error types for packit-status

/// Result type for packit-status operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by a status source implementation
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while collecting package status
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A remote service query failed
    #[error("{message}: {source}")]
    Source {
        message: String,
        #[source]
        source: SourceError,
    },

    /// The package configuration lacks something a query needs
    #[error("Package configuration incomplete: {message}")]
    Config { message: String },
}

impl Error {
    pub fn source_failed(message: impl Into<String>, source: impl Into<SourceError>) -> Self {
        Self::Source {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
