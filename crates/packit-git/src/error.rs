//! Error types for packit-git

use std::path::PathBuf;

/// Result type for packit-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in packit-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("No git repository at {path}")]
    RepositoryNotFound { path: PathBuf },

    #[error("Reference '{reference}' not found")]
    ReferenceNotFound { reference: String },

    #[error("File '{path}' not found at ref '{reference}'")]
    FileNotFound { path: String, reference: String },

    #[error("File '{path}' at ref '{reference}' is not valid UTF-8")]
    NotUtf8 { path: String, reference: String },
}

impl Error {
    /// Whether the requested file is absent at the requested ref.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}
