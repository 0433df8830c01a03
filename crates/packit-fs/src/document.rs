//! Format-detecting loader for configuration documents
//!
//! Documents are loaded into untyped [`serde_json::Value`] trees so that the
//! resolver can tell an absent key from an empty one before any typed
//! validation runs.

use serde_json::Value;

use crate::{Error, NormalizedPath, Result, io};

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Detect the format from a path's extension.
    ///
    /// - `.yaml`, `.yml` -> YAML
    /// - `.json` -> JSON
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }
}

/// Loads configuration documents from disk or from in-memory text.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentStore;

impl DocumentStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and parse the document at `path`.
    pub fn load(&self, path: &NormalizedPath) -> Result<Value> {
        let format = DocumentFormat::from_path(path)?;
        let content = io::read_text(path)?;
        tracing::debug!(%path, ?format, "Loading configuration document");
        self.parse(&content, format, path)
    }

    /// Parse document text. `origin` is only used in error messages.
    ///
    /// An empty YAML document parses to `null`; callers decide whether that
    /// is acceptable.
    pub fn parse(&self, content: &str, format: DocumentFormat, origin: &NormalizedPath) -> Result<Value> {
        let parsed = match format {
            DocumentFormat::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::ConfigParse {
            path: origin.to_native(),
            format: format.label().into(),
            message,
        })
    }
}
