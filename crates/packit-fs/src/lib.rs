//! Filesystem access for packit configuration
//!
//! Locates recognized config files and spec files on disk and loads
//! configuration documents into untyped [`serde_json::Value`] trees. Typed
//! validation of those trees happens in `packit-config`.

pub mod constants;
pub mod document;
pub mod error;
pub mod io;
pub mod path;
pub mod specfile;

pub use constants::{CONFIG_FILE_NAMES, ConfigFileName};
pub use document::{DocumentFormat, DocumentStore};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use specfile::find_local_specfile;
