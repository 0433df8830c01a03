//! Project access trait used by remote configuration lookup

use regex::Regex;

use crate::Result;

/// A git project whose files can be read at any ref.
///
/// Implementations must report a missing file as
/// [`Error::FileNotFound`](crate::Error::FileNotFound) so callers can tell
/// "try the next candidate name" apart from a real failure.
pub trait GitProject {
    /// Short repository name, e.g. `ogr`.
    fn repo_name(&self) -> &str;

    /// Namespaced repository name, e.g. `packit/ogr`.
    fn full_repo_name(&self) -> String;

    /// Read a text file at `reference` (branch, tag or commit).
    fn get_file_content(&self, path: &str, reference: &str) -> Result<String>;

    /// List file paths at `reference` (or the default ref when `None`),
    /// optionally keeping only paths matching `filter`.
    fn get_files(&self, reference: Option<&str>, filter: Option<&Regex>) -> Result<Vec<String>>;
}
