//! Local spec file discovery

use crate::{NormalizedPath, Result, io};

/// Find the spec file of a package checked out on disk.
///
/// Directories are tried in order; the first one holding any `*.spec` file
/// wins, and within it the lexicographically first match is returned. The
/// result is relative to that directory, which is how `specfile_path` is
/// written in a package configuration.
pub fn find_local_specfile(directories: &[NormalizedPath]) -> Result<Option<NormalizedPath>> {
    for dir in directories {
        let found = io::list_file_names(dir)?
            .into_iter()
            .map(NormalizedPath::new)
            .find(|name| name.has_extension("spec"));
        if let Some(spec) = found {
            tracing::debug!(%dir, %spec, "Local spec file found");
            return Ok(Some(spec));
        }
    }
    tracing::debug!(?directories, "No local spec file found");
    Ok(None)
}
