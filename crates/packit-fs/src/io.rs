//! Plain text reads with path-aware errors

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// List the file names directly inside `dir`, sorted.
///
/// Subdirectories are skipped. A missing directory yields an empty list.
pub fn list_file_names(dir: &NormalizedPath) -> Result<Vec<String>> {
    let native_dir = dir.to_native();
    if !native_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&native_dir).map_err(|e| Error::io(&native_dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native_dir, e))?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
