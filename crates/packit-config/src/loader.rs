//! Locating package configuration documents
//!
//! Two sources are supported: directories on disk, searched in order, and a
//! [`GitProject`] read at a given ref. Both try the recognized file names in
//! [`CONFIG_FILE_NAMES`] order and hand the parsed document to the resolver
//! together with the repository name and a spec file found alongside.
//!
//! "Not found" and "found but malformed" are kept apart: the former is
//! [`Error::ConfigNotFound`] locally and `Ok(None)` remotely, the latter is
//! always [`Error::ConfigParse`].

use std::path::PathBuf;
use std::sync::LazyLock;

use packit_fs::{
    CONFIG_FILE_NAMES, DocumentFormat, DocumentStore, NormalizedPath, find_local_specfile,
};
use packit_git::GitProject;
use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::package::PackageConfig;
use crate::resolver::PackageConfigResolver;

static SPEC_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".+\.spec$").unwrap());

/// Searches local directories for a package configuration.
///
/// The current working directory can be moved to the front or the back of
/// the search order. Asking for both is ambiguous; it is logged and the
/// directory ends up last.
#[derive(Debug, Clone, Default)]
pub struct LocalConfigLocator {
    directories: Vec<NormalizedPath>,
    repo_name: Option<String>,
    try_local_dir_first: bool,
    try_local_dir_last: bool,
    /// Stands in for the process working directory (used for testing)
    current_dir_override: Option<PathBuf>,
}

impl LocalConfigLocator {
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<NormalizedPath>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_repo_name(mut self, name: impl Into<String>) -> Self {
        self.repo_name = Some(name.into());
        self
    }

    pub fn try_local_dir_first(mut self, enabled: bool) -> Self {
        self.try_local_dir_first = enabled;
        self
    }

    pub fn try_local_dir_last(mut self, enabled: bool) -> Self {
        self.try_local_dir_last = enabled;
        self
    }

    /// Use `dir` wherever the process working directory would be used.
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir_override = Some(dir.into());
        self
    }

    fn current_dir(&self) -> Result<NormalizedPath> {
        match &self.current_dir_override {
            Some(dir) => Ok(NormalizedPath::from(dir.as_path())),
            None => std::env::current_dir()
                .map(NormalizedPath::from)
                .map_err(|e| packit_fs::Error::io(".", e).into()),
        }
    }

    /// Directories in the order they will be searched.
    pub fn search_order(&self) -> Result<Vec<NormalizedPath>> {
        let mut directories = self.directories.clone();
        if !self.try_local_dir_first && !self.try_local_dir_last {
            return Ok(directories);
        }

        if self.try_local_dir_first && self.try_local_dir_last {
            tracing::error!("Ambiguous usage of try_local_dir_first and try_local_dir_last");
        }

        let cwd = self.current_dir()?;
        directories.retain(|dir| *dir != cwd);
        if self.try_local_dir_last {
            directories.push(cwd);
        } else {
            directories.insert(0, cwd);
        }
        Ok(directories)
    }

    /// Find, load and resolve the first recognized config file.
    pub fn locate(&self) -> Result<PackageConfig> {
        let directories = self.search_order()?;
        let store = DocumentStore::new();

        for dir in &directories {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name.as_str());
                if !candidate.is_file() {
                    tracing::debug!(path = %candidate, "Local config file not found");
                    continue;
                }

                tracing::debug!(path = %candidate, "Local package config found");
                let document = store.load(&candidate).map_err(|e| {
                    tracing::error!(path = %candidate, error = %e, "Cannot load package config");
                    Error::from(e).into_parse_error()
                })?;
                let spec_file_path = find_local_specfile(&directories)?;

                return parse_loaded_config(
                    document,
                    Some(name.as_str()),
                    self.repo_name.as_deref(),
                    spec_file_path.as_ref().map(NormalizedPath::as_str),
                );
            }
        }

        Err(Error::ConfigNotFound {
            searched: directories.iter().map(NormalizedPath::to_native).collect(),
        })
    }
}

/// Load the package configuration from the first of `directories` holding
/// one.
pub fn get_local_package_config<I, P>(directories: I, repo_name: Option<&str>) -> Result<PackageConfig>
where
    I: IntoIterator<Item = P>,
    P: Into<NormalizedPath>,
{
    let mut locator = LocalConfigLocator::new(directories);
    if let Some(name) = repo_name {
        locator = locator.with_repo_name(name);
    }
    locator.locate()
}

/// Resolve an already loaded document with whatever context the caller has.
pub fn parse_loaded_config(
    document: Value,
    config_file_path: Option<&str>,
    repo_name: Option<&str>,
    spec_file_path: Option<&str>,
) -> Result<PackageConfig> {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let pretty = serde_json::to_string_pretty(&document)?;
        tracing::debug!("Package config:\n{pretty}");
    }

    let mut resolver = PackageConfigResolver::new();
    if let Some(path) = config_file_path {
        resolver = resolver.with_config_file_path(path);
    }
    if let Some(name) = repo_name {
        resolver = resolver.with_repo_name(name);
    }
    if let Some(path) = spec_file_path {
        resolver = resolver.with_spec_file_path(path);
    }
    resolver.resolve(document)
}

/// Load the package configuration of `project` at `reference`.
///
/// Returns `Ok(None)` when none of the recognized files exist at that ref.
pub fn get_package_config_from_repo(
    project: &dyn GitProject,
    reference: &str,
) -> Result<Option<PackageConfig>> {
    let mut found = None;
    for name in CONFIG_FILE_NAMES {
        match project.get_file_content(name.as_str(), reference) {
            Ok(content) => {
                tracing::debug!(
                    file = %name,
                    reference,
                    repo = %project.full_repo_name(),
                    "Found a config file"
                );
                found = Some((name, content));
                break;
            }
            Err(e) if e.is_file_not_found() => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let Some((name, content)) = found else {
        tracing::warn!(
            names = ?CONFIG_FILE_NAMES.map(|n| n.as_str()),
            reference,
            repo = %project.full_repo_name(),
            "No config file found"
        );
        return Ok(None);
    };

    let origin = NormalizedPath::new(name.as_str());
    let document = DocumentFormat::from_path(&origin)
        .and_then(|format| DocumentStore::new().parse(&content, format, &origin))
        .map_err(|e| {
            tracing::error!(file = %name, error = %e, "Cannot load package config");
            Error::from(e).into_parse_error()
        })?;

    let spec_file_path = get_specfile_path_from_repo(project, Some(reference))?;
    parse_loaded_config(
        document,
        Some(name.as_str()),
        Some(project.repo_name()),
        spec_file_path.as_deref(),
    )
    .map(Some)
}

/// Path of the first `*.spec` file in `project`, if any.
pub fn get_specfile_path_from_repo(
    project: &dyn GitProject,
    reference: Option<&str>,
) -> Result<Option<String>> {
    let spec_files = project.get_files(reference, Some(&SPEC_FILE_PATTERN))?;
    if spec_files.is_empty() {
        tracing::debug!(repo = %project.full_repo_name(), "No spec file found");
    }
    Ok(spec_files.into_iter().next())
}
