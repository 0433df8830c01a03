//! Document to [`PackageConfig`] resolution
//!
//! The resolver is the only place defaults are injected. It works on an
//! already parsed document and never touches the filesystem or network.

use serde_json::{Map, Value};

use crate::aliases::default_jobs;
use crate::common::CommonPackageConfig;
use crate::error::{Error, Result};
use crate::job::JobConfig;
use crate::package::PackageConfig;
use crate::schema::{RawJobConfig, RawPackageConfig};

/// Resolves documents into package configurations.
///
/// The optional hints come from whoever located the document: the path the
/// document was read from, the name of the repository it lives in and a spec
/// file found next to it.
#[derive(Debug, Clone, Default)]
pub struct PackageConfigResolver {
    config_file_path: Option<String>,
    repo_name: Option<String>,
    spec_file_path: Option<String>,
}

impl PackageConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded as `config_file_path` unless the document names one itself.
    pub fn with_config_file_path(mut self, path: impl Into<String>) -> Self {
        self.config_file_path = Some(path.into());
        self
    }

    /// Default for both upstream and downstream package names.
    pub fn with_repo_name(mut self, name: impl Into<String>) -> Self {
        self.repo_name = Some(name.into());
        self
    }

    /// Used when the document has no `specfile_path`.
    pub fn with_spec_file_path(mut self, path: impl Into<String>) -> Self {
        self.spec_file_path = Some(path.into());
        self
    }

    /// Resolve `raw` into a complete configuration.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSpecFile`] when neither the document nor the resolver
    /// knows the spec file. Every other failure is logged together with the
    /// document and returned as [`Error::ConfigParse`].
    pub fn resolve(&self, raw: Value) -> Result<PackageConfig> {
        let mut document = match raw {
            Value::Object(document) => document,
            other => {
                let err = Error::validation("document", "expected a mapping at the top level");
                tracing::error!(document = %other, error = %err, "Cannot parse package config");
                return Err(err.into_parse_error());
            }
        };

        if let Some(path) = &self.config_file_path {
            let carries_path = document
                .get("config_file_path")
                .and_then(Value::as_str)
                .is_some_and(|p| !p.is_empty());
            if !carries_path {
                document.insert("config_file_path".into(), Value::String(path.clone()));
            }
        }

        match self.build(&document) {
            Ok(config) => Ok(config),
            Err(Error::MissingSpecFile) => Err(Error::MissingSpecFile),
            Err(err) => {
                let document = Value::Object(document);
                tracing::error!(
                    document = %document,
                    error = %err,
                    "Cannot parse package config"
                );
                Err(err.into_parse_error())
            }
        }
    }

    fn build(&self, document: &Map<String, Value>) -> Result<PackageConfig> {
        let raw = RawPackageConfig::from_document(document)?;
        let mut common = CommonPackageConfig::from_overrides(&raw.common);

        if common.specfile_path.as_deref().is_none_or(str::is_empty) {
            match self.spec_file_path.as_deref().filter(|p| !p.is_empty()) {
                Some(hint) => common.specfile_path = Some(hint.to_string()),
                None => return Err(Error::MissingSpecFile),
            }
        }

        if let Some(repo_name) = &self.repo_name {
            if common.upstream_package_name.as_deref().is_none_or(str::is_empty) {
                common.upstream_package_name = Some(repo_name.clone());
            }
            if common.downstream_package_name.as_deref().is_none_or(str::is_empty) {
                common.downstream_package_name = Some(repo_name.clone());
            }
        }

        let raw_jobs = match raw.jobs {
            Some(jobs) => jobs,
            None => {
                tracing::debug!("No jobs configured, using the default job set");
                default_jobs()
            }
        };
        let jobs = raw_jobs
            .iter()
            .enumerate()
            .map(|(i, job)| resolve_job(job, &common).map_err(|e| e.within(&format!("jobs[{i}]"))))
            .collect::<Result<Vec<_>>>()?;

        Ok(PackageConfig::new(raw.config_file_path, common, jobs))
    }
}

/// Resolve one raw job against the package-level attributes.
///
/// Attributes the job names replace the package's wholesale; all others are
/// independent copies of the package's values.
pub fn resolve_job(raw: &Value, package_level: &CommonPackageConfig) -> Result<JobConfig> {
    let raw = RawJobConfig::from_value(raw)?;
    Ok(JobConfig::new(raw.job, raw.trigger, package_level.overlay(&raw.common))
        .with_metadata(raw.metadata))
}
