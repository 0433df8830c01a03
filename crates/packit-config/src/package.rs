//! The package configuration people keep in their upstream repositories

use std::any::Any;

use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::common::CommonPackageConfig;
use crate::job::JobConfig;
use crate::sync_files::{SyncFilesConfig, SyncFilesItem};

/// A resolved package configuration.
///
/// Built by [`PackageConfigResolver`](crate::PackageConfigResolver); a value
/// of this type always has a spec file path.
#[derive(Debug, Clone, Serialize)]
pub struct PackageConfig {
    /// Config file the package was read from, relative to the repository root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file_path: Option<String>,
    /// Package-level attributes, inherited by every job
    #[serde(flatten)]
    pub common: CommonPackageConfig,
    pub jobs: Vec<JobConfig>,
}

impl PackageConfig {
    pub fn new(
        config_file_path: Option<String>,
        common: CommonPackageConfig,
        jobs: Vec<JobConfig>,
    ) -> Self {
        Self {
            config_file_path,
            common,
            jobs,
        }
    }

    pub fn specfile_path(&self) -> Option<&str> {
        self.common.specfile_path.as_deref()
    }

    /// See [`CommonPackageConfig::dist_git_package_url`].
    pub fn dist_git_package_url(&self) -> String {
        self.common.dist_git_package_url()
    }

    /// See [`CommonPackageConfig::downstream_project_url`].
    pub fn downstream_project_url(&self) -> &str {
        self.common.downstream_project_url()
    }

    /// Synced files plus the spec file and the config file itself.
    ///
    /// The spec file and config file entries are appended only when no entry
    /// with the same source exists. The stored list is not modified.
    pub fn get_all_files_to_sync(&self) -> SyncFilesConfig {
        let mut files = self.common.synced_files.clone();

        if let Some(spec) = self.common.specfile_path.as_deref() {
            files.push_if_src_absent(SyncFilesItem::same_path(spec));
        }
        if let Some(config) = self.config_file_path.as_deref().filter(|p| !p.is_empty()) {
            files.push_if_src_absent(SyncFilesItem::same_path(config));
        }

        files
    }

    /// Jobs of the given type, in declaration order.
    pub fn jobs_of_type(&self, job_type: crate::JobType) -> impl Iterator<Item = &JobConfig> {
        self.jobs.iter().filter(move |job| job.job_type == job_type)
    }

    /// Canonical serialized form, the basis of equality. Parsing it again
    /// yields an equal configuration.
    pub fn canonical_form(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Canonical form without the explicit package-level downstream URL,
    /// which equality compares by its effective value instead.
    fn comparable_form(&self) -> Result<Value> {
        let mut form = self.canonical_form()?;
        if let Some(fields) = form.as_object_mut() {
            fields.remove("downstream_project_url");
        }
        Ok(form)
    }

    /// Compare with a value of unknown type; anything that is not a package
    /// configuration is simply unequal.
    pub fn eq_any(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<PackageConfig>()
            .is_some_and(|other| self == other)
    }
}

impl PartialEq for PackageConfig {
    fn eq(&self, other: &Self) -> bool {
        tracing::debug!(ours = ?self, theirs = ?other, "Comparing package configurations");
        if self.common.effective_downstream_project_url()
            != other.common.effective_downstream_project_url()
        {
            return false;
        }
        match (self.comparable_form(), other.comparable_form()) {
            (Ok(ours), Ok(theirs)) => ours == theirs,
            _ => false,
        }
    }
}
