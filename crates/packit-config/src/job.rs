//! Job definitions
//!
//! A job is one automated action bound to a trigger. It carries a complete
//! copy of the package's attributes so each job can override any of them.

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::CommonPackageConfig;
use crate::error::{Error, Result};

/// Action performed by a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    ProposeDownstream,
    Build,
    SyncFromDownstream,
    CoprBuild,
    /// Upstream Koji build
    ProductionBuild,
    /// Downstream Koji build
    KojiBuild,
    Tests,
    BodhiUpdate,
    VmImageBuild,
}

impl JobType {
    pub const ALL: [JobType; 9] = [
        Self::ProposeDownstream,
        Self::Build,
        Self::SyncFromDownstream,
        Self::CoprBuild,
        Self::ProductionBuild,
        Self::KojiBuild,
        Self::Tests,
        Self::BodhiUpdate,
        Self::VmImageBuild,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProposeDownstream => "propose_downstream",
            Self::Build => "build",
            Self::SyncFromDownstream => "sync_from_downstream",
            Self::CoprBuild => "copr_build",
            Self::ProductionBuild => "production_build",
            Self::KojiBuild => "koji_build",
            Self::Tests => "tests",
            Self::BodhiUpdate => "bodhi_update",
            Self::VmImageBuild => "vm_image_build",
        }
    }
}

impl FromStr for JobType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|job| job.as_str() == s)
            .ok_or_else(|| Error::validation("job", format!("unknown job type '{s}'")))
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event that starts a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobConfigTriggerType {
    Release,
    PullRequest,
    Commit,
}

impl JobConfigTriggerType {
    pub const ALL: [JobConfigTriggerType; 3] = [Self::Release, Self::PullRequest, Self::Commit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::PullRequest => "pull_request",
            Self::Commit => "commit",
        }
    }
}

impl FromStr for JobConfigTriggerType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.as_str() == s)
            .ok_or_else(|| Error::validation("trigger", format!("unknown trigger '{s}'")))
    }
}

impl fmt::Display for JobConfigTriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_timeout() -> u64 {
    7200
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Job-only settings. These are never inherited from the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobMetadataConfig {
    /// Build targets (chroots), e.g. `fedora-stable`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
    /// Dist-git branches a downstream job acts on, e.g. `fedora-all`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dist_git_branches: Vec<String>,
    /// Upstream branch a commit-triggered job watches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub scratch: bool,
    /// Seconds
    pub timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl JobMetadataConfig {
    pub const KEYS: [&'static str; 7] = [
        "targets",
        "dist_git_branches",
        "branch",
        "scratch",
        "timeout",
        "owner",
        "project",
    ];
}

impl Default for JobMetadataConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            dist_git_branches: Vec::new(),
            branch: None,
            scratch: false,
            timeout: default_timeout(),
            owner: None,
            project: None,
        }
    }
}

/// One job of a package.
///
/// Two jobs are equal when their canonical serialized forms are equal, no
/// matter how each was built.
#[derive(Debug, Clone, Serialize)]
pub struct JobConfig {
    #[serde(rename = "job")]
    pub job_type: JobType,
    pub trigger: JobConfigTriggerType,
    #[serde(flatten)]
    pub metadata: JobMetadataConfig,
    #[serde(flatten)]
    pub common: CommonPackageConfig,
}

impl JobConfig {
    /// A job inheriting every attribute of `common`.
    pub fn new(job_type: JobType, trigger: JobConfigTriggerType, common: CommonPackageConfig) -> Self {
        Self {
            job_type,
            trigger,
            metadata: JobMetadataConfig::default(),
            common,
        }
    }

    pub fn with_metadata(mut self, metadata: JobMetadataConfig) -> Self {
        self.metadata = metadata;
        self
    }

    /// Canonical serialized form, the basis of equality.
    pub fn canonical_form(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Compare with a value of unknown type.
    ///
    /// Comparing a job with anything that is not a job is a usage error,
    /// reported as [`Error::ComparisonType`] rather than `false`.
    pub fn try_eq(&self, other: &dyn Any) -> Result<bool> {
        let other = other
            .downcast_ref::<JobConfig>()
            .ok_or(Error::ComparisonType)?;
        Ok(self.canonical_form()? == other.canonical_form()?)
    }
}

impl PartialEq for JobConfig {
    fn eq(&self, other: &Self) -> bool {
        match (self.canonical_form(), other.canonical_form()) {
            (Ok(ours), Ok(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

impl fmt::Display for JobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "JobConfig: {json}"),
            Err(_) => write!(f, "JobConfig: {} on {}", self.job_type, self.trigger),
        }
    }
}
