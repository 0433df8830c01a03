//! Service seams queried for status
//!
//! Each trait covers what status collection needs from one service and
//! nothing more. Implementations wrap their own failures with
//! [`Error::source_failed`](crate::Error::source_failed).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Result;

/// A pull request against the dist-git repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    pub url: String,
}

/// An upstream release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub tag_name: String,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A completed Koji build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KojiBuild {
    /// name-version-release, e.g. `python-ogr-0.6.0-1.fc29`
    pub nvr: String,
    pub completed_at: DateTime<Utc>,
}

impl KojiBuild {
    /// Suffix after the last `.` of the NVR, e.g. `fc29`.
    pub fn dist_tag(&self) -> Option<&str> {
        self.nvr.rsplit_once('.').map(|(_, tag)| tag)
    }
}

/// A Bodhi update as returned by a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodhiUpdate {
    pub title: String,
    pub karma: i64,
    /// e.g. `pending`, `testing`, `stable`
    pub status: String,
    /// Dist-git branch of the update's release
    pub branch: String,
}

impl BodhiUpdate {
    pub fn is_stable(&self) -> bool {
        self.status == "stable"
    }
}

/// One page of a paginated Bodhi query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePage {
    pub updates: Vec<BodhiUpdate>,
    /// Total number of pages
    pub pages: u32,
}

/// A Copr build of the upstream project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoprBuild {
    pub id: u64,
    pub project: String,
    pub chroots: Vec<String>,
    pub state: String,
}

#[async_trait]
pub trait DistGitSource: Send + Sync {
    /// Open pull requests, newest first.
    async fn pull_requests(&self) -> Result<Vec<PullRequest>>;

    async fn branches(&self) -> Result<Vec<String>>;

    /// Version from the spec file on `branch`; `None` when the spec file is
    /// there but the version cannot be determined.
    async fn spec_version(&self, branch: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait UpstreamSource: Send + Sync {
    /// Releases, newest first.
    async fn releases(&self) -> Result<Vec<Release>>;
}

#[async_trait]
pub trait KojiSource: Send + Sync {
    /// Builds of `package` completed after `since`, newest first.
    async fn completed_builds(&self, package: &str, since: DateTime<Utc>) -> Result<Vec<KojiBuild>>;
}

#[async_trait]
pub trait BodhiSource: Send + Sync {
    /// One page (1-based) of updates for `package`, newest first.
    async fn query_updates(&self, package: &str, page: u32) -> Result<UpdatePage>;
}

#[async_trait]
pub trait CoprSource: Send + Sync {
    /// The latest `limit` builds.
    async fn builds(&self, limit: usize) -> Result<Vec<CoprBuild>>;
}
