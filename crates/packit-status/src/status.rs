//! Status collection for one package

use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeDelta, Utc};
use packit_config::CommonPackageConfig;
use serde::Serialize;

use crate::source::{
    BodhiSource, CoprBuild, CoprSource, DistGitSource, KojiSource, PullRequest, Release,
    UpstreamSource,
};
use crate::{Error, Result};

pub const DEFAULT_PR_COUNT: usize = 5;
pub const DEFAULT_RELEASE_COUNT: usize = 5;
pub const DEFAULT_UPDATE_COUNT: usize = 3;
pub const DEFAULT_COPR_BUILD_COUNT: usize = 5;

/// How far back Koji builds are considered
pub const KOJI_BUILD_WINDOW_DAYS: i64 = 365;

/// The services a [`Status`] queries. Upstream is optional since not every
/// upstream is hosted somewhere releases can be read from.
pub struct StatusSources<'a> {
    pub dist_git: &'a dyn DistGitSource,
    pub upstream: Option<&'a dyn UpstreamSource>,
    pub koji: &'a dyn KojiSource,
    pub bodhi: &'a dyn BodhiSource,
    pub copr: &'a dyn CoprSource,
}

/// Bodhi update as shown in a status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    pub title: String,
    pub karma: i64,
    pub status: String,
}

/// Everything [`Status::report`] collects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub downstream_prs: Vec<PullRequest>,
    pub dist_git_versions: BTreeMap<String, String>,
    pub upstream_releases: Vec<Release>,
    pub koji_builds: BTreeMap<String, String>,
    pub updates: Vec<UpdateSummary>,
    pub copr_builds: Vec<CoprBuild>,
}

/// Release status of a package.
///
/// Only reads the package configuration; the downstream package name keys
/// the Koji and Bodhi queries.
pub struct Status<'a> {
    package: &'a CommonPackageConfig,
    sources: StatusSources<'a>,
}

impl<'a> Status<'a> {
    pub fn new(package: &'a CommonPackageConfig, sources: StatusSources<'a>) -> Self {
        Self { package, sources }
    }

    fn downstream_package_name(&self) -> Result<&str> {
        self.package
            .downstream_package_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::config("downstream_package_name is not set"))
    }

    /// The first `count` open dist-git pull requests.
    pub async fn downstream_prs(&self, count: usize) -> Result<Vec<PullRequest>> {
        let mut prs = self.sources.dist_git.pull_requests().await?;
        tracing::debug!(total = prs.len(), "Downstream PRs fetched");
        prs.truncate(count);
        Ok(prs)
    }

    /// Spec file version on every dist-git branch.
    ///
    /// Branches that cannot be read, or whose version cannot be determined,
    /// are left out.
    pub async fn dist_git_versions(&self) -> Result<BTreeMap<String, String>> {
        let branches = self.sources.dist_git.branches().await?;
        tracing::debug!(?branches, "Dist-git branches fetched");

        let mut versions = BTreeMap::new();
        for branch in branches {
            match self.sources.dist_git.spec_version(&branch).await {
                Ok(Some(version)) => {
                    versions.insert(branch, version);
                }
                Ok(None) => tracing::debug!(%branch, "Can't figure out the version of branch"),
                Err(e) => tracing::debug!(%branch, error = %e, "Branch is not present"),
            }
        }
        Ok(versions)
    }

    /// The latest `count` upstream releases. Failures only cost the releases.
    pub async fn upstream_releases(&self, count: usize) -> Vec<Release> {
        let Some(upstream) = self.sources.upstream else {
            tracing::info!("We couldn't track any upstream releases");
            return Vec::new();
        };

        match upstream.releases().await {
            Ok(mut releases) => {
                tracing::debug!(total = releases.len(), "Upstream releases fetched");
                releases.truncate(count);
                releases
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to fetch upstream releases");
                Vec::new()
            }
        }
    }

    /// Latest completed Koji build per dist tag, from the last year.
    ///
    /// Builds come newest first, so the first build seen for a tag wins.
    pub async fn koji_builds(&self) -> Result<BTreeMap<String, String>> {
        let package = self.downstream_package_name()?;
        let since = Utc::now() - TimeDelta::days(KOJI_BUILD_WINDOW_DAYS);
        let builds = self.sources.koji.completed_builds(package, since).await?;
        tracing::debug!(
            nvrs = ?builds.iter().map(|b| b.nvr.as_str()).collect::<Vec<_>>(),
            "Recent Koji builds fetched"
        );

        let mut latest = BTreeMap::new();
        for build in &builds {
            match build.dist_tag() {
                Some(tag) => {
                    latest.entry(tag.to_string()).or_insert_with(|| build.nvr.clone());
                }
                None => tracing::debug!(nvr = %build.nvr, "Build without a dist tag"),
            }
        }
        Ok(latest)
    }

    /// Up to `count` Bodhi updates, at most one stable update per branch.
    pub async fn updates(&self, count: usize) -> Result<Vec<UpdateSummary>> {
        let package = self.downstream_package_name()?;

        let mut all = Vec::new();
        let mut page = 1;
        let mut pages = 1;
        while page <= pages {
            let result = self.sources.bodhi.query_updates(package, page).await?;
            all.extend(result.updates);
            pages = result.pages;
            page += 1;
        }
        tracing::debug!(total = all.len(), "Bodhi updates fetched");

        let mut stable_branches = BTreeSet::new();
        let mut updates = Vec::new();
        for update in all {
            if updates.len() == count {
                break;
            }
            if update.is_stable() && !stable_branches.insert(update.branch.clone()) {
                continue;
            }
            updates.push(UpdateSummary {
                title: update.title,
                karma: update.karma,
                status: update.status,
            });
        }
        Ok(updates)
    }

    /// The latest `count` Copr builds.
    pub async fn copr_builds(&self, count: usize) -> Result<Vec<CoprBuild>> {
        self.sources.copr.builds(count).await
    }

    /// Query every service concurrently with the default counts.
    pub async fn report(&self) -> Result<StatusReport> {
        let (downstream_prs, dist_git_versions, koji_builds, updates, copr_builds) = tokio::try_join!(
            self.downstream_prs(DEFAULT_PR_COUNT),
            self.dist_git_versions(),
            self.koji_builds(),
            self.updates(DEFAULT_UPDATE_COUNT),
            self.copr_builds(DEFAULT_COPR_BUILD_COUNT),
        )?;
        let upstream_releases = self.upstream_releases(DEFAULT_RELEASE_COUNT).await;

        Ok(StatusReport {
            downstream_prs,
            dist_git_versions,
            upstream_releases,
            koji_builds,
            updates,
            copr_builds,
        })
    }
}
