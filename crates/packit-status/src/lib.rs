//! Release status of a packaged project
//!
//! [`Status`] combines a resolved package configuration with the services a
//! package moves through: dist-git pull requests and branches, upstream
//! releases, Koji builds, Bodhi updates and Copr builds. Services sit behind
//! the async traits in [`source`], so any client (or a test fake) can back
//! them.

pub mod error;
pub mod source;
pub mod status;

pub use error::{Error, Result, SourceError};
pub use source::{
    BodhiSource, BodhiUpdate, CoprBuild, CoprSource, DistGitSource, KojiBuild, KojiSource,
    PullRequest, Release, UpdatePage, UpstreamSource,
};
pub use status::{Status, StatusReport, StatusSources, UpdateSummary};
