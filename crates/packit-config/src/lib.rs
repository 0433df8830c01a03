//! Package and job configuration for packit
//!
//! This crate turns a parsed packit configuration document into a
//! [`PackageConfig`]: package-wide attributes, the jobs that inherit and
//! override them, and values derived from both.
//!
//! # Architecture
//!
//! ```text
//!          loader (local dirs, git project at a ref)
//!                        |
//!                    resolver
//!                        |
//!                     schema  (raw document -> typed overrides)
//!                        |
//!   model: aliases, sync_files, actions, notifications, common, job, package
//! ```
//!
//! The model modules know nothing about documents or lookup; the resolver
//! is the only place defaults are injected.
//!
//! # Example
//!
//! ```
//! use packit_config::PackageConfigResolver;
//! use serde_json::json;
//!
//! let config = PackageConfigResolver::new()
//!     .with_repo_name("foo")
//!     .resolve(json!({
//!         "specfile_path": "foo.spec",
//!         "jobs": [{"job": "build", "trigger": "commit"}],
//!     }))
//!     .unwrap();
//!
//! assert_eq!(config.common.downstream_package_name.as_deref(), Some("foo"));
//! assert_eq!(config.jobs.len(), 1);
//! assert_eq!(
//!     config.dist_git_package_url(),
//!     "https://src.fedoraproject.org/rpms/foo.git"
//! );
//! ```

pub mod actions;
pub mod aliases;
pub mod common;
pub mod error;
pub mod job;
pub mod loader;
pub mod logging;
pub mod notifications;
pub mod package;
pub mod resolver;
pub mod schema;
pub mod sync_files;

pub use actions::{ActionCommand, ActionName};
pub use aliases::{DEFAULT_VERSION, PROD_DISTGIT_URL, default_jobs};
pub use common::{CommonOverrides, CommonPackageConfig};
pub use error::{Error, Result};
pub use job::{JobConfig, JobConfigTriggerType, JobMetadataConfig, JobType};
pub use loader::{
    LocalConfigLocator, get_local_package_config, get_package_config_from_repo,
    get_specfile_path_from_repo, parse_loaded_config,
};
pub use notifications::{NotificationsConfig, PullRequestNotificationsConfig};
pub use package::PackageConfig;
pub use resolver::{PackageConfigResolver, resolve_job};
pub use sync_files::{SyncFilesConfig, SyncFilesItem};
