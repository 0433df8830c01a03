//! Built-in targets and the jobs a package gets when it declares none

use serde_json::{Value, json};

/// Build target used by the default jobs.
pub const DEFAULT_VERSION: &str = "fedora-stable";

/// Production dist-git host, including the trailing slash.
pub const PROD_DISTGIT_URL: &str = "https://src.fedoraproject.org/";

/// Raw declarations of the jobs injected when a document has no `jobs` key.
///
/// Every call builds new values, so callers may mutate the result freely.
pub fn default_jobs() -> Vec<Value> {
    vec![
        json!({
            "job": "copr_build",
            "trigger": "pull_request",
            "targets": [DEFAULT_VERSION],
        }),
        json!({
            "job": "tests",
            "trigger": "pull_request",
            "targets": [DEFAULT_VERSION],
        }),
        json!({
            "job": "propose_downstream",
            "trigger": "release",
            "dist_git_branches": ["fedora-all"],
        }),
    ]
}
