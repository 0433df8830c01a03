//! Notification preferences

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Commenting on pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestNotificationsConfig {
    /// Comment when a build triggered by the pull request succeeds
    #[serde(default = "default_true")]
    pub successful_build: bool,
}

impl Default for PullRequestNotificationsConfig {
    fn default() -> Self {
        Self {
            successful_build: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub pull_request: PullRequestNotificationsConfig,
}
