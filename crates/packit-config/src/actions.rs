//! User-defined commands that replace packit's built-in steps

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Name of a step a package can override with its own commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionName {
    PostUpstreamClone,
    PreSync,
    CreatePatches,
    PrepareFiles,
    CreateArchive,
    GetCurrentVersion,
    FixSpecFile,
    ChangelogEntry,
}

impl ActionName {
    pub const ALL: [ActionName; 8] = [
        Self::PostUpstreamClone,
        Self::PreSync,
        Self::CreatePatches,
        Self::PrepareFiles,
        Self::CreateArchive,
        Self::GetCurrentVersion,
        Self::FixSpecFile,
        Self::ChangelogEntry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostUpstreamClone => "post-upstream-clone",
            Self::PreSync => "pre-sync",
            Self::CreatePatches => "create-patches",
            Self::PrepareFiles => "prepare-files",
            Self::CreateArchive => "create-archive",
            Self::GetCurrentVersion => "get-current-version",
            Self::FixSpecFile => "fix-spec-file",
            Self::ChangelogEntry => "changelog-entry",
        }
    }
}

impl FromStr for ActionName {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::validation("actions", format!("unknown action '{s}'")))
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One command line, or several run in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionCommand {
    Single(String),
    Multiple(Vec<String>),
}

impl ActionCommand {
    /// The commands to run, in order.
    pub fn commands(&self) -> &[String] {
        match self {
            Self::Single(command) => std::slice::from_ref(command),
            Self::Multiple(commands) => commands,
        }
    }
}
