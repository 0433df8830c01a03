//! Read-only git project access
//!
//! Configuration can be looked up in a project at an arbitrary ref instead of
//! a checked-out directory. [`GitProject`] is the seam for that lookup;
//! [`LocalGitProject`] backs it with a `git2` repository on disk.

pub mod error;
pub mod local;
pub mod provider;

pub use error::{Error, Result};
pub use local::LocalGitProject;
pub use provider::GitProject;
