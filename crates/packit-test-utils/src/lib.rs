//! Shared test utilities for the packit configuration workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] : committing fixture files with `git2`
//! - [`package`] : [`TestPackage`](package::TestPackage) upstream checkout builder

pub mod git;
pub mod package;

pub use package::TestPackage;
