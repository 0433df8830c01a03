//! [`TestPackage`] builder for upstream checkouts holding a packit config.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git;

/// A minimal spec file body.
pub const SPEC_BODY: &str = "Name: foo\nVersion: 1.0\nRelease: 1%{?dist}\nSource0: foo-1.0.tar.gz\n";

/// A temporary upstream checkout.
///
/// # Example
///
/// ```rust,no_run
/// use packit_test_utils::TestPackage;
///
/// let package = TestPackage::new()
///     .with_spec("foo.spec")
///     .with_file(".packit.yaml", "specfile_path: foo.spec\n");
/// package.assert_file_exists(".packit.yaml");
/// ```
pub struct TestPackage {
    temp_dir: TempDir,
}

impl Default for TestPackage {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPackage {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `relative` inside the checkout.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        self
    }

    /// Write a minimal spec file at `relative`.
    pub fn with_spec(self, relative: &str) -> Self {
        self.with_file(relative, SPEC_BODY)
    }

    /// Turn the checkout into a git repository with everything committed.
    pub fn commit_all(&self, message: &str) -> git2::Repository {
        let repo = match git2::Repository::open(self.root()) {
            Ok(repo) => repo,
            Err(_) => git::init_repo(self.root()),
        };
        git::commit_all(&repo, message);
        repo
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
