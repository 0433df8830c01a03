//! `git2`-backed project reading committed content

use std::path::{Path, PathBuf};

use git2::{ErrorCode, ObjectType, Repository, Tree, TreeWalkMode, TreeWalkResult};
use regex::Regex;

use crate::{Error, GitProject, Result};

const DEFAULT_REF: &str = "HEAD";

/// A git repository on disk, read through its object database.
///
/// Only committed content is visible; the working tree is never consulted.
pub struct LocalGitProject {
    repo: Repository,
    name: String,
    namespace: Option<String>,
}

impl LocalGitProject {
    /// Open the repository at `path`.
    ///
    /// The repository name is taken from the `origin` remote URL when one is
    /// configured, otherwise from the directory name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::RepositoryNotFound {
                path: PathBuf::from(path),
            },
            _ => Error::Git(e),
        })?;

        let origin_url = repo
            .find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().map(str::to_string));

        let (namespace, name) = match origin_url.as_deref().and_then(split_remote_url) {
            Some((namespace, name)) => (Some(namespace), name),
            None => {
                let name = repo
                    .workdir()
                    .unwrap_or(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (None, name)
            }
        };

        tracing::debug!(?path, %name, ?namespace, "Opened local git project");
        Ok(Self {
            repo,
            name,
            namespace,
        })
    }

    fn tree_at(&self, reference: &str) -> Result<Tree<'_>> {
        self.repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_tree())
            .map_err(|e| match e.code() {
                ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Peel => {
                    Error::ReferenceNotFound {
                        reference: reference.to_string(),
                    }
                }
                _ => Error::Git(e),
            })
    }
}

impl GitProject for LocalGitProject {
    fn repo_name(&self) -> &str {
        &self.name
    }

    fn full_repo_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}/{}", self.name),
            None => self.name.clone(),
        }
    }

    fn get_file_content(&self, path: &str, reference: &str) -> Result<String> {
        let tree = self.tree_at(reference)?;
        let not_found = || Error::FileNotFound {
            path: path.to_string(),
            reference: reference.to_string(),
        };

        let entry = tree.get_path(Path::new(path)).map_err(|e| match e.code() {
            ErrorCode::NotFound => not_found(),
            _ => Error::Git(e),
        })?;
        if entry.kind() != Some(ObjectType::Blob) {
            return Err(not_found());
        }

        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;
        String::from_utf8(blob.content().to_vec()).map_err(|_| Error::NotUtf8 {
            path: path.to_string(),
            reference: reference.to_string(),
        })
    }

    fn get_files(&self, reference: Option<&str>, filter: Option<&Regex>) -> Result<Vec<String>> {
        let tree = self.tree_at(reference.unwrap_or(DEFAULT_REF))?;

        let mut files = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                if let Some(name) = entry.name() {
                    let full = format!("{root}{name}");
                    if filter.is_none_or(|re| re.is_match(&full)) {
                        files.push(full);
                    }
                }
            }
            TreeWalkResult::Ok
        })?;

        Ok(files)
    }
}

/// Split `https://host/ns/name.git` or `git@host:ns/name.git` into
/// `(ns, name)`.
fn split_remote_url(url: &str) -> Option<(String, String)> {
    let trimmed = url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let mut parts = trimmed.rsplitn(3, ['/', ':']);
    let name = parts.next().filter(|s| !s.is_empty())?;
    let namespace = parts.next().filter(|s| !s.is_empty())?;
    Some((namespace.to_string(), name.to_string()))
}
