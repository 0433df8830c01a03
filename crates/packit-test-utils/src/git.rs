//! Git fixtures built with `git2` only, so tests do not depend on a `git`
//! binary or on the user's git configuration.

use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature};

/// Initialise a repository at `path` with `main` as the initial branch.
///
/// # Panics
/// Panics if `git2` cannot initialise the repository.
pub fn init_repo(path: &Path) -> Repository {
    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head("main");
    Repository::init_opts(path, &opts).unwrap_or_else(|e| {
        panic!("init_repo: failed to init repository at {}: {e}", path.display())
    })
}

/// Stage every file in the working tree and commit it on `HEAD`.
///
/// # Panics
/// Panics if any index or commit operation fails.
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().expect("commit_all: no index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("commit_all: add_all failed");
    index.write().expect("commit_all: index write failed");
    let tree_id = index.write_tree().expect("commit_all: write_tree failed");
    let tree = repo.find_tree(tree_id).expect("commit_all: tree missing");

    let signature = Signature::now("Packit Tests", "tests@packit.invalid").unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_all: commit failed: {e}"))
}

/// Create a lightweight tag pointing at `HEAD`.
///
/// # Panics
/// Panics if `HEAD` does not resolve or the tag cannot be written.
pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo
        .head()
        .and_then(|h| h.peel(git2::ObjectType::Commit))
        .expect("tag_head: HEAD does not point to a commit");
    repo.tag_lightweight(name, &head, false)
        .unwrap_or_else(|e| panic!("tag_head: failed to create tag {name}: {e}"));
}
