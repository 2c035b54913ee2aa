// Fixture helpers shared by the integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write `files` (relative name, content) below `root`, creating directories.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Write `files`, stage them and commit on top of HEAD.
pub fn commit_files(repo: &git2::Repository, files: &[(&str, &str)], message: &str) -> git2::Oid {
    commit_as(repo, "Test User", files, message)
}

/// Like [`commit_files`], authored and committed by `author`.
pub fn commit_as(
    repo: &git2::Repository,
    author: &str,
    files: &[(&str, &str)],
    message: &str,
) -> git2::Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    write_files(&workdir, files);

    let mut index = repo.index().unwrap();
    for (name, _) in files {
        index.add_path(Path::new(name)).unwrap();
    }
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = git2::Signature::now(author, "test@test.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// A repository with one commit holding `files`.
pub fn init_repo(files: &[(&str, &str)]) -> (TempDir, git2::Repository) {
    let dir = TempDir::new().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    commit_files(&repo, files, "initial");
    (dir, repo)
}
