//! libgit2-backed repository access.
//!
//! `git2::Repository` is not `Sync`, so [`GitRepository`] only keeps the work
//! directory and opens a fresh handle per operation.

use super::{BranchInfo, CommitSummary, FileChange, Repository, RepositoryStatus};
use crate::diff::decode_lossy;
use crate::errors::{GitwizardError, Result};
use chrono::{TimeZone, Utc};
use git2::{BranchType, DiffOptions, ErrorCode, Oid, Sort, Status, StatusOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

const SHORT_ID_LEN: usize = 8;

pub struct GitRepository {
    workdir: PathBuf,
}

impl GitRepository {
    /// Open a repository, discovering the root from any subdirectory.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| GitwizardError::Unsupported("bare repositories".to_string()))?
            .to_path_buf();
        debug!("opened git repository at {}", workdir.display());
        Ok(Self { workdir })
    }

    fn open_repo(&self) -> Result<git2::Repository> {
        Ok(git2::Repository::open(&self.workdir)?)
    }
}

fn resolve_commit<'r>(repo: &'r git2::Repository, revision: Option<&str>) -> Result<git2::Commit<'r>> {
    let commit = match revision {
        Some(rev) => repo.revparse_single(rev)?.peel_to_commit()?,
        None => repo.head()?.peel_to_commit()?,
    };
    Ok(commit)
}

/// HEAD's commit, or `None` before the first commit.
fn head_commit(repo: &git2::Repository) -> Result<Option<git2::Commit<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Branch HEAD points at, even when it has no commits yet.
fn current_branch(repo: &git2::Repository) -> Result<Option<String>> {
    let head = repo.find_reference("HEAD")?;
    Ok(head
        .symbolic_target()
        .and_then(|target| target.strip_prefix("refs/heads/"))
        .map(String::from))
}

fn commit_summary(commit: &git2::Commit<'_>) -> CommitSummary {
    let id = commit.id().to_string();
    let short_id = id[..SHORT_ID_LEN].to_string();
    let message = String::from_utf8_lossy(commit.message_bytes());
    CommitSummary {
        id,
        short_id,
        author: String::from_utf8_lossy(commit.author().name_bytes()).into_owned(),
        date: Utc.timestamp_opt(commit.time().seconds(), 0).single(),
        summary: message.lines().next().unwrap_or_default().to_string(),
    }
}

fn lossy_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

fn blob_text(repo: &git2::Repository, id: Oid) -> Result<String> {
    if id.is_zero() {
        return Ok(String::new());
    }
    let blob = repo.find_blob(id)?;
    Ok(decode_lossy(blob.content()))
}

impl Repository for GitRepository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn list_tracked_files(&self) -> Result<Vec<PathBuf>> {
        let repo = self.open_repo()?;
        let index = repo.index()?;
        let files = index
            .iter()
            .map(|entry| lossy_path(&entry.path))
            .collect();
        Ok(files)
    }

    fn file_diff(&self, revision: Option<&str>, path: Option<&Path>) -> Result<Vec<FileChange>> {
        let repo = self.open_repo()?;
        let commit = resolve_commit(&repo, revision)?;
        let new_tree = commit.tree()?;
        let old_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };

        let mut options = DiffOptions::new();
        if let Some(path) = path {
            options.pathspec(path);
        }
        let diff = repo.diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), Some(&mut options))?;

        let mut changes = Vec::new();
        for delta in diff.deltas() {
            let old_file = delta.old_file();
            let new_file = delta.new_file();
            changes.push(FileChange {
                old_path: (!old_file.id().is_zero())
                    .then(|| old_file.path().map(Path::to_path_buf))
                    .flatten(),
                new_path: (!new_file.id().is_zero())
                    .then(|| new_file.path().map(Path::to_path_buf))
                    .flatten(),
                old_content: blob_text(&repo, old_file.id())?,
                new_content: blob_text(&repo, new_file.id())?,
            });
        }

        debug!(
            commit = %commit.id(),
            changes = changes.len(),
            "materialized revision diff"
        );
        Ok(changes)
    }

    fn history(&self, limit: Option<usize>) -> Result<Vec<CommitSummary>> {
        let repo = self.open_repo()?;
        if head_commit(&repo)?.is_none() {
            return Ok(Vec::new());
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let mut commits = Vec::new();
        for oid in revwalk.take(limit.unwrap_or(usize::MAX)) {
            let commit = repo.find_commit(oid?)?;
            commits.push(commit_summary(&commit));
        }
        debug!(commits = commits.len(), "walked history");
        Ok(commits)
    }

    fn branches(&self) -> Result<Vec<BranchInfo>> {
        let repo = self.open_repo()?;
        let mut branches = Vec::new();
        for entry in repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            branches.push(BranchInfo {
                name: String::from_utf8_lossy(branch.name_bytes()?).into_owned(),
                is_head: branch.is_head(),
            });
        }
        branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(branches)
    }

    fn status(&self) -> Result<RepositoryStatus> {
        let repo = self.open_repo()?;
        let mut status = RepositoryStatus {
            branch: current_branch(&repo)?,
            last_commit: head_commit(&repo)?.as_ref().map(commit_summary),
            ..RepositoryStatus::default()
        };

        let staged = Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;
        let unstaged = Status::WT_MODIFIED
            | Status::WT_DELETED
            | Status::WT_RENAMED
            | Status::WT_TYPECHANGE;

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        for entry in repo.statuses(Some(&mut options))?.iter() {
            let path = lossy_path(entry.path_bytes());
            let flags = entry.status();
            if flags.contains(Status::WT_NEW) {
                status.untracked.push(path);
                continue;
            }
            if flags.intersects(staged) {
                status.staged.push(path.clone());
            }
            if flags.intersects(unstaged) {
                status.modified.push(path);
            }
        }

        status.staged.sort();
        status.modified.sort();
        status.untracked.sort();
        debug!(
            staged = status.staged.len(),
            modified = status.modified.len(),
            untracked = status.untracked.len(),
            "read working tree status"
        );
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn commit_files(repo: &git2::Repository, files: &[(&str, &str)], message: &str) {
        let workdir = repo.workdir().unwrap().to_path_buf();
        let mut index = repo.index().unwrap();
        for (name, content) in files {
            let path = workdir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            index.add_path(Path::new(name)).unwrap();
        }
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test User", "test@test.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    fn create_test_repo() -> (TempDir, GitRepository) {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        commit_files(&repo, &[("app.py", "a\nb\nc\n"), ("lib/util.c", "int x;\n")], "initial");
        commit_files(&repo, &[("app.py", "a\nB\nc\nd\n")], "edit app");
        let git = GitRepository::open(dir.path()).unwrap();
        (dir, git)
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (dir, _) = create_test_repo();
        let nested = GitRepository::open(&dir.path().join("lib")).unwrap();
        assert!(nested.workdir().join("app.py").exists());
    }

    #[test]
    fn test_open_non_git_dir_fails() {
        let dir = TempDir::new().unwrap();
        assert!(GitRepository::open(dir.path()).is_err());
    }

    #[test]
    fn test_list_tracked_files_sorted() {
        let (_dir, git) = create_test_repo();
        assert_eq!(
            git.list_tracked_files().unwrap(),
            vec![PathBuf::from("app.py"), PathBuf::from("lib/util.c")]
        );
    }

    #[test]
    fn test_head_diff_against_parent() {
        let (_dir, git) = create_test_repo();
        let changes = git.file_diff(None, None).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].display_path(), Some(Path::new("app.py")));
        assert_eq!(changes[0].old_content, "a\nb\nc\n");
        assert_eq!(changes[0].new_content, "a\nB\nc\nd\n");
    }

    #[test]
    fn test_root_commit_diffs_against_empty_tree() {
        let (_dir, git) = create_test_repo();
        let changes = git.file_diff(Some("HEAD~1"), None).unwrap();
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.old_path.is_none() && c.old_content.is_empty()));
    }

    #[test]
    fn test_pathspec_restricts_diff() {
        let (_dir, git) = create_test_repo();
        let changes = git
            .file_diff(Some("HEAD~1"), Some(Path::new("lib/util.c")))
            .unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].new_content, "int x;\n");
    }

    #[test]
    fn test_history_newest_first_with_limit() {
        let (_dir, git) = create_test_repo();
        let history = git.history(None).unwrap();
        let summaries: Vec<_> = history.iter().map(|c| c.summary.as_str()).collect();
        assert_eq!(summaries, vec!["edit app", "initial"]);
        assert_eq!(history[0].author, "Test User");
        assert_eq!(history[0].short_id.len(), 8);
        assert!(history[0].id.starts_with(&history[0].short_id));
        assert!(history[0].date.is_some());

        assert_eq!(git.history(Some(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_multiline_message_keeps_first_line() {
        let (dir, _) = create_test_repo();
        let repo = git2::Repository::open(dir.path()).unwrap();
        commit_files(&repo, &[("notes.txt", "n\n")], "subject\n\nbody text");
        let git = GitRepository::open(dir.path()).unwrap();
        assert_eq!(git.history(Some(1)).unwrap()[0].summary, "subject");
    }

    #[test]
    fn test_empty_repository_has_no_history() {
        let dir = TempDir::new().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let git = GitRepository::open(dir.path()).unwrap();

        assert!(git.history(None).unwrap().is_empty());
        let status = git.status().unwrap();
        assert!(status.branch.is_some());
        assert!(status.last_commit.is_none());
    }

    #[test]
    fn test_branches_sorted_with_head_marked() {
        let (dir, git) = create_test_repo();
        let repo = git2::Repository::open(dir.path()).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.branch("aaa-feature", &head, false).unwrap();
        let head_name = repo.head().unwrap().shorthand().unwrap().to_string();

        let branches = git.branches().unwrap();
        let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["aaa-feature", head_name.as_str()]);
        assert!(!branches[0].is_head);
        assert!(branches[1].is_head);
    }

    #[test]
    fn test_status_separates_staged_modified_and_untracked() {
        let (dir, git) = create_test_repo();
        let repo = git2::Repository::open(dir.path()).unwrap();
        fs::write(dir.path().join("app.py"), "changed\n").unwrap();
        fs::write(dir.path().join("scratch.txt"), "tmp\n").unwrap();
        fs::write(dir.path().join("lib/new.c"), "int y;\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("lib/new.c")).unwrap();
        index.write().unwrap();

        let status = git.status().unwrap();
        assert_eq!(status.staged, vec![PathBuf::from("lib/new.c")]);
        assert_eq!(status.modified, vec![PathBuf::from("app.py")]);
        assert_eq!(status.untracked, vec![PathBuf::from("scratch.txt")]);
        assert!(status.is_dirty());
        assert_eq!(status.last_commit.unwrap().summary, "edit app");
    }

    #[test]
    fn test_clean_checkout_is_not_dirty() {
        let (_dir, git) = create_test_repo();
        let status = git.status().unwrap();
        assert!(!status.is_dirty());
        assert!(status.untracked.is_empty());
    }

    #[test]
    fn test_unknown_revision_is_repository_error() {
        let (_dir, git) = create_test_repo();
        let err = git.file_diff(Some("no-such-rev"), None).unwrap_err();
        assert!(matches!(err, GitwizardError::Repository(_)));
    }
}
