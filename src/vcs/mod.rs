//! Read-only access to the repository being inspected.
//!
//! The analysis code needs the list of tracked files and the materialized
//! contents of a revision's changes. The history views add commit summaries,
//! local branches and the working-tree status. [`GitRepository`] answers all
//! of them through libgit2; [`WorkingTree`] serves plain directories where
//! only the file listing is available.

pub mod git;
pub mod worktree;

pub use git::GitRepository;
pub use worktree::WorkingTree;

use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One changed file with both versions fully read.
///
/// A side that does not exist (added or deleted file) has empty content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub old_path: Option<PathBuf>,
    pub new_path: Option<PathBuf>,
    pub old_content: String,
    pub new_content: String,
}

impl FileChange {
    /// Path to show for this change, preferring the new side.
    pub fn display_path(&self) -> Option<&Path> {
        self.new_path.as_deref().or(self.old_path.as_deref())
    }
}

/// One commit as shown in history listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub id: String,
    /// First 8 hex digits of `id`.
    pub short_id: String,
    pub author: String,
    /// Committer time; `None` when libgit2 reports an out-of-range value.
    pub date: Option<DateTime<Utc>>,
    /// First line of the message.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    pub name: String,
    pub is_head: bool,
}

/// Working-tree state relative to HEAD and the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryStatus {
    /// Checked-out branch; `None` when HEAD is detached.
    pub branch: Option<String>,
    /// Changes recorded in the index but not committed.
    pub staged: Vec<PathBuf>,
    /// Tracked files whose working copy differs from the index.
    pub modified: Vec<PathBuf>,
    pub untracked: Vec<PathBuf>,
    pub last_commit: Option<CommitSummary>,
}

impl RepositoryStatus {
    /// Untracked files alone do not make the tree dirty.
    pub fn is_dirty(&self) -> bool {
        !self.staged.is_empty() || !self.modified.is_empty()
    }
}

pub trait Repository {
    /// Directory that tracked paths are relative to.
    fn workdir(&self) -> &Path;

    /// Tracked files, relative to [`Repository::workdir`], in a stable order.
    fn list_tracked_files(&self) -> Result<Vec<PathBuf>>;

    /// Changes introduced by `revision` (HEAD when `None`), optionally
    /// restricted to `path`.
    fn file_diff(&self, revision: Option<&str>, path: Option<&Path>) -> Result<Vec<FileChange>>;

    /// Commits reachable from HEAD, newest first, at most `limit` when set.
    /// Empty before the first commit.
    fn history(&self, limit: Option<usize>) -> Result<Vec<CommitSummary>>;

    /// Local branches sorted by name.
    fn branches(&self) -> Result<Vec<BranchInfo>>;

    fn status(&self) -> Result<RepositoryStatus>;
}

/// Open `path` as a git repository when one can be discovered, otherwise as
/// a plain working tree.
pub fn open_repository(path: &Path) -> Result<Box<dyn Repository>> {
    match GitRepository::open(path) {
        Ok(repo) => Ok(Box::new(repo)),
        Err(e) => {
            debug!("no git repository at {}: {e}; using working tree", path.display());
            Ok(Box::new(WorkingTree::new(path)?))
        }
    }
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn workdir(&self) -> &Path {
        (**self).workdir()
    }

    fn list_tracked_files(&self) -> Result<Vec<PathBuf>> {
        (**self).list_tracked_files()
    }

    fn file_diff(&self, revision: Option<&str>, path: Option<&Path>) -> Result<Vec<FileChange>> {
        (**self).file_diff(revision, path)
    }

    fn history(&self, limit: Option<usize>) -> Result<Vec<CommitSummary>> {
        (**self).history(limit)
    }

    fn branches(&self) -> Result<Vec<BranchInfo>> {
        (**self).branches()
    }

    fn status(&self) -> Result<RepositoryStatus> {
        (**self).status()
    }
}
