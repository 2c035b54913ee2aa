use super::{BranchInfo, CommitSummary, FileChange, Repository, RepositoryStatus};
use crate::errors::{GitwizardError, Result};
use crate::io::walker::FileWalker;
use std::path::{Path, PathBuf};

/// A plain directory. Every non-ignored file counts as tracked; there is no
/// history, so revision diffs and the history views are unavailable.
pub struct WorkingTree {
    root: PathBuf,
}

impl WorkingTree {
    fn no_history(&self, what: &str) -> GitwizardError {
        GitwizardError::Unsupported(format!(
            "{what} need a git repository; {} is a plain directory",
            self.root.display()
        ))
    }

    pub fn new(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(GitwizardError::invalid_argument(
                "repo",
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }
}

impl Repository for WorkingTree {
    fn workdir(&self) -> &Path {
        &self.root
    }

    fn list_tracked_files(&self) -> Result<Vec<PathBuf>> {
        FileWalker::new(self.root.clone()).walk()
    }

    fn file_diff(&self, _revision: Option<&str>, _path: Option<&Path>) -> Result<Vec<FileChange>> {
        Err(self.no_history("revision diffs"))
    }

    fn history(&self, _limit: Option<usize>) -> Result<Vec<CommitSummary>> {
        Err(self.no_history("commit histories"))
    }

    fn branches(&self) -> Result<Vec<BranchInfo>> {
        Err(self.no_history("branch listings"))
    }

    fn status(&self) -> Result<RepositoryStatus> {
        Err(self.no_history("status reports"))
    }
}
