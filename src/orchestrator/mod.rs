//! Ties a [`Repository`] to the differ and the analyzers.
//!
//! Each operation selects files through the repository and runs one engine.
//! [`Report`] wraps the typed results for the writers. Nothing is cached
//! between calls.

mod report;

pub use report::{FileDiffView, Report};

use crate::analyzers;
use crate::config::AnalysisConfig;
use crate::core::{
    AuthorActivity, ComplexityRow, DuplicateGroup, FileTypeRow, PerformanceRow, SecurityFinding,
};
use crate::diff::{opcodes, rows_from_ops, split_lines};
use crate::errors::{AnalysisResults, Result};
use crate::io::walker::has_extension;
use crate::io::FileSet;
use crate::vcs::{BranchInfo, CommitSummary, Repository, RepositoryStatus};
use std::path::{Path, PathBuf};
use tracing::{info, info_span};

/// Bucket for tracked files without an extension.
pub const NO_EXTENSION: &str = "(none)";

/// Commits shown by `history` when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

pub struct AnalysisOrchestrator<R: Repository> {
    repo: R,
    config: AnalysisConfig,
}

impl<R: Repository> AnalysisOrchestrator<R> {
    pub fn new(repo: R, config: AnalysisConfig) -> Self {
        Self { repo, config }
    }

    /// Tracked files whose name ends with one of the configured extensions.
    pub fn code_files(&self) -> Result<FileSet> {
        let files = self
            .repo
            .list_tracked_files()?
            .into_iter()
            .filter(|file| has_extension(file, &self.config.extensions))
            .collect();
        Ok(FileSet::rooted(self.repo.workdir(), files))
    }

    /// An explicit file is read as given; otherwise every code file.
    fn select_files(&self, file: Option<&Path>) -> Result<FileSet> {
        match file {
            Some(file) => Ok(FileSet::from_paths([file])),
            None => self.code_files(),
        }
    }

    /// Side-by-side views of the changes introduced by `revision`.
    pub fn diff_revision(
        &self,
        revision: Option<&str>,
        path: Option<&Path>,
    ) -> Result<Vec<FileDiffView>> {
        let _span = info_span!("diff", revision = revision.unwrap_or("HEAD")).entered();

        let files: Vec<FileDiffView> = self
            .repo
            .file_diff(revision, path)?
            .into_iter()
            .map(|change| {
                let old = split_lines(&change.old_content);
                let new = split_lines(&change.new_content);
                let ops = opcodes(&old, &new);
                let rows = rows_from_ops(&old, &new, &ops);
                FileDiffView {
                    old_path: change.old_path,
                    new_path: change.new_path,
                    ops,
                    rows,
                }
            })
            .collect();

        info!(files = files.len(), "diff complete");
        Ok(files)
    }

    /// Duplicate fragments across all code files. `min_length` falls back
    /// to the configured window.
    pub fn find_duplicates(
        &self,
        min_length: Option<usize>,
    ) -> Result<AnalysisResults<DuplicateGroup>> {
        let min_length = min_length.unwrap_or(self.config.min_duplicate_lines);
        let _span = info_span!("duplicates", min_length).entered();

        let files = self.code_files()?;
        let results = analyzers::find_duplicates(&files, min_length)?;
        info!(
            files = files.len(),
            groups = results.success_count(),
            failures = results.failure_count(),
            complete = results.is_complete_success(),
            "duplicate scan complete"
        );
        Ok(results)
    }

    pub fn analyze_complexity(&self, file: Option<&Path>) -> Result<AnalysisResults<ComplexityRow>> {
        let _span = info_span!("complexity").entered();
        let files = self.select_files(file)?;
        let results = analyzers::analyze_complexity(&files);
        info!(
            files = files.len(),
            failures = results.failure_count(),
            complete = results.is_complete_success(),
            "complexity scan complete"
        );
        Ok(results)
    }

    pub fn analyze_performance(
        &self,
        file: Option<&Path>,
    ) -> Result<AnalysisResults<PerformanceRow>> {
        let _span = info_span!("performance").entered();
        let files = self.select_files(file)?;
        let results = analyzers::analyze_performance(&files);
        info!(
            files = files.len(),
            failures = results.failure_count(),
            complete = results.is_complete_success(),
            "performance scan complete"
        );
        Ok(results)
    }

    pub fn analyze_security(
        &self,
        file: Option<&Path>,
    ) -> Result<AnalysisResults<SecurityFinding>> {
        let _span = info_span!("security").entered();
        let files = self.select_files(file)?;
        let results = analyzers::analyze_security(&files);
        info!(
            files = files.len(),
            findings = results.success_count(),
            failures = results.failure_count(),
            complete = results.is_complete_success(),
            "security scan complete"
        );
        Ok(results)
    }

    /// Count tracked files by extension, most common first.
    pub fn file_types(&self) -> Result<Vec<FileTypeRow>> {
        let _span = info_span!("file_types").entered();
        let files = self.repo.list_tracked_files()?;
        Ok(file_type_rows(&files))
    }

    /// Most recent commits, [`DEFAULT_HISTORY_LIMIT`] unless `limit` is set.
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<CommitSummary>> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let _span = info_span!("history", limit).entered();
        self.repo.history(Some(limit))
    }

    /// Commits per author over the whole history, busiest first.
    pub fn author_activity(&self) -> Result<Vec<AuthorActivity>> {
        let _span = info_span!("activity").entered();
        let commits = self.repo.history(None)?;
        info!(commits = commits.len(), "history loaded");
        Ok(author_activity(&commits))
    }

    pub fn branches(&self) -> Result<Vec<BranchInfo>> {
        self.repo.branches()
    }

    pub fn status(&self) -> Result<RepositoryStatus> {
        self.repo.status()
    }
}

/// Ties keep the order in which authors first appear in `commits`.
fn author_activity(commits: &[CommitSummary]) -> Vec<AuthorActivity> {
    let mut rows: Vec<AuthorActivity> = Vec::new();
    for commit in commits {
        match rows.iter_mut().find(|row| row.author == commit.author) {
            Some(row) => row.commits += 1,
            None => rows.push(AuthorActivity {
                author: commit.author.clone(),
                commits: 1,
            }),
        }
    }
    rows.sort_by(|a, b| b.commits.cmp(&a.commits));
    rows
}

/// Lowercased `.ext` of `path`, or [`NO_EXTENSION`].
fn extension_key(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_else(|| NO_EXTENSION.to_string())
}

/// Ties keep first-seen order.
fn file_type_rows(files: &[PathBuf]) -> Vec<FileTypeRow> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for file in files {
        let key = extension_key(file);
        match counts.iter_mut().find(|(ext, _)| *ext == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = files.len() as f64;
    counts
        .into_iter()
        .map(|(extension, count)| FileTypeRow {
            extension,
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect()
}
