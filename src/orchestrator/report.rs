//! Structured results handed from the orchestrator to the writers.

use crate::core::{
    AnalysisFinding, AuthorActivity, ComplexityRow, DuplicateGroup, FileTypeRow, IntoFindings,
    PerformanceRow, SecurityFinding,
};
use crate::diff::{AlignmentOp, DiffRow, OpTag};
use crate::errors::{AnalysisFailure, AnalysisResults};
use crate::vcs::{BranchInfo, CommitSummary, RepositoryStatus};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Side-by-side view of one changed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileDiffView {
    pub old_path: Option<PathBuf>,
    pub new_path: Option<PathBuf>,
    pub ops: Vec<AlignmentOp>,
    pub rows: Vec<DiffRow>,
}

impl FileDiffView {
    pub fn display_path(&self) -> &Path {
        self.new_path
            .as_deref()
            .or(self.old_path.as_deref())
            .unwrap_or_else(|| Path::new("(unknown)"))
    }

    /// Lines added and removed, counting both sides of replaced spans.
    pub fn line_counts(&self) -> (usize, usize) {
        self.ops.iter().fold((0, 0), |(added, removed), op| match op.tag {
            OpTag::Equal => (added, removed),
            OpTag::Insert | OpTag::Delete | OpTag::Replace => {
                (added + op.new.len(), removed + op.old.len())
            }
        })
    }
}

/// Result of one orchestrator operation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "report", rename_all = "kebab-case")]
pub enum Report {
    Diff { files: Vec<FileDiffView> },
    Duplicates(AnalysisResults<DuplicateGroup>),
    Complexity(AnalysisResults<ComplexityRow>),
    Performance(AnalysisResults<PerformanceRow>),
    Security(AnalysisResults<SecurityFinding>),
    FileTypes { rows: Vec<FileTypeRow> },
    History { commits: Vec<CommitSummary> },
    Activity { authors: Vec<AuthorActivity> },
    Branches { branches: Vec<BranchInfo> },
    Status(RepositoryStatus),
}

impl Report {
    pub fn title(&self) -> &'static str {
        match self {
            Report::Diff { .. } => "Changes",
            Report::Duplicates(_) => "Duplicate code",
            Report::Complexity(_) => "Code complexity",
            Report::Performance(_) => "Performance heuristics",
            Report::Security(_) => "Security issues",
            Report::FileTypes { .. } => "File types",
            Report::History { .. } => "Recent commits",
            Report::Activity { .. } => "Author activity",
            Report::Branches { .. } => "Branches",
            Report::Status(_) => "Repository status",
        }
    }

    /// Analyzer output in uniform shape. Only the three analyzer reports
    /// produce findings.
    pub fn findings(&self) -> Vec<AnalysisFinding> {
        match self {
            Report::Complexity(results) => collect_findings(&results.successes),
            Report::Performance(results) => collect_findings(&results.successes),
            Report::Security(results) => collect_findings(&results.successes),
            _ => Vec::new(),
        }
    }

    /// Files that could not be processed.
    pub fn failures(&self) -> &[AnalysisFailure] {
        match self {
            Report::Duplicates(results) => &results.failures,
            Report::Complexity(results) => &results.failures,
            Report::Performance(results) => &results.failures,
            Report::Security(results) => &results.failures,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Report::Diff { files } => files.is_empty(),
            Report::Duplicates(results) => results.successes.is_empty(),
            Report::Complexity(results) => results.successes.is_empty(),
            Report::Performance(results) => results.successes.is_empty(),
            Report::Security(results) => results.successes.is_empty(),
            Report::FileTypes { rows } => rows.is_empty(),
            Report::History { commits } => commits.is_empty(),
            Report::Activity { authors } => authors.is_empty(),
            Report::Branches { branches } => branches.is_empty(),
            Report::Status(_) => false,
        }
    }
}

fn collect_findings<T: IntoFindings>(rows: &[T]) -> Vec<AnalysisFinding> {
    rows.iter().flat_map(IntoFindings::findings).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use crate::diff::opcodes;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_line_counts_cover_replace_both_sides() {
        let old = lines(&["a", "b", "c"]);
        let new = lines(&["a", "x", "y", "c", "d"]);
        let view = FileDiffView {
            old_path: Some(PathBuf::from("f")),
            new_path: Some(PathBuf::from("f")),
            ops: opcodes(&old, &new),
            rows: Vec::new(),
        };
        assert_eq!(view.line_counts(), (3, 1));
    }

    #[test]
    fn test_findings_only_for_analyzer_reports() {
        let complexity = Report::Complexity(AnalysisResults::new(
            vec![ComplexityRow {
                file: PathBuf::from("a.py"),
                code_lines: 1,
                functions: 0,
                complexity: 0,
            }],
            vec![],
        ));
        let findings = complexity.findings();
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|f| f.category == Category::Complexity));

        let types = Report::FileTypes { rows: vec![] };
        assert!(types.findings().is_empty());
        assert!(types.is_empty());
        assert!(types.failures().is_empty());
    }

    #[test]
    fn test_status_report_is_never_empty() {
        let report = Report::Status(RepositoryStatus::default());
        assert!(!report.is_empty());
        assert!(report.findings().is_empty());
        assert_eq!(report.title(), "Repository status");
        assert!(Report::History { commits: vec![] }.is_empty());
    }

    #[test]
    fn test_status_json_flattens_fields() {
        let report = Report::Status(RepositoryStatus {
            branch: Some("main".to_string()),
            untracked: vec![PathBuf::from("tmp.txt")],
            ..RepositoryStatus::default()
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["report"], "status");
        assert_eq!(json["branch"], "main");
        assert_eq!(json["untracked"][0], "tmp.txt");
    }

    #[test]
    fn test_report_json_is_tagged() {
        let report = Report::FileTypes {
            rows: vec![FileTypeRow {
                extension: ".py".to_string(),
                count: 1,
                percentage: 100.0,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["report"], "file-types");
        assert_eq!(json["rows"][0]["extension"], ".py");
    }
}
