//! Result rows shared by the analyzers, the orchestrator and the writers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which analyzer produced a finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Complexity,
    Performance,
    Security,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Complexity => "Complexity",
            Category::Performance => "Performance",
            Category::Security => "Security",
        };
        f.write_str(label)
    }
}

/// One reported analyzer result in uniform shape.
///
/// Metric rows expand into one finding per metric with `line: None`;
/// security matches map to a single finding carrying the line and the
/// offending code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFinding {
    pub file: PathBuf,
    pub line: Option<usize>,
    pub category: Category,
    pub metric: String,
    pub value: String,
}

impl AnalysisFinding {
    fn metric(file: &PathBuf, category: Category, metric: &str, value: usize) -> Self {
        Self {
            file: file.clone(),
            line: None,
            category,
            metric: metric.to_string(),
            value: value.to_string(),
        }
    }
}

/// Per-file output of the complexity analyzer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityRow {
    pub file: PathBuf,
    pub code_lines: usize,
    pub functions: usize,
    pub complexity: usize,
}

/// Per-file output of the performance analyzer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub file: PathBuf,
    pub loops: usize,
    pub recursion: usize,
    pub max_nesting: usize,
}

/// One pattern hit of the security analyzer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFinding {
    pub file: PathBuf,
    pub line: usize,
    pub issue_type: String,
    pub pattern: String,
    pub code: String,
}

/// Where a duplicated fragment starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub file: PathBuf,
    pub start_line: usize,
}

/// A fragment seen at two or more places.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Short SHA-256 digest of the fragment text.
    pub id: String,
    pub fragment: String,
    pub lines: usize,
    pub occurrences: Vec<Occurrence>,
}

/// Share of tracked files with a given extension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileTypeRow {
    pub extension: String,
    pub count: usize,
    pub percentage: f64,
}

/// Number of commits reachable from HEAD written by one author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorActivity {
    pub author: String,
    pub commits: usize,
}

/// Conversion into the uniform finding shape.
pub trait IntoFindings {
    fn findings(&self) -> Vec<AnalysisFinding>;
}

impl IntoFindings for ComplexityRow {
    fn findings(&self) -> Vec<AnalysisFinding> {
        vec![
            AnalysisFinding::metric(&self.file, Category::Complexity, "code_lines", self.code_lines),
            AnalysisFinding::metric(&self.file, Category::Complexity, "functions", self.functions),
            AnalysisFinding::metric(&self.file, Category::Complexity, "complexity", self.complexity),
        ]
    }
}

impl IntoFindings for PerformanceRow {
    fn findings(&self) -> Vec<AnalysisFinding> {
        vec![
            AnalysisFinding::metric(&self.file, Category::Performance, "loops", self.loops),
            AnalysisFinding::metric(&self.file, Category::Performance, "recursion", self.recursion),
            AnalysisFinding::metric(&self.file, Category::Performance, "max_nesting", self.max_nesting),
        ]
    }
}

impl IntoFindings for SecurityFinding {
    fn findings(&self) -> Vec<AnalysisFinding> {
        vec![AnalysisFinding {
            file: self.file.clone(),
            line: Some(self.line),
            category: Category::Security,
            metric: self.issue_type.clone(),
            value: self.code.clone(),
        }]
    }
}
