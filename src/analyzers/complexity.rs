//! Line-count, function-count and branching-keyword metrics per file.

use super::{contains_any, scan_files, starts_with_any, LineAnalyzer};
use crate::core::ComplexityRow;
use crate::errors::AnalysisResults;
use crate::io::{split_source_lines, FileSet};
use std::path::Path;

/// Lines starting with these (after trimming) are comments.
pub const COMMENT_PREFIXES: &[&str] = &["#", "//", "/*", "*", "*/"];

/// Lines starting with these (after trimming) declare a function or method.
pub const FUNCTION_KEYWORDS: &[&str] = &["def ", "function ", "public ", "private ", "protected "];

/// Lines containing any of these count toward the complexity proxy.
pub const BRANCH_KEYWORDS: &[&str] = &[
    "if ", "for ", "while ", "switch ", "case ", "catch ", "&&", "||",
];

pub struct ComplexityAnalyzer;

impl LineAnalyzer for ComplexityAnalyzer {
    type Output = ComplexityRow;

    fn name(&self) -> &'static str {
        "complexity"
    }

    fn analyze_content(&self, path: &Path, content: &str) -> Vec<ComplexityRow> {
        vec![complexity_metrics(path, content)]
    }
}

pub fn analyze_complexity(files: &FileSet) -> AnalysisResults<ComplexityRow> {
    scan_files(&ComplexityAnalyzer, files)
}

pub fn complexity_metrics(path: &Path, content: &str) -> ComplexityRow {
    let lines = split_source_lines(content);

    let code_lines = lines.iter().filter(|l| is_code_line(l)).count();
    let functions = lines
        .iter()
        .filter(|l| starts_with_any(l.trim(), FUNCTION_KEYWORDS))
        .count();
    // Substring match on the raw line: "elif " and "notify " both count.
    let complexity = lines
        .iter()
        .filter(|l| contains_any(l, BRANCH_KEYWORDS))
        .count();

    ComplexityRow {
        file: path.to_path_buf(),
        code_lines,
        functions,
        complexity,
    }
}

fn is_code_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !starts_with_any(trimmed, COMMENT_PREFIXES)
}
