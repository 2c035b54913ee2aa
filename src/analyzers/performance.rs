//! Loop count, recursion and nesting-depth heuristics per file.
//!
//! These are keyword heuristics, not block-structure analysis:
//! - a definition line counts as recursive when its name occurs in the file,
//!   and the definition line itself always satisfies that, so every line
//!   containing `def ` is counted (even when the name is empty);
//! - nesting depth grows on every block-opening keyword line and drops back
//!   to zero on the first other non-blank line that is not `else:`/`elif`.

use super::{scan_files, starts_with_any, LineAnalyzer};
use crate::core::PerformanceRow;
use crate::errors::AnalysisResults;
use crate::io::{split_source_lines, FileSet};
use std::path::Path;

pub const LOOP_KEYWORDS: &[&str] = &["for ", "while "];

pub const NESTING_KEYWORDS: &[&str] = &["if ", "for ", "while ", "def ", "class "];

pub const CONTINUATION_KEYWORDS: &[&str] = &["else:", "elif "];

const FUNCTION_MARKER: &str = "def ";

pub struct PerformanceAnalyzer;

impl LineAnalyzer for PerformanceAnalyzer {
    type Output = PerformanceRow;

    fn name(&self) -> &'static str {
        "performance"
    }

    fn analyze_content(&self, path: &Path, content: &str) -> Vec<PerformanceRow> {
        vec![performance_metrics(path, content)]
    }
}

pub fn analyze_performance(files: &FileSet) -> AnalysisResults<PerformanceRow> {
    scan_files(&PerformanceAnalyzer, files)
}

pub fn performance_metrics(path: &Path, content: &str) -> PerformanceRow {
    let lines = split_source_lines(content);

    PerformanceRow {
        file: path.to_path_buf(),
        loops: count_loops(&lines),
        recursion: count_recursion(&lines, content),
        max_nesting: max_nesting(&lines),
    }
}

fn count_loops(lines: &[&str]) -> usize {
    lines
        .iter()
        .filter(|l| starts_with_any(l.trim(), LOOP_KEYWORDS))
        .count()
}

fn count_recursion(lines: &[&str], content: &str) -> usize {
    lines
        .iter()
        .filter_map(|line| function_name(line))
        .filter(|name| content.contains(name))
        .count()
}

/// Text between the first and second `def ` up to `(`, trimmed. May be
/// empty; `None` only when the line has no `def `.
fn function_name(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once(FUNCTION_MARKER)?;
    let segment = rest.split(FUNCTION_MARKER).next().unwrap_or(rest);
    Some(segment.split('(').next().unwrap_or(segment).trim())
}

fn max_nesting(lines: &[&str]) -> usize {
    let mut current = 0;
    let mut max = 0;

    for line in lines {
        let trimmed = line.trim();
        if starts_with_any(trimmed, NESTING_KEYWORDS) {
            current += 1;
            max = max.max(current);
        } else if !trimmed.is_empty() && !starts_with_any(trimmed, CONTINUATION_KEYWORDS) {
            current = 0;
        }
    }

    max
}
