//! Pattern-based source analyzers.
//!
//! Every analyzer has the same shape: read a file, split it into lines, run a
//! linear scan over fixed keyword or regex tables. No parsing is involved.
//! [`scan_files`] drives a [`LineAnalyzer`] over a [`FileSet`], recording
//! unreadable files as failures instead of aborting the batch.

pub mod complexity;
pub mod duplication;
pub mod performance;
pub mod security;

pub use complexity::{analyze_complexity, ComplexityAnalyzer};
pub use duplication::{find_duplicates, DEFAULT_MIN_LENGTH};
pub use performance::{analyze_performance, PerformanceAnalyzer};
pub use security::{analyze_security, SecurityAnalyzer, SECURITY_RULES};

use crate::errors::{AnalysisFailure, AnalysisResults};
use crate::io::FileSet;
use std::path::Path;
use tracing::{debug, warn};

/// Default extension allow-list for code scans.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".js", ".java", ".cpp", ".c", ".h"];

/// Produces rows for one file from its full content.
pub trait LineAnalyzer {
    type Output;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn analyze_content(&self, path: &Path, content: &str) -> Vec<Self::Output>;
}

/// Run `analyzer` over every file of `files`, sequentially.
pub fn scan_files<A: LineAnalyzer>(analyzer: &A, files: &FileSet) -> AnalysisResults<A::Output> {
    let mut results = AnalysisResults::default();

    for (path, content) in files.read_all() {
        match content {
            Ok(content) => {
                let rows = analyzer.analyze_content(path, &content);
                debug!(
                    analyzer = analyzer.name(),
                    file = %path.display(),
                    rows = rows.len(),
                    "scanned file"
                );
                results.extend_successes(rows);
            }
            Err(e) => {
                warn!(analyzer = analyzer.name(), file = %path.display(), "skipping file: {e}");
                results.push_failure(AnalysisFailure::file_read(path, &e));
            }
        }
    }

    results
}

/// Whether `line` starts with any of `prefixes`.
pub(crate) fn starts_with_any(line: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| line.starts_with(p))
}

/// Whether `line` contains any of `needles`.
pub(crate) fn contains_any(line: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| line.contains(n))
}
