//! Error collection for batch scans.
//!
//! Every file in a scan is processed independently. Instead of stopping at the
//! first unreadable file, the scan records the failure and moves on, so the
//! caller receives BOTH the rows that were produced and the files that failed.

use super::GitwizardError;
use serde::Serialize;
use std::path::PathBuf;

/// Results from a batch scan over a file set.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResults<T> {
    pub successes: Vec<T>,
    pub failures: Vec<AnalysisFailure>,
}

impl<T> Default for AnalysisResults<T> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> AnalysisResults<T> {
    pub fn new(successes: Vec<T>, failures: Vec<AnalysisFailure>) -> Self {
        Self {
            successes,
            failures,
        }
    }

    pub fn extend_successes(&mut self, items: impl IntoIterator<Item = T>) {
        self.successes.extend(items);
    }

    pub fn push_failure(&mut self, failure: AnalysisFailure) {
        self.failures.push(failure);
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Information about a file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisFailure {
    pub path: PathBuf,
    pub operation: OperationType,
    pub error: String, // String for Clone, preserves error message
}

impl AnalysisFailure {
    pub fn new(path: impl Into<PathBuf>, operation: OperationType, error: &GitwizardError) -> Self {
        Self {
            path: path.into(),
            operation,
            error: error.to_string(),
        }
    }

    /// Failure while reading a file, classified by the underlying io error.
    pub fn file_read(path: impl Into<PathBuf>, error: &GitwizardError) -> Self {
        let operation = match error {
            GitwizardError::FileRead { source, .. }
                if source.kind() == std::io::ErrorKind::InvalidData =>
            {
                OperationType::FileDecode
            }
            _ => OperationType::FileRead,
        };
        Self::new(path, operation, error)
    }
}

/// Type of operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationType {
    FileRead,
    FileDecode,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileRead => "File read",
            Self::FileDecode => "File decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_analysis_results_counts() {
        let results = AnalysisResults {
            successes: vec![1, 2, 3],
            failures: vec![],
        };

        assert_eq!(results.success_count(), 3);
        assert_eq!(results.failure_count(), 0);
        assert!(results.is_complete_success());
    }

    #[test]
    fn test_analysis_results_with_failures() {
        let denied = GitwizardError::file_read(
            "a.py",
            io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        );
        let mut results = AnalysisResults::default();
        results.extend_successes([1]);
        results.push_failure(AnalysisFailure::file_read("a.py", &denied));

        assert_eq!(results.success_count(), 1);
        assert_eq!(results.failure_count(), 1);
        assert!(!results.is_complete_success());
        assert_eq!(results.failures[0].operation, OperationType::FileRead);
        assert!(results.failures[0].error.contains("Permission denied"));
    }

    #[test]
    fn test_invalid_utf8_is_classified_as_decode_failure() {
        let err = GitwizardError::file_read(
            "bin.c",
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        let failure = AnalysisFailure::file_read("bin.c", &err);
        assert_eq!(failure.operation, OperationType::FileDecode);
        assert_eq!(failure.operation.as_str(), "File decode");
    }

    #[test]
    fn test_operation_type_serializes_kebab_case() {
        let json = serde_json::to_value(OperationType::FileDecode).unwrap();
        assert_eq!(json, "file-decode");
    }
}
