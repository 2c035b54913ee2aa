// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod diff;
pub mod errors;
pub mod io;
pub mod orchestrator;
pub mod vcs;

// Re-export commonly used types
pub use crate::analyzers::{
    analyze_complexity, analyze_performance, analyze_security, find_duplicates,
};
pub use crate::config::{AnalysisConfig, GitwizardConfig};
pub use crate::core::{
    AnalysisFinding, AuthorActivity, Category, ComplexityRow, DuplicateGroup, FileTypeRow,
    IntoFindings, Occurrence, PerformanceRow, SecurityFinding,
};
pub use crate::diff::{diff, opcodes, AlignmentOp, DiffRow, OpTag};
pub use crate::errors::{AnalysisFailure, AnalysisResults, GitwizardError, OperationType, Result};
pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
pub use crate::io::FileSet;
pub use crate::orchestrator::{AnalysisOrchestrator, FileDiffView, Report};
pub use crate::vcs::{
    open_repository, BranchInfo, CommitSummary, FileChange, GitRepository, Repository,
    RepositoryStatus, WorkingTree,
};
