use crate::cli::Commands;
use crate::orchestrator::{AnalysisOrchestrator, Report};
use crate::vcs::Repository;
use anyhow::Result;

/// Run the orchestrator operation selected by `command`.
pub fn build_report<R: Repository>(
    orchestrator: &AnalysisOrchestrator<R>,
    command: &Commands,
) -> Result<Report> {
    let report = match command {
        Commands::Diff { revision, path } => Report::Diff {
            files: orchestrator.diff_revision(revision.as_deref(), path.as_deref())?,
        },
        Commands::Complexity { file } => {
            Report::Complexity(orchestrator.analyze_complexity(file.as_deref())?)
        }
        Commands::Performance { file } => {
            Report::Performance(orchestrator.analyze_performance(file.as_deref())?)
        }
        Commands::Security { file } => {
            Report::Security(orchestrator.analyze_security(file.as_deref())?)
        }
        Commands::Duplicates { min_length } => {
            Report::Duplicates(orchestrator.find_duplicates(*min_length)?)
        }
        Commands::FileTypes => Report::FileTypes {
            rows: orchestrator.file_types()?,
        },
        Commands::History { limit } => Report::History {
            commits: orchestrator.history(Some(*limit))?,
        },
        Commands::Activity => Report::Activity {
            authors: orchestrator.author_activity()?,
        },
        Commands::Branches => Report::Branches {
            branches: orchestrator.branches()?,
        },
        Commands::Status => Report::Status(orchestrator.status()?),
        Commands::Init { .. } => anyhow::bail!("init does not produce a report"),
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::vcs::WorkingTree;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_types_command_on_working_tree() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("b.py"), "y = 2\n").unwrap();
        let orch = AnalysisOrchestrator::new(
            WorkingTree::new(dir.path()).unwrap(),
            AnalysisConfig::default(),
        );

        let report = build_report(&orch, &Commands::FileTypes).unwrap();
        match report {
            Report::FileTypes { rows } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].extension, ".py");
                assert_eq!(rows[0].count, 2);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_diff_on_working_tree_is_an_error() {
        let dir = TempDir::new().unwrap();
        let orch = AnalysisOrchestrator::new(
            WorkingTree::new(dir.path()).unwrap(),
            AnalysisConfig::default(),
        );
        let command = Commands::Diff {
            revision: None,
            path: None,
        };
        assert!(build_report(&orch, &command).is_err());
    }

    #[test]
    fn test_status_on_working_tree_is_an_error() {
        let dir = TempDir::new().unwrap();
        let orch = AnalysisOrchestrator::new(
            WorkingTree::new(dir.path()).unwrap(),
            AnalysisConfig::default(),
        );
        let err = build_report(&orch, &Commands::Status).unwrap_err();
        assert!(err.to_string().contains("need a git repository"));
    }
}
