use crate::io::OutputFormat;
use crate::orchestrator::DEFAULT_HISTORY_LIMIT;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gitwizard")]
#[command(
    about = "Side-by-side diffs, duplicate detection and heuristic code checks for git repositories",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Repository (or plain directory) to inspect
    #[arg(long, global = true, default_value = ".", env = "GITWIZARD_REPO")]
    pub repo: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the changes a commit introduced, side by side
    Diff {
        /// Commit or rev-spec to inspect (defaults to HEAD)
        revision: Option<String>,

        /// Restrict the diff to this path
        path: Option<PathBuf>,
    },

    /// Count code lines, functions and branch points
    Complexity {
        /// Analyze only this file instead of every tracked code file
        file: Option<PathBuf>,
    },

    /// Count loops, recursive calls and nesting depth
    Performance {
        /// Analyze only this file instead of every tracked code file
        file: Option<PathBuf>,
    },

    /// Match lines against injection, traversal and credential patterns
    Security {
        /// Analyze only this file instead of every tracked code file
        file: Option<PathBuf>,
    },

    /// Find blocks of lines repeated across tracked code files
    Duplicates {
        /// Block length in lines (defaults to the configured value)
        min_length: Option<usize>,
    },

    /// Break tracked files down by extension
    FileTypes,

    /// List the most recent commits reachable from HEAD
    History {
        /// Number of commits to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },

    /// Count commits per author over the whole history
    Activity,

    /// List local branches, marking the checked-out one
    Branches,

    /// Show the current branch, uncommitted changes and the last commit
    Status,

    /// Initialize a .gitwizard.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gitwizard",
            "duplicates",
            "8",
            "--format",
            "json",
            "-vv",
            "--repo",
            "/tmp/project",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.repo, PathBuf::from("/tmp/project"));
        assert!(matches!(
            cli.command,
            Commands::Duplicates {
                min_length: Some(8)
            }
        ));
    }

    #[test]
    fn test_history_limit_defaults_to_ten() {
        let cli = Cli::try_parse_from(["gitwizard", "history"]).unwrap();
        assert!(matches!(cli.command, Commands::History { limit: 10 }));

        let cli = Cli::try_parse_from(["gitwizard", "history", "-n", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::History { limit: 3 }));
    }

    #[test]
    fn test_diff_positionals() {
        let cli = Cli::try_parse_from(["gitwizard", "diff", "HEAD~2", "src/app.py"]).unwrap();
        match cli.command {
            Commands::Diff { revision, path } => {
                assert_eq!(revision.as_deref(), Some("HEAD~2"));
                assert_eq!(path, Some(PathBuf::from("src/app.py")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
