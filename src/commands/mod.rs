//! CLI command implementations.
//!
//! - **init**: write a default `.gitwizard.toml`
//! - every other subcommand runs one orchestrator operation (`analyze`) and
//!   renders the resulting [`Report`](crate::orchestrator::Report)

pub mod analyze;
pub mod init;

pub use analyze::build_report;
pub use init::init_config;

use crate::cli::{apply_color_choice, use_color, Cli, Commands};
use crate::config::load_config_from;
use crate::io::create_writer;
use crate::orchestrator::AnalysisOrchestrator;
use crate::vcs::open_repository;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::debug;

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { force } = cli.command {
        let path = init_config(&cli.repo, force)?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let config = load_config_from(&cli.repo);
    let format = cli.format.unwrap_or(config.output.default_format);
    apply_color_choice(use_color(
        config.output.color,
        cli.plain,
        cli.output.is_some(),
    ));
    debug!(?format, repo = %cli.repo.display(), "running command");

    let repo = open_repository(&cli.repo)
        .with_context(|| format!("opening {}", cli.repo.display()))?;
    let orchestrator = AnalysisOrchestrator::new(repo, config.analysis);
    let report = build_report(&orchestrator, &cli.command)?;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout()),
    };
    create_writer(format, out).write_report(&report)?;
    Ok(())
}
