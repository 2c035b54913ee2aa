use crate::errors::Result;
use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use crate::orchestrator::Report;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &Report) -> Result<()>;
}

/// Writer for `format` emitting into `out`. Terminal colors follow the
/// process-wide `colored` override.
pub fn create_writer(format: OutputFormat, out: Box<dyn Write>) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out)),
    }
}
