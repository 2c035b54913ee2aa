use crate::core::{AnalysisFinding, AuthorActivity, DuplicateGroup, FileTypeRow};
use crate::diff::OpTag;
use crate::errors::{AnalysisFailure, Result};
use crate::io::output::ReportWriter;
use crate::orchestrator::{FileDiffView, Report};
use crate::vcs::{BranchInfo, CommitSummary, RepositoryStatus};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &Report) -> Result<()> {
        writeln!(self.writer, "# {}", report.title())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_diff(&mut self, files: &[FileDiffView]) -> Result<()> {
        for file in files {
            let (added, removed) = file.line_counts();
            writeln!(
                self.writer,
                "## `{}` (+{added} -{removed})",
                file.display_path().display()
            )?;
            writeln!(self.writer)?;
            writeln!(self.writer, "```diff")?;
            for row in &file.rows {
                match row.tag {
                    OpTag::Equal => {
                        writeln!(self.writer, " {}", row.old.as_deref().unwrap_or(""))?
                    }
                    OpTag::Delete | OpTag::Insert | OpTag::Replace => {
                        if let Some(old) = &row.old {
                            writeln!(self.writer, "-{old}")?;
                        }
                        if let Some(new) = &row.new {
                            writeln!(self.writer, "+{new}")?;
                        }
                    }
                }
            }
            writeln!(self.writer, "```")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_duplicates(&mut self, groups: &[DuplicateGroup]) -> Result<()> {
        for group in groups {
            writeln!(
                self.writer,
                "## `{}` ({} lines, {} occurrences)",
                group.id,
                group.lines,
                group.occurrences.len()
            )?;
            writeln!(self.writer)?;
            for occurrence in &group.occurrences {
                writeln!(
                    self.writer,
                    "- `{}:{}`",
                    occurrence.file.display(),
                    occurrence.start_line
                )?;
            }
            writeln!(self.writer)?;
            writeln!(self.writer, "```")?;
            writeln!(self.writer, "{}", group.fragment)?;
            writeln!(self.writer, "```")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_findings(&mut self, findings: &[AnalysisFinding]) -> Result<()> {
        writeln!(self.writer, "| File | Line | Category | Metric | Value |")?;
        writeln!(self.writer, "|------|------|----------|--------|-------|")?;
        for finding in findings {
            let line = finding.line.map(|l| l.to_string()).unwrap_or_default();
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                escape_cell(&finding.file.display().to_string()),
                line,
                finding.category,
                escape_cell(&finding.metric),
                escape_cell(&finding.value)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_file_types(&mut self, rows: &[FileTypeRow]) -> Result<()> {
        writeln!(self.writer, "| Extension | Count | Share |")?;
        writeln!(self.writer, "|-----------|-------|-------|")?;
        for row in rows {
            writeln!(
                self.writer,
                "| {} | {} | {:.1}% |",
                escape_cell(&row.extension),
                row.count,
                row.percentage
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_history(&mut self, commits: &[CommitSummary]) -> Result<()> {
        writeln!(self.writer, "| Hash | Author | Date | Message |")?;
        writeln!(self.writer, "|------|--------|------|---------|")?;
        for commit in commits {
            writeln!(
                self.writer,
                "| `{}` | {} | {} | {} |",
                commit.short_id,
                escape_cell(&commit.author),
                commit_date(commit),
                escape_cell(&commit.summary)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_activity(&mut self, authors: &[AuthorActivity]) -> Result<()> {
        writeln!(self.writer, "| Author | Commits |")?;
        writeln!(self.writer, "|--------|---------|")?;
        for row in authors {
            writeln!(self.writer, "| {} | {} |", escape_cell(&row.author), row.commits)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_branches(&mut self, branches: &[BranchInfo]) -> Result<()> {
        for branch in branches {
            let marker = if branch.is_head { " (current)" } else { "" };
            writeln!(self.writer, "- `{}`{marker}", branch.name)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_status(&mut self, status: &RepositoryStatus) -> Result<()> {
        match &status.branch {
            Some(branch) => writeln!(self.writer, "Branch: `{branch}`")?,
            None => writeln!(self.writer, "Branch: detached HEAD")?,
        }
        writeln!(self.writer)?;

        if status.is_dirty() || !status.untracked.is_empty() {
            writeln!(self.writer, "| State | File |")?;
            writeln!(self.writer, "|-------|------|")?;
            let groups = [
                ("staged", &status.staged),
                ("modified", &status.modified),
                ("untracked", &status.untracked),
            ];
            for (label, paths) in groups {
                for path in paths {
                    writeln!(
                        self.writer,
                        "| {label} | {} |",
                        escape_cell(&path.display().to_string())
                    )?;
                }
            }
        } else {
            writeln!(self.writer, "Working tree clean.")?;
        }
        writeln!(self.writer)?;

        if let Some(commit) = &status.last_commit {
            writeln!(
                self.writer,
                "Last commit: `{}` by {} on {}: {}",
                commit.short_id,
                commit.author,
                commit_date(commit),
                commit.summary
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_failures(&mut self, failures: &[AnalysisFailure]) -> Result<()> {
        if failures.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Skipped files")?;
        writeln!(self.writer)?;
        for failure in failures {
            writeln!(
                self.writer,
                "- `{}` ({}): {}",
                failure.path.display(),
                failure.operation.as_str(),
                failure.error
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        self.write_header(report)?;
        if report.is_empty() {
            writeln!(self.writer, "_No results._")?;
            writeln!(self.writer)?;
        } else {
            match report {
                Report::Diff { files } => self.write_diff(files)?,
                Report::Duplicates(results) => self.write_duplicates(&results.successes)?,
                Report::FileTypes { rows } => self.write_file_types(rows)?,
                Report::Complexity(_) | Report::Performance(_) | Report::Security(_) => {
                    self.write_findings(&report.findings())?
                }
                Report::History { commits } => self.write_history(commits)?,
                Report::Activity { authors } => self.write_activity(authors)?,
                Report::Branches { branches } => self.write_branches(branches)?,
                Report::Status(status) => self.write_status(status)?,
            }
        }
        self.write_failures(report.failures())?;
        self.writer.flush()?;
        Ok(())
    }
}

fn commit_date(commit: &CommitSummary) -> String {
    commit
        .date
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Keep pipes in code snippets from splitting table cells.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
