use crate::core::{
    AuthorActivity, ComplexityRow, DuplicateGroup, FileTypeRow, PerformanceRow, SecurityFinding,
};
use crate::diff::{DiffRow, OpTag};
use crate::errors::{AnalysisFailure, Result};
use crate::io::output::ReportWriter;
use crate::orchestrator::{FileDiffView, Report};
use crate::vcs::{BranchInfo, CommitSummary, RepositoryStatus};
use colored::*;
use std::io::Write;

const MAX_COLUMN_WIDTH: usize = 60;
const SEPARATOR: &str = "───────────────────────────────────────────";

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, title: &str) -> Result<()> {
        writeln!(self.writer, "{}", title.bold().cyan())?;
        writeln!(self.writer, "{SEPARATOR}")?;
        Ok(())
    }

    fn write_diff(&mut self, files: &[FileDiffView]) -> Result<()> {
        for file in files {
            let (added, removed) = file.line_counts();
            writeln!(
                self.writer,
                "{} ({}, {})",
                file.display_path().display().to_string().bold(),
                format!("+{added}").green(),
                format!("-{removed}").red()
            )?;
            let width = column_width(&file.rows);
            for row in &file.rows {
                self.write_diff_row(row, width)?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_diff_row(&mut self, row: &DiffRow, width: usize) -> Result<()> {
        let old = fit(row.old.as_deref().unwrap_or(""), width);
        let new = fit(row.new.as_deref().unwrap_or(""), width);
        let line = match row.tag {
            OpTag::Equal => format!("  {old} │ {new}").normal(),
            OpTag::Delete => format!("- {old} │ {new}").red(),
            OpTag::Insert => format!("+ {old} │ {new}").green(),
            OpTag::Replace => format!("~ {old} │ {new}").yellow(),
        };
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn write_duplicates(&mut self, groups: &[DuplicateGroup]) -> Result<()> {
        for group in groups {
            writeln!(
                self.writer,
                "{} {} lines, {} occurrences",
                group.id.yellow(),
                group.lines,
                group.occurrences.len()
            )?;
            for occurrence in &group.occurrences {
                writeln!(
                    self.writer,
                    "  {}:{}",
                    occurrence.file.display(),
                    occurrence.start_line
                )?;
            }
            for line in group.fragment.lines() {
                writeln!(self.writer, "    {}", line.dimmed())?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_complexity(&mut self, rows: &[ComplexityRow]) -> Result<()> {
        let width = path_width(rows.iter().map(|r| r.file.display().to_string().len()));
        writeln!(
            self.writer,
            "{:<width$}  {:>10}  {:>9}  {:>10}",
            "File", "Code lines", "Functions", "Complexity"
        )?;
        for row in rows {
            writeln!(
                self.writer,
                "{:<width$}  {:>10}  {:>9}  {:>10}",
                row.file.display(),
                row.code_lines,
                row.functions,
                row.complexity
            )?;
        }
        Ok(())
    }

    fn write_performance(&mut self, rows: &[PerformanceRow]) -> Result<()> {
        let width = path_width(rows.iter().map(|r| r.file.display().to_string().len()));
        writeln!(
            self.writer,
            "{:<width$}  {:>5}  {:>9}  {:>11}",
            "File", "Loops", "Recursion", "Max nesting"
        )?;
        for row in rows {
            let nesting = row.max_nesting.to_string();
            let nesting = if row.max_nesting > 3 {
                nesting.yellow()
            } else {
                nesting.normal()
            };
            writeln!(
                self.writer,
                "{:<width$}  {:>5}  {:>9}  {:>11}",
                row.file.display(),
                row.loops,
                row.recursion,
                nesting
            )?;
        }
        Ok(())
    }

    fn write_security(&mut self, findings: &[SecurityFinding]) -> Result<()> {
        for finding in findings {
            writeln!(
                self.writer,
                "{}:{} [{}] {}",
                finding.file.display(),
                finding.line,
                finding.issue_type.red().bold(),
                finding.code
            )?;
        }
        Ok(())
    }

    fn write_file_types(&mut self, rows: &[FileTypeRow]) -> Result<()> {
        writeln!(self.writer, "{:<12}  {:>6}  {:>7}", "Extension", "Count", "Share")?;
        for row in rows {
            writeln!(
                self.writer,
                "{:<12}  {:>6}  {:>6.1}%",
                row.extension, row.count, row.percentage
            )?;
        }
        Ok(())
    }

    fn write_history(&mut self, commits: &[CommitSummary]) -> Result<()> {
        let width = commits
            .iter()
            .map(|c| c.author.chars().count())
            .max()
            .unwrap_or(0)
            .max("Author".len());
        writeln!(
            self.writer,
            "{:<8}  {:<width$}  {:<16}  Message",
            "Hash", "Author", "Date"
        )?;
        for commit in commits {
            writeln!(
                self.writer,
                "{}  {:<width$}  {:<16}  {}",
                commit.short_id.green(),
                commit.author,
                commit_date(commit),
                commit.summary
            )?;
        }
        Ok(())
    }

    fn write_activity(&mut self, authors: &[AuthorActivity]) -> Result<()> {
        let width = authors
            .iter()
            .map(|a| a.author.chars().count())
            .max()
            .unwrap_or(0)
            .max("Author".len());
        writeln!(self.writer, "{:<width$}  {:>7}", "Author", "Commits")?;
        for row in authors {
            writeln!(self.writer, "{:<width$}  {:>7}", row.author, row.commits)?;
        }
        Ok(())
    }

    fn write_branches(&mut self, branches: &[BranchInfo]) -> Result<()> {
        for branch in branches {
            if branch.is_head {
                writeln!(self.writer, "* {}", branch.name.green().bold())?;
            } else {
                writeln!(self.writer, "  {}", branch.name)?;
            }
        }
        Ok(())
    }

    fn write_status(&mut self, status: &RepositoryStatus) -> Result<()> {
        match &status.branch {
            Some(branch) => writeln!(self.writer, "On branch {}", branch.green().bold())?,
            None => writeln!(self.writer, "{}", "HEAD detached".yellow())?,
        }

        if status.is_dirty() {
            writeln!(self.writer, "{}", "Uncommitted changes:".yellow())?;
        } else {
            writeln!(self.writer, "{}", "Working tree clean".green())?;
        }
        let groups = [
            ("staged", &status.staged),
            ("modified", &status.modified),
            ("untracked", &status.untracked),
        ];
        for (label, paths) in groups {
            for path in paths {
                writeln!(self.writer, "  {:<9}  {}", label, path.display())?;
            }
        }

        if let Some(commit) = &status.last_commit {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Last commit:".bold())?;
            writeln!(self.writer, "  Hash:    {}", commit.short_id.cyan())?;
            writeln!(self.writer, "  Author:  {}", commit.author)?;
            writeln!(self.writer, "  Date:    {}", commit_date(commit))?;
            writeln!(self.writer, "  Message: {}", commit.summary)?;
        }
        Ok(())
    }

    fn write_failures(&mut self, failures: &[AnalysisFailure]) -> Result<()> {
        if failures.is_empty() {
            return Ok(());
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{}",
            format!("Skipped {} file(s):", failures.len()).yellow()
        )?;
        for failure in failures {
            writeln!(
                self.writer,
                "  {} ({}): {}",
                failure.path.display(),
                failure.operation.as_str(),
                failure.error
            )?;
        }
        Ok(())
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        self.write_header(report.title())?;
        if report.is_empty() {
            writeln!(self.writer, "{}", "No results.".dimmed())?;
        } else {
            match report {
                Report::Diff { files } => self.write_diff(files)?,
                Report::Duplicates(results) => self.write_duplicates(&results.successes)?,
                Report::Complexity(results) => self.write_complexity(&results.successes)?,
                Report::Performance(results) => self.write_performance(&results.successes)?,
                Report::Security(results) => self.write_security(&results.successes)?,
                Report::FileTypes { rows } => self.write_file_types(rows)?,
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

/// Width of the old-side column: the longest old line, capped.
fn column_width(rows: &[DiffRow]) -> usize {
    rows.iter()
        .filter_map(|row| row.old.as_deref())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_COLUMN_WIDTH)
}

/// Pad or truncate `line` to exactly `width` characters.
fn fit(line: &str, width: usize) -> String {
    let truncated: String = line.chars().take(width).collect();
    format!("{truncated:<width$}")
}

fn commit_date(commit: &CommitSummary) -> String {
    commit
        .date
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn path_width(lengths: impl Iterator<Item = usize>) -> usize {
    lengths.max().unwrap_or(0).max("File".len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Occurrence;
    use crate::diff::{opcodes, rows_from_ops};
    use crate::errors::AnalysisResults;
    use std::path::PathBuf;

    fn render(report: &Report) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf).write_report(report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 3), "abc");
    }

    #[test]
    fn test_diff_rows_are_side_by_side() {
        let old = lines(&["a", "b"]);
        let new = lines(&["a", "c"]);
        let ops = opcodes(&old, &new);
        let rows = rows_from_ops(&old, &new, &ops);
        let report = Report::Diff {
            files: vec![FileDiffView {
                old_path: Some(PathBuf::from("x.py")),
                new_path: Some(PathBuf::from("x.py")),
                ops,
                rows,
            }],
        };

        let out = render(&report);
        assert!(out.contains("x.py (+1, -1)"));
        assert!(out.contains("  a │ a"));
        assert!(out.contains("~ b │ c"));
    }

    #[test]
    fn test_duplicates_list_every_occurrence() {
        let report = Report::Duplicates(AnalysisResults::new(
            vec![DuplicateGroup {
                id: "abc123".to_string(),
                fragment: "x = 1\ny = 2".to_string(),
                lines: 2,
                occurrences: vec![
                    Occurrence {
                        file: PathBuf::from("a.py"),
                        start_line: 1,
                    },
                    Occurrence {
                        file: PathBuf::from("b.py"),
                        start_line: 10,
                    },
                ],
            }],
            vec![],
        ));

        let out = render(&report);
        assert!(out.contains("abc123 2 lines, 2 occurrences"));
        assert!(out.contains("  a.py:1"));
        assert!(out.contains("  b.py:10"));
    }

    #[test]
    fn test_status_lists_changes_and_last_commit() {
        let report = Report::Status(RepositoryStatus {
            branch: Some("main".to_string()),
            staged: vec![],
            modified: vec![PathBuf::from("app.py")],
            untracked: vec![PathBuf::from("notes.txt")],
            last_commit: Some(CommitSummary {
                id: "0123456789abcdef".to_string(),
                short_id: "01234567".to_string(),
                author: "Ada".to_string(),
                date: chrono::DateTime::from_timestamp(0, 0),
                summary: "first".to_string(),
            }),
        });

        let out = render(&report);
        assert!(out.contains("On branch main"));
        assert!(out.contains("Uncommitted changes:"));
        assert!(out.contains("  modified   app.py"));
        assert!(out.contains("  untracked  notes.txt"));
        assert!(out.contains("  Hash:    01234567"));
        assert!(out.contains("  Date:    1970-01-01 00:00"));
    }

    #[test]
    fn test_branches_mark_head() {
        let report = Report::Branches {
            branches: vec![
                BranchInfo {
                    name: "dev".to_string(),
                    is_head: false,
                },
                BranchInfo {
                    name: "main".to_string(),
                    is_head: true,
                },
            ],
        };
        let out = render(&report);
        assert!(out.contains("  dev\n* main\n"));
    }

    #[test]
    fn test_activity_table_aligns_names() {
        let report = Report::Activity {
            authors: vec![
                AuthorActivity {
                    author: "Grace Hopper".to_string(),
                    commits: 12,
                },
                AuthorActivity {
                    author: "Ada".to_string(),
                    commits: 3,
                },
            ],
        };
        let out = render(&report);
        assert!(out.contains("Grace Hopper       12"));
        assert!(out.contains("Ada                 3"));
    }

    #[test]
    fn test_empty_report_says_so() {
        let out = render(&Report::Security(AnalysisResults::default()));
        assert!(out.starts_with("Security issues"));
        assert!(out.contains("No results."));
    }
}
