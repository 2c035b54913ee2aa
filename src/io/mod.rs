pub mod output;
pub mod walker;
pub mod writers;

pub use output::{create_writer, OutputFormat, ReportWriter};

use crate::errors::{GitwizardError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a source file as UTF-8. Missing files, permission problems and
/// undecodable bytes all surface as [`GitwizardError::FileRead`].
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| GitwizardError::file_read(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Split scanned content on universal newlines (`\n`, `\r\n` and a lone
/// `\r`), keeping the empty segment after a trailing line ending. Line
/// terminators never reach line text, so CRLF and LF files hash alike.
pub fn split_source_lines(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&content[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&content[start..]);
    lines
}

/// The files one scan covers.
///
/// `files` are the paths reported in results; when `root` is set they are
/// read relative to it, so reports keep repository-relative names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    root: Option<PathBuf>,
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Files read exactly as given.
    pub fn from_paths(files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            root: None,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Repository-relative files read below `root`.
    pub fn rooted(root: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            files,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Location on disk of a listed file.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        match &self.root {
            Some(root) if file.is_relative() => root.join(file),
            _ => file.to_path_buf(),
        }
    }

    /// Read every listed file, pairing the reported path with its content
    /// or the read error.
    pub fn read_all(&self) -> impl Iterator<Item = (&Path, Result<String>)> + '_ {
        self.files.iter().map(move |file| {
            let content = read_source(&self.resolve(file));
            (file.as_path(), content)
        })
    }
}
