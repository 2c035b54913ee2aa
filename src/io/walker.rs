use crate::errors::{GitwizardError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Lists files below a directory, honoring `.gitignore` even outside a git
/// checkout. Paths are returned relative to the root, sorted.
pub struct FileWalker {
    root: PathBuf,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| GitwizardError::Io(std::io::Error::other(e)))?;
            let path = entry.path();

            if path.is_file() {
                let relative = path.strip_prefix(&self.root).unwrap_or(path);
                files.push(relative.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Suffix match on the file name, the way extension allow-lists are written.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let name = path.to_string_lossy();
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}
