use crate::core::{DuplicateGroup, Occurrence};
use crate::errors::{AnalysisFailure, AnalysisResults, GitwizardError, Result};
use crate::io::{split_source_lines, FileSet};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_MIN_LENGTH: usize = 5;

/// Find every `min_length`-line window that occurs at least twice across
/// `files`. Groups come back in order of their first occurrence.
pub fn find_duplicates(files: &FileSet, min_length: usize) -> Result<AnalysisResults<DuplicateGroup>> {
    if min_length < 1 {
        return Err(GitwizardError::invalid_argument(
            "min_length",
            "must be at least 1",
        ));
    }

    let mut index = FragmentIndex::default();
    let mut failures = Vec::new();

    for (path, content) in files.read_all() {
        match content {
            Ok(content) => {
                let before = index.fragment_count();
                index.add_file(path, &content, min_length);
                debug!(
                    file = %path.display(),
                    new_fragments = index.fragment_count() - before,
                    "indexed file"
                );
            }
            Err(e) => {
                warn!(file = %path.display(), "skipping file: {e}");
                failures.push(AnalysisFailure::file_read(path, &e));
            }
        }
    }

    Ok(AnalysisResults::new(index.into_groups(min_length), failures))
}

/// Fragment text -> occurrences, remembering first-seen order.
#[derive(Default)]
struct FragmentIndex {
    slots: HashMap<String, usize>,
    entries: Vec<(String, Vec<Occurrence>)>,
}

impl FragmentIndex {
    fn fragment_count(&self) -> usize {
        self.entries.len()
    }

    fn add_file(&mut self, path: &Path, content: &str, min_length: usize) {
        for (start_line, fragment) in extract_fragments(content, min_length) {
            let occurrence = Occurrence {
                file: path.to_path_buf(),
                start_line,
            };
            match self.slots.get(&fragment) {
                Some(&slot) => self.entries[slot].1.push(occurrence),
                None => {
                    self.slots.insert(fragment.clone(), self.entries.len());
                    self.entries.push((fragment, vec![occurrence]));
                }
            }
        }
    }

    fn into_groups(self, min_length: usize) -> Vec<DuplicateGroup> {
        self.entries
            .into_iter()
            .filter(|(_, occurrences)| occurrences.len() > 1)
            .map(|(fragment, occurrences)| DuplicateGroup {
                id: fragment_id(&fragment),
                fragment,
                lines: min_length,
                occurrences,
            })
            .collect()
    }
}

/// Windows of `chunk_size` lines keyed by their exact text, with the 1-based
/// start line. Whitespace-only windows are dropped.
fn extract_fragments(content: &str, chunk_size: usize) -> Vec<(usize, String)> {
    let lines = split_source_lines(content);

    if lines.len() < chunk_size {
        return Vec::new();
    }

    (0..=lines.len() - chunk_size)
        .map(|i| (i + 1, lines[i..i + chunk_size].join("\n")))
        .filter(|(_, fragment)| !fragment.trim().is_empty())
        .collect()
}

fn fragment_id(fragment: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fragment.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}
