//! Longest-matching-block alignment of two line sequences.
//!
//! Lines are atomic tokens compared by exact equality. The matcher finds the
//! longest block common to both windows, preferring the earliest start in the
//! old sequence and then in the new one, and recurses on both remainders.

use std::collections::HashMap;
use std::ops::Range;

/// A run of `size` equal lines starting at `old` and `new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchingBlock {
    pub old: usize,
    pub new: usize,
    pub size: usize,
}

pub struct SequenceMatcher<'a> {
    old: &'a [String],
    new: &'a [String],
    new_index: HashMap<&'a str, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    pub fn new(old: &'a [String], new: &'a [String]) -> Self {
        let mut new_index: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (j, line) in new.iter().enumerate() {
            new_index.entry(line.as_str()).or_default().push(j);
        }
        Self {
            old,
            new,
            new_index,
        }
    }

    /// Longest equal block inside `old[olds]` x `new[news]`, leftmost on ties.
    pub fn find_longest_match(&self, olds: Range<usize>, news: Range<usize>) -> MatchingBlock {
        let mut best = MatchingBlock {
            old: olds.start,
            new: news.start,
            size: 0,
        };
        // j -> length of the match ending at (i - 1, j)
        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

        for i in olds.clone() {
            let mut next_runs = HashMap::new();
            if let Some(positions) = self.new_index.get(self.old[i].as_str()) {
                for &j in positions {
                    if j < news.start {
                        continue;
                    }
                    if j >= news.end {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_ending_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_runs.insert(j, k);
                    if k > best.size {
                        best = MatchingBlock {
                            old: i + 1 - k,
                            new: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            run_ending_at = next_runs;
        }

        best
    }

    /// All matching blocks in document order, adjacent runs merged, followed
    /// by a zero-sized sentinel at `(old.len(), new.len())`.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0..self.old.len(), 0..self.new.len())];
        let mut found = Vec::new();

        while let Some((olds, news)) = pending.pop() {
            let block = self.find_longest_match(olds.clone(), news.clone());
            if block.size == 0 {
                continue;
            }
            if olds.start < block.old && news.start < block.new {
                pending.push((olds.start..block.old, news.start..block.new));
            }
            let old_end = block.old + block.size;
            let new_end = block.new + block.size;
            if old_end < olds.end && new_end < news.end {
                pending.push((old_end..olds.end, new_end..news.end));
            }
            found.push(block);
        }

        found.sort_by_key(|b| (b.old, b.new));

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(found.len() + 1);
        for block in found {
            match merged.last_mut() {
                Some(last)
                    if last.old + last.size == block.old && last.new + last.size == block.new =>
                {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }

        merged.push(MatchingBlock {
            old: self.old.len(),
            new: self.new.len(),
            size: 0,
        });
        merged
    }
}
