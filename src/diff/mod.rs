//! Side-by-side line diff.
//!
//! [`opcodes`] partitions two line sequences into Equal/Insert/Delete/Replace
//! spans; [`diff`] flattens those spans into rows pairing an old line with a
//! new line. Neither function has a failure mode.
//!
//! ```rust
//! use gitwizard::diff::{diff, opcodes, OpTag};
//!
//! let old = vec!["a".to_string(), "b".to_string()];
//! let new = vec!["a".to_string(), "c".to_string()];
//!
//! let ops = opcodes(&old, &new);
//! assert_eq!(ops[0].tag, OpTag::Equal);
//! assert_eq!(ops[1].tag, OpTag::Replace);
//!
//! let rows = diff(&old, &new);
//! assert_eq!(rows[1].old.as_deref(), Some("b"));
//! assert_eq!(rows[1].new.as_deref(), Some("c"));
//! ```

pub mod matcher;

pub use matcher::{MatchingBlock, SequenceMatcher};

use serde::Serialize;
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// One classified span. `old` and `new` index into the two inputs; an
/// Insert has an empty `old` range and a Delete an empty `new` range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlignmentOp {
    pub tag: OpTag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

/// A rendering-ready pair of lines. `None` marks the empty side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub tag: OpTag,
    pub old: Option<String>,
    pub new: Option<String>,
}

impl DiffRow {
    fn pair(tag: OpTag, old: Option<&String>, new: Option<&String>) -> Self {
        Self {
            tag,
            old: old.cloned(),
            new: new.cloned(),
        }
    }
}

/// Classify the spans that turn `old` into `new`.
pub fn opcodes(old: &[String], new: &[String]) -> Vec<AlignmentOp> {
    let blocks = SequenceMatcher::new(old, new).matching_blocks();
    let mut ops = Vec::with_capacity(blocks.len() * 2);
    let (mut i, mut j) = (0, 0);

    for block in blocks {
        let tag = match (i < block.old, j < block.new) {
            (true, true) => Some(OpTag::Replace),
            (true, false) => Some(OpTag::Delete),
            (false, true) => Some(OpTag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            ops.push(AlignmentOp {
                tag,
                old: i..block.old,
                new: j..block.new,
            });
        }
        i = block.old + block.size;
        j = block.new + block.size;
        if block.size > 0 {
            ops.push(AlignmentOp {
                tag: OpTag::Equal,
                old: block.old..i,
                new: block.new..j,
            });
        }
    }

    ops
}

/// Flatten opcodes into side-by-side rows in document order.
pub fn rows_from_ops(old: &[String], new: &[String], ops: &[AlignmentOp]) -> Vec<DiffRow> {
    let mut rows = Vec::new();

    for op in ops {
        match op.tag {
            OpTag::Equal => rows.extend(
                op.old
                    .clone()
                    .zip(op.new.clone())
                    .map(|(i, j)| DiffRow::pair(OpTag::Equal, Some(&old[i]), Some(&new[j]))),
            ),
            OpTag::Delete => rows.extend(
                op.old
                    .clone()
                    .map(|i| DiffRow::pair(OpTag::Delete, Some(&old[i]), None)),
            ),
            OpTag::Insert => rows.extend(
                op.new
                    .clone()
                    .map(|j| DiffRow::pair(OpTag::Insert, None, Some(&new[j]))),
            ),
            OpTag::Replace => {
                let width = op.old.len().max(op.new.len());
                rows.extend((0..width).map(|k| {
                    DiffRow::pair(
                        OpTag::Replace,
                        old.get(op.old.start + k).filter(|_| k < op.old.len()),
                        new.get(op.new.start + k).filter(|_| k < op.new.len()),
                    )
                }));
            }
        }
    }

    rows
}

/// Align `old` with `new` and return side-by-side rows.
pub fn diff(old: &[String], new: &[String]) -> Vec<DiffRow> {
    let ops = opcodes(old, new);
    rows_from_ops(old, new, &ops)
}

/// Split materialized content into a line sequence for diffing.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

/// Decode blob bytes, substituting U+FFFD for invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
