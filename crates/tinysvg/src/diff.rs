// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Line diffs between the original and the optimized markup.

use similar::{ChangeTag, TextDiff};

/// Lines around a change in a unified diff.
pub const DIFF_CONTEXT_LINES: usize = 3;

/// The maximum share of changed characters for a removed and an added line
/// to be shown as one modified line.
pub const MAX_CHANGE_RATIO: f32 = 0.45;

/// A diff line. Line numbers start from 1.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum DiffLine {
    Unchanged {
        old_line: usize,
        new_line: usize,
        text: String,
    },
    Removed {
        old_line: usize,
        text: String,
    },
    Added {
        new_line: usize,
        text: String,
    },
    Modified {
        old_line: usize,
        new_line: usize,
        old_text: String,
        new_text: String,
    },
}

/// Diff summary.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct DiffStats {
    pub unchanged: usize,
    pub removed: usize,
    pub added: usize,
    pub modified: usize,
}

/// Compares two texts line by line.
///
/// Runs of removed lines followed by added lines are paired up,
/// and similar pairs are reported as [`DiffLine::Modified`].
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    let diff = TextDiff::from_lines(old, new);

    let mut lines = Vec::new();
    let mut removed: Vec<(usize, String)> = Vec::new();
    let mut added: Vec<(usize, String)> = Vec::new();
    for change in diff.iter_all_changes() {
        let text = change.value().trim_end_matches(['\r', '\n']).to_string();
        match change.tag() {
            ChangeTag::Delete => {
                // A removal after an addition starts a new run.
                if !added.is_empty() {
                    flush(&mut lines, &mut removed, &mut added);
                }

                removed.push((change.old_index().unwrap_or(0) + 1, text));
            }
            ChangeTag::Insert => added.push((change.new_index().unwrap_or(0) + 1, text)),
            ChangeTag::Equal => {
                flush(&mut lines, &mut removed, &mut added);
                lines.push(DiffLine::Unchanged {
                    old_line: change.old_index().unwrap_or(0) + 1,
                    new_line: change.new_index().unwrap_or(0) + 1,
                    text,
                });
            }
        }
    }

    flush(&mut lines, &mut removed, &mut added);
    lines
}

fn flush(
    lines: &mut Vec<DiffLine>,
    removed: &mut Vec<(usize, String)>,
    added: &mut Vec<(usize, String)>,
) {
    let paired = removed.len().min(added.len());
    let mut removed_iter = removed.drain(..);
    let mut added_iter = added.drain(..);

    for _ in 0..paired {
        let (old_line, old_text) = match removed_iter.next() {
            Some(v) => v,
            None => break,
        };
        let (new_line, new_text) = match added_iter.next() {
            Some(v) => v,
            None => break,
        };

        if is_similar(&old_text, &new_text) {
            lines.push(DiffLine::Modified {
                old_line,
                new_line,
                old_text,
                new_text,
            });
        } else {
            lines.push(DiffLine::Removed {
                old_line,
                text: old_text,
            });
            lines.push(DiffLine::Added {
                new_line,
                text: new_text,
            });
        }
    }

    lines.extend(removed_iter.map(|(old_line, text)| DiffLine::Removed { old_line, text }));
    lines.extend(added_iter.map(|(new_line, text)| DiffLine::Added { new_line, text }));
}

fn is_similar(old: &str, new: &str) -> bool {
    let ratio = TextDiff::from_chars(old, new).ratio();
    1.0 - ratio <= MAX_CHANGE_RATIO
}

/// Counts diff lines by kind.
pub fn stats(lines: &[DiffLine]) -> DiffStats {
    let mut stats = DiffStats::default();
    for line in lines {
        match line {
            DiffLine::Unchanged { .. } => stats.unchanged += 1,
            DiffLine::Removed { .. } => stats.removed += 1,
            DiffLine::Added { .. } => stats.added += 1,
            DiffLine::Modified { .. } => stats.modified += 1,
        }
    }

    stats
}

/// Renders a unified diff with `original` and `optimized` headers.
pub fn unified_diff(old: &str, new: &str, context: usize) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(context)
        .header("original", "optimized")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines() {
        assert_eq!(
            diff_lines("a\nb\nc\n", "a\nc\nd\n"),
            vec![
                DiffLine::Unchanged {
                    old_line: 1,
                    new_line: 1,
                    text: "a".to_string()
                },
                DiffLine::Removed {
                    old_line: 2,
                    text: "b".to_string()
                },
                DiffLine::Unchanged {
                    old_line: 3,
                    new_line: 2,
                    text: "c".to_string()
                },
                DiffLine::Added {
                    new_line: 3,
                    text: "d".to_string()
                },
            ]
        );
    }

    #[test]
    fn similar_lines_are_modified() {
        let lines = diff_lines("<svg>\n<rect width=\"10\"/>\n</svg>\n", "<svg>\n<rect width=\"12\"/>\n</svg>\n");
        assert_eq!(
            lines[1],
            DiffLine::Modified {
                old_line: 2,
                new_line: 2,
                old_text: "<rect width=\"10\"/>".to_string(),
                new_text: "<rect width=\"12\"/>".to_string(),
            }
        );

        let lines = diff_lines("abcdef\n", "uvwxyz\n");
        assert_eq!(
            stats(&lines),
            DiffStats {
                removed: 1,
                added: 1,
                ..DiffStats::default()
            }
        );
    }

    #[test]
    fn unified() {
        let text = unified_diff("a\nb\nc\n", "a\nc\nd\n", DIFF_CONTEXT_LINES);
        assert!(text.starts_with("--- original\n+++ optimized\n@@ "));
        assert!(text.contains("\n-b\n"));
        assert!(text.ends_with("+d\n"));
        assert_eq!(unified_diff("a\n", "a\n", DIFF_CONTEXT_LINES), "");
    }
}
