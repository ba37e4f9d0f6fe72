//! EditClassifier: Deletion vs Insertion, touched spans, span repair
//!
//! The host only reports `(new_text, cursor)` after each edit. From that and
//! the previous text we approximate a single contiguous edit region:
//! - **Deletion** (`new` shorter): `[cursor, cursor + deleted_len)` in old coordinates
//! - **Insertion** (`new` same length or longer): `inserted_len` chars ending at the cursor
//!
//! Any mention touched by a deletion is removed wholesale, together with its
//! remaining text. Untouched mentions are shifted into new coordinates, and a
//! final consistency pass drops any span whose text no longer reads `tag + label`.

use std::ops::Range;

use crate::mentions::text::{char_len, remove_ranges, slice};
use crate::mentions::MentionSpan;

// =============================================================================
// Types
// =============================================================================

/// Edit region removed from the old text (old-text char coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionRegion {
    pub start: usize,
    pub end: usize,
}

impl DeletionRegion {
    fn len(&self) -> usize {
        self.end - self.start
    }

    /// A span is touched if it starts inside the region, ends inside it, or
    /// contains it entirely.
    pub fn touches(&self, span: &MentionSpan) -> bool {
        (span.start >= self.start && span.start < self.end)
            || (span.end > self.start && span.end <= self.end)
            || (span.start <= self.start && span.end >= self.end)
    }

    /// Map an old-text offset into the new text; the region collapses to its start
    pub fn map(&self, pos: usize) -> usize {
        if pos <= self.start {
            pos
        } else if pos >= self.end {
            pos - self.len()
        } else {
            self.start
        }
    }
}

/// Edit region added to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionRegion {
    /// Old-text offset where the new chars were inserted
    pub at: usize,
    /// Number of chars added (0 for a same-length replacement)
    pub len: usize,
}

/// Classification of a single edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Deletion(DeletionRegion),
    Insertion(InsertionRegion),
}

/// Result of applying an edit to the tracked mentions
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub kind: EditKind,
    /// Display text after repair
    pub display_text: String,
    /// Surviving mentions in new coordinates, sorted by start
    pub mentions: Vec<MentionSpan>,
    /// Mentions removed wholesale because the deletion touched them
    pub touched: Vec<MentionSpan>,
    /// Mentions dropped because their text was edited from inside
    pub dropped: Vec<MentionSpan>,
    /// Cursor in the repaired text
    pub cursor: usize,
}

impl EditOutcome {
    /// True if a deletion removed at least one mention
    pub fn removed_mentions(&self) -> bool {
        !self.touched.is_empty()
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classify an edit from the old text, the new text and the new cursor position
pub fn classify(old_text: &str, new_text: &str, cursor: usize) -> EditKind {
    let old_len = char_len(old_text);
    let new_len = char_len(new_text);

    if new_len < old_len {
        let deleted = old_len - new_len;
        EditKind::Deletion(DeletionRegion {
            start: cursor,
            end: cursor + deleted,
        })
    } else {
        let inserted = new_len - old_len;
        EditKind::Insertion(InsertionRegion {
            at: cursor.saturating_sub(inserted),
            len: inserted,
        })
    }
}

/// Apply an edit to the tracked mentions and produce the repaired display text
pub fn apply_edit(
    old_text: &str,
    new_text: &str,
    cursor: usize,
    mentions: &[MentionSpan],
    tag: &str,
) -> EditOutcome {
    let new_len = char_len(new_text);
    let cursor = cursor.min(new_len);
    let kind = classify(old_text, new_text, cursor);

    let mut sorted = mentions.to_vec();
    sorted.sort_by_key(|m| m.start);

    let (display_text, shifted, touched, mut dropped, cursor) = match kind {
        EditKind::Deletion(region) => {
            let (touched, survivors): (Vec<_>, Vec<_>) =
                sorted.into_iter().partition(|m| region.touches(m));

            // Remaining text of each touched span, in new coordinates
            let ranges: Vec<Range<usize>> = touched
                .iter()
                .map(|m| region.map(m.start).min(new_len)..region.map(m.end).min(new_len))
                .collect();
            let display_text = remove_ranges(new_text, &ranges);

            let shifted = survivors
                .into_iter()
                .map(|m| {
                    let start = region.map(m.start);
                    let removed_before: usize = ranges
                        .iter()
                        .filter(|r| r.end <= start)
                        .map(|r| r.len())
                        .sum();
                    let delta = start as isize - m.start as isize - removed_before as isize;
                    m.shifted(delta)
                })
                .collect();

            let removed_before_cursor: usize = ranges
                .iter()
                .map(|r| r.end.min(cursor).saturating_sub(r.start))
                .sum();

            (display_text, shifted, touched, Vec::new(), cursor - removed_before_cursor)
        }
        EditKind::Insertion(region) => {
            let mut shifted = Vec::with_capacity(sorted.len());
            let mut dropped = Vec::new();
            for m in sorted {
                if region.len == 0 || m.end <= region.at {
                    shifted.push(m);
                } else if m.start >= region.at {
                    shifted.push(m.shifted(region.len as isize));
                } else {
                    dropped.push(m);
                }
            }
            (new_text.to_string(), shifted, Vec::new(), dropped, cursor)
        }
    };

    let (mentions, stale): (Vec<_>, Vec<_>) = shifted
        .into_iter()
        .partition(|m| span_matches(&display_text, m, tag));
    dropped.extend(stale);

    EditOutcome {
        kind,
        display_text,
        mentions,
        touched,
        dropped,
        cursor,
    }
}

/// True if the span's substring reads exactly `tag + label`
pub fn span_matches(text: &str, span: &MentionSpan, tag: &str) -> bool {
    let expected_len = char_len(tag) + char_len(&span.label);
    if span.len() != expected_len || span.end > char_len(text) {
        return false;
    }
    let found = slice(text, span.start, span.end);
    found.strip_prefix(tag) == Some(span.label.as_str())
}

// =============================================================================
// Tests
// =============================================================================
