//! Character-offset helpers
//!
//! Every offset in this crate is a char index (Unicode scalar value), never a
//! byte index. These helpers convert at the boundary so `&str` slicing never
//! lands inside a multi-byte char.

use std::ops::Range;

/// Length of `text` in chars
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of char index `idx`, clamped to the end of `text`
pub fn byte_offset(text: &str, idx: usize) -> usize {
    text.char_indices()
        .nth(idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Char-indexed slice `[start, end)`, clamped to the text bounds
pub fn slice(text: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Char index of the last occurrence of `needle` in `haystack`
pub fn rfind(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .rfind(needle)
        .map(|byte| char_len(&haystack[..byte]))
}

/// Copy of `text` with the given char ranges removed
///
/// Ranges must be sorted by start and must not overlap.
pub fn remove_ranges(text: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut ranges = ranges.iter().filter(|r| !r.is_empty()).peekable();

    for (idx, ch) in text.chars().enumerate() {
        while ranges.peek().is_some_and(|r| r.end <= idx) {
            ranges.next();
        }
        if ranges.peek().is_some_and(|r| r.contains(&idx)) {
            continue;
        }
        out.push(ch);
    }
    out
}
