//! TriggerDetector: open trigger marker + query before the cursor
//!
//! A marker opens a suggestion session when it is the last occurrence of the
//! tag before the cursor, starts the text or follows a space, and is not part
//! of an already committed mention.

use serde::{Deserialize, Serialize};

use crate::mentions::text::{char_len, rfind, slice};
use crate::mentions::MentionSpan;

/// An open trigger: marker offset and the text typed after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Char offset of the marker in the display text
    pub anchor: usize,
    /// Text between the marker and the cursor
    pub query: String,
}

/// Trigger detection for one configured tag
#[derive(Debug, Clone)]
pub struct TriggerDetector {
    tag: String,
    tag_len: usize,
    /// Newline also counts as a boundary (multi-line surfaces)
    newline_boundary: bool,
}

impl TriggerDetector {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            tag_len: char_len(tag),
            newline_boundary: false,
        }
    }

    /// Accept a newline before the marker as well as a space
    pub fn with_newline_boundary(mut self, enabled: bool) -> Self {
        self.newline_boundary = enabled;
        self
    }

    /// Detect an open trigger before `cursor`
    pub fn detect(&self, text: &str, cursor: usize, mentions: &[MentionSpan]) -> Option<Trigger> {
        let cursor = cursor.min(char_len(text));
        let before_cursor = slice(text, 0, cursor);
        let marker = rfind(before_cursor, &self.tag)?;

        if marker > 0 {
            let preceding = before_cursor.chars().nth(marker - 1);
            let at_boundary = match preceding {
                Some(' ') => true,
                Some('\n') => self.newline_boundary,
                _ => false,
            };
            if !at_boundary {
                return None;
            }
        }

        if mentions.iter().any(|m| m.contains(marker)) {
            return None;
        }

        Some(Trigger {
            anchor: marker,
            query: slice(before_cursor, marker + self.tag_len, cursor).to_string(),
        })
    }
}

/// Single-line detection with an explicit tag
pub fn detect_trigger(
    text: &str,
    cursor: usize,
    tag: &str,
    mentions: &[MentionSpan],
) -> Option<Trigger> {
    TriggerDetector::new(tag).detect(text, cursor, mentions)
}
