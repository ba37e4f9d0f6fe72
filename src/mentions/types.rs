//! Core data types shared by every mention component
//!
//! All offsets are character indices into the display text (see `text.rs`).

use serde::{Deserialize, Serialize};

// =============================================================================
// Options
// =============================================================================

/// A candidate entity supplied by the host (`{ value, label }`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MentionOption {
    /// Stable identity, persisted inside the draft text
    pub value: String,
    /// Human readable name, shown after the tag in the display text
    pub label: String,
}

impl MentionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

// =============================================================================
// Mention Spans
// =============================================================================

/// A committed mention occupying `[start, end)` of the display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSpan {
    pub value: String,
    pub label: String,
    /// Inclusive start (char offset)
    pub start: usize,
    /// Exclusive end (char offset)
    pub end: usize,
}

impl MentionSpan {
    /// Span for `option` rendered as `tag + label` starting at `start`
    pub fn at(option: &MentionOption, tag: &str, start: usize) -> Self {
        let len = tag.chars().count() + option.label.chars().count();
        Self {
            value: option.value.clone(),
            label: option.label.clone(),
            start,
            end: start + len,
        }
    }

    /// Length of this span in chars
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `pos` lies inside `[start, end)`
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// The identity pair, without position
    pub fn option(&self) -> MentionOption {
        MentionOption {
            value: self.value.clone(),
            label: self.label.clone(),
        }
    }

    /// Move the span by a signed delta
    pub(crate) fn shifted(mut self, delta: isize) -> Self {
        self.start = self.start.saturating_add_signed(delta);
        self.end = self.end.saturating_add_signed(delta);
        self
    }
}

// =============================================================================
// Change Event
// =============================================================================

/// Payload emitted after every state-affecting change
///
/// `mentions` are ordered by ascending span start. `draft_text` is derived
/// from the display text and spans at emission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MentionChangeValue {
    pub display_text: String,
    pub draft_text: String,
    pub mentions: Vec<MentionOption>,
}
