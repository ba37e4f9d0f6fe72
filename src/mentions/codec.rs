//! MentionCodec: display text <-> draft text, candidate commit
//!
//! Three forms of the same content:
//! - **Display**: what the user sees, mentions rendered as `@Label`
//! - **Draft**: the durable form persisted by the host, `@[value](Label)`
//! - **Spans**: `MentionSpan` list in display coordinates
//!
//! The draft format is unescaped: a `value` containing `]` or a `label`
//! containing `)` does not survive a round trip.

use regex::Regex;

use crate::mentions::text::{byte_offset, char_len, slice};
use crate::mentions::{MentionChangeValue, MentionOption, MentionSpan};

// =============================================================================
// Types
// =============================================================================

/// Display text and spans recovered from a draft string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoded {
    pub display_text: String,
    pub mentions: Vec<MentionSpan>,
}

/// Result of committing a candidate at the open trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub display_text: String,
    /// All mentions including the new one, sorted by start
    pub mentions: Vec<MentionSpan>,
    /// Where the host should place the caret once the new text is rendered
    pub cursor: usize,
}

// =============================================================================
// MentionCodec
// =============================================================================

/// Codec for one configured tag
#[derive(Debug, Clone)]
pub struct MentionCodec {
    tag: String,
    tag_len: usize,
    /// tag[value](label), tag escaped for literal matching
    draft_re: Regex,
}

impl MentionCodec {
    pub fn new(tag: &str) -> Self {
        let pattern = format!(r"{}\[([^\]]+)\]\(([^)]+)\)", regex::escape(tag));
        let draft_re = Regex::new(&pattern).expect("escaped tag always forms a valid pattern");

        Self {
            tag: tag.to_string(),
            tag_len: char_len(tag),
            draft_re,
        }
    }

    /// `tag[value](label)`
    pub fn draft_mention(&self, option: &MentionOption) -> String {
        format!("{}[{}]({})", self.tag, option.value, option.label)
    }

    /// `tag + label`
    pub fn display_mention(&self, option: &MentionOption) -> String {
        format!("{}{}", self.tag, option.label)
    }

    /// Decode draft (or mixed) text into display text and spans
    ///
    /// Span offsets are tracked through the substitution pass itself, so two
    /// mentions with the same label are anchored to their own positions.
    /// Malformed draft syntax is left as literal text.
    pub fn decode(&self, draft: &str) -> Decoded {
        let mut display_text = String::with_capacity(draft.len());
        let mut display_len = 0usize;
        let mut last = 0usize;
        let mut mentions = Vec::new();

        for cap in self.draft_re.captures_iter(draft) {
            let (Some(full), Some(value), Some(label)) = (cap.get(0), cap.get(1), cap.get(2)) else {
                continue;
            };

            let literal = &draft[last..full.start()];
            display_text.push_str(literal);
            display_len += char_len(literal);

            let option = MentionOption::new(value.as_str(), label.as_str());
            let span = MentionSpan::at(&option, &self.tag, display_len);
            display_text.push_str(&self.display_mention(&option));
            display_len = span.end;

            mentions.push(span);
            last = full.end();
        }
        display_text.push_str(&draft[last..]);

        Decoded {
            display_text,
            mentions,
        }
    }

    /// Encode display text + spans into draft text
    ///
    /// Spans are applied in start order; each one swaps its display substring
    /// for the draft form. Spans that overlap an earlier one or run past the
    /// end of the text are left as plain text.
    pub fn encode(&self, display_text: &str, mentions: &[MentionSpan]) -> String {
        let mut sorted: Vec<&MentionSpan> = mentions.iter().collect();
        sorted.sort_by_key(|m| m.start);

        let text_len = char_len(display_text);
        let mut draft = String::with_capacity(display_text.len() + mentions.len() * 8);
        let mut cursor = 0usize;

        for mention in sorted {
            if mention.start < cursor || mention.end > text_len {
                continue;
            }
            draft.push_str(slice(display_text, cursor, mention.start));
            draft.push_str(&self.draft_mention(&mention.option()));
            cursor = mention.end;
        }
        draft.push_str(&display_text[byte_offset(display_text, cursor)..]);
        draft
    }

    /// Replace the marker at `anchor` with the candidate's display form
    /// followed by a space, and register the new span.
    pub fn commit(
        &self,
        anchor: usize,
        mentions: &[MentionSpan],
        candidate: &MentionOption,
        display_text: &str,
    ) -> Commit {
        let anchor = anchor.min(char_len(display_text));
        let mention_text = self.display_mention(candidate);
        let new_span = MentionSpan::at(candidate, &self.tag, anchor);

        let mut text = String::with_capacity(display_text.len() + mention_text.len() + 1);
        text.push_str(slice(display_text, 0, anchor));
        text.push_str(&mention_text);
        text.push(' ');
        text.push_str(&display_text[byte_offset(display_text, anchor + self.tag_len)..]);

        // Everything after the replaced marker moves right
        let delta = (new_span.len() + 1) as isize - self.tag_len as isize;
        let mut updated: Vec<MentionSpan> = mentions
            .iter()
            .cloned()
            .map(|m| if m.start > anchor { m.shifted(delta) } else { m })
            .collect();

        let cursor = new_span.end + 1;
        updated.push(new_span);
        updated.sort_by_key(|m| m.start);

        Commit {
            display_text: text,
            mentions: updated,
            cursor,
        }
    }

    /// Build the change event for the current text and spans
    pub fn change_value(&self, display_text: &str, mentions: &[MentionSpan]) -> MentionChangeValue {
        let mut sorted: Vec<&MentionSpan> = mentions.iter().collect();
        sorted.sort_by_key(|m| m.start);

        MentionChangeValue {
            display_text: display_text.to_string(),
            draft_text: self.encode(display_text, mentions),
            mentions: sorted.into_iter().map(MentionSpan::option).collect(),
        }
    }
}

impl Default for MentionCodec {
    fn default() -> Self {
        Self::new(crate::mentions::DEFAULT_TAG)
    }
}

// =============================================================================
// Tests
// =============================================================================
