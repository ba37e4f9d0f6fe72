//! MentionTracker: the mentions field session state machine
//!
//! One tracker owns one field's state: display text, committed mentions, the
//! suggestion session and the filtered candidates. Every user action is an
//! explicit `MentionEvent` fed to `apply`, which performs one atomic state
//! transition and reports what the host must do next:
//!
//! - `change`: the change event to forward to the host's `onChange`
//! - `cursor`: a caret position to apply once the new text is rendered
//!
//! # Suggestion session
//! ```text
//! Idle ──valid trigger──▶ Composing { anchor, query }
//!   ▲                         │
//!   └── commit / trigger invalidated / mention-removing deletion
//! ```

use serde::{Deserialize, Serialize};

use crate::mentions::{
    apply_edit, filter_options, MentionChangeValue, MentionCodec, MentionConfig, MentionError,
    MentionOption, MentionSpan, TriggerDetector,
};

// =============================================================================
// Types
// =============================================================================

/// Suggestion session state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SuggestionSession {
    #[default]
    Idle,
    Composing {
        /// Char offset of the open trigger marker
        anchor: usize,
        /// Text typed after the marker
        query: String,
    },
}

impl SuggestionSession {
    pub fn anchor(&self) -> Option<usize> {
        match self {
            SuggestionSession::Idle => None,
            SuggestionSession::Composing { anchor, .. } => Some(*anchor),
        }
    }

    pub fn is_composing(&self) -> bool {
        matches!(self, SuggestionSession::Composing { .. })
    }
}

/// Everything that can happen to a mentions field
#[derive(Debug, Clone, PartialEq)]
pub enum MentionEvent {
    /// The host's text changed; `cursor` is the caret after the edit
    Input { text: String, cursor: usize },
    /// A candidate was picked from the suggestion list
    Select(MentionOption),
    /// Pick the candidate at this index of the current suggestion list
    SelectIndex(usize),
    /// The host supplied a new draft value
    SetValue(String),
    /// The host replaced the option list
    SetOptions(Vec<MentionOption>),
    SetDisabled(bool),
}

/// What a single transition asks of the host
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    /// Change event to emit, if text or mentions changed
    pub change: Option<MentionChangeValue>,
    /// Caret position to apply after re-rendering
    pub cursor: Option<usize>,
}

impl Transition {
    /// Nothing for the host to do
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.change.is_none() && self.cursor.is_none()
    }
}

// =============================================================================
// MentionTracker
// =============================================================================

/// Session state for one mentions field
#[derive(Debug, Clone)]
pub struct MentionTracker {
    config: MentionConfig,
    codec: MentionCodec,
    detector: TriggerDetector,
    options: Vec<MentionOption>,

    // State
    display_text: String,
    mentions: Vec<MentionSpan>,
    session: SuggestionSession,
    candidates: Vec<MentionOption>,
}

impl MentionTracker {
    /// Create a tracker, decoding `value` (draft form) when non-empty
    pub fn new(
        config: MentionConfig,
        options: Vec<MentionOption>,
        value: &str,
    ) -> Result<Self, MentionError> {
        config.validate()?;

        let codec = MentionCodec::new(&config.tag);
        let detector = TriggerDetector::new(&config.tag).with_newline_boundary(config.is_textarea);
        let decoded = codec.decode(value);

        Ok(Self {
            config,
            codec,
            detector,
            options,
            display_text: decoded.display_text,
            mentions: decoded.mentions,
            session: SuggestionSession::Idle,
            candidates: Vec::new(),
        })
    }

    /// Perform one state transition
    pub fn apply(&mut self, event: MentionEvent) -> Transition {
        match event {
            MentionEvent::Input { text, cursor } => self.handle_input(&text, cursor),
            MentionEvent::Select(option) => self.select(&option),
            MentionEvent::SelectIndex(index) => self.select_index(index),
            MentionEvent::SetValue(value) => self.set_value(&value),
            MentionEvent::SetOptions(options) => {
                self.set_options(options);
                Transition::none()
            }
            MentionEvent::SetDisabled(disabled) => {
                self.set_disabled(disabled);
                Transition::none()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// The host's text changed
    pub fn handle_input(&mut self, text: &str, cursor: usize) -> Transition {
        if self.config.disabled {
            return Transition::none();
        }

        let outcome = apply_edit(
            &self.display_text,
            text,
            cursor,
            &self.mentions,
            &self.config.tag,
        );
        let changed =
            outcome.display_text != self.display_text || outcome.mentions != self.mentions;
        let removed = outcome.removed_mentions();
        let cursor = outcome.cursor;

        self.display_text = outcome.display_text;
        self.mentions = outcome.mentions;

        let mut transition = Transition::none();
        if removed {
            // A deletion that ate a mention never opens a session
            self.close_session();
            transition.cursor = Some(cursor);
        } else {
            self.refresh_session(cursor);
        }

        if changed {
            transition.change = Some(self.change_value());
        }
        transition
    }

    /// Commit `option` at the open trigger
    pub fn select(&mut self, option: &MentionOption) -> Transition {
        if self.config.disabled {
            return Transition::none();
        }
        let Some(anchor) = self.session.anchor() else {
            return Transition::none();
        };

        let commit = self.codec.commit(anchor, &self.mentions, option, &self.display_text);
        self.display_text = commit.display_text;
        self.mentions = commit.mentions;
        self.close_session();

        Transition {
            change: Some(self.change_value()),
            cursor: Some(commit.cursor),
        }
    }

    /// Commit the candidate at `index` of the current suggestion list
    pub fn select_index(&mut self, index: usize) -> Transition {
        match self.candidates.get(index).cloned() {
            Some(option) => self.select(&option),
            None => Transition::none(),
        }
    }

    /// Replace the content with a new draft value
    ///
    /// An empty value is ignored. A value that decodes to the current state
    /// only closes the suggestion session and emits nothing, so a host
    /// echoing `draftText` back does not loop.
    pub fn set_value(&mut self, value: &str) -> Transition {
        if value.is_empty() {
            return Transition::none();
        }

        let decoded = self.codec.decode(value);
        if decoded.display_text == self.display_text && decoded.mentions == self.mentions {
            self.close_session();
            return Transition::none();
        }

        self.display_text = decoded.display_text;
        self.mentions = decoded.mentions;
        self.close_session();

        Transition {
            change: Some(self.change_value()),
            cursor: None,
        }
    }

    /// Replace the option list, re-filtering an open session
    pub fn set_options(&mut self, options: Vec<MentionOption>) {
        self.options = options;
        if let SuggestionSession::Composing { query, .. } = &self.session {
            self.candidates = filter_options(&self.options, query);
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.close_session();
        }
    }

    // -------------------------------------------------------------------------
    // Session helpers
    // -------------------------------------------------------------------------

    fn refresh_session(&mut self, cursor: usize) {
        match self.detector.detect(&self.display_text, cursor, &self.mentions) {
            Some(trigger) => {
                self.candidates = filter_options(&self.options, &trigger.query);
                self.session = SuggestionSession::Composing {
                    anchor: trigger.anchor,
                    query: trigger.query,
                };
            }
            None => self.close_session(),
        }
    }

    fn close_session(&mut self) {
        self.session = SuggestionSession::Idle;
        self.candidates.clear();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current change event payload (draft text recomputed)
    pub fn change_value(&self) -> MentionChangeValue {
        self.codec.change_value(&self.display_text, &self.mentions)
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn draft_text(&self) -> String {
        self.codec.encode(&self.display_text, &self.mentions)
    }

    /// Committed mentions, sorted by start
    pub fn mentions(&self) -> &[MentionSpan] {
        &self.mentions
    }

    /// Filtered suggestions; empty means no popup
    pub fn candidates(&self) -> &[MentionOption] {
        &self.candidates
    }

    pub fn session(&self) -> &SuggestionSession {
        &self.session
    }

    pub fn options(&self) -> &[MentionOption] {
        &self.options
    }

    pub fn config(&self) -> &MentionConfig {
        &self.config
    }
}

// =============================================================================
// Tests
// =============================================================================
