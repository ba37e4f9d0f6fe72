//! MentionsCore: Inline Mention Tracking for Text Inputs
//!
//! A Rust/WASM implementation of the mentions field core: free text with
//! structured `@mentions` typed inline, an autocomplete list while a mention
//! is being composed, and a durable draft encoding emitted on every change.
//!
//! # Architecture
//!
//! ## Mention Components
//! - `types.rs` - Options, mention spans and the change event payload
//! - `config.rs` - MentionConfig: tag, surface and debug settings
//! - `text.rs` - Character-offset helpers (offsets are char indices, not bytes)
//! - `classifier.rs` - EditClassifier: deletion vs insertion, touched spans, repair
//! - `trigger.rs` - TriggerDetector: open marker + query before the cursor
//! - `filter.rs` - SuggestionFilter: case-insensitive label filtering
//! - `codec.rs` - MentionCodec: display text <-> draft text, candidate commit
//! - `tracker.rs` - MentionTracker: the session state machine
//! - `wasm.rs` - MentionsField: the JS-facing wrapper
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { MentionsField } from 'mentions-core';
//!
//! await init();
//!
//! const field = new MentionsField(
//!   [{ value: 'u1', label: 'Alice' }, { value: 'u2', label: 'Bob' }],
//!   { tag: '@', isTextarea: false },
//!   'hi @[u1](Alice) bye'
//! );
//!
//! field.onChange((change) => console.log(change.draftText));
//!
//! // Feed every input event: new text + selectionStart
//! const outcome = field.handleInput(input.value, input.selectionStart);
//! renderPopup(outcome.suggestions);
//!
//! // On click in the popup
//! const { cursor } = field.selectSuggestion(0);
//! input.value = field.displayText();
//! input.setSelectionRange(cursor, cursor);
//! ```

pub mod mentions;

pub use mentions::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("mentions-core v{}", env!("CARGO_PKG_VERSION"))
}
