//! MentionsField: JS binding around `MentionTracker`
//!
//! The host renders the `<input>`/`<textarea>` and the suggestion popup, feeds
//! every input event to `handleInput`, and applies the returned caret request
//! after it has re-rendered the text.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::mentions::{
    MentionChangeValue, MentionConfig, MentionOption, MentionTracker, SuggestionSession,
    Transition,
};

/// Result handed back to JS for every transition
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOutcome {
    /// Change event (also delivered to `onChange`)
    pub change: Option<MentionChangeValue>,
    /// Caret position to apply once the new text is rendered
    pub cursor: Option<usize>,
    /// Filtered suggestions; empty means hide the popup
    pub suggestions: Vec<MentionOption>,
    pub session: SuggestionSession,
}

#[wasm_bindgen]
pub struct MentionsField {
    inner: MentionTracker,
    on_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl MentionsField {
    /// Create a field from `options` (`[{ value, label }]`), an optional
    /// config object and an optional draft value.
    #[wasm_bindgen(constructor)]
    pub fn new(
        options: JsValue,
        config: JsValue,
        value: Option<String>,
    ) -> Result<MentionsField, JsValue> {
        let options: Vec<MentionOption> = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?;

        let config: MentionConfig = if config.is_undefined() || config.is_null() {
            MentionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let inner = MentionTracker::new(config, options, value.as_deref().unwrap_or_default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(MentionsField {
            inner,
            on_change: None,
        })
    }

    /// Register the change callback; it immediately receives the current state
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.on_change = Some(callback);
        let change = self.inner.change_value();
        self.emit(&change);
    }

    /// Feed an input event: the new text and the caret (selectionStart)
    ///
    /// `cursor` is a char index. `selectionStart` counts UTF-16 code units, so
    /// callers must convert it when the text contains astral-plane characters.
    #[wasm_bindgen(js_name = handleInput)]
    pub fn handle_input(&mut self, text: &str, cursor: usize) -> Result<JsValue, JsValue> {
        let transition = self.inner.handle_input(text, cursor);
        self.finish("handleInput", transition)
    }

    /// Commit the suggestion at `index` of the current list
    #[wasm_bindgen(js_name = selectSuggestion)]
    pub fn select_suggestion(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let transition = self.inner.select_index(index);
        self.finish("selectSuggestion", transition)
    }

    /// Commit an explicit `{ value, label }` option
    #[wasm_bindgen(js_name = selectOption)]
    pub fn select_option(&mut self, option: JsValue) -> Result<JsValue, JsValue> {
        let option: MentionOption = serde_wasm_bindgen::from_value(option)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse option: {}", e)))?;
        let transition = self.inner.select(&option);
        self.finish("selectOption", transition)
    }

    /// Replace the content with a new draft value
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, value: &str) -> Result<JsValue, JsValue> {
        let transition = self.inner.set_value(value);
        self.finish("setValue", transition)
    }

    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options: Vec<MentionOption> = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?;
        self.inner.set_options(options);
        Ok(())
    }

    #[wasm_bindgen(js_name = setDisabled)]
    pub fn set_disabled(&mut self, disabled: bool) {
        self.inner.set_disabled(disabled);
    }

    #[wasm_bindgen(js_name = displayText)]
    pub fn display_text(&self) -> String {
        self.inner.display_text().to_string()
    }

    #[wasm_bindgen(js_name = draftText)]
    pub fn draft_text(&self) -> String {
        self.inner.draft_text()
    }

    /// Current change payload `{ displayText, draftText, mentions }`
    #[wasm_bindgen(js_name = changeValue)]
    pub fn change_value(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.change_value())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Committed spans `[{ value, label, start, end }]`
    #[wasm_bindgen]
    pub fn mentions(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.mentions())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen]
    pub fn suggestions(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.candidates())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = isComposing)]
    pub fn is_composing(&self) -> bool {
        self.inner.session().is_composing()
    }

    #[wasm_bindgen]
    pub fn label(&self) -> Option<String> {
        self.inner.config().label.clone()
    }

    #[wasm_bindgen(js_name = isTextarea)]
    pub fn is_textarea(&self) -> bool {
        self.inner.config().is_textarea
    }

    #[wasm_bindgen(js_name = isDisabled)]
    pub fn is_disabled(&self) -> bool {
        self.inner.config().disabled
    }

    /// "textarea" or "input"
    #[wasm_bindgen(js_name = inputKind)]
    pub fn input_kind(&self) -> String {
        self.inner.config().input_kind().to_string()
    }
}

impl MentionsField {
    /// Rust-side access to the tracker
    pub fn tracker(&self) -> &MentionTracker {
        &self.inner
    }

    /// Snapshot of the transition for JS
    pub fn outcome(&self, transition: Transition) -> FieldOutcome {
        FieldOutcome {
            change: transition.change,
            cursor: transition.cursor,
            suggestions: self.inner.candidates().to_vec(),
            session: self.inner.session().clone(),
        }
    }

    fn finish(&self, action: &str, transition: Transition) -> Result<JsValue, JsValue> {
        if self.inner.config().debug {
            let line = format!(
                "[MentionsField] {}: changed={} cursor={:?} session={:?} suggestions={}",
                action,
                transition.change.is_some(),
                transition.cursor,
                self.inner.session(),
                self.inner.candidates().len()
            );
            web_sys::console::log_1(&line.into());
        }

        if let Some(change) = &transition.change {
            self.emit(change);
        }

        serde_wasm_bindgen::to_value(&self.outcome(transition))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    fn emit(&self, change: &MentionChangeValue) {
        let Some(callback) = &self.on_change else {
            return;
        };
        let payload = match serde_wasm_bindgen::to_value(change) {
            Ok(v) => v,
            Err(e) => {
                let line = format!("[MentionsField] Serialization failed: {:?}", e);
                web_sys::console::error_1(&line.into());
                return;
            }
        };
        if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
            web_sys::console::error_1(&format!("[MentionsField] onChange threw: {:?}", e).into());
        }
    }
}
