//! Configuration types and defaults for a mentions field

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default trigger marker
pub const DEFAULT_TAG: &str = "@";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum MentionError {
    /// The trigger marker must contain at least one character
    EmptyTag,
    /// Config could not be parsed
    InvalidConfig(String),
}

impl fmt::Display for MentionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MentionError::EmptyTag => write!(f, "Mention tag must not be empty"),
            MentionError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for MentionError {}

// =============================================================================
// MentionConfig
// =============================================================================

/// Mentions field configuration
///
/// Wire names are camelCase (`isTextarea`) to match the JS props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MentionConfig {
    /// Trigger marker. Default: "@"
    pub tag: String,
    /// Multi-line surface. Also makes a newline a valid boundary before the marker. Default: false
    pub is_textarea: bool,
    /// Optional caption rendered above the input
    pub label: Option<String>,
    /// Suppresses input and selection events. Default: false
    pub disabled: bool,
    /// Log every transition to the browser console. Default: false
    pub debug: bool,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            is_textarea: false,
            label: None,
            disabled: false,
            debug: false,
        }
    }
}

impl MentionConfig {
    /// Config with a custom trigger marker, everything else default
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Parse from a JSON object, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, MentionError> {
        let config: MentionConfig = serde_json::from_str(json)
            .map_err(|e| MentionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MentionError> {
        if self.tag.is_empty() {
            return Err(MentionError::EmptyTag);
        }
        Ok(())
    }

    /// Which editing surface the host should render
    pub fn input_kind(&self) -> &'static str {
        if self.is_textarea {
            "textarea"
        } else {
            "input"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MentionConfig::default();
        assert_eq!(config.tag, "@");
        assert!(!config.is_textarea);
        assert!(config.label.is_none());
        assert!(!config.disabled);
        assert_eq!(config.input_kind(), "input");
    }

    #[test]
    fn test_from_json_partial() {
        let config = MentionConfig::from_json(r##"{ "tag": "#", "isTextarea": true }"##).unwrap();
        assert_eq!(config.tag, "#");
        assert!(config.is_textarea);
        assert!(!config.disabled);
        assert_eq!(config.input_kind(), "textarea");
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = MentionConfig::from_json("{}").unwrap();
        assert_eq!(config, MentionConfig::default());
    }

    #[test]
    fn test_empty_tag_rejected() {
        let err = MentionConfig::from_json(r#"{ "tag": "" }"#).unwrap_err();
        assert_eq!(err, MentionError::EmptyTag);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = MentionConfig::from_json("{ tag: ").unwrap_err();
        assert!(matches!(err, MentionError::InvalidConfig(_)));
    }
}
