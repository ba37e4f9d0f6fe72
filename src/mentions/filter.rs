//! SuggestionFilter: case-insensitive substring match on option labels
//!
//! Binary include/exclude, no scoring. Caller order is preserved and an empty
//! query keeps every option.

use crate::mentions::MentionOption;

/// Filter `options` by `query` against each label
pub fn filter_options(options: &[MentionOption], query: &str) -> Vec<MentionOption> {
    if query.is_empty() {
        return options.to_vec();
    }
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
