//! End-to-end session scenarios for MentionTracker
//!
//! Every scenario drives the tracker only through input/select events, the
//! way a host would, and checks the span invariant after each step.

use super::classifier::span_matches;
use super::text::char_len;
use super::*;

fn options() -> Vec<MentionOption> {
    vec![
        MentionOption::new("u1", "Alice"),
        MentionOption::new("u2", "Bob"),
        MentionOption::new("u3", "Alexandra"),
    ]
}

fn tracker_with(config: MentionConfig, value: &str) -> MentionTracker {
    MentionTracker::new(config, options(), value).unwrap()
}

fn tracker() -> MentionTracker {
    tracker_with(MentionConfig::default(), "")
}

/// Append `s` one char at a time with the caret at the end
fn type_text(t: &mut MentionTracker, s: &str) {
    for ch in s.chars() {
        let mut text = t.display_text().to_string();
        text.push(ch);
        let cursor = char_len(&text);
        t.handle_input(&text, cursor);
    }
}

/// Spans sorted, non-overlapping, and each reading `tag + label`
fn assert_invariants(t: &MentionTracker) {
    let tag = t.config().tag.clone();
    let mentions = t.mentions();
    for pair in mentions.windows(2) {
        assert!(pair[0].end <= pair[1].start, "overlap or unsorted: {:?}", pair);
    }
    for m in mentions {
        assert!(
            span_matches(t.display_text(), m, &tag),
            "span {:?} does not match text {:?}",
            m,
            t.display_text()
        );
    }
}

// =============================================================================
// Commit & initialization
// =============================================================================

#[test]
fn test_commit_from_empty_text() {
    let mut t = tracker();
    type_text(&mut t, "@");
    assert_eq!(t.session(), &SuggestionSession::Composing { anchor: 0, query: String::new() });

    let transition = t.select(&MentionOption::new("u1", "Alice"));
    let change = transition.change.unwrap();

    assert_eq!(change.display_text, "@Alice ");
    assert_eq!(change.draft_text, "@[u1](Alice) ");
    assert_eq!(
        t.mentions(),
        &[MentionSpan { value: "u1".into(), label: "Alice".into(), start: 0, end: 6 }]
    );
    assert_eq!(transition.cursor, Some(7));
    assert_invariants(&t);
}

#[test]
fn test_initialize_from_draft() {
    let t = tracker_with(MentionConfig::default(), "hi @[u1](Alice) bye");
    assert_eq!(t.display_text(), "hi @Alice bye");
    assert_eq!(
        t.mentions(),
        &[MentionSpan { value: "u1".into(), label: "Alice".into(), start: 3, end: 9 }]
    );

    let change = t.change_value();
    assert_eq!(change.draft_text, "hi @[u1](Alice) bye");
    assert_eq!(change.mentions, vec![MentionOption::new("u1", "Alice")]);
    assert_invariants(&t);
}

#[test]
fn test_query_text_stays_after_marker_replacement() {
    let mut t = tracker();
    type_text(&mut t, "hi @al");
    let transition = t.select_index(0);

    assert_eq!(transition.change.unwrap().display_text, "hi @Alice al");
    assert_eq!(transition.cursor, Some(10));
    assert_invariants(&t);
}

// =============================================================================
// Trigger boundary
// =============================================================================

#[test]
fn test_trigger_requires_boundary() {
    let mut t = tracker();
    t.handle_input("hi@jo", 5);
    assert_eq!(t.session(), &SuggestionSession::Idle);
    assert!(t.candidates().is_empty());

    let mut t = tracker();
    t.handle_input("hi @jo", 6);
    assert_eq!(t.session(), &SuggestionSession::Composing { anchor: 3, query: "jo".into() });
}

#[test]
fn test_textarea_newline_boundary() {
    let config = MentionConfig {
        is_textarea: true,
        ..MentionConfig::default()
    };
    let mut t = tracker_with(config, "");
    t.handle_input("hi\n@", 4);
    assert_eq!(t.session().anchor(), Some(3));

    let mut t = tracker();
    t.handle_input("hi\n@", 4);
    assert_eq!(t.session(), &SuggestionSession::Idle);
}

#[test]
fn test_custom_tag() {
    let mut t = tracker_with(MentionConfig::with_tag("#"), "");
    type_text(&mut t, "see #bo");
    assert_eq!(t.candidates(), &[MentionOption::new("u2", "Bob")]);

    let change = t.select_index(0).change.unwrap();
    assert_eq!(change.display_text, "see #Bob bo");
    assert_eq!(change.draft_text, "see #[u2](Bob) bo");

    // '@' is plain text under a '#' tag
    type_text(&mut t, " @");
    assert_eq!(t.session(), &SuggestionSession::Idle);
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_filter_case_insensitive() {
    let opts = vec![
        MentionOption::new("option-1", "Option 1"),
        MentionOption::new("option-2", "Option 2"),
    ];
    let mut t = MentionTracker::new(MentionConfig::default(), opts.clone(), "").unwrap();

    t.handle_input("@option", 7);
    assert_eq!(t.candidates(), opts.as_slice());

    t.handle_input("@1", 2);
    assert_eq!(t.candidates(), &opts[..1]);
}

// =============================================================================
// Deletion atomicity
// =============================================================================

#[test]
fn test_deleting_any_char_of_mention_removes_it() {
    // "hey, @Alexandra ok" -> mention spans [5, 15)
    let start = tracker_with(MentionConfig::default(), "hey, @[u3](Alexandra) ok");
    assert_eq!(start.mentions()[0].start, 5);
    assert_eq!(start.mentions()[0].end, 15);

    for idx in 5..15 {
        let mut t = start.clone();
        let text: String = t
            .display_text()
            .chars()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c)
            .collect();

        let transition = t.handle_input(&text, idx);
        assert!(t.mentions().is_empty(), "mention survived deleting index {}", idx);
        assert_eq!(t.display_text(), "hey,  ok", "bad repair deleting index {}", idx);
        assert_eq!(transition.cursor, Some(5));
        assert_eq!(t.session(), &SuggestionSession::Idle);
    }
}

#[test]
fn test_deleting_space_after_mention_keeps_it() {
    let mut t = tracker_with(MentionConfig::default(), "hey, @[u3](Alexandra) ok");
    t.handle_input("hey, @Alexandraok", 15);
    assert_eq!(t.mentions().len(), 1);
    assert_eq!(t.draft_text(), "hey, @[u3](Alexandra)ok");
    assert_invariants(&t);
}

// =============================================================================
// Span invariant across a full session
// =============================================================================

#[test]
fn test_span_invariant_through_session() {
    let mut t = tracker();

    type_text(&mut t, "@");
    t.select(&MentionOption::new("u1", "Alice"));
    assert_invariants(&t);

    type_text(&mut t, "@");
    assert_eq!(t.session().anchor(), Some(7));
    t.select(&MentionOption::new("u2", "Bob"));
    assert_eq!(t.display_text(), "@Alice @Bob ");
    assert_eq!(t.draft_text(), "@[u1](Alice) @[u2](Bob) ");
    assert_invariants(&t);

    // paste a prefix in front of everything
    t.handle_input("Hey @Alice @Bob ", 4);
    assert_eq!(t.mentions()[0].start, 4);
    assert_eq!(t.mentions()[1].start, 11);
    assert_eq!(t.session(), &SuggestionSession::Idle);
    assert_invariants(&t);

    // backspace the 'o' in Bob
    let transition = t.handle_input("Hey @Alice @Bb ", 13);
    assert_eq!(t.display_text(), "Hey @Alice  ");
    assert_eq!(transition.cursor, Some(11));
    assert_eq!(t.draft_text(), "Hey @[u1](Alice)  ");
    assert_invariants(&t);

    // type inside Alice: the span is dropped, the text stays
    t.handle_input("Hey @Alxice  ", 8);
    assert!(t.mentions().is_empty());
    assert_eq!(t.draft_text(), "Hey @Alxice  ");
    assert_invariants(&t);
}

#[test]
fn test_duplicate_labels_round_trip() {
    let mut t = tracker();
    type_text(&mut t, "@");
    t.select_index(0);
    type_text(&mut t, "and @");
    t.select_index(0);

    let draft = t.draft_text();
    assert_eq!(draft, "@[u1](Alice) and @[u1](Alice) ");

    let restored = tracker_with(MentionConfig::default(), &draft);
    assert_eq!(restored.display_text(), t.display_text());
    assert_eq!(restored.mentions(), t.mentions());
}

#[test]
fn test_round_trip_mixed_text() {
    let codec = MentionCodec::default();
    let cases = [
        "",
        "plain text",
        "@[u1](Alice)",
        "a @[u1](Alice) b @[u2](Bob) c",
        "email me@host and @[u3](Alexandra)!",
        "ünïcödé @[ü](Zoë) ✓",
    ];

    for draft in cases {
        let decoded = codec.decode(draft);
        assert_eq!(codec.encode(&decoded.display_text, &decoded.mentions), draft);

        let again = codec.decode(&codec.encode(&decoded.display_text, &decoded.mentions));
        assert_eq!(again, decoded);
    }
}

#[test]
fn test_change_events_only_on_change() {
    let mut t = tracker();
    assert!(t.handle_input("hi", 2).change.is_some());
    // caret move without text change
    assert!(t.handle_input("hi", 1).change.is_none());
}
