mod common;

use common::{agent, methodology, skill};
use mention_engine::{scan, scan_at, ActiveMention};
use pretty_assertions::assert_eq;

// ── Tail anchoring ───────────────────────────────────────────────

#[test]
fn bare_marker_is_active_with_empty_query() {
    let active = scan(&agent(), "hello @").unwrap();
    assert_eq!(
        active,
        ActiveMention {
            query: String::new(),
            start_offset: 6,
            opener_len: 1,
        }
    );
}

#[test]
fn marker_not_at_tail_is_inactive() {
    assert_eq!(scan(&agent(), "@alice is here"), None);
    assert_eq!(scan(&methodology(), "#rca is done"), None);
    assert_eq!(scan(&skill(), "/search then stop"), None);
}

#[test]
fn plain_query_is_captured() {
    let active = scan(&agent(), "Please ask @ab").unwrap();
    assert_eq!(active.query, "ab");
    assert_eq!(active.start_offset, 11);
    assert_eq!(active.end_offset(), 14);
}

#[test]
fn empty_buffer_is_inactive() {
    assert_eq!(scan(&agent(), ""), None);
}

#[test]
fn only_the_last_marker_counts() {
    let active = scan(&methodology(), "#one and #tw").unwrap();
    assert_eq!(active.query, "tw");
    assert_eq!(active.start_offset, 9);
}

// ── Bracket form ─────────────────────────────────────────────────

#[test]
fn bracket_form_allows_spaces_and_wins_over_plain_form() {
    let active = scan(&agent(), "ask @[Code Rev").unwrap();
    assert_eq!(active.query, "Code Rev");
    assert_eq!(active.start_offset, 4);
    assert_eq!(active.opener_len, 2);
}

#[test]
fn closed_bracket_is_not_active() {
    assert_eq!(scan(&agent(), "ask @[Abdul] "), None);
    assert_eq!(scan(&agent(), "ask @[Abdul]"), None);
}

#[test]
fn whitespace_ends_plain_query() {
    assert_eq!(scan(&agent(), "ask @ab "), None);
}

// ── Boundary anchoring ───────────────────────────────────────────

#[test]
fn anchored_trigger_needs_whitespace_or_start() {
    assert_eq!(scan(&skill(), "hello/bob"), None);
    assert_eq!(scan(&skill(), "check https://example.com/foo"), None);
    assert_eq!(scan(&skill(), "/we").unwrap().start_offset, 0);
    assert_eq!(scan(&skill(), "run /we").unwrap().query, "we");
}

#[test]
fn unanchored_trigger_fires_mid_word() {
    let active = scan(&agent(), "hello@bob").unwrap();
    assert_eq!(active.query, "bob");
    assert_eq!(active.start_offset, 5);
}

#[test]
fn anchored_offset_points_at_marker_not_whitespace() {
    let active = scan(&skill(), "a\t/g").unwrap();
    assert_eq!(active.start_offset, 2);
}

// ── Multi-byte text ──────────────────────────────────────────────

#[test]
fn offsets_are_byte_offsets() {
    let active = scan(&agent(), "héllo @Zoë").unwrap();
    assert_eq!(active.query, "Zoë");
    assert_eq!(active.start_offset, "héllo ".len());
}

// ── Explicit cursor ──────────────────────────────────────────────

#[test]
fn scan_at_treats_cursor_as_tail() {
    let active = scan_at(&agent(), "ask @ab and more", 7).unwrap();
    assert_eq!(active.query, "ab");
    assert_eq!(active.start_offset, 4);
}

#[test]
fn scan_at_clamps_into_char_boundary() {
    // Offset 8 falls inside the two-byte 'ë'.
    let active = scan_at(&agent(), "ask @Zoë", 8).unwrap();
    assert_eq!(active.query, "Zo");
    assert!(scan_at(&agent(), "ask @ab", 100).is_some());
}
