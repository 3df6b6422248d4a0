mod common;

use common::{agent, agents, ids, methodologies, methodology, skill, skills};
use mention_engine::{completed_mentions, extract_all, strip_all, DefaultNames, MentionForm};
use mention_types::Entity;
use pretty_assertions::assert_eq;

// ── extract_all ──────────────────────────────────────────────────

#[test]
fn bracketed_mentions_in_order() {
    let found = extract_all(
        "Loop in @[Abdul] and @[Alice] please",
        &agents(),
        &agent(),
        &DefaultNames,
    );
    assert_eq!(ids(&found), vec!["abdul-1", "alice-1"]);
}

#[test]
fn duplicates_collapse_to_first_appearance() {
    let found = extract_all(
        "@[Alice] then @[Abdul] then @[alice] again",
        &agents(),
        &agent(),
        &DefaultNames,
    );
    assert_eq!(ids(&found), vec!["alice-1", "abdul-1"]);
}

#[test]
fn multi_word_bracketed_name() {
    let found = extract_all("ping @[Code Reviewer] now", &agents(), &agent(), &DefaultNames);
    assert_eq!(ids(&found), vec!["rev-9"]);
}

#[test]
fn legacy_plain_agent_token() {
    let found = extract_all(
        "@Alice and @CodeReviewer and @rev-9",
        &agents(),
        &agent(),
        &DefaultNames,
    );
    assert_eq!(ids(&found), vec!["alice-1", "rev-9"]);
}

#[test]
fn plain_and_bracket_forms_interleave_by_position() {
    let found = extract_all("@Abdul then @[Alice]", &agents(), &agent(), &DefaultNames);
    assert_eq!(ids(&found), vec!["abdul-1", "alice-1"]);
}

#[test]
fn email_addresses_are_not_agents() {
    let found = extract_all("mail alice@example.com", &agents(), &agent(), &DefaultNames);
    assert!(found.is_empty());
}

#[test]
fn unresolved_captures_are_skipped() {
    let found = extract_all(
        "#important and #five-whys",
        &methodologies(),
        &methodology(),
        &DefaultNames,
    );
    assert_eq!(ids(&found), vec!["five-whys"]);
}

#[test]
fn slug_resolves_multi_word_name() {
    let found = extract_all(
        "try #Root-Cause-Analysis first",
        &methodologies(),
        &methodology(),
        &DefaultNames,
    );
    assert_eq!(ids(&found), vec!["rca"]);
}

#[test]
fn trailing_punctuation_does_not_block_resolution() {
    let found = extract_all("use #five-whys.", &methodologies(), &methodology(), &DefaultNames);
    assert_eq!(ids(&found), vec!["five-whys"]);
}

#[test]
fn skill_inside_url_is_ignored() {
    let found = extract_all(
        "see https://x.io/web-search and /gdrive",
        &skills(),
        &skill(),
        &DefaultNames,
    );
    assert_eq!(ids(&found), vec!["gdrive"]);
}

#[test]
fn first_matching_entity_wins() {
    let entities = vec![Entity::new("a", "Twin"), Entity::new("b", "Twin")];
    let found = extract_all("@[Twin]", &entities, &agent(), &DefaultNames);
    assert_eq!(ids(&found), vec!["a"]);
}

// ── completed_mentions ───────────────────────────────────────────

#[test]
fn plain_token_inside_bracket_is_not_reported() {
    let found = completed_mentions("x @[Team @lead] y", &agent());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].form, MentionForm::Bracketed);
    assert_eq!(found[0].capture, "Team @lead");
    assert_eq!(found[0].range, 2..15);
}

#[test]
fn anchored_range_starts_at_marker() {
    let found = completed_mentions("run /gdrive", &skill());
    assert_eq!(found[0].range, 4..11);
    assert_eq!(found[0].capture, "gdrive");
}

// ── strip_all ────────────────────────────────────────────────────

#[test]
fn strip_removes_mentions_and_collapses_whitespace() {
    assert_eq!(
        strip_all("Loop in @[Abdul] and @[Alice] please", &agent()),
        "Loop in and please"
    );
}

#[test]
fn strip_removes_unresolvable_mentions_too() {
    assert_eq!(strip_all("tag #important here", &methodology()), "tag here");
}

#[test]
fn strip_keeps_urls_for_anchored_trigger() {
    assert_eq!(
        strip_all("/gdrive open https://x.io/a  now", &skill()),
        "open https://x.io/a now"
    );
}

#[test]
fn strip_of_unanchored_mention_leaves_no_gap() {
    assert_eq!(strip_all("foo@[Bob]bar", &agent()), "foobar");
    assert_eq!(strip_all("see(#rca) now", &methodology()), "see now");
}

#[test]
fn strip_of_anchored_mention_keeps_words_apart() {
    assert_eq!(strip_all("run /gdrive\nnow", &skill()), "run now");
    assert_eq!(strip_all("foo @[Bob]bar", &agent()), "foo bar");
}

#[test]
fn strip_reaches_fixed_point() {
    // Removing "@a" exposes "@b" at a boundary.
    let once = strip_all("@a@b", &agent());
    assert_eq!(once, "");
    assert_eq!(strip_all(&once, &agent()), once);
}

#[test]
fn strip_without_mentions_only_normalizes_whitespace() {
    assert_eq!(strip_all("  plain\n\ntext  ", &agent()), "plain text");
}
