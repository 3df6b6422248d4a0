//! Extraction and removal of completed mentions.
//!
//! Both passes look at the whole finalized buffer, not just its tail, and are
//! independent of any live session.

use crate::names::NameResolver;
use crate::trigger::{MentionForm, Trigger};
use mention_types::Entity;
use regex::Captures;
use std::borrow::Cow;
use std::collections::HashSet;
use std::ops::Range;

/// Punctuation that may trail a slug without being part of it ("see #five-whys.").
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\'', '"'];

/// A completed mention found in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionMatch {
    /// Byte range from the marker to the end of the mention.
    pub range: Range<usize>,
    /// The name or id written after the marker.
    pub capture: String,
    pub form: MentionForm,
}

/// Finds every completed mention of `trigger` in `buffer`, in buffer order.
///
/// Plain tokens that sit inside a bracketed mention belong to the bracket and
/// are not reported separately.
pub fn completed_mentions(buffer: &str, trigger: &Trigger) -> Vec<MentionMatch> {
    let marker_len = trigger.marker().len_utf8();
    let mut found: Vec<MentionMatch> = Vec::new();

    for pattern in trigger.completed_patterns() {
        for caps in pattern.regex.captures_iter(buffer) {
            let (Some(whole), Some(capture)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            // The boundary group may have consumed one whitespace char.
            let start = match pattern.form {
                MentionForm::Bracketed => capture.start() - marker_len - 1,
                MentionForm::Simple => capture.start() - marker_len,
            };
            let range = start..whole.end();

            let inside_bracket = found
                .iter()
                .any(|m| m.form == MentionForm::Bracketed && m.range.contains(&range.start));
            if pattern.form == MentionForm::Simple && inside_bracket {
                continue;
            }
            found.push(MentionMatch {
                range,
                capture: capture.as_str().to_string(),
                form: pattern.form,
            });
        }
    }

    found.sort_by_key(|m| m.range.start);
    found
}

fn resolve<'a>(
    capture: &str,
    entities: &'a [Entity],
    trigger: &Trigger,
    names: &dyn NameResolver,
) -> Option<&'a Entity> {
    let exact = entities
        .iter()
        .find(|entity| trigger.resolves_to(capture, entity, names));
    if exact.is_some() {
        return exact;
    }
    let trimmed = capture.trim_end_matches(TRAILING_PUNCTUATION);
    if trimmed.len() == capture.len() {
        return None;
    }
    entities
        .iter()
        .find(|entity| trigger.resolves_to(trimmed, entity, names))
}

/// Resolves every completed mention in `buffer` against `entities`.
///
/// Returns each entity once, in order of first appearance. Captures that match
/// no entity are ordinary prose (a hashtag, say) and are skipped.
pub fn extract_all(
    buffer: &str,
    entities: &[Entity],
    trigger: &Trigger,
    names: &dyn NameResolver,
) -> Vec<Entity> {
    let mut seen = HashSet::new();
    completed_mentions(buffer, trigger)
        .iter()
        .filter_map(|m| resolve(&m.capture, entities, trigger, names))
        .filter(|entity| seen.insert(entity.id.clone()))
        .cloned()
        .collect()
}

/// A mention that took its leading whitespace with it leaves one space behind;
/// one glued to the previous word leaves nothing.
fn replacement(caps: &Captures<'_>) -> &'static str {
    if caps[0].starts_with(char::is_whitespace) { " " } else { "" }
}

fn strip_once<'a>(buffer: &'a str, trigger: &Trigger) -> Cow<'a, str> {
    let mut text = Cow::Borrowed(buffer);
    for pattern in trigger.completed_patterns() {
        let replaced = match pattern.regex.replace_all(&text, replacement) {
            Cow::Owned(replaced) => Some(replaced),
            Cow::Borrowed(_) => None,
        };
        if let Some(replaced) = replaced {
            text = Cow::Owned(replaced);
        }
    }
    text
}

/// Removes every completed mention of `trigger`, then collapses whitespace.
///
/// A mention anchored on whitespace becomes a single space; one glued to
/// the preceding text is removed outright.
/// Removal repeats until nothing matches, so the result is a fixed point:
/// stripping it again changes nothing.
pub fn strip_all(buffer: &str, trigger: &Trigger) -> String {
    let mut text = buffer.to_string();
    // Every replacement shortens the text, so this terminates.
    loop {
        let next = match strip_once(&text, trigger) {
            Cow::Owned(next) => next,
            Cow::Borrowed(_) => break,
        };
        text = next;
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
