//! Buffer scanner: finds the mention being typed at the tail of the buffer.
//!
//! The caret is assumed to sit at the end of the buffer, so a mention is only
//! detected while text is being appended. [`scan_at`] widens the contract for
//! hosts that track a real caret by scanning the prefix that ends at it.

use crate::trigger::Trigger;
use tracing::trace;

/// An in-progress mention at the end of the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMention {
    /// Text typed after the opener, possibly empty.
    pub query: String,
    /// Byte offset of the marker character.
    pub start_offset: usize,
    /// Byte length of the opener (`@` is 1, `@[` is 2).
    pub opener_len: usize,
}

impl ActiveMention {
    /// Byte offset just past the query.
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.opener_len + self.query.len()
    }
}

/// Returns the mention being typed at the end of `buffer`, if any.
///
/// Patterns are tried most specific first (bracket form before the plain
/// token form); the first match wins.
pub fn scan(trigger: &Trigger, buffer: &str) -> Option<ActiveMention> {
    for pattern in trigger.active_patterns() {
        let Some(caps) = pattern.regex.captures(buffer) else {
            continue;
        };
        let query = caps.get(1).map_or("", |m| m.as_str());
        let start_offset = buffer.len() - pattern.opener_len - query.len();
        trace!(
            kind = %trigger.kind(),
            query,
            start_offset,
            "active mention at buffer tail"
        );
        return Some(ActiveMention {
            query: query.to_string(),
            start_offset,
            opener_len: pattern.opener_len,
        });
    }
    None
}

/// Like [`scan`], but treats `cursor` as the end of the text.
///
/// `cursor` is clamped to the buffer and moved back to the nearest char
/// boundary.
pub fn scan_at(trigger: &Trigger, buffer: &str, cursor: usize) -> Option<ActiveMention> {
    let mut cursor = cursor.min(buffer.len());
    while !buffer.is_char_boundary(cursor) {
        cursor -= 1;
    }
    scan(trigger, &buffer[..cursor])
}
