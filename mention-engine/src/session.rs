//! Mention session state machine.
//!
//! One session tracks the in-progress mention for one trigger. It is driven by
//! three kinds of input: buffer changes, key presses, and explicit
//! select/close calls from the presentation layer. The session never edits
//! the host buffer; a commit hands back the proposed new buffer instead.
//!
//! ```text
//! Closed --buffer changed, mention at tail--> Open
//! Open   --buffer changed, mention at tail--> Open   (selection reset if the query changed)
//! Open   --buffer changed, no mention-------> Closed
//! Open   --Up / Down------------------------> Open   (wraps around)
//! Open   --Tab / Enter with a candidate-----> Closed (Commit)
//! Open   --Escape / close()-----------------> Closed
//! ```

use crate::filter::filter_candidates;
use crate::names::NameResolver;
use crate::provider::EntityProvider;
use crate::scanner::{scan, ActiveMention};
use crate::trigger::Trigger;
use mention_types::{Entity, TriggerKind};
use serde::Serialize;
use tracing::{debug, warn};

/// Keys a session reacts to. Hosts map their own key events onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKey {
    Up,
    Down,
    Tab,
    Enter,
    Escape,
    Other,
}

/// A committed selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub kind: TriggerKind,
    pub entity: Entity,
    /// The buffer the host should install.
    pub buffer: String,
    /// Where the host should place the caret (the end of the new buffer).
    pub caret: usize,
}

/// Result of offering a key to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Not consumed; the host handles the key itself.
    Ignored,
    /// Consumed without changing the buffer.
    Handled,
    /// Consumed; the host should install `Commit::buffer`.
    Committed(Commit),
}

impl KeyOutcome {
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// State of an open session.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenState {
    pub query: String,
    pub start_offset: usize,
    pub candidates: Vec<Entity>,
    pub selected_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Closed,
    Open(OpenState),
}

/// What a dropdown needs to render one trigger's session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView<'a> {
    pub kind: TriggerKind,
    pub is_open: bool,
    pub query: &'a str,
    pub candidates: &'a [Entity],
    pub selected_index: usize,
}

/// The in-progress mention for one trigger.
#[derive(Debug, Clone)]
pub struct MentionSession {
    trigger: Trigger,
    state: SessionState,
}

impl MentionSession {
    pub fn new(trigger: Trigger) -> Self {
        Self {
            trigger,
            state: SessionState::Closed,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TriggerKind {
        self.trigger.kind()
    }

    #[must_use]
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    pub fn view(&self) -> SessionView<'_> {
        match &self.state {
            SessionState::Closed => SessionView {
                kind: self.kind(),
                is_open: false,
                query: "",
                candidates: &[],
                selected_index: 0,
            },
            SessionState::Open(open) => SessionView {
                kind: self.kind(),
                is_open: true,
                query: &open.query,
                candidates: &open.candidates,
                selected_index: open.selected_index,
            },
        }
    }

    /// Re-scans `buffer` and updates the session.
    ///
    /// While a mention is active the provider is asked for a fresh list on
    /// every call, so entities it adds or drops show up on the next keystroke.
    pub fn on_buffer_changed(
        &mut self,
        buffer: &str,
        provider: &dyn EntityProvider,
        names: &dyn NameResolver,
    ) {
        let Some(active) = scan(&self.trigger, buffer) else {
            if self.is_open() {
                debug!(kind = %self.kind(), "mention context lost, closing session");
                self.state = SessionState::Closed;
            }
            return;
        };

        let entities = provider.list_all(self.kind());
        let kept_index = match &self.state {
            SessionState::Open(open) => {
                (open.query == active.query).then_some(open.selected_index)
            }
            SessionState::Closed => {
                debug!(
                    kind = %self.kind(),
                    entities = entities.len(),
                    start_offset = active.start_offset,
                    "mention session opened"
                );
                None
            }
        };

        let candidates = filter_candidates(&entities, &active.query, names);
        let selected_index = kept_index
            .map(|index| index.min(candidates.len().saturating_sub(1)))
            .unwrap_or(0);

        self.state = SessionState::Open(OpenState {
            query: active.query,
            start_offset: active.start_offset,
            candidates,
            selected_index,
        });
    }

    /// Offers a key press to the session.
    ///
    /// A closed session ignores everything. Tab/Enter only consume the key
    /// when there is a candidate to commit; otherwise the host's own handling
    /// (newline, submit) runs.
    pub fn handle_key(
        &mut self,
        key: MentionKey,
        buffer: &str,
        names: &dyn NameResolver,
    ) -> KeyOutcome {
        let SessionState::Open(open) = &mut self.state else {
            return KeyOutcome::Ignored;
        };

        match key {
            MentionKey::Down => {
                let len = open.candidates.len();
                if len > 0 {
                    open.selected_index = (open.selected_index + 1) % len;
                }
                KeyOutcome::Handled
            }
            MentionKey::Up => {
                let len = open.candidates.len();
                if len > 0 {
                    open.selected_index = (open.selected_index + len - 1) % len;
                }
                KeyOutcome::Handled
            }
            MentionKey::Tab | MentionKey::Enter => {
                let Some(entity) = open.candidates.get(open.selected_index).cloned() else {
                    return KeyOutcome::Ignored;
                };
                match self.commit(&entity, buffer, names) {
                    Some(commit) => KeyOutcome::Committed(commit),
                    None => KeyOutcome::Ignored,
                }
            }
            MentionKey::Escape => {
                debug!(kind = %self.kind(), "mention session cancelled");
                self.state = SessionState::Closed;
                KeyOutcome::Handled
            }
            MentionKey::Other => KeyOutcome::Ignored,
        }
    }

    /// Commits `entity` chosen directly in the presentation layer.
    ///
    /// Returns `None` when the session is closed or `buffer` no longer ends in
    /// the mention being typed.
    pub fn select(
        &mut self,
        entity: &Entity,
        buffer: &str,
        names: &dyn NameResolver,
    ) -> Option<Commit> {
        if !self.is_open() {
            return None;
        }
        self.commit(entity, buffer, names)
    }

    /// Closes the session without touching the buffer.
    pub fn close(&mut self) {
        if self.is_open() {
            debug!(kind = %self.kind(), "mention session closed");
        }
        self.state = SessionState::Closed;
    }

    /// Splices the formatted mention over the active query and closes.
    ///
    /// The offset recorded at the last buffer change is not trusted: `buffer`
    /// is scanned again, and a buffer that no longer ends in a mention closes
    /// the session without a commit. So does an entity with nothing
    /// insertable in its name or id.
    fn commit(
        &mut self,
        entity: &Entity,
        buffer: &str,
        names: &dyn NameResolver,
    ) -> Option<Commit> {
        let active = scan(&self.trigger, buffer);
        self.state = SessionState::Closed;
        let active = active?;

        let Some(inserted) = self.trigger.insertion_for(entity, names) else {
            warn!(
                kind = %self.kind(),
                entity = %entity.id,
                "entity has no insertable name, commit rejected"
            );
            return None;
        };

        let new_buffer = splice(buffer, &active, &inserted);
        debug!(
            kind = %self.kind(),
            entity = %entity.id,
            "mention committed"
        );
        Some(Commit {
            kind: self.kind(),
            entity: entity.clone(),
            caret: new_buffer.len(),
            buffer: new_buffer,
        })
    }
}

fn splice(buffer: &str, active: &ActiveMention, inserted: &str) -> String {
    let before = &buffer[..active.start_offset];
    let after = &buffer[active.end_offset()..];

    let mut new_buffer = String::with_capacity(before.len() + inserted.len() + 1 + after.len());
    new_buffer.push_str(before);
    new_buffer.push_str(inserted);
    new_buffer.push(' ');
    new_buffer.push_str(after);
    new_buffer
}
