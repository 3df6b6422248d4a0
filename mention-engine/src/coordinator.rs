//! Multi-trigger coordinator.
//!
//! Owns one session per configured trigger. Every buffer change goes to every
//! session; each scans independently. Keys go to the sessions in priority
//! order (agent, methodology, skill) and the first open session that consumes
//! a key stops the chain. Only when nothing consumed it does the host's own
//! key handling run.

use crate::config::EngineConfig;
use crate::error::ConfigResult;
use crate::extract::{extract_all, strip_all};
use crate::names::NameResolver;
use crate::provider::{EntityProvider, Submission, SubmissionBoundary};
use crate::session::{Commit, KeyOutcome, MentionKey, MentionSession, SessionView};
use crate::trigger::TriggerRegistry;
use mention_types::{Entity, TriggerKind};
use std::collections::BTreeMap;
use tracing::debug;

pub struct MentionCoordinator {
    sessions: Vec<MentionSession>,
    names: Box<dyn NameResolver>,
}

impl std::fmt::Debug for MentionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentionCoordinator")
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

impl MentionCoordinator {
    /// Builds a coordinator from settings, validating the trigger table.
    pub fn new(config: &EngineConfig) -> ConfigResult<Self> {
        Ok(Self::from_registry(config.registry()?, config.name_resolver()))
    }

    pub fn from_registry(registry: TriggerRegistry, names: Box<dyn NameResolver>) -> Self {
        let sessions = registry
            .into_triggers()
            .into_iter()
            .map(MentionSession::new)
            .collect();
        Self { sessions, names }
    }

    pub fn names(&self) -> &dyn NameResolver {
        self.names.as_ref()
    }

    pub fn sessions(&self) -> &[MentionSession] {
        &self.sessions
    }

    pub fn session(&self, kind: TriggerKind) -> Option<&MentionSession> {
        self.sessions.iter().find(|s| s.kind() == kind)
    }

    /// The first open session in priority order.
    pub fn open_session(&self) -> Option<&MentionSession> {
        self.sessions.iter().find(|s| s.is_open())
    }

    pub fn views(&self) -> Vec<SessionView<'_>> {
        self.sessions.iter().map(MentionSession::view).collect()
    }

    /// Feeds a new buffer version to every session.
    ///
    /// Must be called for every edit, in edit order.
    pub fn on_buffer_changed(&mut self, buffer: &str, provider: &dyn EntityProvider) {
        let names = self.names.as_ref();
        for session in &mut self.sessions {
            session.on_buffer_changed(buffer, provider, names);
        }
    }

    /// Offers `key` to the sessions in priority order.
    pub fn handle_key(&mut self, key: MentionKey, buffer: &str) -> KeyOutcome {
        let names = self.names.as_ref();
        for session in self.sessions.iter_mut().filter(|s| s.is_open()) {
            let outcome = session.handle_key(key, buffer, names);
            if outcome.is_consumed() {
                return outcome;
            }
        }
        KeyOutcome::Ignored
    }

    /// Commits `entity` for the `kind` session (a click in the dropdown).
    pub fn select(&mut self, kind: TriggerKind, entity: &Entity, buffer: &str) -> Option<Commit> {
        let names = self.names.as_ref();
        self.sessions
            .iter_mut()
            .find(|s| s.kind() == kind)
            .and_then(|session| session.select(entity, buffer, names))
    }

    /// Closes the `kind` session (a click outside the dropdown).
    pub fn close(&mut self, kind: TriggerKind) {
        if let Some(session) = self.sessions.iter_mut().find(|s| s.kind() == kind) {
            session.close();
        }
    }

    pub fn close_all(&mut self) {
        for session in &mut self.sessions {
            session.close();
        }
    }

    /// Resolves and strips every trigger's mentions from `buffer`.
    ///
    /// Triggers run in priority order. Each one extracts from, then strips,
    /// the text left by the previous one, so a methodology marker written
    /// inside an agent's bracketed name is gone before methodologies are
    /// scanned.
    pub fn prepare_submission(&self, buffer: &str, provider: &dyn EntityProvider) -> Submission {
        let names = self.names.as_ref();
        let mut text = buffer.to_string();
        let mut entities = BTreeMap::new();

        for session in &self.sessions {
            let trigger = session.trigger();
            let candidates = provider.list_all(trigger.kind());
            let found = extract_all(&text, &candidates, trigger, names);
            text = strip_all(&text, trigger);
            entities.insert(trigger.kind(), found);
        }

        debug!(
            resolved = entities.values().map(Vec::len).sum::<usize>(),
            "prepared submission"
        );
        Submission { text, entities }
    }

    /// Closes every session and hands the prepared submission to `boundary`.
    pub fn submit(
        &mut self,
        buffer: &str,
        provider: &dyn EntityProvider,
        boundary: &mut dyn SubmissionBoundary,
    ) {
        self.close_all();
        boundary.on_submit(self.prepare_submission(buffer, provider));
    }
}
