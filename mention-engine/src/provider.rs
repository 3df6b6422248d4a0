//! Collaborators on either side of the engine: where entities come from and
//! where submissions go.

use crate::error::ConfigResult;
use mention_types::{Entity, TriggerKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Supplies the full candidate list for a trigger kind.
///
/// The engine asks again on every buffer change while a mention is active and
/// at submission. It never keeps a list between calls.
pub trait EntityProvider {
    fn list_all(&self, kind: TriggerKind) -> Vec<Entity>;
}

impl<F> EntityProvider for F
where
    F: Fn(TriggerKind) -> Vec<Entity>,
{
    fn list_all(&self, kind: TriggerKind) -> Vec<Entity> {
        self(kind)
    }
}

/// An in-memory catalog keyed by trigger kind.
///
/// Serialized as `{"agent": [...], "methodology": [...], "skill": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    entries: BTreeMap<TriggerKind, Vec<Entity>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entities` after any already registered for `kind`.
    #[must_use]
    pub fn with(mut self, kind: TriggerKind, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.entries.entry(kind).or_default().extend(entities);
        self
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn entities(&self, kind: TriggerKind) -> &[Entity] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl EntityProvider for StaticCatalog {
    fn list_all(&self, kind: TriggerKind) -> Vec<Entity> {
        self.entities(kind).to_vec()
    }
}

/// Cleaned text plus the entities its mentions resolved to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submission {
    pub text: String,
    pub entities: BTreeMap<TriggerKind, Vec<Entity>>,
}

impl Submission {
    pub fn entities_for(&self, kind: TriggerKind) -> &[Entity] {
        self.entities.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Receives the submission once the host decides to send.
pub trait SubmissionBoundary {
    fn on_submit(&mut self, submission: Submission);
}

impl<F> SubmissionBoundary for F
where
    F: FnMut(Submission),
{
    fn on_submit(&mut self, submission: Submission) {
        self(submission)
    }
}
