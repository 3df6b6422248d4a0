//! Host-side plumbing for driving the mention engine outside a UI.
//!
//! Plays the part of the text-input surface: it reports every keystroke to a
//! [`MentionCoordinator`], installs committed buffers, and falls back to
//! submit-on-Enter when no session consumes the key.

use anyhow::{bail, Context, Result};
use mention_engine::{
    Commit, EngineConfig, EntityProvider, KeyOutcome, MentionCoordinator, MentionKey,
    StaticCatalog, Submission,
};
use mention_types::{Entity, TriggerKind};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Parses a key name as accepted on the command line.
pub fn parse_key(name: &str) -> Result<MentionKey> {
    let key = match name.trim().to_ascii_lowercase().as_str() {
        "up" => MentionKey::Up,
        "down" => MentionKey::Down,
        "tab" => MentionKey::Tab,
        "enter" | "return" => MentionKey::Enter,
        "esc" | "escape" => MentionKey::Escape,
        other => bail!("unknown key {other:?} (expected up, down, tab, enter or esc)"),
    };
    Ok(key)
}

pub fn parse_keys(names: &[String]) -> Result<Vec<MentionKey>> {
    names.iter().map(|name| parse_key(name)).collect()
}

/// Loads engine settings and the entity catalog.
///
/// Without a catalog path the catalog is empty; without a config path the
/// standard triggers are used.
pub fn load_engine(
    config: Option<&Path>,
    catalog: Option<&Path>,
) -> Result<(MentionCoordinator, StaticCatalog)> {
    let config = match config {
        Some(path) => EngineConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let catalog = match catalog {
        Some(path) => StaticCatalog::load_from(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => StaticCatalog::new(),
    };
    let mentions = MentionCoordinator::new(&config).context("invalid trigger configuration")?;
    info!(
        "Engine ready: {} triggers, {} agents, {} methodologies, {} skills",
        mentions.sessions().len(),
        catalog.entities(TriggerKind::Agent).len(),
        catalog.entities(TriggerKind::Methodology).len(),
        catalog.entities(TriggerKind::Skill).len(),
    );
    Ok((mentions, catalog))
}

/// The dropdown a UI would be showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenPopup {
    pub kind: TriggerKind,
    pub query: String,
    pub candidates: Vec<Entity>,
    pub selected_index: usize,
}

/// What happened while typing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypingReport {
    pub buffer: String,
    pub popup: Option<OpenPopup>,
    pub commits: Vec<Commit>,
    /// Set when an unconsumed Enter submitted the buffer.
    pub submission: Option<Submission>,
}

fn open_popup(mentions: &MentionCoordinator) -> Option<OpenPopup> {
    let view = mentions.open_session()?.view();
    Some(OpenPopup {
        kind: view.kind,
        query: view.query.to_string(),
        candidates: view.candidates.to_vec(),
        selected_index: view.selected_index,
    })
}

/// Types `text` one character at a time, then presses `keys`.
///
/// An Enter that no session consumes submits the buffer and ends the run.
pub fn simulate_typing(
    mentions: &mut MentionCoordinator,
    provider: &dyn EntityProvider,
    text: &str,
    keys: &[MentionKey],
) -> TypingReport {
    let mut report = TypingReport::default();

    for ch in text.chars() {
        report.buffer.push(ch);
        mentions.on_buffer_changed(&report.buffer, provider);
    }

    for &key in keys {
        match mentions.handle_key(key, &report.buffer) {
            KeyOutcome::Committed(commit) => {
                report.buffer = commit.buffer.clone();
                report.commits.push(commit);
                mentions.on_buffer_changed(&report.buffer, provider);
            }
            KeyOutcome::Handled => {}
            KeyOutcome::Ignored if key == MentionKey::Enter => {
                debug!("enter not consumed, submitting");
                let mut submitted = None;
                mentions.submit(&report.buffer, provider, &mut |s: Submission| submitted = Some(s));
                report.submission = submitted;
                break;
            }
            KeyOutcome::Ignored => debug!(?key, "key not consumed"),
        }
    }

    report.popup = open_popup(mentions);
    report
}

/// Runs the submission pass over finished text.
pub fn submit_text(
    mentions: &mut MentionCoordinator,
    provider: &dyn EntityProvider,
    text: &str,
) -> Submission {
    let mut submitted = Submission::default();
    mentions.submit(text, provider, &mut |s: Submission| submitted = s);
    submitted
}
