//! Trigger configuration.
//!
//! A [`TriggerSpec`] is the declarative description of one trigger family
//! (marker character, insertion style, anchoring). [`Trigger`] is its compiled
//! form: the spec plus the named patterns the scanner and the extraction pass
//! run against the buffer. The engine never hard-codes a marker; every rule
//! below is derived from the spec, so adding a trigger means adding a spec.
//!
//! Two insertion styles exist:
//! - [`InsertionStyle::Bracketed`] inserts `@[Display Name]`, which keeps
//!   multi-word names intact. A plain `@name` token is still understood when
//!   `legacy_simple_form` is set.
//! - [`InsertionStyle::Slug`] inserts `#display-name`, with whitespace runs
//!   folded into hyphens.

use crate::error::{ConfigError, ConfigResult};
use crate::filter::matches_query;
use crate::names::NameResolver;
use mention_types::{Entity, TriggerKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a selected entity is written back into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertionStyle {
    /// `<marker>[<name>]`
    Bracketed,
    /// `<marker><name-with-hyphens>`
    Slug,
}

/// Declarative description of one trigger family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub kind: TriggerKind,
    pub marker: char,
    pub style: InsertionStyle,
    /// Only fire at start-of-string or after whitespace.
    #[serde(default)]
    pub require_boundary: bool,
    /// Also accept the single-token form next to the bracket form.
    #[serde(default)]
    pub legacy_simple_form: bool,
}

impl TriggerSpec {
    /// `@` agents: bracketed, fires anywhere, plain `@name` still recognised.
    pub fn agent() -> Self {
        Self {
            kind: TriggerKind::Agent,
            marker: '@',
            style: InsertionStyle::Bracketed,
            require_boundary: false,
            legacy_simple_form: true,
        }
    }

    /// `#` methodologies: slug form, fires anywhere.
    pub fn methodology() -> Self {
        Self {
            kind: TriggerKind::Methodology,
            marker: '#',
            style: InsertionStyle::Slug,
            require_boundary: false,
            legacy_simple_form: false,
        }
    }

    /// `/` skills: slug form, only after whitespace so URLs and paths stay inert.
    pub fn skill() -> Self {
        Self {
            kind: TriggerKind::Skill,
            marker: '/',
            style: InsertionStyle::Slug,
            require_boundary: true,
            legacy_simple_form: false,
        }
    }

    /// The standard trigger table, in priority order.
    pub fn defaults() -> Vec<Self> {
        vec![Self::agent(), Self::methodology(), Self::skill()]
    }
}

/// Which textual form a completed mention was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionForm {
    Bracketed,
    Simple,
}

/// Suffix pattern for an in-progress mention.
#[derive(Debug, Clone)]
pub(crate) struct ActivePattern {
    pub regex: Regex,
    /// Bytes between the start of the marker and the start of the query.
    pub opener_len: usize,
}

/// Pattern for a completed mention anywhere in the buffer.
#[derive(Debug, Clone)]
pub(crate) struct CompletedPattern {
    pub regex: Regex,
    pub form: MentionForm,
}

/// A compiled trigger: its spec plus the patterns derived from it.
#[derive(Debug, Clone)]
pub struct Trigger {
    spec: TriggerSpec,
    /// Markers of triggers stripped before this one at submission.
    reserved: Vec<char>,
    /// Most specific first.
    active: Vec<ActivePattern>,
    completed: Vec<CompletedPattern>,
}

fn validate_marker(marker: char) -> ConfigResult<()> {
    if marker.is_whitespace() || marker.is_alphanumeric() || matches!(marker, '[' | ']' | '-' | '_')
    {
        return Err(ConfigError::InvalidMarker(marker));
    }
    Ok(())
}

impl Trigger {
    /// Validates the marker and compiles the trigger's patterns.
    pub fn compile(spec: TriggerSpec) -> ConfigResult<Self> {
        Self::compile_after(spec, &[])
    }

    /// Compiles a trigger that runs after triggers using `earlier` markers.
    ///
    /// Those markers are dropped from inserted names. Otherwise an earlier
    /// trigger's extraction pass would claim part of this trigger's mention
    /// (a skill named "C# Review" must not become `/C#-Review`).
    pub fn compile_after(spec: TriggerSpec, earlier: &[char]) -> ConfigResult<Self> {
        validate_marker(spec.marker)?;

        let m = regex::escape(&spec.marker.to_string());
        let boundary = if spec.require_boundary { r"(?:^|\s)" } else { "" };
        let marker_len = spec.marker.len_utf8();

        let mut active = Vec::new();
        let mut completed = Vec::new();

        match spec.style {
            InsertionStyle::Bracketed => {
                active.push(ActivePattern {
                    regex: Regex::new(&format!(r"{boundary}{m}\[([^\]]*)$"))?,
                    opener_len: marker_len + 1,
                });
                completed.push(CompletedPattern {
                    regex: Regex::new(&format!(r"{boundary}{m}\[([^\]]+)\]"))?,
                    form: MentionForm::Bracketed,
                });
                if spec.legacy_simple_form {
                    active.push(ActivePattern {
                        regex: Regex::new(&format!(r"{boundary}{m}([^\s{m}\[\]]*)$"))?,
                        opener_len: marker_len,
                    });
                    // Plain tokens only count at a word boundary, or every email
                    // address would be read as a mention.
                    completed.push(CompletedPattern {
                        regex: Regex::new(&format!(r"(?:^|\s){m}([^\s{m}\[\]]+)"))?,
                        form: MentionForm::Simple,
                    });
                }
            }
            InsertionStyle::Slug => {
                active.push(ActivePattern {
                    regex: Regex::new(&format!(r"{boundary}{m}([^\s{m}]*)$"))?,
                    opener_len: marker_len,
                });
                completed.push(CompletedPattern {
                    regex: Regex::new(&format!(r"{boundary}{m}([^\s{m}]+)"))?,
                    form: MentionForm::Simple,
                });
            }
        }

        let reserved = earlier.iter().copied().filter(|c| *c != spec.marker).collect();
        Ok(Self {
            spec,
            reserved,
            active,
            completed,
        })
    }

    #[must_use]
    pub fn spec(&self) -> &TriggerSpec {
        &self.spec
    }

    #[must_use]
    pub fn kind(&self) -> TriggerKind {
        self.spec.kind
    }

    #[must_use]
    pub fn marker(&self) -> char {
        self.spec.marker
    }

    pub(crate) fn active_patterns(&self) -> &[ActivePattern] {
        &self.active
    }

    pub(crate) fn completed_patterns(&self) -> &[CompletedPattern] {
        &self.completed
    }

    fn is_reserved(&self, c: char) -> bool {
        self.reserved.contains(&c)
    }

    /// The text that stands for `name` after the marker (without brackets).
    ///
    /// May be empty when `name` consists only of characters the insertion
    /// style cannot carry.
    pub fn mention_text(&self, name: &str) -> String {
        match self.spec.style {
            InsertionStyle::Bracketed => name
                .chars()
                .filter(|c| *c != ']' && !self.is_reserved(*c))
                .collect::<String>()
                .trim()
                .to_string(),
            InsertionStyle::Slug => name
                .split_whitespace()
                .map(|word| {
                    word.chars()
                        .filter(|c| *c != self.spec.marker && !self.is_reserved(*c))
                        .collect::<String>()
                })
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
                .join("-"),
        }
    }

    /// Literal text spliced into the buffer when an entity named `name` is chosen.
    pub fn format_insertion(&self, name: &str) -> String {
        let text = self.mention_text(name);
        self.wrap(&text)
    }

    fn wrap(&self, text: &str) -> String {
        match self.spec.style {
            InsertionStyle::Bracketed => format!("{}[{text}]", self.spec.marker),
            InsertionStyle::Slug => format!("{}{text}", self.spec.marker),
        }
    }

    /// The insertion for `entity`.
    ///
    /// Falls back to the id when the name leaves nothing after the marker.
    /// Returns `None` when the id does too, since such a mention could never
    /// be extracted again.
    pub fn insertion_for(&self, entity: &Entity, names: &dyn NameResolver) -> Option<String> {
        let name = names.display_name(entity);
        [self.mention_text(&name), self.mention_text(&entity.id)]
            .into_iter()
            .find(|text| !text.is_empty())
            .map(|text| self.wrap(&text))
    }

    /// Whether `entity` is a candidate for an in-progress `query`.
    pub fn matches(&self, entity: &Entity, query: &str, names: &dyn NameResolver) -> bool {
        matches_query(entity, &query.to_lowercase(), names)
    }

    /// Whether a captured mention refers to `entity`.
    ///
    /// Accepts the inserted form of the name, the raw name, the id (raw or in
    /// inserted form), and the name with whitespace removed (the legacy
    /// single-token spelling).
    pub fn resolves_to(&self, capture: &str, entity: &Entity, names: &dyn NameResolver) -> bool {
        let capture = capture.trim().to_lowercase();
        if capture.is_empty() {
            return false;
        }
        let name = names.display_name(entity);
        let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();

        capture == self.mention_text(&name).to_lowercase()
            || capture == name.trim().to_lowercase()
            || capture == entity.id.to_lowercase()
            || capture == self.mention_text(&entity.id).to_lowercase()
            || capture == compact.to_lowercase()
    }
}

/// The validated set of triggers a host runs, in priority order.
#[derive(Debug, Clone)]
pub struct TriggerRegistry {
    triggers: Vec<Trigger>,
}

impl TriggerRegistry {
    /// Validates and compiles `specs`.
    ///
    /// Rejects an empty table, repeated kinds and shared markers. Triggers are
    /// reordered by kind so dispatch order does not depend on config order.
    pub fn new(specs: impl IntoIterator<Item = TriggerSpec>) -> ConfigResult<Self> {
        let mut specs: Vec<TriggerSpec> = specs.into_iter().collect();
        if specs.is_empty() {
            return Err(ConfigError::NoTriggers);
        }
        specs.sort_by_key(|spec| spec.kind);

        let mut kinds = HashSet::new();
        let mut markers = HashSet::new();
        for spec in &specs {
            if !kinds.insert(spec.kind) {
                return Err(ConfigError::DuplicateKind(spec.kind));
            }
            if !markers.insert(spec.marker) {
                return Err(ConfigError::DuplicateMarker(spec.marker));
            }
        }

        let mut earlier = Vec::with_capacity(specs.len());
        let mut triggers = Vec::with_capacity(specs.len());
        for spec in specs {
            let marker = spec.marker;
            triggers.push(Trigger::compile_after(spec, &earlier)?);
            earlier.push(marker);
        }
        Ok(Self { triggers })
    }

    /// Agent, methodology and skill triggers with their default settings.
    pub fn standard() -> ConfigResult<Self> {
        Self::new(TriggerSpec::defaults())
    }

    pub fn get(&self, kind: TriggerKind) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub(crate) fn into_triggers(self) -> Vec<Trigger> {
        self.triggers
    }
}
