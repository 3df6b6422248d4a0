//! Engine settings, read from TOML.
//!
//! ```toml
//! locale = "de"
//!
//! [[trigger]]
//! kind = "agent"
//! marker = "@"
//! style = "bracketed"
//! legacy_simple_form = true
//!
//! [[trigger]]
//! kind = "skill"
//! marker = "/"
//! style = "slug"
//! require_boundary = true
//! ```
//!
//! Omitting every `[[trigger]]` table selects the standard agent, methodology
//! and skill triggers.

use crate::error::ConfigResult;
use crate::names::{DefaultNames, LocaleNames, NameResolver};
use crate::trigger::{TriggerRegistry, TriggerSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Locale for display names; `None` uses each entity's default name.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default = "TriggerSpec::defaults", rename = "trigger")]
    pub triggers: Vec<TriggerSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: None,
            triggers: TriggerSpec::defaults(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads settings from `path`.
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error rather than a silent fallback, since a broken
    /// trigger table would otherwise misbehave quietly.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No mention config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            "Loaded mention config from {:?} ({} triggers)",
            path,
            config.triggers.len()
        );
        Ok(config)
    }

    /// Validates and compiles the trigger table.
    pub fn registry(&self) -> ConfigResult<TriggerRegistry> {
        TriggerRegistry::new(self.triggers.iter().cloned())
    }

    pub fn name_resolver(&self) -> Box<dyn NameResolver> {
        match self.locale.as_deref() {
            Some(locale) if !locale.trim().is_empty() => Box::new(LocaleNames::new(locale.trim())),
            _ => Box::new(DefaultNames),
        }
    }
}
