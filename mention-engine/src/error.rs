//! Error types for engine configuration.
//!
//! Scanning, filtering, sessions and extraction never fail at runtime; every
//! fallible path lives at construction time, when trigger settings and entity
//! catalogs are loaded and validated.

use mention_types::TriggerKind;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building or loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No trigger was configured.
    #[error("no triggers configured")]
    NoTriggers,

    /// The same trigger kind appears twice.
    #[error("trigger kind {0} is configured more than once")]
    DuplicateKind(TriggerKind),

    /// Two triggers share a marker character.
    #[error("marker {0:?} is used by more than one trigger")]
    DuplicateMarker(char),

    /// The marker cannot begin a mention (whitespace, alphanumeric, or reserved).
    #[error("marker {0:?} cannot start a mention")]
    InvalidMarker(char),

    /// A trigger pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Engine settings are not valid TOML or do not match the schema.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// An entity catalog is not valid JSON or does not match the schema.
    #[error("catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
