//! Core type definitions for the mention engine.
//!
//! This crate defines the plain data shared by the engine and its hosts:
//! - [`Entity`]: the opaque thing a mention resolves to (agent, methodology, skill)
//! - [`TriggerKind`]: which trigger family a mention belongs to
//!
//! Scanning, filtering and session logic live in `mention-engine`.

mod entity;
mod kind;

pub use entity::Entity;
pub use kind::TriggerKind;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown trigger kind: {0}")]
    UnknownTriggerKind(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
