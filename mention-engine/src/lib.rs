//! Mention engine for free-form text input.
//!
//! Lets a user type a trigger character (`@`, `#`, `/`) to summon, filter,
//! navigate and insert a reference to an entity, and later extract and strip
//! those references before the text is submitted.
//!
//! ## Components
//!
//! - **Triggers**: [`TriggerSpec`] describes one trigger family; [`Trigger`]
//!   compiles it into the patterns everything else runs
//! - **Scanner**: [`scan`] finds the mention being typed at the buffer tail
//! - **Filter**: [`filter_candidates`] narrows a provider's entities by query
//! - **Session**: [`MentionSession`] is the open/closed state machine for one trigger
//! - **Extraction**: [`extract_all`] and [`strip_all`] handle finished text
//! - **Coordinator**: [`MentionCoordinator`] runs one session per trigger and
//!   routes keys and submissions
//!
//! All operations are synchronous. Buffer offsets are UTF-8 byte offsets.
//!
//! # Example
//!
//! ```
//! use mention_engine::{EngineConfig, KeyOutcome, MentionCoordinator, MentionKey, StaticCatalog};
//! use mention_types::{Entity, TriggerKind};
//!
//! let catalog = StaticCatalog::new().with(
//!     TriggerKind::Agent,
//!     [Entity::new("alice-1", "Alice"), Entity::new("abdul-1", "Abdul")],
//! );
//! let mut mentions = MentionCoordinator::new(&EngineConfig::default()).unwrap();
//!
//! let buffer = "Please ask @ab";
//! mentions.on_buffer_changed(buffer, &catalog);
//!
//! let KeyOutcome::Committed(commit) = mentions.handle_key(MentionKey::Enter, buffer) else {
//!     panic!("expected a commit");
//! };
//! assert_eq!(commit.buffer, "Please ask @[Abdul] ");
//! assert_eq!(commit.entity.id, "abdul-1");
//! ```

mod config;
mod coordinator;
mod error;
mod extract;
mod filter;
mod names;
mod provider;
mod scanner;
mod session;
mod trigger;

pub use config::EngineConfig;
pub use coordinator::MentionCoordinator;
pub use error::{ConfigError, ConfigResult};
pub use extract::{completed_mentions, extract_all, strip_all, MentionMatch};
pub use filter::filter_candidates;
pub use names::{DefaultNames, LocaleNames, NameResolver};
pub use provider::{EntityProvider, StaticCatalog, Submission, SubmissionBoundary};
pub use scanner::{scan, scan_at, ActiveMention};
pub use session::{
    Commit, KeyOutcome, MentionKey, MentionSession, OpenState, SessionState, SessionView,
};
pub use trigger::{InsertionStyle, MentionForm, Trigger, TriggerRegistry, TriggerSpec};
