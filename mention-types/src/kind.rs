use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The trigger family a mention belongs to.
///
/// Variant order is the fixed priority order used for keyboard dispatch and
/// for the submission pass: agents first, then methodologies, then skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Agent,
    Methodology,
    Skill,
}

impl TriggerKind {
    /// All kinds in priority order.
    pub const ALL: [TriggerKind; 3] = [Self::Agent, Self::Methodology, Self::Skill];

    /// Returns the lowercase name used in config files and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Methodology => "methodology",
            Self::Skill => "skill",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "agent" => Ok(Self::Agent),
            "methodology" => Ok(Self::Methodology),
            "skill" => Ok(Self::Skill),
            other => Err(Error::UnknownTriggerKind(other.to_string())),
        }
    }
}
