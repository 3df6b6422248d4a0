use serde::{Deserialize, Serialize};

/// A mentionable entity supplied by an external provider.
///
/// The engine only relies on `id` and `display_name`. Anything else the
/// provider knows about the entity (category, icon, localized names) rides
/// along in `data` and is never interpreted by scanning or filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}

impl Entity {
    /// Creates an entity with no extra data.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            data: serde_json::Value::Null,
        }
    }

    /// Replaces the provider metadata.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/names/de").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Parses an entity from its JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
