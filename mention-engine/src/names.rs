//! Display-name resolution.
//!
//! Entities carry a default display name plus optional localized names in
//! their provider metadata. The same resolver must be used for filtering,
//! insertion and extraction, otherwise inserted mentions stop resolving.

use mention_types::Entity;
use std::borrow::Cow;

/// Resolves the name an entity is searched by and inserted as.
pub trait NameResolver: Send + Sync {
    fn display_name<'a>(&self, entity: &'a Entity) -> Cow<'a, str>;
}

/// Uses `Entity::display_name` as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNames;

impl NameResolver for DefaultNames {
    fn display_name<'a>(&self, entity: &'a Entity) -> Cow<'a, str> {
        Cow::Borrowed(&entity.display_name)
    }
}

/// Reads `/names/<locale>` from entity metadata, falling back to the
/// default display name when the entity has no translation.
#[derive(Debug, Clone)]
pub struct LocaleNames {
    pointer: String,
}

impl LocaleNames {
    pub fn new(locale: &str) -> Self {
        Self {
            pointer: format!("/names/{locale}"),
        }
    }
}

impl NameResolver for LocaleNames {
    fn display_name<'a>(&self, entity: &'a Entity) -> Cow<'a, str> {
        match entity.get_str(&self.pointer) {
            Some(name) if !name.trim().is_empty() => Cow::Borrowed(name),
            _ => Cow::Borrowed(&entity.display_name),
        }
    }
}
