//! Candidate filter.

use crate::names::NameResolver;
use mention_types::Entity;

/// Case-insensitive substring match against the resolved name and the raw id.
///
/// `query_lower` must already be lowercased.
pub(crate) fn matches_query(entity: &Entity, query_lower: &str, names: &dyn NameResolver) -> bool {
    if query_lower.is_empty() {
        return true;
    }
    names
        .display_name(entity)
        .to_lowercase()
        .contains(query_lower)
        || entity.id.to_lowercase().contains(query_lower)
}

/// Returns the entities matching `query`, in provider order.
///
/// An empty query returns every entity. No ranking or sorting happens here;
/// grouping for display is the presentation layer's business.
pub fn filter_candidates(
    entities: &[Entity],
    query: &str,
    names: &dyn NameResolver,
) -> Vec<Entity> {
    if query.is_empty() {
        return entities.to_vec();
    }
    let query_lower = query.to_lowercase();
    entities
        .iter()
        .filter(|entity| matches_query(entity, &query_lower, names))
        .cloned()
        .collect()
}
