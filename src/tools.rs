//! Shared model traversal helpers

use crate::edm::{ConceptualModel, EntityType};

/// An entity type plus its base-type chain, inclusive, most-derived first.
///
/// Used both for entity-set lookup and for store-mapping-fragment lookup.
/// The most-derived-first order is what gives property mappings declared at
/// several inheritance levels a deterministic precedence.
pub fn type_hierarchy<'a>(
    model: &'a ConceptualModel,
    entity_type: &'a EntityType,
) -> Vec<&'a EntityType> {
    let mut types = vec![entity_type];
    let mut current = entity_type;
    while let Some(base_name) = &current.base_type {
        let base = model
            .entity_type(base_name)
            .unwrap_or_else(|| {
                panic!(
                    "base type '{}' of entity type '{}' is not in the conceptual model",
                    base_name, current.name
                )
            });
        types.push(base);
        current = base;
    }
    types
}
