//! Minimal entity classification store.
//!
//! Targeting rules filter candidates by tags ("enemy", "undead", ...). The
//! host engine usually owns classification; this registry is a small
//! self-contained stand-in that satisfies the same queries.

use std::collections::{HashMap, HashSet};

use ability_core::EntityId;

/// Source of entity tags consulted by targeting rules.
pub trait TagSource {
    fn has_tag(&self, entity: EntityId, tag: &str) -> bool;
}

/// Plain in-memory tag store.
#[derive(Debug, Default)]
pub struct TagRegistry {
    tags: HashMap<EntityId, HashSet<String>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, entity: EntityId, tag: impl Into<String>) {
        self.tags.entry(entity).or_default().insert(tag.into());
    }

    pub fn revoke(&mut self, entity: EntityId, tag: &str) {
        if let Some(set) = self.tags.get_mut(&entity) {
            set.remove(tag);
        }
    }
}

impl TagSource for TagRegistry {
    fn has_tag(&self, entity: EntityId, tag: &str) -> bool {
        self.tags
            .get(&entity)
            .is_some_and(|set| set.contains(tag))
    }
}
