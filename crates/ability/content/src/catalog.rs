//! Name-interned catalogs of definitions.
//!
//! Content files refer to abilities, attributes, and effects by name; the
//! catalogs assign each name a stable sequential index at load time, and
//! everything downstream (cooldown buckets, attribute keys, effect
//! dispatch) keys on those ids.

use std::collections::HashMap;

use ability_core::{
    AbilityDefinition, AbilityId, AttributeId, AttributeSet, AttributeSpec, EffectId,
};

/// Interns ability and effect names and stores assembled definitions.
#[derive(Debug, Default)]
pub struct AbilityCatalog {
    definitions: Vec<AbilityDefinition>,
    by_name: HashMap<String, AbilityId>,
    effect_names: Vec<String>,
    effects_by_name: HashMap<String, EffectId>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `definition` under its name, assigning (and writing back) the
    /// interned id. Registering an existing name replaces its definition
    /// and keeps the id.
    pub fn register(&mut self, mut definition: AbilityDefinition) -> AbilityId {
        if let Some(&id) = self.by_name.get(&definition.name) {
            definition.id = id;
            self.definitions[id.0 as usize] = definition;
            return id;
        }
        let id = AbilityId(self.definitions.len() as u32);
        definition.id = id;
        self.by_name.insert(definition.name.clone(), id);
        self.definitions.push(definition);
        id
    }

    /// Interns an effect name, assigning an opaque handle on first sight.
    pub fn intern_effect(&mut self, name: &str) -> EffectId {
        if let Some(&id) = self.effects_by_name.get(name) {
            return id;
        }
        let id = EffectId(self.effect_names.len() as u32);
        self.effect_names.push(name.to_owned());
        self.effects_by_name.insert(name.to_owned(), id);
        id
    }

    pub fn get(&self, id: AbilityId) -> Option<&AbilityDefinition> {
        self.definitions.get(id.0 as usize)
    }

    pub fn lookup(&self, name: &str) -> Option<AbilityId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&AbilityDefinition> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    pub fn effect_name(&self, id: EffectId) -> Option<&str> {
        self.effect_names.get(id.0 as usize).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Interns attribute names and stores their configured specs.
#[derive(Debug, Default)]
pub struct AttributeCatalog {
    specs: Vec<AttributeSpec>,
    names: Vec<String>,
    by_name: HashMap<String, AttributeId>,
}

impl AttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, storing its base value and per-second drift.
    /// Re-registering a name replaces the spec and keeps the id.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        base_value: f32,
        regen_per_second: f32,
    ) -> AttributeId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            self.specs[id.0 as usize] =
                AttributeSpec::new(id, base_value).with_regen(regen_per_second);
            return id;
        }
        let id = AttributeId(self.specs.len() as u32);
        self.specs
            .push(AttributeSpec::new(id, base_value).with_regen(regen_per_second));
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<AttributeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: AttributeId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn spec(&self, id: AttributeId) -> Option<AttributeSpec> {
        self.specs.get(id.0 as usize).copied()
    }

    pub fn specs(&self) -> &[AttributeSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Builds a live attribute store populated from every registered spec.
    pub fn build_set(&self) -> AttributeSet {
        AttributeSet::new(self.specs.iter().copied())
    }
}
