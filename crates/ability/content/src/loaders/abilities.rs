//! Ability book loader.

use std::path::Path;

use ability_core::{AbilityDefinition, AbilityId, Dimension, LayerMask, TargetingMode};
use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityCatalog, AttributeCatalog};
use crate::loaders::{LoadResult, read_file};
use crate::rules::{AbilityRule, ResourceCost, RuleTable};

/// One resource cost, referencing its attribute by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    pub attribute: String,
    pub amount: f32,
}

/// One ability in an ability book: definition fields plus rule data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub name: String,
    #[serde(default)]
    pub cast_time: f32,
    #[serde(default)]
    pub cooldown: f32,
    pub targeting: TargetingMode,
    #[serde(default = "AbilityEntry::default_dimension")]
    pub dimension: Dimension,
    #[serde(default)]
    pub radius: f32,
    /// Raw layer bits; defaults to every layer.
    #[serde(default = "AbilityEntry::default_layers")]
    pub targetable_layers: u32,
    /// Effect names, interned on load.
    #[serde(default)]
    pub effects: Vec<String>,

    #[serde(default)]
    pub costs: Vec<CostEntry>,
    #[serde(default)]
    pub requires_target: bool,
    #[serde(default)]
    pub required_target_tags: Vec<String>,
}

impl AbilityEntry {
    fn default_dimension() -> Dimension {
        Dimension::ThreeD
    }

    fn default_layers() -> u32 {
        u32::MAX
    }
}

/// Ability book structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityBook {
    pub abilities: Vec<AbilityEntry>,
}

/// Loader for ability books from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load an ability book from a RON file.
    ///
    /// Ability and effect names are interned into a fresh catalog; cost
    /// attributes resolve against `attributes`, and referencing an unknown
    /// attribute is an error.
    pub fn load(
        path: &Path,
        attributes: &AttributeCatalog,
    ) -> LoadResult<(AbilityCatalog, RuleTable)> {
        let content = read_file(path)?;
        let book: AbilityBook = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability book RON: {}", e))?;

        let mut catalog = AbilityCatalog::new();
        let mut rules = RuleTable::new();

        for entry in book.abilities {
            let effects: Vec<_> = entry
                .effects
                .iter()
                .map(|name| catalog.intern_effect(name))
                .collect();

            // The catalog assigns the real id on registration.
            let id = catalog.register(
                AbilityDefinition::new(AbilityId(0), entry.name.clone())
                    .with_cast_time(entry.cast_time)
                    .with_cooldown(entry.cooldown)
                    .with_targeting(entry.targeting)
                    .with_dimension(entry.dimension)
                    .with_radius(entry.radius)
                    .with_targetable_layers(LayerMask::from_bits_retain(entry.targetable_layers))
                    .with_effects(effects),
            );

            let mut costs = Vec::with_capacity(entry.costs.len());
            for cost in &entry.costs {
                let attribute = attributes.lookup(&cost.attribute).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Ability '{}' costs unknown attribute '{}'",
                        entry.name,
                        cost.attribute
                    )
                })?;
                costs.push(ResourceCost {
                    attribute,
                    amount: cost.amount,
                });
            }

            rules.insert(
                id,
                AbilityRule {
                    costs,
                    requires_target: entry.requires_target,
                    required_target_tags: entry.required_target_tags,
                },
            );
        }

        tracing::debug!(path = %path.display(), abilities = catalog.len(), "ability book loaded");
        Ok((catalog, rules))
    }
}
