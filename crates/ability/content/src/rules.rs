//! Data-driven activation rules.
//!
//! A [`RuleTable`] holds per-ability rule data loaded from content files;
//! [`AbilityRules`] binds a table to a tag source and implements the core's
//! rules oracle: activation is gated by affordable costs and target
//! presence, validity by required target tags, and costs are paid as direct
//! base-value deductions sourced by the ability.

use std::collections::HashMap;

use ability_core::{
    AbilityDefinition, AbilityId, AbilityOracle, AttributeId, AttributeSet, EntityId, SourceId,
};
use serde::{Deserialize, Serialize};

use crate::tags::TagSource;

/// One resource deduction paid on cast completion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub attribute: AttributeId,
    pub amount: f32,
}

/// Rule data for a single ability.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityRule {
    /// Deductions applied on completion; activation requires every one to
    /// be affordable.
    #[serde(default)]
    pub costs: Vec<ResourceCost>,

    /// Whether activation needs an explicit target entity.
    #[serde(default)]
    pub requires_target: bool,

    /// Tags a candidate must carry to be a legitimate recipient.
    #[serde(default)]
    pub required_target_tags: Vec<String>,
}

/// Per-ability rule storage. Abilities without an entry have no
/// requirements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: HashMap<AbilityId, AbilityRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ability: AbilityId, rule: AbilityRule) {
        self.rules.insert(ability, rule);
    }

    pub fn get(&self, ability: AbilityId) -> Option<&AbilityRule> {
        self.rules.get(&ability)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Rules oracle backed by a [`RuleTable`] and a tag source.
#[derive(Debug)]
pub struct AbilityRules<T: TagSource> {
    table: RuleTable,
    tags: T,
}

/// Modifier/mutation source identity derived from the paying ability, so a
/// later `remove_modifiers_from_source` for the ability cannot collide with
/// other sources.
fn cost_source(ability: AbilityId) -> SourceId {
    SourceId(ability.0 as u64)
}

impl<T: TagSource> AbilityRules<T> {
    pub fn new(table: RuleTable, tags: T) -> Self {
        Self { table, tags }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn tags(&self) -> &T {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut T {
        &mut self.tags
    }

    fn can_afford(&self, rule: &AbilityRule, attributes: &AttributeSet) -> bool {
        rule.costs
            .iter()
            .all(|cost| attributes.value(cost.attribute) >= cost.amount)
    }
}

impl<T: TagSource> AbilityOracle for AbilityRules<T> {
    fn can_activate(
        &self,
        ability: &AbilityDefinition,
        _caster: EntityId,
        target: Option<EntityId>,
        attributes: &AttributeSet,
    ) -> bool {
        let Some(rule) = self.table.get(ability.id) else {
            return true;
        };
        if rule.requires_target && target.is_none() {
            return false;
        }
        self.can_afford(rule, attributes)
    }

    fn is_valid_target(
        &self,
        ability: &AbilityDefinition,
        _caster: EntityId,
        candidate: EntityId,
    ) -> bool {
        let Some(rule) = self.table.get(ability.id) else {
            return true;
        };
        rule.required_target_tags
            .iter()
            .all(|tag| self.tags.has_tag(candidate, tag))
    }

    fn apply_cost(
        &self,
        ability: &AbilityDefinition,
        caster: EntityId,
        attributes: &mut AttributeSet,
    ) {
        let Some(rule) = self.table.get(ability.id) else {
            return;
        };
        for cost in &rule.costs {
            tracing::trace!(
                ability = %ability.id,
                %caster,
                attribute = %cost.attribute,
                amount = cost.amount,
                "cost applied"
            );
            attributes.modify_base(cost.attribute, -cost.amount, cost_source(ability.id));
        }
    }
}
