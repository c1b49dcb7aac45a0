//! A single numeric stat: base value, modifier list, derived current value.

use crate::types::{AttributeId, SourceId};

use super::modifier::AttributeModifier;

/// Configured entry an attribute store is populated from at entity
/// initialization.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSpec {
    pub attribute: AttributeId,
    pub base_value: f32,

    /// Autonomous per-second drift applied to the base value on each tick.
    /// Negative values decay.
    pub regen_per_second: f32,
}

impl AttributeSpec {
    pub fn new(attribute: AttributeId, base_value: f32) -> Self {
        Self {
            attribute,
            base_value,
            regen_per_second: 0.0,
        }
    }

    #[must_use]
    pub fn with_regen(mut self, per_second: f32) -> Self {
        self.regen_per_second = per_second;
        self
    }
}

/// Net observable change produced by one mutating operation.
///
/// Mutations report their delta; the owning store turns deltas into
/// notifications, so this type never reaches observers directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueChange {
    pub old: f32,
    pub new: f32,
}

/// One stat's state. Invariant: `current_value` is always the fold of the
/// modifier list (in insertion order) over `base_value`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeValue {
    attribute: AttributeId,
    base_value: f32,
    regen_per_second: f32,
    modifiers: Vec<AttributeModifier>,
    current_value: f32,
}

impl AttributeValue {
    pub fn new(spec: AttributeSpec) -> Self {
        Self {
            attribute: spec.attribute,
            base_value: spec.base_value,
            regen_per_second: spec.regen_per_second,
            modifiers: Vec::new(),
            current_value: spec.base_value,
        }
    }

    pub fn attribute(&self) -> AttributeId {
        self.attribute
    }

    pub fn base_value(&self) -> f32 {
        self.base_value
    }

    /// The derived value: base folded through the modifier list.
    pub fn current_value(&self) -> f32 {
        self.current_value
    }

    pub fn modifiers(&self) -> &[AttributeModifier] {
        &self.modifiers
    }

    /// Replaces the base value and recomputes.
    pub fn set_base_value(&mut self, value: f32) -> Option<ValueChange> {
        self.base_value = value;
        self.recompute()
    }

    /// Adds `amount` to the base value directly, bypassing the modifier
    /// list. Used for costs and damage, which must survive modifier
    /// removal.
    pub fn modify_base_value(&mut self, amount: f32) -> Option<ValueChange> {
        self.set_base_value(self.base_value + amount)
    }

    /// Appends a modifier and recomputes.
    pub fn add_modifier(&mut self, modifier: AttributeModifier) -> Option<ValueChange> {
        self.modifiers.push(modifier);
        self.recompute()
    }

    /// Removes every modifier applied by `source`, recomputing once for the
    /// net effect.
    pub fn remove_modifiers_from_source(&mut self, source: SourceId) -> Option<ValueChange> {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.source != source);
        if self.modifiers.len() == before {
            return None;
        }
        self.recompute()
    }

    /// Advances the autonomous regeneration/decay drift.
    pub fn tick(&mut self, dt: f32) -> Option<ValueChange> {
        if self.regen_per_second == 0.0 {
            return None;
        }
        self.modify_base_value(self.regen_per_second * dt)
    }

    /// Recomputes the derived value; reports the change when it moved.
    fn recompute(&mut self) -> Option<ValueChange> {
        let old = self.current_value;
        let new = self
            .modifiers
            .iter()
            .fold(self.base_value, |acc, m| m.apply(acc));
        self.current_value = new;
        (new != old).then_some(ValueChange { old, new })
    }
}
