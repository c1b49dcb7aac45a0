//! Per-entity attribute store.
//!
//! Owns the mapping from attribute identity to [`AttributeValue`], advances
//! per-tick evolution, and re-emits each attribute's change notification
//! tagged with which attribute moved. Operations on unregistered attributes
//! are silent no-ops; reads fall back to zero. Gameplay code must never
//! crash the simulation loop, so nothing here fails.

use std::collections::BTreeMap;
use std::sync::mpsc::Receiver;

use crate::events::{AttributeChanged, EventBus};
use crate::types::{AttributeId, SourceId};

use super::modifier::AttributeModifier;
use super::value::{AttributeSpec, AttributeValue, ValueChange};

/// Mapping from attribute identity to live value.
///
/// Populated once at entity initialization; entries are never removed during
/// the entity's lifetime, only their values and modifiers change. A
/// `BTreeMap` keeps per-tick notification order stable across runs.
#[derive(Debug, Default)]
pub struct AttributeSet {
    attributes: BTreeMap<AttributeId, AttributeValue>,
    events: EventBus<AttributeChanged>,
}

impl AttributeSet {
    pub fn new(specs: impl IntoIterator<Item = AttributeSpec>) -> Self {
        let attributes = specs
            .into_iter()
            .map(|spec| (spec.attribute, AttributeValue::new(spec)))
            .collect();
        Self {
            attributes,
            events: EventBus::new(),
        }
    }

    /// Registers an observer for attribute-change notifications.
    pub fn subscribe(&mut self) -> Receiver<AttributeChanged> {
        self.events.subscribe()
    }

    /// Registered attribute identities.
    pub fn ids(&self) -> impl Iterator<Item = AttributeId> + '_ {
        self.attributes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn get(&self, attribute: AttributeId) -> Option<&AttributeValue> {
        self.attributes.get(&attribute)
    }

    /// Current derived value, or 0 for an unregistered attribute.
    pub fn value(&self, attribute: AttributeId) -> f32 {
        self.get(attribute).map_or(0.0, AttributeValue::current_value)
    }

    /// Adds `amount` to the base value directly, bypassing the modifier
    /// list. No-op if the attribute is unregistered.
    pub fn modify_base(&mut self, attribute: AttributeId, amount: f32, source: SourceId) {
        let Some(value) = self.attributes.get_mut(&attribute) else {
            tracing::trace!(%attribute, %source, "base mutation on unregistered attribute ignored");
            return;
        };
        let change = value.modify_base_value(amount);
        self.notify(attribute, change);
    }

    /// Appends a modifier to the attribute. No-op if unregistered.
    pub fn add_modifier(&mut self, attribute: AttributeId, modifier: AttributeModifier) {
        let Some(value) = self.attributes.get_mut(&attribute) else {
            tracing::trace!(%attribute, "modifier on unregistered attribute ignored");
            return;
        };
        let change = value.add_modifier(modifier);
        self.notify(attribute, change);
    }

    /// Clears a source's footprint across every registered attribute.
    ///
    /// Each affected attribute recomputes once and emits at most one
    /// notification for the net effect.
    pub fn remove_modifiers_from_source(&mut self, source: SourceId) {
        let mut changes = Vec::new();
        for (&id, value) in self.attributes.iter_mut() {
            if let Some(change) = value.remove_modifiers_from_source(source) {
                changes.push((id, change));
            }
        }
        for (id, change) in changes {
            self.notify(id, Some(change));
        }
    }

    /// Advances every attribute's autonomous evolution once per simulation
    /// step.
    pub fn tick(&mut self, dt: f32) {
        let mut changes = Vec::new();
        for (&id, value) in self.attributes.iter_mut() {
            if let Some(change) = value.tick(dt) {
                changes.push((id, change));
            }
        }
        for (id, change) in changes {
            self.notify(id, Some(change));
        }
    }

    fn notify(&mut self, attribute: AttributeId, change: Option<ValueChange>) {
        if let Some(ValueChange { old, new }) = change {
            self.events.publish(AttributeChanged {
                attribute,
                old,
                new,
            });
        }
    }
}
