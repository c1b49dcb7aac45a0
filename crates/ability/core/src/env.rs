//! Traits describing external collaborators.
//!
//! The cast controller reaches its ability rules, effect execution, and
//! spatial broad phase only through these narrow interfaces, so it never
//! couples to a concrete rules table, effect interpreter, or physics
//! backend. Implementations are injected at controller construction.

use crate::ability::{AbilityDefinition, Dimension, LayerMask};
use crate::attribute::AttributeSet;
use crate::types::{EffectId, EntityId, Position};

/// Rule queries and the cost mutation for ability definitions.
///
/// The oracle owns what the rules mean (resource costs, tag requirements,
/// line of sight, ...); the controller only asks and obeys.
pub trait AbilityOracle {
    /// May `caster` begin casting `ability` at `target` right now?
    ///
    /// Busy/cooldown gating is the controller's job and has already passed
    /// when this is called.
    fn can_activate(
        &self,
        ability: &AbilityDefinition,
        caster: EntityId,
        target: Option<EntityId>,
        attributes: &AttributeSet,
    ) -> bool;

    /// Is `candidate` a legitimate recipient of `ability` from `caster`?
    ///
    /// Applied to every candidate a spatial query returns; the broad phase
    /// reports all physical overlaps irrespective of validity.
    fn is_valid_target(
        &self,
        ability: &AbilityDefinition,
        caster: EntityId,
        candidate: EntityId,
    ) -> bool;

    /// Deducts the ability's cost from the caster's attributes.
    ///
    /// Called exactly once per completed cast, before any effect is
    /// dispatched.
    fn apply_cost(
        &self,
        ability: &AbilityDefinition,
        caster: EntityId,
        attributes: &mut AttributeSet,
    );
}

/// Receives resolved (effect, target, source) triples and applies their
/// gameplay consequence. Effect semantics are entirely the runner's.
pub trait EffectRunner {
    fn apply_effect(&mut self, effect: EffectId, target: EntityId, source: EntityId);
}

/// Engine-provided spatial broad phase.
pub trait SpatialOracle {
    /// Current position of an entity, if the engine knows one.
    fn position(&self, entity: EntityId) -> Option<Position>;

    /// All entities within `radius` of `center` matching `mask`, using the
    /// query variant for `dimension`.
    fn overlap(
        &self,
        center: Position,
        radius: f32,
        mask: LayerMask,
        dimension: Dimension,
    ) -> Vec<EntityId>;
}
