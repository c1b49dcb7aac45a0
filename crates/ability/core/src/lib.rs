//! Deterministic ability-cast and attribute framework.
//!
//! `ability-core` implements the cast state machine (timing, cooldowns,
//! targeting resolution) and the attribute/modifier engine (value
//! composition, per-tick evolution, change notification) for a
//! single-threaded, pull-based simulation. Hosts drive it by calling
//! `tick(dt)` from their own loop and reach gameplay rules, effect
//! execution, and spatial queries through the traits in [`env`].
pub mod ability;
pub mod attribute;
pub mod env;
pub mod events;
pub mod types;

pub use ability::{
    AbilityDefinition, ActivationRejection, CastController, Dimension, LayerMask, TargetingMode,
};
pub use attribute::{
    AttributeModifier, AttributeSet, AttributeSpec, AttributeValue, ModifierOp, ValueChange,
};
pub use env::{AbilityOracle, EffectRunner, SpatialOracle};
pub use events::{AttributeChanged, CastEvent, EventBus};
pub use types::{AbilityId, AttributeId, EffectId, EntityId, Position, SourceId};
