//! Static ability descriptions.

use crate::types::{AbilityId, EffectId};

use super::targeting::{Dimension, LayerMask, TargetingMode};

/// Immutable description of a castable ability.
///
/// Definitions are plain data owned by the caller (typically a content
/// catalog); the framework reads them but never stores them beyond the
/// currently running cast. Activation rules and cost application live
/// behind [`crate::env::AbilityOracle`], not on the definition itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,

    /// Seconds from activation to completion. Zero or less casts instantly.
    pub cast_time: f32,

    /// Seconds before the ability can be activated again. Zero means
    /// immediately re-activatable.
    pub cooldown: f32,

    pub targeting: TargetingMode,

    /// Overlap-query variant used by spatial targeting modes.
    pub dimension: Dimension,

    /// Query radius for spatial targeting modes.
    pub radius: f32,

    /// Broad-phase category mask for spatial targeting modes.
    pub targetable_layers: LayerMask,

    /// Ordered effects dispatched to every resolved target on completion.
    pub effects: Vec<EffectId>,
}

impl AbilityDefinition {
    /// A named instant self-cast with no cooldown and no effects; shape the
    /// rest with the `with_*` methods.
    pub fn new(id: AbilityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cast_time: 0.0,
            cooldown: 0.0,
            targeting: TargetingMode::SelfOnly,
            dimension: Dimension::ThreeD,
            radius: 0.0,
            targetable_layers: LayerMask::ALL,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cast_time(mut self, seconds: f32) -> Self {
        self.cast_time = seconds;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.cooldown = seconds;
        self
    }

    #[must_use]
    pub fn with_targeting(mut self, targeting: TargetingMode) -> Self {
        self.targeting = targeting;
        self
    }

    #[must_use]
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_targetable_layers(mut self, layers: LayerMask) -> Self {
        self.targetable_layers = layers;
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = EffectId>) -> Self {
        self.effects = effects.into_iter().collect();
        self
    }

    /// True when the cast completes within the activating call.
    pub fn is_instant(&self) -> bool {
        self.cast_time <= 0.0
    }
}
