//! Sourced, reversible contributions to an attribute's derived value.

use crate::types::SourceId;

/// How a modifier combines with the value accumulated so far.
///
/// Modifiers apply in the order they were added, not commutatively merged:
/// `+10` then `×2` is not `×2` then `+10`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierOp {
    /// Adds the magnitude to the accumulated value.
    Add,

    /// Multiplies the accumulated value by the magnitude.
    Multiply,

    /// Replaces the accumulated value with the magnitude.
    ///
    /// Later modifiers still apply on top of the overridden value.
    Override,
}

/// A single contribution to an attribute, owned by whoever applied it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeModifier {
    /// Identity of the applier; removal is keyed by this.
    pub source: SourceId,
    pub magnitude: f32,
    pub op: ModifierOp,
}

impl AttributeModifier {
    pub fn new(source: SourceId, magnitude: f32, op: ModifierOp) -> Self {
        Self {
            source,
            magnitude,
            op,
        }
    }

    /// Additive modifier: `value + magnitude`.
    pub fn add(source: SourceId, magnitude: f32) -> Self {
        Self::new(source, magnitude, ModifierOp::Add)
    }

    /// Multiplicative modifier: `value × magnitude`.
    pub fn multiply(source: SourceId, magnitude: f32) -> Self {
        Self::new(source, magnitude, ModifierOp::Multiply)
    }

    /// Override modifier: `magnitude`, discarding what came before it.
    pub fn override_to(source: SourceId, magnitude: f32) -> Self {
        Self::new(source, magnitude, ModifierOp::Override)
    }

    /// Folds this modifier into an accumulated value.
    pub(crate) fn apply(&self, value: f32) -> f32 {
        match self.op {
            ModifierOp::Add => value + self.magnitude,
            ModifierOp::Multiply => value * self.magnitude,
            ModifierOp::Override => self.magnitude,
        }
    }
}
