//! Targeting modes and spatial query parameters.

use bitflags::bitflags;

/// How an ability selects the entities it affects.
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
pub enum TargetingMode {
    /// The caster, regardless of any supplied target.
    SelfOnly,

    /// The supplied target, or nothing if none was given.
    ///
    /// The target is validated at activation, not re-checked at completion.
    SingleTarget,

    /// Everything within the ability's radius of the target (or the caster
    /// when no target was given), filtered through the validity predicate.
    Area,

    /// Same resolution as [`TargetingMode::Area`]; the center is a ground
    /// point rather than an entity anchor.
    Ground,
}

impl TargetingMode {
    /// Returns true if this mode queries the spatial oracle.
    pub fn is_spatial(&self) -> bool {
        matches!(self, Self::Area | Self::Ground)
    }

    /// Returns true if this mode only ever resolves to the caster.
    pub fn is_self_only(&self) -> bool {
        matches!(self, Self::SelfOnly)
    }
}

/// Which overlap-query variant the spatial oracle should run.
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
pub enum Dimension {
    /// Planar overlap; the center's `z` is ignored.
    TwoD,
    /// Sphere overlap.
    ThreeD,
}

bitflags! {
    /// Category mask forwarded to the spatial oracle's broad phase.
    ///
    /// Layer assignments belong to the host engine; the framework only
    /// carries the bits through.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LayerMask: u32 {
        /// Matches every layer.
        const ALL = u32::MAX;
    }
}

impl LayerMask {
    /// Mask with the single numbered layer set.
    pub fn layer(index: u32) -> Self {
        Self::from_bits_retain(1 << index)
    }
}
