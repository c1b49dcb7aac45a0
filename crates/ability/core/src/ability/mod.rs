//! Ability cast state machine.
//!
//! [`CastController`] owns one entity's cast state and cooldown table and
//! drives activation → timed cast → targeting → cost/effect application →
//! cooldown. Ability descriptions are plain data ([`AbilityDefinition`]);
//! what the rules mean lives behind the collaborator traits in
//! [`crate::env`].

pub mod controller;
pub mod definition;
pub mod error;
pub mod targeting;

pub use controller::CastController;
pub use definition::AbilityDefinition;
pub use error::ActivationRejection;
pub use targeting::{Dimension, LayerMask, TargetingMode};
