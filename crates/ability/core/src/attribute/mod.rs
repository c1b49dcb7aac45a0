//! Attribute/modifier engine.
//!
//! Each entity carries an [`AttributeSet`] mapping attribute identities to
//! live values. A value is composed as `base folded through the modifier
//! list in insertion order`; modifiers are owned by their source and removed
//! by source identity. Base values can also drift autonomously per tick
//! (regeneration/decay).
//!
//! Two deliberately distinct mutation paths exist:
//! - [`AttributeSet::modify_base`] writes the base value directly (costs,
//!   damage) and survives modifier removal;
//! - [`AttributeSet::add_modifier`] contributes a reversible, sourced entry.

pub mod modifier;
pub mod set;
pub mod value;

pub use modifier::{AttributeModifier, ModifierOp};
pub use set::AttributeSet;
pub use value::{AttributeSpec, AttributeValue, ValueChange};
