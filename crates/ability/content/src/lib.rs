//! Data-driven ability and attribute content.
//!
//! This crate houses the pieces a host wires around `ability-core`:
//! - name-interned catalogs of ability/attribute definitions
//! - a data-driven rules oracle (costs, target requirements, target tags)
//! - a minimal tag registry standing in for an engine's classification
//! - RON loaders and a content factory over a data directory
//!
//! Content is consumed by oracles and never appears in core state.

pub mod catalog;
pub mod loaders;
pub mod rules;
pub mod tags;

pub use catalog::{AbilityCatalog, AttributeCatalog};
pub use loaders::{AbilityLoader, AttributeLoader, ContentFactory, LoadResult};
pub use rules::{AbilityRule, AbilityRules, ResourceCost, RuleTable};
pub use tags::{TagRegistry, TagSource};
