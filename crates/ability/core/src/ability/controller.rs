//! Cast state machine and cooldown bookkeeping.
//!
//! One controller per casting entity. All advancement is pull-based: the
//! host loop calls [`CastController::tick`] with elapsed seconds; nothing
//! here suspends, blocks, or schedules. Attribute regeneration is advanced
//! separately through [`AttributeSet::tick`].

use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use crate::attribute::AttributeSet;
use crate::env::{AbilityOracle, EffectRunner, SpatialOracle};
use crate::events::{CastEvent, EventBus};
use crate::types::{AbilityId, EntityId};

use super::definition::AbilityDefinition;
use super::error::ActivationRejection;
use super::targeting::TargetingMode;

/// The in-flight cast. Present iff the controller is casting.
#[derive(Clone, Debug)]
struct ActiveCast {
    ability: AbilityDefinition,
    remaining: f32,
    target: Option<EntityId>,
}

/// Orchestrates activation, timed casting, targeting resolution, cost and
/// effect application, and cooldowns for one entity.
///
/// Collaborators are injected at construction and owned for the controller's
/// lifetime; hosts that need shared access pass handle types. Every failure
/// on the activation path is an expected rejection reported as `false` —
/// gameplay code must never crash the simulation loop.
pub struct CastController<O, E, S>
where
    O: AbilityOracle,
    E: EffectRunner,
    S: SpatialOracle,
{
    caster: EntityId,
    oracle: O,
    effects: E,
    spatial: S,
    attributes: AttributeSet,
    cast: Option<ActiveCast>,

    /// Remaining seconds per ability. Absent or ≤ 0 means ready. Entries
    /// are only decremented, never removed; the table is bounded by the
    /// number of distinct abilities ever cast.
    cooldowns: HashMap<AbilityId, f32>,
    events: EventBus<CastEvent>,
}

impl<O, E, S> CastController<O, E, S>
where
    O: AbilityOracle,
    E: EffectRunner,
    S: SpatialOracle,
{
    pub fn new(
        caster: EntityId,
        oracle: O,
        effects: E,
        spatial: S,
        attributes: AttributeSet,
    ) -> Self {
        Self {
            caster,
            oracle,
            effects,
            spatial,
            attributes,
            cast: None,
            cooldowns: HashMap::new(),
            events: EventBus::new(),
        }
    }

    pub fn caster(&self) -> EntityId {
        self.caster
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }

    /// Registers an observer for cast lifecycle notifications.
    pub fn subscribe(&mut self) -> Receiver<CastEvent> {
        self.events.subscribe()
    }

    /// Seeds a cooldown-table entry so the ability is tracked from the
    /// start. Optional: activation works for unregistered abilities too.
    pub fn register_ability(&mut self, ability: AbilityId) {
        self.cooldowns.entry(ability).or_insert(0.0);
    }

    pub fn is_casting(&self) -> bool {
        self.cast.is_some()
    }

    /// The definition currently being cast, if any.
    pub fn current_cast(&self) -> Option<&AbilityDefinition> {
        self.cast.as_ref().map(|cast| &cast.ability)
    }

    /// Fraction of the current cast already elapsed, in `[0, 1]`.
    /// Zero when idle or when the ability has no cast time.
    pub fn cast_progress(&self) -> f32 {
        match &self.cast {
            Some(cast) if cast.ability.cast_time > 0.0 => {
                (1.0 - cast.remaining / cast.ability.cast_time).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn is_on_cooldown(&self, ability: AbilityId) -> bool {
        self.cooldowns.get(&ability).is_some_and(|cd| *cd > 0.0)
    }

    /// Seconds until the ability is ready again; zero when it already is.
    pub fn cooldown_remaining(&self, ability: AbilityId) -> f32 {
        if self.is_on_cooldown(ability) {
            self.cooldowns[&ability]
        } else {
            0.0
        }
    }

    /// Requests activation. Returns `false` (leaving all state untouched)
    /// when the controller is busy, the ability is on cooldown, or the
    /// activation predicate refuses; otherwise starts the cast. Instant
    /// abilities complete before this call returns.
    pub fn try_activate(&mut self, ability: &AbilityDefinition, target: Option<EntityId>) -> bool {
        if let Some(rejection) = self.check_activation(ability, target) {
            tracing::debug!(ability = %ability.id, caster = %self.caster, %rejection, "activation rejected");
            return false;
        }
        self.start_cast(ability, target);
        true
    }

    /// Aborts the cast in progress without applying cost, effects, or
    /// cooldown. No-op while idle.
    pub fn cancel(&mut self) {
        let Some(cast) = self.cast.take() else {
            tracing::trace!(caster = %self.caster, "cancel while idle ignored");
            return;
        };
        tracing::debug!(ability = %cast.ability.id, caster = %self.caster, "cast cancelled");
        self.events.publish(CastEvent::Cancelled(cast.ability.id));
    }

    /// Advances cooldowns and the active cast by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for remaining in self.cooldowns.values_mut() {
            if *remaining > 0.0 {
                *remaining -= dt;
            }
        }

        let finished = match &mut self.cast {
            Some(cast) => {
                cast.remaining -= dt;
                cast.remaining <= 0.0
            }
            None => false,
        };
        if finished {
            self.complete_cast();
        }
    }

    fn check_activation(
        &self,
        ability: &AbilityDefinition,
        target: Option<EntityId>,
    ) -> Option<ActivationRejection> {
        if self.cast.is_some() {
            return Some(ActivationRejection::AlreadyCasting);
        }
        if self.is_on_cooldown(ability.id) {
            return Some(ActivationRejection::OnCooldown);
        }
        if !self
            .oracle
            .can_activate(ability, self.caster, target, &self.attributes)
        {
            return Some(ActivationRejection::NotAllowed);
        }
        None
    }

    fn start_cast(&mut self, ability: &AbilityDefinition, target: Option<EntityId>) {
        self.cast = Some(ActiveCast {
            ability: ability.clone(),
            remaining: ability.cast_time,
            target,
        });
        self.events.publish(CastEvent::Started(ability.id));

        if ability.is_instant() {
            self.complete_cast();
        }
    }

    /// Runs the fixed completion sequence: cost, targeting, effects
    /// (effects outer, targets inner), cooldown start, notification.
    fn complete_cast(&mut self) {
        let Some(cast) = self.cast.take() else {
            return;
        };
        let ability = cast.ability;

        self.oracle
            .apply_cost(&ability, self.caster, &mut self.attributes);

        // An empty resolved set still consumes cost and starts the
        // cooldown; abilities can whiff.
        let targets = self.resolve_targets(&ability, cast.target);
        for &effect in &ability.effects {
            for &target in &targets {
                self.effects.apply_effect(effect, target, self.caster);
            }
        }

        if ability.cooldown > 0.0 {
            self.cooldowns.insert(ability.id, ability.cooldown);
        }

        tracing::debug!(
            ability = %ability.id,
            caster = %self.caster,
            targets = targets.len(),
            "cast completed"
        );
        self.events.publish(CastEvent::Completed(ability.id));
    }

    fn resolve_targets(
        &self,
        ability: &AbilityDefinition,
        target: Option<EntityId>,
    ) -> Vec<EntityId> {
        match ability.targeting {
            TargetingMode::SelfOnly => vec![self.caster],

            // Validated at activation; not re-checked on completion.
            TargetingMode::SingleTarget => target.into_iter().collect(),

            TargetingMode::Area | TargetingMode::Ground => {
                let center = match target {
                    Some(anchor) => self.spatial.position(anchor),
                    None => self.spatial.position(self.caster),
                };
                let Some(center) = center else {
                    return Vec::new();
                };

                self.spatial
                    .overlap(
                        center,
                        ability.radius,
                        ability.targetable_layers,
                        ability.dimension,
                    )
                    .into_iter()
                    .filter(|&candidate| {
                        self.oracle.is_valid_target(ability, self.caster, candidate)
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, HashSet};
    use std::rc::Rc;

    use crate::ability::targeting::{Dimension, LayerMask};
    use crate::attribute::AttributeSpec;
    use crate::types::{AttributeId, EffectId, Position, SourceId};

    const CASTER: EntityId = EntityId(0);
    const ALLY: EntityId = EntityId(1);
    const ENEMY: EntityId = EntityId(2);
    const FAR_ENEMY: EntityId = EntityId(3);
    const MANA: AttributeId = AttributeId(0);

    /// Rules table for tests: flat mana cost, explicit invalid-target list.
    struct TestRules {
        mana_cost: f32,
        invalid: HashSet<EntityId>,
    }

    impl Default for TestRules {
        fn default() -> Self {
            Self {
                mana_cost: 10.0,
                invalid: HashSet::new(),
            }
        }
    }

    impl AbilityOracle for TestRules {
        fn can_activate(
            &self,
            _ability: &AbilityDefinition,
            _caster: EntityId,
            _target: Option<EntityId>,
            attributes: &AttributeSet,
        ) -> bool {
            attributes.value(MANA) >= self.mana_cost
        }

        fn is_valid_target(
            &self,
            _ability: &AbilityDefinition,
            _caster: EntityId,
            candidate: EntityId,
        ) -> bool {
            !self.invalid.contains(&candidate)
        }

        fn apply_cost(
            &self,
            ability: &AbilityDefinition,
            _caster: EntityId,
            attributes: &mut AttributeSet,
        ) {
            attributes.modify_base(MANA, -self.mana_cost, SourceId(ability.id.0 as u64));
        }
    }

    #[derive(Clone, Default)]
    struct RecordingRunner {
        applied: Rc<RefCell<Vec<(EffectId, EntityId, EntityId)>>>,
    }

    impl EffectRunner for RecordingRunner {
        fn apply_effect(&mut self, effect: EffectId, target: EntityId, source: EntityId) {
            self.applied.borrow_mut().push((effect, target, source));
        }
    }

    /// Positions plus layer membership; overlap is a real distance check so
    /// area resolution is exercised for real.
    #[derive(Default)]
    struct TestWorld {
        entities: BTreeMap<EntityId, (Position, LayerMask)>,
    }

    impl TestWorld {
        fn with(mut self, entity: EntityId, position: Position, layers: LayerMask) -> Self {
            self.entities.insert(entity, (position, layers));
            self
        }
    }

    impl SpatialOracle for TestWorld {
        fn position(&self, entity: EntityId) -> Option<Position> {
            self.entities.get(&entity).map(|(p, _)| *p)
        }

        fn overlap(
            &self,
            center: Position,
            radius: f32,
            mask: LayerMask,
            dimension: Dimension,
        ) -> Vec<EntityId> {
            self.entities
                .iter()
                .filter(|(_, (p, layers))| {
                    let dx = p.x - center.x;
                    let dy = p.y - center.y;
                    let dz = match dimension {
                        Dimension::TwoD => 0.0,
                        Dimension::ThreeD => p.z - center.z,
                    };
                    mask.intersects(*layers)
                        && (dx * dx + dy * dy + dz * dz).sqrt() <= radius
                })
                .map(|(&id, _)| id)
                .collect()
        }
    }

    type TestController = CastController<TestRules, RecordingRunner, TestWorld>;

    fn controller_with(rules: TestRules, world: TestWorld) -> (TestController, RecordingRunner) {
        let runner = RecordingRunner::default();
        let attributes = AttributeSet::new([AttributeSpec::new(MANA, 100.0)]);
        let controller = CastController::new(CASTER, rules, runner.clone(), world, attributes);
        (controller, runner)
    }

    fn controller() -> (TestController, RecordingRunner) {
        controller_with(TestRules::default(), TestWorld::default())
    }

    fn fireball() -> AbilityDefinition {
        AbilityDefinition::new(AbilityId(1), "fireball")
            .with_cast_time(2.0)
            .with_cooldown(5.0)
            .with_targeting(TargetingMode::SingleTarget)
            .with_effects([EffectId(0)])
    }

    fn heal() -> AbilityDefinition {
        AbilityDefinition::new(AbilityId(2), "heal").with_effects([EffectId(1)])
    }

    #[test]
    fn activation_is_rejected_while_casting() {
        let (mut c, _) = controller();
        assert!(c.try_activate(&fireball(), Some(ENEMY)));
        assert!(c.is_casting());

        assert!(!c.try_activate(&heal(), None));
        assert_eq!(c.current_cast().map(|a| a.id), Some(AbilityId(1)));
    }

    #[test]
    fn activation_is_rejected_by_the_predicate() {
        let (mut c, runner) = controller_with(
            TestRules {
                mana_cost: 1000.0,
                ..TestRules::default()
            },
            TestWorld::default(),
        );
        assert!(!c.try_activate(&heal(), None));
        assert!(!c.is_casting());
        assert!(runner.applied.borrow().is_empty());
    }

    #[test]
    fn cooldown_lifecycle() {
        let (mut c, _) = controller();
        let ability = fireball();

        assert!(c.try_activate(&ability, Some(ENEMY)));
        c.tick(2.5);

        assert!(!c.is_casting());
        assert!(c.is_on_cooldown(ability.id));
        assert_eq!(c.cooldown_remaining(ability.id), 5.0);
        assert!(!c.try_activate(&ability, Some(ENEMY)));

        c.tick(5.0);
        assert!(!c.is_on_cooldown(ability.id));
        assert_eq!(c.cooldown_remaining(ability.id), 0.0);
        assert!(c.try_activate(&ability, Some(ENEMY)));
    }

    #[test]
    fn zero_cooldown_allows_immediate_reactivation() {
        let (mut c, _) = controller();
        let ability = heal();
        assert!(c.try_activate(&ability, None));
        assert!(!c.is_on_cooldown(ability.id));
        assert!(c.try_activate(&ability, None));
    }

    #[test]
    fn instant_abilities_complete_within_the_activating_call() {
        let (mut c, runner) = controller();
        let events = c.subscribe();
        let ability = heal().with_cooldown(3.0);

        assert!(c.try_activate(&ability, None));

        assert!(!c.is_casting());
        assert_eq!(c.attributes().value(MANA), 90.0);
        assert!(c.is_on_cooldown(ability.id));
        assert_eq!(runner.applied.borrow().len(), 1);

        let seen: Vec<_> = events.try_iter().collect();
        assert_eq!(
            seen,
            vec![
                CastEvent::Started(ability.id),
                CastEvent::Completed(ability.id)
            ]
        );
    }

    #[test]
    fn cancel_discards_the_cast_without_side_effects() {
        let (mut c, runner) = controller();
        let events = c.subscribe();
        let ability = fireball();

        assert!(c.try_activate(&ability, Some(ENEMY)));
        c.tick(1.0);
        c.cancel();

        assert!(!c.is_casting());
        assert_eq!(c.attributes().value(MANA), 100.0);
        assert!(!c.is_on_cooldown(ability.id));
        assert!(runner.applied.borrow().is_empty());

        let seen: Vec<_> = events.try_iter().collect();
        assert_eq!(
            seen,
            vec![
                CastEvent::Started(ability.id),
                CastEvent::Cancelled(ability.id)
            ]
        );
    }

    #[test]
    fn cancel_while_idle_is_a_no_op() {
        let (mut c, _) = controller();
        let events = c.subscribe();
        c.cancel();
        assert!(events.try_iter().next().is_none());
    }

    #[test]
    fn self_targeting_resolves_to_the_caster_regardless_of_target() {
        let (mut c, runner) = controller();
        assert!(c.try_activate(&heal(), Some(ENEMY)));
        assert_eq!(
            runner.applied.borrow().as_slice(),
            &[(EffectId(1), CASTER, CASTER)]
        );
    }

    #[test]
    fn single_target_without_a_target_whiffs_but_still_pays() {
        let (mut c, runner) = controller();
        let ability = fireball();

        assert!(c.try_activate(&ability, None));
        c.tick(2.0);

        assert!(runner.applied.borrow().is_empty());
        assert_eq!(c.attributes().value(MANA), 90.0);
        assert!(c.is_on_cooldown(ability.id));
    }

    #[test]
    fn area_resolution_filters_candidates_through_the_validity_predicate() {
        let units = LayerMask::layer(0);
        let debris = LayerMask::layer(1);
        let world = TestWorld::default()
            .with(ALLY, Position::new(1.0, 0.0, 0.0), units)
            .with(ENEMY, Position::new(2.0, 0.0, 0.0), units)
            .with(FAR_ENEMY, Position::new(50.0, 0.0, 0.0), units)
            .with(EntityId(4), Position::new(0.5, 0.0, 0.0), debris);
        let rules = TestRules {
            invalid: HashSet::from([ENEMY]),
            ..TestRules::default()
        };
        let (mut c, runner) = controller_with(rules, world);

        let nova = AbilityDefinition::new(AbilityId(3), "nova")
            .with_targeting(TargetingMode::Area)
            .with_radius(5.0)
            .with_targetable_layers(units)
            .with_effects([EffectId(2)]);

        // ENEMY anchors the blast but fails validity, so it is excluded
        // even though it is the supplied target.
        assert!(c.try_activate(&nova, Some(ENEMY)));

        assert_eq!(
            runner.applied.borrow().as_slice(),
            &[(EffectId(2), ALLY, CASTER)]
        );
    }

    #[test]
    fn area_resolution_centers_on_the_caster_without_a_target() {
        let units = LayerMask::layer(0);
        let world = TestWorld::default()
            .with(CASTER, Position::new(0.0, 0.0, 0.0), LayerMask::empty())
            .with(ALLY, Position::new(0.0, 2.0, 0.0), units)
            .with(FAR_ENEMY, Position::new(0.0, 40.0, 0.0), units);
        let (mut c, runner) = controller_with(TestRules::default(), world);

        let nova = AbilityDefinition::new(AbilityId(3), "nova")
            .with_targeting(TargetingMode::Ground)
            .with_radius(5.0)
            .with_targetable_layers(units)
            .with_effects([EffectId(2)]);

        assert!(c.try_activate(&nova, None));
        assert_eq!(
            runner.applied.borrow().as_slice(),
            &[(EffectId(2), ALLY, CASTER)]
        );
    }

    #[test]
    fn two_d_queries_ignore_elevation() {
        let units = LayerMask::layer(0);
        let world = TestWorld::default()
            .with(CASTER, Position::ORIGIN, LayerMask::empty())
            .with(ALLY, Position::new(1.0, 0.0, 100.0), units);
        let (mut c, runner) = controller_with(TestRules::default(), world);

        let quake = AbilityDefinition::new(AbilityId(4), "quake")
            .with_targeting(TargetingMode::Area)
            .with_dimension(Dimension::TwoD)
            .with_radius(3.0)
            .with_targetable_layers(units)
            .with_effects([EffectId(3)]);

        assert!(c.try_activate(&quake, None));
        assert_eq!(runner.applied.borrow().len(), 1);
    }

    #[test]
    fn area_cast_with_unknown_center_whiffs() {
        // Caster has no known position and no target was supplied.
        let (mut c, runner) = controller();
        let nova = AbilityDefinition::new(AbilityId(3), "nova")
            .with_targeting(TargetingMode::Area)
            .with_radius(5.0)
            .with_cooldown(1.0)
            .with_effects([EffectId(2)]);

        assert!(c.try_activate(&nova, None));
        assert!(runner.applied.borrow().is_empty());
        assert_eq!(c.attributes().value(MANA), 90.0);
        assert!(c.is_on_cooldown(nova.id));
    }

    #[test]
    fn effects_iterate_outer_over_resolved_targets_inner() {
        let units = LayerMask::layer(0);
        let world = TestWorld::default()
            .with(ALLY, Position::new(1.0, 0.0, 0.0), units)
            .with(ENEMY, Position::new(2.0, 0.0, 0.0), units);
        let (mut c, runner) = controller_with(TestRules::default(), world);

        let storm = AbilityDefinition::new(AbilityId(5), "storm")
            .with_targeting(TargetingMode::Area)
            .with_radius(5.0)
            .with_targetable_layers(units)
            .with_effects([EffectId(7), EffectId(8)]);

        assert!(c.try_activate(&storm, Some(ALLY)));

        assert_eq!(
            runner.applied.borrow().as_slice(),
            &[
                (EffectId(7), ALLY, CASTER),
                (EffectId(7), ENEMY, CASTER),
                (EffectId(8), ALLY, CASTER),
                (EffectId(8), ENEMY, CASTER),
            ]
        );
    }

    #[test]
    fn cast_timeline_scenario() {
        let (mut c, _) = controller();
        let ability = fireball();

        assert!(c.try_activate(&ability, Some(ENEMY)));
        assert!(c.is_casting());
        assert_eq!(c.cast_progress(), 0.0);

        c.tick(1.0);
        assert_eq!(c.cast_progress(), 0.5);

        c.tick(1.01);
        assert!(!c.is_casting());
        assert_eq!(c.cast_progress(), 0.0);
        assert!(c.is_on_cooldown(ability.id));
        assert_eq!(c.cooldown_remaining(ability.id), 5.0);
    }

    #[test]
    fn registered_abilities_start_off_cooldown() {
        let (mut c, _) = controller();
        c.register_ability(AbilityId(1));
        assert!(!c.is_on_cooldown(AbilityId(1)));
        assert_eq!(c.cooldown_remaining(AbilityId(1)), 0.0);

        // Idle ticks leave seeded entries alone.
        c.tick(1.0);
        assert!(!c.is_on_cooldown(AbilityId(1)));
    }
}
