//! Damage-dealing actions.

use super::{ActionError, ActionKind, ActionOutcome, CombatAction, TargetingMode, acting_actor};
use super::{tiles_in_area, tiles_in_range};
use crate::combat::attack_hits;
use crate::env::RollContext;
use crate::state::{Actor, Conditions, EntityId, Position, ResourceKind, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackStyle {
    Melee,
    Ranged,
}

/// Weapon attack against a single creature, resolved with a d20 roll
/// against armor class. Costs one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackAction {
    name: String,
    style: AttackStyle,
    reach: u32,
    average_damage: u32,
    attack_bonus: i32,
}

impl AttackAction {
    pub const DEFAULT_ATTACK_BONUS: i32 = 5;

    pub fn melee(name: impl Into<String>, average_damage: u32) -> Self {
        Self {
            name: name.into(),
            style: AttackStyle::Melee,
            reach: 1,
            average_damage,
            attack_bonus: Self::DEFAULT_ATTACK_BONUS,
        }
    }

    pub fn ranged(name: impl Into<String>, range: u32, average_damage: u32) -> Self {
        Self {
            name: name.into(),
            style: AttackStyle::Ranged,
            reach: range,
            average_damage,
            attack_bonus: Self::DEFAULT_ATTACK_BONUS,
        }
    }

    pub fn with_attack_bonus(mut self, attack_bonus: i32) -> Self {
        self.attack_bonus = attack_bonus;
        self
    }

    pub fn style(&self) -> AttackStyle {
        self.style
    }
}

impl CombatAction for AttackAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Attack
    }

    fn targeting(&self) -> TargetingMode {
        TargetingMode::SingleTarget { range: self.reach }
    }

    fn can_afford(&self, actor: &Actor) -> bool {
        actor.resources.remaining(ResourceKind::Action) >= 1
    }

    fn valid_positions(&self, world: &World, _actor: &Actor, origin: Position) -> Vec<Position> {
        tiles_in_range(world, origin, self.reach)
    }

    fn average_damage(&self) -> u32 {
        self.average_damage
    }

    fn perform(
        &self,
        world: &mut World,
        actor: EntityId,
        target: Position,
    ) -> Result<ActionOutcome, ActionError> {
        let origin = acting_actor(world, actor)?.position;
        if origin.chebyshev_distance(target) > self.reach {
            return Err(ActionError::OutOfReach { origin, target });
        }
        let (victim, armor_class, dodging) = match world.actor_at(target) {
            Some(victim) if victim.is_alive() && victim.id != actor => (
                victim.id,
                victim.armor_class,
                victim.conditions.contains(Conditions::DODGING),
            ),
            _ => return Err(ActionError::NoTarget(target)),
        };

        world
            .actor_mut(actor)
            .ok_or(ActionError::ActorNotFound(actor))?
            .resources
            .spend(ResourceKind::Action, 1)?;

        let mut roll = world.roll_d20(actor, RollContext::Attack);
        if dodging {
            roll = roll.min(world.roll_d20(actor, RollContext::Disadvantage));
        }
        let hit = attack_hits(roll, self.attack_bonus, armor_class);
        let damage = if hit {
            world.apply_damage(victim, self.average_damage)?
        } else {
            0
        };

        tracing::debug!(
            "{} used {} on {}: roll={} hit={} damage={}",
            actor,
            self.name,
            victim,
            roll,
            hit,
            damage
        );

        Ok(ActionOutcome::Attacked {
            target: victim,
            hit,
            damage,
        })
    }
}

/// Area spell: every creature in the blast makes a saving throw and takes
/// half damage on a success. Costs one action and one spell slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellAction {
    name: String,
    range: u32,
    radius: u32,
    average_damage: u32,
    save_dc: u32,
}

impl SpellAction {
    pub fn area(name: impl Into<String>, range: u32, radius: u32, average_damage: u32) -> Self {
        Self {
            name: name.into(),
            range,
            radius,
            average_damage,
            save_dc: 13,
        }
    }

    pub fn with_save_dc(mut self, save_dc: u32) -> Self {
        self.save_dc = save_dc;
        self
    }
}

impl CombatAction for SpellAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Spell
    }

    fn targeting(&self) -> TargetingMode {
        TargetingMode::Area {
            range: self.range,
            radius: self.radius,
        }
    }

    fn can_afford(&self, actor: &Actor) -> bool {
        actor.resources.remaining(ResourceKind::Action) >= 1
            && actor.resources.remaining(ResourceKind::SpellSlot) >= 1
    }

    fn valid_positions(&self, world: &World, _actor: &Actor, origin: Position) -> Vec<Position> {
        tiles_in_range(world, origin, self.range)
    }

    fn affected_positions(&self, world: &World, target: Position) -> Vec<Position> {
        tiles_in_area(world, target, self.radius)
    }

    fn average_damage(&self) -> u32 {
        self.average_damage
    }

    fn perform(
        &self,
        world: &mut World,
        actor: EntityId,
        target: Position,
    ) -> Result<ActionOutcome, ActionError> {
        let caster = acting_actor(world, actor)?;
        let origin = caster.position;
        if origin.chebyshev_distance(target) > self.range {
            return Err(ActionError::OutOfReach { origin, target });
        }
        if !self.can_afford(caster) {
            let kind = if caster.resources.remaining(ResourceKind::Action) == 0 {
                ResourceKind::Action
            } else {
                ResourceKind::SpellSlot
            };
            return Err(ActionError::InsufficientResource {
                kind,
                needed: 1,
                available: 0,
            });
        }

        let caught: Vec<(EntityId, u32)> = self
            .affected_positions(world, target)
            .into_iter()
            .filter_map(|p| world.actor_at(p))
            .filter(|victim| victim.is_alive())
            .map(|victim| (victim.id, victim.level))
            .collect();

        let resources = &mut world
            .actor_mut(actor)
            .ok_or(ActionError::ActorNotFound(actor))?
            .resources;
        resources.spend(ResourceKind::Action, 1)?;
        resources.spend(ResourceKind::SpellSlot, 1)?;

        let mut hits = Vec::with_capacity(caught.len());
        for (victim, level) in caught {
            let save = world.roll_d20(victim, RollContext::Save) + level / 2;
            let amount = if save >= self.save_dc {
                self.average_damage / 2
            } else {
                self.average_damage
            };
            let dealt = world.apply_damage(victim, amount)?;
            hits.push((victim, dealt));
        }

        tracing::debug!("{} cast {} at {}: {:?}", actor, self.name, target, hits);

        Ok(ActionOutcome::Blasted { hits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapDimensions;
    use crate::state::TeamId;

    fn arena() -> World {
        let mut world = World::new(MapDimensions::new(10, 10), 11);
        let caster = Actor::new(EntityId(1), TeamId(0), Position::new(1, 1), 10)
            .with_resources(crate::state::ResourcePool::standard(6).with(ResourceKind::SpellSlot, 1));
        world.spawn(caster).unwrap();
        world
            .spawn(Actor::new(EntityId(2), TeamId(1), Position::new(5, 5), 30))
            .unwrap();
        world
            .spawn(Actor::new(EntityId(3), TeamId(0), Position::new(6, 5), 30))
            .unwrap();
        world
    }

    #[test]
    fn attack_out_of_reach_spends_nothing() {
        let mut world = arena();
        let err = AttackAction::melee("sword", 8)
            .perform(&mut world, EntityId(1), Position::new(5, 5))
            .unwrap_err();
        assert!(matches!(err, ActionError::OutOfReach { .. }));
        let actor = world.actor(EntityId(1)).unwrap();
        assert_eq!(actor.resources.remaining(ResourceKind::Action), 1);
    }

    #[test]
    fn attack_on_empty_tile_has_no_target() {
        let mut world = arena();
        let err = AttackAction::melee("sword", 8)
            .perform(&mut world, EntityId(1), Position::new(2, 2))
            .unwrap_err();
        assert_eq!(err, ActionError::NoTarget(Position::new(2, 2)));
    }

    #[test]
    fn ranged_attack_deals_all_or_nothing() {
        let mut world = arena();
        let outcome = AttackAction::ranged("bow", 8, 7)
            .perform(&mut world, EntityId(1), Position::new(5, 5))
            .unwrap();
        let ActionOutcome::Attacked { target, hit, damage } = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        assert_eq!(target, EntityId(2));
        assert_eq!(damage, if hit { 7 } else { 0 });
        assert_eq!(world.actor(EntityId(2)).unwrap().hit_points.current, 30 - damage);
    }

    #[test]
    fn area_spell_catches_friend_and_foe() {
        let mut world = arena();
        let fireball = SpellAction::area("fireball", 8, 1, 10);
        assert!(fireball.can_afford(world.actor(EntityId(1)).unwrap()));

        let outcome = fireball
            .perform(&mut world, EntityId(1), Position::new(5, 5))
            .unwrap();
        let ActionOutcome::Blasted { hits } = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        let victims: Vec<EntityId> = hits.iter().map(|(id, _)| *id).collect();
        assert_eq!(victims, vec![EntityId(2), EntityId(3)]);
        assert!(hits.iter().all(|(_, dealt)| *dealt == 5 || *dealt == 10));

        let caster = world.actor(EntityId(1)).unwrap();
        assert_eq!(caster.resources.remaining(ResourceKind::SpellSlot), 0);
        assert!(!fireball.can_afford(caster));
    }
}
