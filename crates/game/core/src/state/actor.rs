//! Actor state: identity, health, defenses, per-turn resources and actions.

use std::cmp::Ordering;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::{EntityId, Position, ResourceMeter, TeamId};
use crate::action::{ActionError, ActionHandle};
use crate::config::GameConfig;

bitflags! {
    /// Transient conditions that change what an actor can do or how it is hit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Conditions: u8 {
        /// Cannot take actions (stunned, paralyzed, ...).
        const INCAPACITATED = 1 << 0;
        /// Took the dodge action; attacks against it roll with disadvantage.
        const DODGING       = 1 << 1;
    }
}

/// Budgets an actor spends to perform actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum ResourceKind {
    Action = 0,
    BonusAction = 1,
    Reaction = 2,
    /// Tiles of movement left this turn.
    Movement = 3,
    /// Not refreshed between turns.
    SpellSlot = 4,
}

impl ResourceKind {
    pub const COUNT: usize = 5;

    pub const fn all() -> [ResourceKind; Self::COUNT] {
        [
            ResourceKind::Action,
            ResourceKind::BonusAction,
            ResourceKind::Reaction,
            ResourceKind::Movement,
            ResourceKind::SpellSlot,
        ]
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Whether the resource is restored at the start of each of the actor's turns.
    pub const fn refreshes_per_turn(self) -> bool {
        !matches!(self, ResourceKind::SpellSlot)
    }
}

/// Fixed set of resource meters indexed by [`ResourceKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    meters: [ResourceMeter; ResourceKind::COUNT],
}

impl ResourcePool {
    /// One action, bonus action and reaction per turn plus `speed` tiles of movement.
    pub fn standard(speed: u32) -> Self {
        let mut pool = Self::default();
        pool.set(ResourceKind::Action, ResourceMeter::full(1));
        pool.set(ResourceKind::BonusAction, ResourceMeter::full(1));
        pool.set(ResourceKind::Reaction, ResourceMeter::full(1));
        pool.set(ResourceKind::Movement, ResourceMeter::full(speed));
        pool
    }

    pub fn with(mut self, kind: ResourceKind, maximum: u32) -> Self {
        self.set(kind, ResourceMeter::full(maximum));
        self
    }

    pub fn set(&mut self, kind: ResourceKind, meter: ResourceMeter) {
        self.meters[kind.as_index()] = meter;
    }

    pub fn meter(&self, kind: ResourceKind) -> ResourceMeter {
        self.meters[kind.as_index()]
    }

    #[inline]
    pub fn remaining(&self, kind: ResourceKind) -> u32 {
        self.meters[kind.as_index()].current
    }

    /// Spends `amount` of `kind`, failing without side effects when short.
    pub fn spend(&mut self, kind: ResourceKind, amount: u32) -> Result<(), ActionError> {
        let meter = &mut self.meters[kind.as_index()];
        if meter.current < amount {
            return Err(ActionError::InsufficientResource {
                kind,
                needed: amount,
                available: meter.current,
            });
        }
        meter.current -= amount;
        Ok(())
    }

    pub fn grant(&mut self, kind: ResourceKind, amount: u32) {
        self.meters[kind.as_index()].grant(amount);
    }

    /// Restores every per-turn resource to its maximum.
    pub fn refresh_turn(&mut self) {
        for kind in ResourceKind::all() {
            if kind.refreshes_per_turn() {
                self.meters[kind.as_index()].refill();
            }
        }
    }
}

/// A combat participant.
///
/// `position` and the world's occupancy index must agree; the world owns that
/// invariant and only mutates both together.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub team: TeamId,
    pub position: Position,
    pub hit_points: ResourceMeter,
    pub armor_class: u32,
    pub level: u32,
    pub conditions: Conditions,
    pub resources: ResourcePool,
    pub actions: ArrayVec<ActionHandle, { GameConfig::MAX_ACTIONS }>,
}

impl Actor {
    pub fn new(id: EntityId, team: TeamId, position: Position, max_hp: u32) -> Self {
        Self {
            id,
            name: format!("actor-{}", id.0),
            team,
            position,
            hit_points: ResourceMeter::full(max_hp),
            armor_class: GameConfig::DEFAULT_ARMOR_CLASS,
            level: 1,
            conditions: Conditions::empty(),
            resources: ResourcePool::standard(GameConfig::DEFAULT_SPEED),
            actions: ArrayVec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_hit_points(mut self, current: u32) -> Self {
        self.hit_points.current = current.min(self.hit_points.maximum);
        self
    }

    pub fn with_armor_class(mut self, armor_class: u32) -> Self {
        self.armor_class = armor_class;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_resources(mut self, resources: ResourcePool) -> Self {
        self.resources = resources;
        self
    }

    /// Adds an action; silently ignored once `MAX_ACTIONS` is reached.
    pub fn with_action(mut self, action: ActionHandle) -> Self {
        if self.actions.try_push(action).is_err() {
            tracing::warn!("{} already has {} actions", self.name, GameConfig::MAX_ACTIONS);
        }
        self
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hit_points.is_empty()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn can_act(&self) -> bool {
        self.is_alive() && !self.conditions.contains(Conditions::INCAPACITATED)
    }

    /// Exact comparison of current/maximum hit points against
    /// `numerator / denominator`.
    pub fn health_cmp(&self, numerator: u32, denominator: u32) -> Ordering {
        self.hit_points.ratio_cmp(numerator, denominator)
    }

    pub fn is_hostile_to(&self, other: &Actor) -> bool {
        self.team.is_hostile_to(other.team)
    }

    /// Best average damage among this actor's actions, or a level-derived
    /// estimate when it has none that deal damage.
    pub fn estimated_damage_output(&self) -> u32 {
        self.actions
            .iter()
            .map(|action| action.average_damage())
            .max()
            .filter(|damage| *damage > 0)
            .unwrap_or(3 * self.level.max(1))
    }

    /// Applies damage and returns the amount actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hit_points.drain(amount)
    }
}
