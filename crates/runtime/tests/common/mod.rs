//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use game_core::{
    ActionError, ActionKind, ActionOutcome, Actor, AttackAction, CombatAction, DodgeAction, EntityId,
    MapDimensions, MovementAction, Position, TargetingMode, TeamId, World,
};

pub const HERO: EntityId = EntityId(1);
pub const FOE: EntityId = EntityId(2);

pub fn arena(width: u32, height: u32) -> World {
    World::new(MapDimensions::new(width, height), 42)
}

/// Sword, move and dodge.
pub fn fighter(id: EntityId, team: u8, x: i32, y: i32, hp: u32) -> Actor {
    Actor::new(id, TeamId(team), Position::new(x, y), hp)
        .with_action(Arc::new(AttackAction::melee("sword", 10)))
        .with_action(Arc::new(MovementAction::walk(6)))
        .with_action(Arc::new(DodgeAction))
}

/// Snapshot of everything a hypothetical relocation may touch.
pub fn placement(world: &World) -> (Vec<(EntityId, Position)>, BTreeMap<Position, EntityId>) {
    let positions = world.actors().map(|actor| (actor.id, actor.position)).collect();
    (positions, world.tile_map().occupancy().clone())
}

/// Movement action with a fixed destination list.
#[derive(Debug)]
pub struct ScriptedMove {
    pub destinations: Vec<Position>,
}

impl CombatAction for ScriptedMove {
    fn name(&self) -> &str {
        "scripted-move"
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Move
    }

    fn targeting(&self) -> TargetingMode {
        TargetingMode::Destination
    }

    fn can_afford(&self, _actor: &Actor) -> bool {
        true
    }

    fn valid_positions(&self, _world: &World, _actor: &Actor, _origin: Position) -> Vec<Position> {
        self.destinations.clone()
    }

    fn perform(
        &self,
        _world: &mut World,
        _actor: EntityId,
        target: Position,
    ) -> Result<ActionOutcome, ActionError> {
        Ok(ActionOutcome::Moved { to: target, steps: 0 })
    }
}

/// Attack whose targeting blows up.
#[derive(Debug)]
pub struct Misfire;

impl CombatAction for Misfire {
    fn name(&self) -> &str {
        "misfire"
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Attack
    }

    fn targeting(&self) -> TargetingMode {
        TargetingMode::melee()
    }

    fn can_afford(&self, _actor: &Actor) -> bool {
        true
    }

    fn valid_positions(&self, _world: &World, _actor: &Actor, _origin: Position) -> Vec<Position> {
        panic!("misfire");
    }

    fn average_damage(&self) -> u32 {
        10
    }

    fn perform(
        &self,
        _world: &mut World,
        _actor: EntityId,
        _target: Position,
    ) -> Result<ActionOutcome, ActionError> {
        panic!("misfire");
    }
}
