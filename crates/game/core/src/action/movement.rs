use super::{ActionError, ActionKind, ActionOutcome, CombatAction, TargetingMode, acting_actor};
use crate::state::{Actor, EntityId, Position, ResourceKind, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementMode {
    /// Spends movement only.
    Move,
    /// Spends an action to gain `speed` extra tiles of movement first.
    Dash,
}

/// Walks the actor to a destination along an orthogonal shortest path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementAction {
    name: String,
    mode: MovementMode,
    speed: u32,
}

impl MovementAction {
    pub fn walk(speed: u32) -> Self {
        Self {
            name: "move".to_owned(),
            mode: MovementMode::Move,
            speed,
        }
    }

    pub fn dash(speed: u32) -> Self {
        Self {
            name: "dash".to_owned(),
            mode: MovementMode::Dash,
            speed,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    /// Tiles `actor` could cover with this action right now.
    pub fn budget(&self, actor: &Actor) -> u32 {
        let remaining = actor.resources.remaining(ResourceKind::Movement);
        match self.mode {
            MovementMode::Move => remaining,
            MovementMode::Dash => remaining + self.speed,
        }
    }
}

impl CombatAction for MovementAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ActionKind {
        match self.mode {
            MovementMode::Move => ActionKind::Move,
            MovementMode::Dash => ActionKind::Dash,
        }
    }

    fn targeting(&self) -> TargetingMode {
        TargetingMode::Destination
    }

    fn can_afford(&self, actor: &Actor) -> bool {
        match self.mode {
            MovementMode::Move => actor.resources.remaining(ResourceKind::Movement) > 0,
            MovementMode::Dash => actor.resources.remaining(ResourceKind::Action) > 0,
        }
    }

    fn valid_positions(&self, world: &World, actor: &Actor, origin: Position) -> Vec<Position> {
        world.reachable_within(actor.id, origin, self.budget(actor))
    }

    fn perform(
        &self,
        world: &mut World,
        actor: EntityId,
        target: Position,
    ) -> Result<ActionOutcome, ActionError> {
        let mover = acting_actor(world, actor)?;
        let origin = mover.position;
        if origin == target {
            return Ok(ActionOutcome::Moved { to: target, steps: 0 });
        }

        let budget = self.budget(mover);
        let path = world
            .find_path(origin, target)
            .ok_or(ActionError::OutOfReach { origin, target })?;
        let steps = path.len() as u32;
        if steps > budget {
            return Err(ActionError::InsufficientResource {
                kind: ResourceKind::Movement,
                needed: steps,
                available: budget,
            });
        }

        if self.mode == MovementMode::Dash {
            let resources = &mut world
                .actor_mut(actor)
                .ok_or(ActionError::ActorNotFound(actor))?
                .resources;
            resources.spend(ResourceKind::Action, 1)?;
            resources.grant(ResourceKind::Movement, self.speed);
        }
        world.move_actor(actor, &path);

        Ok(ActionOutcome::Moved { to: target, steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapDimensions;
    use crate::state::TeamId;

    fn world() -> World {
        let mut world = World::new(MapDimensions::new(12, 12), 1);
        world
            .spawn(Actor::new(EntityId(1), TeamId(0), Position::new(0, 0), 10))
            .unwrap();
        world
    }

    #[test]
    fn dash_extends_reach_and_spends_action() {
        let mut world = world();
        let dash = MovementAction::dash(6);
        let actor = world.actor(EntityId(1)).unwrap();
        assert_eq!(dash.budget(actor), 12);

        let outcome = dash.perform(&mut world, EntityId(1), Position::new(8, 0)).unwrap();
        assert_eq!(outcome, ActionOutcome::Moved { to: Position::new(8, 0), steps: 8 });

        let actor = world.actor(EntityId(1)).unwrap();
        assert_eq!(actor.resources.remaining(ResourceKind::Action), 0);
        assert_eq!(actor.resources.remaining(ResourceKind::Movement), 4);
    }

    #[test]
    fn move_beyond_budget_is_rejected() {
        let mut world = world();
        let err = MovementAction::walk(6)
            .perform(&mut world, EntityId(1), Position::new(7, 0))
            .unwrap_err();
        assert!(matches!(err, ActionError::InsufficientResource { needed: 7, .. }));
        assert_eq!(world.actor(EntityId(1)).unwrap().position, Position::new(0, 0));
    }
}
