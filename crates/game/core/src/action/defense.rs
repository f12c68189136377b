use super::{ActionError, ActionKind, ActionOutcome, CombatAction, TargetingMode, acting_actor};
use crate::state::{Actor, Conditions, EntityId, Position, ResourceKind, World};

/// Takes a defensive stance: attacks against the actor roll with
/// disadvantage until the start of its next turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DodgeAction;

impl CombatAction for DodgeAction {
    fn name(&self) -> &str {
        "dodge"
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Dodge
    }

    fn targeting(&self) -> TargetingMode {
        TargetingMode::SelfOnly
    }

    fn can_afford(&self, actor: &Actor) -> bool {
        actor.resources.remaining(ResourceKind::Action) >= 1
    }

    fn valid_positions(&self, _world: &World, _actor: &Actor, origin: Position) -> Vec<Position> {
        vec![origin]
    }

    fn perform(
        &self,
        world: &mut World,
        actor: EntityId,
        _target: Position,
    ) -> Result<ActionOutcome, ActionError> {
        acting_actor(world, actor)?;
        let dodger = world
            .actor_mut(actor)
            .ok_or(ActionError::ActorNotFound(actor))?;
        dodger.resources.spend(ResourceKind::Action, 1)?;
        dodger.conditions.insert(Conditions::DODGING);
        Ok(ActionOutcome::Defended)
    }
}
