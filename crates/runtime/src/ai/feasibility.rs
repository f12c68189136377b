use game_core::{Actor, CombatAction};

/// Whether `action` is worth considering for `actor` right now.
///
/// Excludes actors that cannot act, actions they cannot pay for, and
/// ruleset-defined kinds the tactical scorer does not understand.
pub fn is_feasible(actor: &Actor, action: &dyn CombatAction) -> bool {
    actor.can_act() && action.kind().is_tactical() && action.can_afford(actor)
}

#[cfg(test)]
mod tests {
    use game_core::{
        ActionError, ActionKind, ActionOutcome, AttackAction, Conditions, DodgeAction, EntityId,
        Position, ResourceKind, TargetingMode, TeamId, World,
    };

    use super::*;

    #[derive(Debug)]
    struct Taunt;

    impl CombatAction for Taunt {
        fn name(&self) -> &str {
            "taunt"
        }

        fn kind(&self) -> ActionKind {
            ActionKind::Other
        }

        fn targeting(&self) -> TargetingMode {
            TargetingMode::SelfOnly
        }

        fn can_afford(&self, _actor: &Actor) -> bool {
            true
        }

        fn valid_positions(&self, _world: &World, _actor: &Actor, origin: Position) -> Vec<Position> {
            vec![origin]
        }

        fn perform(
            &self,
            _world: &mut World,
            _actor: EntityId,
            _target: Position,
        ) -> Result<ActionOutcome, ActionError> {
            Ok(ActionOutcome::Defended)
        }
    }

    #[test]
    fn filters_by_actor_cost_and_kind() {
        let mut actor = Actor::new(EntityId(1), TeamId(0), Position::ORIGIN, 10);
        let sword = AttackAction::melee("sword", 6);
        assert!(is_feasible(&actor, &sword));
        assert!(is_feasible(&actor, &DodgeAction));
        assert!(!is_feasible(&actor, &Taunt));

        actor.resources.spend(ResourceKind::Action, 1).unwrap();
        assert!(!is_feasible(&actor, &sword));

        actor.resources.refresh_turn();
        actor.conditions.insert(Conditions::INCAPACITATED);
        assert!(!is_feasible(&actor, &sword));
    }
}
