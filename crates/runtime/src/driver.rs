//! Turn driver: select, move, act, repeat.
//!
//! [`take_turn`] keeps asking the selector for the active actor's best
//! action and performing it until nothing worthwhile is left. The turn is
//! handed to the next actor by [`TurnScope`] on every exit path.

use std::ops::{Deref, DerefMut};

use game_core::{ActionKind, ActionOutcome, Encounter, EntityId, Position};
use serde::Serialize;

use crate::ai::{ActionSelector, CandidateEvaluation};
use crate::config::AiConfig;

/// Ends the current turn when dropped.
pub struct TurnScope<'e> {
    encounter: &'e mut Encounter,
}

impl<'e> TurnScope<'e> {
    pub fn new(encounter: &'e mut Encounter) -> Self {
        Self { encounter }
    }
}

impl Deref for TurnScope<'_> {
    type Target = Encounter;

    fn deref(&self) -> &Encounter {
        self.encounter
    }
}

impl DerefMut for TurnScope<'_> {
    fn deref_mut(&mut self) -> &mut Encounter {
        self.encounter
    }
}

impl Drop for TurnScope<'_> {
    fn drop(&mut self) {
        self.encounter.end_turn();
    }
}

/// Why a turn stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TurnEndReason {
    /// The selector found nothing to do.
    NoAction,
    EncounterOver,
    /// The best option was moving onto the actor's own cell.
    StoodStill,
    ActionFailed,
    ActionLimit,
    /// The active slot holds a dead or missing actor.
    NoActiveActor,
}

/// One performed (or attempted) decision.
#[derive(Clone, Debug, Serialize)]
pub struct DecisionRecord {
    pub action: String,
    pub kind: ActionKind,
    pub target: Position,
    pub standing: Position,
    pub total: i64,
    pub outcome: Option<ActionOutcome>,
    pub error: Option<String>,
}

impl DecisionRecord {
    fn from_evaluation(evaluation: &CandidateEvaluation) -> Self {
        Self {
            action: evaluation.action_name().to_owned(),
            kind: evaluation.kind,
            target: evaluation.target,
            standing: evaluation.standing,
            total: evaluation.total,
            outcome: None,
            error: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TurnSummary {
    pub actor: Option<EntityId>,
    pub decisions: Vec<DecisionRecord>,
    pub end_reason: TurnEndReason,
}

/// Plays the active actor's whole turn, then ends it.
///
/// # Arguments
///
/// * `encounter` - The encounter; its active actor takes the turn
/// * `config` - Weights, strategy and limits for the decision engine
///
/// # Returns
///
/// What was attempted and why the turn stopped. The initiative cursor has
/// always advanced when this returns.
pub fn take_turn(encounter: &mut Encounter, config: &AiConfig) -> TurnSummary {
    let mut scope = TurnScope::new(encounter);
    let mut decisions = Vec::new();

    let Some(actor) = scope.active_actor() else {
        tracing::debug!("no living actor in the active slot; skipping");
        return TurnSummary {
            actor: None,
            decisions,
            end_reason: TurnEndReason::NoActiveActor,
        };
    };

    let selector = ActionSelector::new(config);
    let end_reason = loop {
        if decisions.len() >= config.max_actions_per_turn as usize {
            break TurnEndReason::ActionLimit;
        }

        let Some(choice) = selector.select(&mut scope, actor) else {
            break TurnEndReason::NoAction;
        };

        let position = scope.world().actor(actor).map(|me| me.position);
        if choice.kind.is_movement() && position == Some(choice.target) {
            crate::decision_log!(config.verbose, "{} stands still", actor);
            break TurnEndReason::StoodStill;
        }

        let mut record = DecisionRecord::from_evaluation(&choice);
        if !choice.path.is_empty() {
            scope.world_mut().move_actor(actor, &choice.path);
        }

        match choice.action.perform(scope.world_mut(), actor, choice.target) {
            Ok(outcome) => {
                crate::decision_log!(config.verbose, "{} {}: {:?}", actor, choice.action_name(), outcome);
                record.outcome = Some(outcome);
                decisions.push(record);
            }
            Err(err) => {
                tracing::warn!(
                    "{} failed to perform {} at {}: {}",
                    actor,
                    choice.action_name(),
                    choice.target,
                    err
                );
                record.error = Some(err.to_string());
                decisions.push(record);
                break TurnEndReason::ActionFailed;
            }
        }

        if scope.is_over() {
            break TurnEndReason::EncounterOver;
        }
    };

    crate::decision_log!(
        config.verbose,
        "{} ends turn after {} action(s): {}",
        actor,
        decisions.len(),
        end_reason
    );

    TurnSummary {
        actor: Some(actor),
        decisions,
        end_reason,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use game_core::{
        Actor, AttackAction, DodgeAction, MapDimensions, MovementAction, ResourceKind, TeamId, World,
    };

    use super::*;

    fn duel(gap: i32) -> Encounter {
        let mut world = World::new(MapDimensions::new(10, 3), 7);
        let fighter = Actor::new(EntityId(1), TeamId(0), Position::new(1, 1), 20)
            .with_action(Arc::new(AttackAction::melee("sword", 8)))
            .with_action(Arc::new(MovementAction::walk(6)));
        let dummy = Actor::new(EntityId(2), TeamId(1), Position::new(1 + gap, 1), 30);
        world.spawn(fighter).unwrap();
        world.spawn(dummy).unwrap();
        Encounter::in_id_order(world)
    }

    #[test]
    fn adjacent_attacker_swings_and_ends_turn() {
        let mut encounter = duel(1);
        let summary = take_turn(&mut encounter, &AiConfig::default());

        assert_eq!(summary.actor, Some(EntityId(1)));
        assert_eq!(summary.decisions[0].kind, ActionKind::Attack);
        assert_eq!(summary.decisions[0].target, Position::new(2, 1));
        assert!(summary.decisions[0].outcome.is_some());
        assert_eq!(encounter.active_actor(), Some(EntityId(2)));
    }

    #[test]
    fn distant_attacker_closes_in() {
        let mut encounter = duel(5);
        let summary = take_turn(&mut encounter, &AiConfig::default());

        let fighter = encounter.world().actor(EntityId(1)).unwrap();
        assert!(fighter.position.x > 1);
        assert!(summary.decisions.iter().any(|d| d.kind == ActionKind::Move));
    }

    #[test]
    fn action_limit_stops_the_turn() {
        let mut encounter = duel(1);
        let config = AiConfig {
            max_actions_per_turn: 1,
            ..AiConfig::default()
        };
        let summary = take_turn(&mut encounter, &config);
        assert_eq!(summary.decisions.len(), 1);
        assert_eq!(summary.end_reason, TurnEndReason::ActionLimit);
    }

    #[test]
    fn actor_without_options_ends_with_no_action() {
        let mut world = World::new(MapDimensions::new(4, 4), 1);
        let idle = Actor::new(EntityId(1), TeamId(0), Position::new(0, 0), 10)
            .with_action(Arc::new(DodgeAction));
        world.spawn(idle).unwrap();
        world
            .spawn(Actor::new(EntityId(2), TeamId(1), Position::new(3, 3), 10))
            .unwrap();
        let mut encounter = Encounter::in_id_order(world);

        let summary = take_turn(&mut encounter, &AiConfig::default());
        // dodge once, then nothing is affordable
        assert_eq!(summary.decisions.len(), 1);
        assert_eq!(summary.decisions[0].kind, ActionKind::Dodge);
        assert_eq!(summary.end_reason, TurnEndReason::NoAction);

        let idle = encounter.world().actor(EntityId(1)).unwrap();
        assert_eq!(idle.resources.remaining(ResourceKind::Action), 0);
        assert_eq!(encounter.active_actor(), Some(EntityId(2)));
    }
}
