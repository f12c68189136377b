//! Best and fallback action selection.
//!
//! The [`ActionSelector`] enumerates every feasible action × candidate
//! target, evaluates each one and picks a winner:
//!
//! - **Primary**: the strictly highest total; ties keep the first found.
//! - **Fallback**: results bucketed into best movement, best defensive and
//!   best overall. Movement wins if it is not obviously terrible, then
//!   defending if it beats everything else, then the overall best.
//!
//! # Determinism
//!
//! Enumeration order is fixed (action list order, then candidate order) and
//! both evaluation strategies collect results in that order, so the same
//! world and configuration always produce the same choice.

use game_core::{ActionHandle, Encounter, EntityId, Position};
use rayon::prelude::*;

use super::{CandidateEvaluation, CandidateEvaluator, CandidateGenerator, Scored, is_feasible};
use crate::config::{AiConfig, EvaluationStrategy};
use crate::scoring::WeightProfile;

/// Index of the first strictly-highest total.
fn first_max<'t, T: Scored + 't>(items: impl IntoIterator<Item = (usize, &'t T)>) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (index, item) in items {
        if best.is_none_or(|(_, top)| item.total() > top) {
            best = Some((index, item.total()));
        }
    }
    best.map(|(index, _)| index)
}

/// Picks the highest total; ties keep the first.
pub fn choose_best<T: Scored>(candidates: impl IntoIterator<Item = T>) -> Option<T> {
    let items: Vec<T> = candidates.into_iter().collect();
    let index = first_max(items.iter().enumerate())?;
    items.into_iter().nth(index)
}

/// Fallback preference: movement above `movement_threshold`, else
/// defensive when it beats the overall best, else the overall best.
pub fn choose_fallback<T: Scored>(
    candidates: impl IntoIterator<Item = T>,
    movement_threshold: i64,
) -> Option<T> {
    let items: Vec<T> = candidates.into_iter().collect();

    let movement = first_max(
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.kind().is_movement()),
    );
    let defensive = first_max(
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.kind().is_defensive()),
    );
    let overall = first_max(items.iter().enumerate())?;

    let chosen = match (movement, defensive) {
        (Some(index), _) if items[index].total() > movement_threshold => index,
        (_, Some(index)) if items[index].total() > items[overall].total() => index,
        _ => overall,
    };
    items.into_iter().nth(chosen)
}

/// Runs the full evaluation pipeline for one actor.
pub struct ActionSelector<'c> {
    config: &'c AiConfig,
    profile: WeightProfile,
    generator: CandidateGenerator,
}

impl<'c> ActionSelector<'c> {
    pub fn new(config: &'c AiConfig) -> Self {
        Self {
            config,
            profile: config.profile(),
            generator: CandidateGenerator::new(config.movement_sample_limit),
        }
    }

    pub fn profile(&self) -> &WeightProfile {
        &self.profile
    }

    /// Feasible (action, target) pairs in enumeration order.
    pub fn candidates(&self, encounter: &Encounter, actor: EntityId) -> Vec<(ActionHandle, Position)> {
        let Some(me) = encounter.world().actor(actor) else {
            return Vec::new();
        };
        let hostiles: Vec<Position> = encounter
            .hostile_actors(actor)
            .into_iter()
            .map(|hostile| hostile.position)
            .collect();

        let mut pairs = Vec::new();
        for action in me.actions.iter() {
            if !is_feasible(me, action.as_ref()) {
                continue;
            }
            for target in self
                .generator
                .generate(encounter.world(), me, action.as_ref(), &hostiles)
            {
                pairs.push((action.clone(), target));
            }
        }
        pairs
    }

    /// Evaluates every candidate, in enumeration order.
    ///
    /// Sequential evaluation relocates the actor inside the live world and
    /// restores it after each candidate. Parallel evaluation gives each
    /// worker its own copy of the world.
    pub fn evaluate_all(
        &self,
        encounter: &mut Encounter,
        actor: EntityId,
        with_plan: bool,
    ) -> Vec<CandidateEvaluation> {
        let pairs = self.candidates(encounter, actor);
        let evaluator = CandidateEvaluator::new(&self.profile, self.config);

        let evaluations: Vec<CandidateEvaluation> = match self.config.strategy {
            EvaluationStrategy::Sequential => {
                let world = encounter.world_mut();
                pairs
                    .iter()
                    .filter_map(|(action, target)| {
                        evaluator.evaluate(world, actor, action, *target, with_plan)
                    })
                    .collect()
            }
            EvaluationStrategy::Parallel => {
                let world = encounter.world();
                pairs
                    .par_iter()
                    .map_init(
                        || world.clone(),
                        |scratch, (action, target)| {
                            evaluator.evaluate(scratch, actor, action, *target, with_plan)
                        },
                    )
                    .collect::<Vec<_>>()
                    .into_iter()
                    .flatten()
                    .collect()
            }
        };

        for evaluation in &evaluations {
            crate::decision_log!(
                self.config.verbose,
                "  {} {} -> {} from {}: total={} plan={} raw={:?}",
                actor,
                evaluation.action_name(),
                evaluation.target,
                evaluation.standing,
                evaluation.total,
                evaluation.plan,
                evaluation.raw.as_array()
            );
        }
        evaluations
    }

    /// Primary path: the best-scoring candidate, or `None` when there is
    /// nothing to do.
    pub fn select_best(&self, encounter: &mut Encounter, actor: EntityId) -> Option<CandidateEvaluation> {
        choose_best(self.evaluate_all(encounter, actor, false))
    }

    /// Fallback path: movement (credited with its plan score), then
    /// defense, then the overall best.
    pub fn select_fallback(
        &self,
        encounter: &mut Encounter,
        actor: EntityId,
    ) -> Option<CandidateEvaluation> {
        choose_fallback(
            self.evaluate_all(encounter, actor, true),
            self.config.fallback_movement_threshold,
        )
    }

    /// Primary result unless it is absent or scores at or below the poor
    /// threshold, in which case the fallback result.
    pub fn select(&self, encounter: &mut Encounter, actor: EntityId) -> Option<CandidateEvaluation> {
        let primary = self.select_best(encounter, actor);
        let choice = match primary {
            Some(best) if best.total > self.config.poor_score_threshold => Some(best),
            _ => {
                crate::decision_log!(self.config.verbose, "{} has no good option, using fallback", actor);
                self.select_fallback(encounter, actor)
            }
        };

        if let Some(choice) = &choice {
            crate::decision_log!(
                self.config.verbose,
                "{} chose {} -> {} (total={})",
                actor,
                choice.action_name(),
                choice.target,
                choice.total
            );
        }
        choice
    }
}

#[cfg(test)]
mod tests {
    use game_core::ActionKind;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Fixture(ActionKind, i64);

    impl Scored for Fixture {
        fn total(&self) -> i64 {
            self.1
        }

        fn kind(&self) -> ActionKind {
            self.0
        }
    }

    #[test]
    fn best_keeps_first_of_ties() {
        let picked = choose_best([
            Fixture(ActionKind::Attack, 5),
            Fixture(ActionKind::Spell, 9),
            Fixture(ActionKind::Dodge, 9),
        ]);
        assert_eq!(picked, Some(Fixture(ActionKind::Spell, 9)));
        assert_eq!(choose_best(Vec::<Fixture>::new()), None);
    }

    #[test]
    fn fallback_prefers_dash_over_move_when_higher() {
        let picked = choose_fallback(
            [
                Fixture(ActionKind::Move, -20),
                Fixture(ActionKind::Dash, -10),
                Fixture(ActionKind::Attack, 0),
            ],
            -50,
        );
        assert_eq!(picked, Some(Fixture(ActionKind::Dash, -10)));
    }

    #[test]
    fn fallback_without_movement_or_defense_is_overall() {
        let picked = choose_fallback(
            [Fixture(ActionKind::Attack, -5), Fixture(ActionKind::Spell, -3)],
            -50,
        );
        assert_eq!(picked, Some(Fixture(ActionKind::Spell, -3)));
    }
}
