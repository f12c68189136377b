//! Per-candidate outcome simulation.
//!
//! One [`CandidateEvaluation`] is produced for each (action, target) pair
//! that survives candidate generation. The evaluator decides where the actor
//! would stand, simulates the world from there and fills all nine metrics.

use game_core::{ActionHandle, ActionKind, CombatAction, EntityId, Position, World};
use serde::Serialize;

use super::{PositionOptimizer, Relocation, StandingPlan};
use crate::config::AiConfig;
use crate::scoring::{
    RawScores, WeightProfile, WeightedScores, damage_scores, movement_efficiency, plan_score,
    target_scores, threat_scores,
};

/// Anything with a comparable total and an action kind; the selectors work
/// on this so they can be exercised with plain fixtures.
pub trait Scored {
    fn total(&self) -> i64;

    fn kind(&self) -> ActionKind;
}

/// One hypothetical (action, target, standing cell) and its scores.
#[derive(Clone, Debug, Serialize)]
pub struct CandidateEvaluation {
    #[serde(serialize_with = "serialize_action_name")]
    pub action: ActionHandle,
    pub kind: ActionKind,
    pub target: Position,
    pub affected: Vec<Position>,
    pub raw: RawScores,
    pub weighted: WeightedScores,
    /// Follow-up damage credited to movement on the fallback path.
    pub plan: i64,
    pub total: i64,
    /// Where the actor acts from.
    pub standing: Position,
    /// Steps to `standing`; empty when acting in place.
    pub path: Vec<Position>,
}

fn serialize_action_name<S: serde::Serializer>(
    action: &ActionHandle,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(action.name())
}

impl CandidateEvaluation {
    pub fn action_name(&self) -> &str {
        self.action.name()
    }

    /// Total clamped to zero, for the simple single-score view.
    pub fn basic_score(&self) -> i64 {
        self.total.max(0)
    }

    /// Credits `plan` to the total.
    pub fn with_plan(mut self, plan: i64) -> Self {
        self.plan = plan;
        self.total = self.weighted.total() + plan;
        self
    }
}

impl Scored for CandidateEvaluation {
    fn total(&self) -> i64 {
        self.total
    }

    fn kind(&self) -> ActionKind {
        self.kind
    }
}

/// Simulates candidates for one actor with one weight profile.
pub struct CandidateEvaluator<'a> {
    profile: &'a WeightProfile,
    optimizer: PositionOptimizer<'a>,
}

impl<'a> CandidateEvaluator<'a> {
    pub fn new(profile: &'a WeightProfile, config: &AiConfig) -> Self {
        Self {
            profile,
            optimizer: PositionOptimizer::new(profile, config),
        }
    }

    /// Scores `action` aimed at `target`.
    ///
    /// `world` is borrowed mutably only for scoped relocations; it is
    /// unchanged when this returns. With `with_plan`, movement candidates
    /// also receive the plan score of their destination.
    ///
    /// # Returns
    ///
    /// `None` when the actor is missing, the destination is held by another
    /// actor, or the action cannot reach `target` from any standing cell.
    pub fn evaluate(
        &self,
        world: &mut World,
        actor: EntityId,
        action: &ActionHandle,
        target: Position,
        with_plan: bool,
    ) -> Option<CandidateEvaluation> {
        let kind = action.kind();
        let evaluation = if kind.is_movement() {
            self.evaluate_movement(world, actor, action, target)?
        } else if action.targeting().is_self_only() {
            let origin = world.actor(actor)?.position;
            self.evaluate_from(world, actor, action, target, StandingPlan::stay(origin))?
        } else {
            let standing = self.optimizer.optimize(world, actor, action.as_ref(), target)?;
            let me = world.actor(actor)?;
            if !action
                .valid_positions(world, me, standing.position)
                .contains(&target)
            {
                return None;
            }
            self.evaluate_from(world, actor, action, target, standing)?
        };

        if with_plan && kind.is_movement() {
            let plan = plan_score(world, actor, target, self.profile);
            return Some(evaluation.with_plan(plan));
        }
        Some(evaluation)
    }

    /// Movement: efficiency is measured from the true cell, everything else
    /// as if the actor already stood on the destination.
    fn evaluate_movement(
        &self,
        world: &mut World,
        actor: EntityId,
        action: &ActionHandle,
        destination: Position,
    ) -> Option<CandidateEvaluation> {
        let me = world.actor(actor)?;
        let origin = me.position;
        let mut raw = movement_efficiency(world, me, action.as_ref(), destination);

        let scope = Relocation::with_occupancy(world, actor, destination)?;
        let me = scope.actor(actor)?;
        let affected = action.affected_positions(&scope, destination);
        raw += damage_scores(&scope, me, action.as_ref(), &affected);
        raw += threat_scores(&scope, me);
        raw += target_scores(&scope, me, destination);

        Some(self.finish(action, destination, affected, raw, StandingPlan::stay(origin)))
    }

    /// Everything but movement: simulate from the standing cell.
    fn evaluate_from(
        &self,
        world: &mut World,
        actor: EntityId,
        action: &ActionHandle,
        target: Position,
        standing: StandingPlan,
    ) -> Option<CandidateEvaluation> {
        let scope = Relocation::with_occupancy(world, actor, standing.position)?;
        let me = scope.actor(actor)?;
        let affected = action.affected_positions(&scope, target);

        let mut raw = RawScores::zero();
        raw += damage_scores(&scope, me, action.as_ref(), &affected);
        raw += threat_scores(&scope, me);
        raw += movement_efficiency(&scope, me, action.as_ref(), target);
        raw += target_scores(&scope, me, target);

        Some(self.finish(action, target, affected, raw, standing))
    }

    fn finish(
        &self,
        action: &ActionHandle,
        target: Position,
        affected: Vec<Position>,
        raw: RawScores,
        standing: StandingPlan,
    ) -> CandidateEvaluation {
        let weighted = self.profile.weigh(&raw);
        CandidateEvaluation {
            action: action.clone(),
            kind: action.kind(),
            target,
            affected,
            raw,
            weighted,
            plan: 0,
            total: weighted.total(),
            standing: standing.position,
            path: standing.path,
        }
    }
}
