//! Plan metric: what could the actor hit after moving?
//!
//! Used only on the fallback path, where movement candidates are credited
//! with the best follow-up attack available from their destination. The
//! follow-up is scored with the same damage metric the main evaluator uses,
//! weighted by the active profile.

use game_core::{EntityId, Position, TargetingMode, World};

use super::{MetricCategory, WeightProfile, damage_scores};
use crate::ai::{Relocation, is_feasible};

/// Best weighted damage-family score of any affordable non-movement action
/// against any target it reaches from `position`.
///
/// The actor and its occupancy entry are moved to `position` for the
/// duration of the call and restored before returning. Returns 0 when
/// nothing can be hit or `position` is held by someone else.
pub fn plan_score(
    world: &mut World,
    actor: EntityId,
    position: Position,
    profile: &WeightProfile,
) -> i64 {
    let Some(scope) = Relocation::with_occupancy(world, actor, position) else {
        return 0;
    };
    let Some(me) = scope.actor(actor) else {
        return 0;
    };

    let hostiles: Vec<Position> = scope
        .hostiles_of(actor)
        .into_iter()
        .map(|hostile| hostile.position)
        .collect();

    let mut best: Option<i64> = None;
    for action in me.actions.iter() {
        if action.kind().is_movement() || !is_feasible(me, action.as_ref()) {
            continue;
        }

        let targets = match action.targeting() {
            TargetingMode::SelfOnly => vec![position],
            _ => {
                let valid = action.valid_positions(&scope, me, position);
                hostiles
                    .iter()
                    .copied()
                    .filter(|target| valid.contains(target))
                    .collect()
            }
        };

        for target in targets {
            let affected = action.affected_positions(&scope, target);
            let raw = damage_scores(&scope, me, action.as_ref(), &affected);
            let score = profile.weigh_category(&raw, MetricCategory::Damage);
            if best.is_none_or(|current| score > current) {
                best = Some(score);
            }
        }
    }

    best.unwrap_or(0)
}
