//! Movement-efficiency metric.
//!
//! Rewards moves that close in on the nearest hostile and bring more
//! hostiles within striking distance; penalizes leaving a threatened cell.

use game_core::{Actor, CombatAction, Position, ResourceKind, World};

use super::{Metric, RawScores};

/// Points per hostile gained (or lost) within engagement range.
const REACHABLE_HOSTILE_POINTS: i64 = 20;

/// Penalty per hostile that gets a free swing as the actor walks away.
pub const OPPORTUNITY_ATTACK_PENALTY: i64 = 10;

/// Path cost within which a hostile counts as engageable: the actor's full
/// movement speed plus one step to strike.
pub fn engagement_range(actor: &Actor) -> u32 {
    actor.resources.meter(ResourceKind::Movement).maximum + 1
}

/// Hostiles adjacent (diagonals included) to `origin` but not to `destination`.
pub fn opportunity_attack_penalty(world: &World, actor: &Actor, destination: Position) -> i64 {
    let escaped = world
        .hostiles_of(actor.id)
        .into_iter()
        .filter(|hostile| {
            hostile.position.chebyshev_distance(actor.position) <= 1
                && hostile.position.chebyshev_distance(destination) > 1
        })
        .count() as i64;
    escaped * OPPORTUNITY_ATTACK_PENALTY
}

/// Scores moving `actor` from its current position to `destination`.
///
/// Zero for non-movement actions, for staying put, and for moves that do not
/// get closer to the nearest reachable hostile or that leave fewer hostiles
/// engageable than before. Never negative.
pub fn movement_efficiency(
    world: &World,
    actor: &Actor,
    action: &dyn CombatAction,
    destination: Position,
) -> RawScores {
    let mut raw = RawScores::zero();
    let origin = actor.position;
    if !action.kind().is_movement() || destination == origin {
        return raw;
    }

    let range = engagement_range(actor);
    let mut nearest_before: Option<u32> = None;
    let mut nearest_after: Option<u32> = None;
    let mut reachable_before = 0i64;
    let mut reachable_after = 0i64;

    for hostile in world.hostiles_of(actor.id) {
        let before = world.path_distance_for(actor.id, origin, hostile.position);
        let after = world.path_distance_for(actor.id, destination, hostile.position);

        if let Some(cost) = before {
            nearest_before = Some(nearest_before.map_or(cost, |best| best.min(cost)));
            if cost <= range {
                reachable_before += 1;
            }
        }
        if let Some(cost) = after {
            nearest_after = Some(nearest_after.map_or(cost, |best| best.min(cost)));
            if cost <= range {
                reachable_after += 1;
            }
        }
    }

    let (Some(before), Some(after)) = (nearest_before, nearest_after) else {
        return raw;
    };
    if after >= before {
        return raw;
    }
    if reachable_before > 0 && reachable_after < reachable_before {
        return raw;
    }

    let compression = (before - after) as i64 * 100 / before as i64;
    let score = compression + REACHABLE_HOSTILE_POINTS * (reachable_after - reachable_before)
        - opportunity_attack_penalty(world, actor, destination);

    raw[Metric::MovementEfficiency] = score.max(0);
    raw
}
