//! Position optimizer: where to stand before acting.
//!
//! For a non-movement action and a chosen target, every cell in the search
//! square around the actor is a potential standing spot. Cells are kept
//! only if the actor can walk there this turn and the action still reaches
//! the target from there. Survivors are scored by the weighted positioning
//! family minus a linear movement cost; the best cell wins.

use std::collections::BTreeSet;

use game_core::{CombatAction, EntityId, Position, ResourceKind, World};

use super::Relocation;
use crate::config::AiConfig;
use crate::scoring::{MetricCategory, RawScores, WeightProfile, movement_efficiency, threat_scores};

/// Chosen standing cell and the steps to reach it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandingPlan {
    pub position: Position,
    /// Empty when `position` is the actor's current cell.
    pub path: Vec<Position>,
}

impl StandingPlan {
    pub fn stay(position: Position) -> Self {
        Self {
            position,
            path: Vec::new(),
        }
    }
}

pub struct PositionOptimizer<'a> {
    profile: &'a WeightProfile,
    search_radius: u32,
    movement_cost_per_tile: i64,
}

impl<'a> PositionOptimizer<'a> {
    pub fn new(profile: &'a WeightProfile, config: &AiConfig) -> Self {
        Self {
            profile,
            search_radius: config.search_radius,
            movement_cost_per_tile: config.movement_cost_per_tile,
        }
    }

    /// Best standing cell for `actor` to use `action` on `target`.
    ///
    /// Falls back to the current cell (no movement) when no cell qualifies.
    /// The actor is temporarily relocated while scoring and is back on its
    /// own cell when this returns. `None` only if the actor does not exist.
    pub fn optimize(
        &self,
        world: &mut World,
        actor: EntityId,
        action: &dyn CombatAction,
        target: Position,
    ) -> Option<StandingPlan> {
        let candidates = self.candidate_cells(world, actor, action, target)?;
        let origin = world.actor(actor)?.position;

        let mut best: Option<(Position, i64)> = None;
        for cell in candidates {
            let Some(score) = self.score_cell(world, actor, action, cell) else {
                continue;
            };
            let score = score - origin.manhattan_distance(cell) as i64 * self.movement_cost_per_tile;

            tracing::trace!("  standing {} for {} -> {}", cell, action.name(), score);

            // first wins ties (row-major enumeration)
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((cell, score));
            }
        }

        let Some((position, _)) = best else {
            return Some(StandingPlan::stay(origin));
        };
        if position == origin {
            return Some(StandingPlan::stay(origin));
        }

        match world.find_path(origin, position) {
            Some(path) => Some(StandingPlan { position, path }),
            None => {
                tracing::warn!("{} lost its path {} -> {}", actor, origin, position);
                Some(StandingPlan::stay(origin))
            }
        }
    }

    /// Cells in the search square the actor can walk to and act from.
    fn candidate_cells(
        &self,
        world: &World,
        actor: EntityId,
        action: &dyn CombatAction,
        target: Position,
    ) -> Option<Vec<Position>> {
        let me = world.actor(actor)?;
        let origin = me.position;
        let budget = me.resources.remaining(ResourceKind::Movement);
        let walkable: BTreeSet<Position> = world
            .reachable_within(actor, origin, budget)
            .into_iter()
            .collect();

        let cells = origin
            .square(self.search_radius)
            .filter(|cell| world.is_valid_position(*cell))
            .filter(|cell| world.occupant(*cell).is_none_or(|occupant| occupant == actor))
            .filter(|cell| world.is_passable(*cell))
            .filter(|cell| walkable.contains(cell))
            .filter(|cell| action.valid_positions(world, me, *cell).contains(&target))
            .collect();
        Some(cells)
    }

    /// Weighted positioning family with the actor placed on `cell`.
    fn score_cell(
        &self,
        world: &mut World,
        actor: EntityId,
        action: &dyn CombatAction,
        cell: Position,
    ) -> Option<i64> {
        let scope = Relocation::position_only(world, actor, cell)?;
        let me = scope.actor(actor)?;

        let mut raw = RawScores::zero();
        raw += threat_scores(&scope, me);
        raw += movement_efficiency(&scope, me, action, cell);
        Some(self.profile.weigh_category(&raw, MetricCategory::Positioning))
    }
}
