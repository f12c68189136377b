//! Candidate target generation.
//!
//! For each feasible action this decides which target positions are worth
//! simulating:
//!
//! - **Move / dash**: the action's reachable destinations, strategically
//!   sampled when there are too many.
//! - **Self-targeted** (dodge): the actor's own cell.
//! - **Everything else**: living hostiles the action already reaches from
//!   the actor's current cell.

use arrayvec::ArrayVec;
use game_core::{Actor, CombatAction, Position, TargetingMode, World};

/// Hard cap on sampled movement destinations.
pub const MAX_MOVEMENT_SAMPLES: usize = 16;

/// Closer and farther destinations kept by the sampler, each.
const DIRECTIONAL_SAMPLES: usize = 3;

pub type MovementSample = ArrayVec<Position, MAX_MOVEMENT_SAMPLES>;

/// Generates candidate target positions for one action.
pub struct CandidateGenerator {
    sample_limit: usize,
}

impl CandidateGenerator {
    /// `sample_limit` is clamped to `1..=MAX_MOVEMENT_SAMPLES`.
    pub fn new(sample_limit: usize) -> Self {
        Self {
            sample_limit: sample_limit.clamp(1, MAX_MOVEMENT_SAMPLES),
        }
    }

    /// Target positions worth evaluating for `action`.
    ///
    /// # Arguments
    ///
    /// * `world` - The live world
    /// * `actor` - The acting actor, at its true position
    /// * `action` - A feasible action of `actor`
    /// * `hostiles` - Positions of living hostiles, in query order
    pub fn generate(
        &self,
        world: &World,
        actor: &Actor,
        action: &dyn CombatAction,
        hostiles: &[Position],
    ) -> Vec<Position> {
        let origin = actor.position;

        if action.kind().is_movement() {
            let destinations = action.valid_positions(world, actor, origin);
            let nearest = nearest_hostile(origin, hostiles);
            let sample = self.sample_destinations(&destinations, origin, nearest);
            tracing::trace!(
                "{}: sampled {} of {} destinations",
                action.name(),
                sample.len(),
                destinations.len()
            );
            return sample.into_iter().collect();
        }

        if action.targeting() == TargetingMode::SelfOnly {
            return vec![origin];
        }

        let valid = action.valid_positions(world, actor, origin);
        hostiles
            .iter()
            .copied()
            .filter(|target| valid.contains(target))
            .collect()
    }

    /// Keeps every destination when there are few; otherwise the current
    /// cell, up to three cells strictly closer to `nearest`, up to three
    /// strictly farther, then the rest in enumeration order until the limit.
    pub fn sample_destinations(
        &self,
        destinations: &[Position],
        current: Position,
        nearest: Option<Position>,
    ) -> MovementSample {
        let limit = self.sample_limit;
        let mut sample = MovementSample::new();

        if destinations.len() <= limit {
            sample.extend(destinations.iter().copied());
            return sample;
        }

        sample.push(current);

        if let Some(hostile) = nearest {
            let here = current.manhattan_distance(hostile);
            let closer = destinations
                .iter()
                .copied()
                .filter(|p| p.manhattan_distance(hostile) < here)
                .take(DIRECTIONAL_SAMPLES);
            let farther = destinations
                .iter()
                .copied()
                .filter(|p| p.manhattan_distance(hostile) > here)
                .take(DIRECTIONAL_SAMPLES);

            for position in closer.chain(farther) {
                if sample.len() >= limit {
                    break;
                }
                if !sample.contains(&position) {
                    sample.push(position);
                }
            }
        }

        for position in destinations {
            if sample.len() >= limit {
                break;
            }
            if !sample.contains(position) {
                sample.push(*position);
            }
        }

        sample
    }
}

/// Nearest hostile by Manhattan distance; ties keep the first.
fn nearest_hostile(origin: Position, hostiles: &[Position]) -> Option<Position> {
    hostiles
        .iter()
        .copied()
        .min_by_key(|hostile| origin.manhattan_distance(*hostile))
}
