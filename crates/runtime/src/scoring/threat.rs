//! Survival-threat and enemy-proximity metrics.
//!
//! Both look at every living hostile from the actor's *current* position,
//! so callers relocate the actor first to score a hypothetical cell.

use game_core::{Actor, World};

use super::{Metric, RawScores};

/// Manhattan distance tiers and their (survival, proximity) points.
const THREAT_TIERS: [(u32, i64, i64); 3] = [(1, 30, 20), (3, 15, 10), (6, 5, 5)];

/// Hostiles within this range also contribute their damage output.
pub const DANGER_RANGE: u32 = 6;

/// Incoming damage is amplified below half health.
const WOUNDED_FACTOR: f64 = 1.5;

/// Penalizes standing close to living hostiles. Both metrics are <= 0.
pub fn threat_scores(world: &World, actor: &Actor) -> RawScores {
    let wounded = actor.health_cmp(1, 2).is_lt();
    let mut survival = 0.0;
    let mut proximity = 0;

    for hostile in world.hostiles_of(actor.id) {
        let distance = actor.position.manhattan_distance(hostile.position);

        if let Some((_, danger, closeness)) = THREAT_TIERS
            .iter()
            .find(|(range, _, _)| distance <= *range)
        {
            survival += *danger as f64;
            proximity += closeness;
        }

        if distance <= DANGER_RANGE {
            let incoming = hostile.estimated_damage_output() as f64;
            survival += if wounded { incoming * WOUNDED_FACTOR } else { incoming };
        }
    }

    let mut raw = RawScores::zero();
    raw[Metric::SurvivalThreat] = -(survival as i64);
    raw[Metric::EnemyProximity] = -proximity;
    raw
}
