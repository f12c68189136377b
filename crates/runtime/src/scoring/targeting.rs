//! Target-selection metrics: threat priority, low-health bonus and
//! tactical value of the creature standing on the target cell.

use game_core::{Actor, Position, World};

use super::{Metric, RawScores};

/// Allies of the target this close make it harder to isolate.
const SUPPORT_RADIUS: u32 = 3;

/// Scores the primary target at `target`.
///
/// All zero when the cell is empty, the occupant is dead, or it is not
/// hostile to `actor`.
pub fn target_scores(world: &World, actor: &Actor, target: Position) -> RawScores {
    let mut raw = RawScores::zero();
    let Some(victim) = world.actor_at(target) else {
        return raw;
    };
    if victim.is_dead() || !victim.is_hostile_to(actor) {
        return raw;
    }

    raw[Metric::ThreatPriority] = threat_priority(actor, victim);
    raw[Metric::LowHealthBonus] = low_health_bonus(victim);
    raw[Metric::TacticalValue] = tactical_value(world, victim);
    raw
}

/// Closer and healthier enemies come first.
fn threat_priority(actor: &Actor, victim: &Actor) -> i64 {
    let distance = actor.position.manhattan_distance(victim.position);

    let mut score = 0;
    if distance <= 6 {
        score += 30;
    }
    if distance <= 3 {
        score += 20;
    }
    if distance <= 1 {
        score += 30;
    }

    if victim.health_cmp(3, 4).is_gt() {
        score += 25;
    } else if victim.health_cmp(1, 2).is_gt() {
        score += 15;
    }
    score
}

fn low_health_bonus(victim: &Actor) -> i64 {
    if victim.health_cmp(1, 4).is_le() {
        40
    } else if victim.health_cmp(1, 2).is_le() {
        20
    } else {
        0
    }
}

fn tactical_value(world: &World, victim: &Actor) -> i64 {
    let mut score = victim.estimated_damage_output() as i64 / 2;

    let supporters = world
        .actors_in_range(victim.position, SUPPORT_RADIUS, |other| {
            other.id != victim.id && other.is_alive() && !other.is_hostile_to(victim)
        })
        .len();
    score += match supporters {
        0 => 20,
        1 => 10,
        _ => 0,
    };

    if victim.armor_class >= 16 {
        score -= 15;
    } else if victim.armor_class <= 12 {
        score += 10;
    }
    score
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use game_core::{AttackAction, EntityId, MapDimensions, TeamId};

    use super::*;

    fn world() -> World {
        let mut world = World::new(MapDimensions::new(12, 12), 0);
        world
            .spawn(Actor::new(EntityId(1), TeamId(0), Position::new(5, 5), 20))
            .unwrap();
        let brute = Actor::new(EntityId(2), TeamId(1), Position::new(6, 5), 40)
            .with_hit_points(9)
            .with_armor_class(17)
            .with_action(Arc::new(AttackAction::melee("greataxe", 13)));
        world.spawn(brute).unwrap();
        world
            .spawn(Actor::new(EntityId(3), TeamId(1), Position::new(8, 6), 10).with_armor_class(12))
            .unwrap();
        world
    }

    #[test]
    fn scores_adjacent_wounded_brute() {
        let world = world();
        let actor = world.actor(EntityId(1)).unwrap();
        let raw = target_scores(&world, actor, Position::new(6, 5));

        assert_eq!(raw[Metric::ThreatPriority], 80);
        assert_eq!(raw[Metric::LowHealthBonus], 40);
        // 13 / 2 + one supporter - heavy armor
        assert_eq!(raw[Metric::TacticalValue], 6 + 10 - 15);
    }

    #[test]
    fn scores_distant_healthy_skirmisher() {
        let world = world();
        let actor = world.actor(EntityId(1)).unwrap();
        let raw = target_scores(&world, actor, Position::new(8, 6));

        assert_eq!(raw[Metric::ThreatPriority], 30 + 25);
        assert_eq!(raw[Metric::LowHealthBonus], 0);
        // level 1 fallback output 3 / 2 + one supporter + light armor
        assert_eq!(raw[Metric::TacticalValue], 1 + 10 + 10);
    }

    fn wounded_foe(hit_points: u32) -> World {
        let mut world = World::new(MapDimensions::new(12, 12), 0);
        world
            .spawn(Actor::new(EntityId(1), TeamId(0), Position::new(5, 5), 20))
            .unwrap();
        world
            .spawn(Actor::new(EntityId(2), TeamId(1), Position::new(9, 5), 200).with_hit_points(hit_points))
            .unwrap();
        world
    }

    fn health_tiers(hit_points: u32) -> (i64, i64) {
        let world = wounded_foe(hit_points);
        let actor = world.actor(EntityId(1)).unwrap();
        let raw = target_scores(&world, actor, Position::new(9, 5));
        // distance 4 contributes a flat 30
        (raw[Metric::ThreatPriority] - 30, raw[Metric::LowHealthBonus])
    }

    #[test]
    fn health_tiers_use_exact_ratios() {
        assert_eq!(health_tiers(151), (25, 0));
        assert_eq!(health_tiers(150), (15, 0));
        assert_eq!(health_tiers(101), (15, 0));
        assert_eq!(health_tiers(100), (0, 20));
        assert_eq!(health_tiers(51), (0, 20));
        assert_eq!(health_tiers(50), (0, 40));
    }

    #[test]
    fn empty_or_friendly_cells_score_nothing() {
        let world = world();
        let actor = world.actor(EntityId(1)).unwrap();
        assert_eq!(target_scores(&world, actor, Position::new(0, 0)).total(), 0);
        assert_eq!(target_scores(&world, actor, Position::new(5, 5)).total(), 0);
    }
}
