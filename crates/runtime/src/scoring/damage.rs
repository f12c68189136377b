//! Damage, friendly-fire and kill-potential metrics.

use game_core::combat::hit_chance_percent;
use game_core::{ActionKind, Actor, CombatAction, Position, World};

use super::{Metric, RawScores};

/// Attack bonus assumed when estimating weapon hit chances.
pub const ESTIMATED_ATTACK_BONUS: i32 = 5;

/// Save-based effects are assumed to land this often.
pub const SPELL_EFFECTIVENESS: f64 = 0.75;

/// Flat bonus per hostile the action is expected to finish off.
pub const KILL_POTENTIAL_BONUS: i64 = 50;

/// Estimated chance (0.0-1.0) that an action of `kind` affects a creature
/// with `armor_class`.
pub fn hit_probability(kind: ActionKind, armor_class: u32) -> f64 {
    match kind {
        ActionKind::Spell => SPELL_EFFECTIVENESS,
        ActionKind::Attack => hit_chance_percent(ESTIMATED_ATTACK_BONUS, armor_class) as f64 / 100.0,
        _ => 1.0,
    }
}

/// Average damage × hit probability against `target`.
pub fn expected_damage(action: &dyn CombatAction, target: &Actor) -> f64 {
    action.average_damage() as f64 * hit_probability(action.kind(), target.armor_class)
}

/// Scores the damage dealt to every living creature on `affected`.
///
/// Hostiles add to damage-to-enemy (plus the kill bonus when their remaining
/// hit points do not exceed the expected damage). Everyone else, the actor
/// included, adds to the friendly-fire penalty as a negative number.
pub fn damage_scores(
    world: &World,
    actor: &Actor,
    action: &dyn CombatAction,
    affected: &[Position],
) -> RawScores {
    let mut to_enemies = 0.0;
    let mut to_friends = 0.0;
    let mut kills = 0;

    for position in affected {
        let Some(victim) = world.actor_at(*position) else {
            continue;
        };
        if victim.is_dead() {
            continue;
        }

        let expected = expected_damage(action, victim);
        if victim.is_hostile_to(actor) {
            to_enemies += expected;
            if expected > 0.0 && victim.hit_points.current as f64 <= expected {
                kills += 1;
            }
        } else {
            to_friends += expected;
        }
    }

    let mut raw = RawScores::zero();
    raw[Metric::DamageToEnemy] = to_enemies as i64;
    raw[Metric::FriendlyFirePenalty] = -(to_friends as i64);
    raw[Metric::KillPotential] = kills * KILL_POTENTIAL_BONUS;
    raw
}
