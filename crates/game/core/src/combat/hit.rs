//! Hit chance and attack-roll resolution.

/// Lowest hit chance any attack keeps (natural 20).
pub const MIN_HIT_CHANCE: u32 = 5;
/// Highest hit chance any attack keeps (natural 1).
pub const MAX_HIT_CHANCE: u32 = 95;

/// Chance (percent) that a d20 attack roll with `attack_bonus` meets `armor_class`.
///
/// # Formula
///
/// ```text
/// hit_chance = (21 + attack_bonus - armor_class) × 5
/// clamped to [MIN_HIT_CHANCE, MAX_HIT_CHANCE]
/// ```
pub fn hit_chance_percent(attack_bonus: i32, armor_class: u32) -> u32 {
    let faces = 21 + attack_bonus - armor_class as i32;
    (faces * 5).clamp(MIN_HIT_CHANCE as i32, MAX_HIT_CHANCE as i32) as u32
}

/// Resolves a d20 attack roll. Natural 20 always hits, natural 1 always misses.
pub fn attack_hits(roll: u32, attack_bonus: i32, armor_class: u32) -> bool {
    match roll {
        20 => true,
        1 => false,
        _ => roll as i32 + attack_bonus >= armor_class as i32,
    }
}
