//! Combat resolution helpers.
//!
//! Pure functions shared by the concrete actions (when they resolve) and by
//! the decision engine (when it estimates outcomes).

pub mod hit;

pub use hit::{MAX_HIT_CHANCE, MIN_HIT_CHANCE, attack_hits, hit_chance_percent};
