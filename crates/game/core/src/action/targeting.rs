//! Targeting modes for actions.
//!
//! Ranges are Chebyshev distances (diagonals count as one tile).

use crate::state::{Position, World};

/// How an action selects its target position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingMode {
    /// Action only affects the performer (dodge, self-buffs).
    SelfOnly,

    /// One creature within range.
    SingleTarget { range: u32 },

    /// A point within range; every tile within `radius` of it is affected.
    Area { range: u32, radius: u32 },

    /// A destination tile reached by walking.
    Destination,
}

impl TargetingMode {
    pub fn is_self_only(&self) -> bool {
        matches!(self, TargetingMode::SelfOnly)
    }

    /// Creates a simple melee targeting mode (adjacent, diagonals included).
    pub fn melee() -> Self {
        Self::SingleTarget { range: 1 }
    }

    pub fn ranged(range: u32) -> Self {
        Self::SingleTarget { range }
    }
}

/// In-bounds tiles within Chebyshev `range` of `origin`, excluding `origin`,
/// in row-major order.
pub fn tiles_in_range(world: &World, origin: Position, range: u32) -> Vec<Position> {
    origin
        .square(range)
        .filter(|p| *p != origin && world.is_valid_position(*p))
        .collect()
}

/// In-bounds tiles within Chebyshev `radius` of `center`, including `center`.
pub fn tiles_in_area(world: &World, center: Position, radius: u32) -> Vec<Position> {
    center
        .square(radius)
        .filter(|p| world.is_valid_position(*p))
        .collect()
}
