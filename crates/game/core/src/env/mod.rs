//! Static environment: map geometry, terrain and dice.

mod map;
mod rng;

pub use map::{MapDimensions, TerrainKind};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
