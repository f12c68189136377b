//! Mutable battlefield state: actors, occupancy and the grid they live on.

mod actor;
mod common;
mod world;

pub use actor::{Actor, Conditions, ResourceKind, ResourcePool};
pub use common::{EntityId, Position, ResourceMeter, TeamId};
pub use world::{TileMap, World, WorldError};
