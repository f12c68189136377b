//! Deterministic battlefield model shared by the decision engine and tools.
//!
//! `game-core` defines the grid world, actors and their resources, the
//! action capability ([`action::CombatAction`]) and the encounter turn order.
//! Every roll is derived from the world seed, so replaying the same inputs
//! yields the same fight.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    ActionError, ActionHandle, ActionKind, ActionOutcome, AttackAction, AttackStyle,
    CombatAction, DodgeAction, MovementAction, MovementMode, SpellAction, TargetingMode,
};
pub use config::GameConfig;
pub use engine::Encounter;
pub use env::{MapDimensions, PcgRng, RngOracle, RollContext, TerrainKind};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Actor, Conditions, EntityId, Position, ResourceKind, ResourceMeter, ResourcePool, TeamId,
    TileMap, World, WorldError,
};
