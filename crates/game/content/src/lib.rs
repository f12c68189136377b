//! Data-driven scenario definitions and loaders.
//!
//! A scenario describes one encounter: map size and terrain, the actors
//! with their stats and action lists, and the initiative order. Scenarios
//! are written in RON and turned into a ready-to-run
//! [`Encounter`](game_core::Encounter).

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActionSpec, ActorSpec, ScenarioLoader, ScenarioSpec};
