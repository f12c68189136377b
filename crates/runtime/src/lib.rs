//! Tactical decision engine for turn-based grid combat.
//!
//! Given an [`Encounter`](game_core::Encounter) and the active actor, the
//! engine enumerates every feasible action and target, simulates each one
//! from the best standing cell, scores the outcome on nine weighted metrics
//! and performs the winner. [`take_turn`] drives a whole turn.
//!
//! Modules are organized by responsibility:
//! - [`scoring`] holds the metric evaluators and weight profiles
//! - [`ai`] runs feasibility, candidate generation, evaluation and selection
//! - [`driver`] executes selected actions until the turn is over
//! - [`config`] and [`error`] cover the TOML configuration surface

/// Logs a decision trace line at `info` when `verbose`, otherwise at `debug`.
#[macro_export]
macro_rules! decision_log {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            ::tracing::info!($($arg)+);
        } else {
            ::tracing::debug!($($arg)+);
        }
    };
}

pub mod ai;
pub mod config;
pub mod driver;
pub mod error;
pub mod scoring;

pub use ai::{ActionSelector, CandidateEvaluation, Relocation};
pub use config::{AiConfig, EvaluationStrategy};
pub use driver::{DecisionRecord, TurnEndReason, TurnScope, TurnSummary, take_turn};
pub use error::ConfigError;
pub use scoring::{Archetype, Metric, MetricCategory, RawScores, WeightProfile, WeightedScores};
