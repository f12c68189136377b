//! Tactical decision pipeline.
//!
//! One decision for one actor runs in four stages:
//!
//! 1. **Feasibility**: drop actions the actor cannot use right now
//!    ([`is_feasible`]).
//! 2. **Candidate generation**: pick target positions worth simulating for
//!    each remaining action ([`CandidateGenerator`]).
//! 3. **Evaluation**: choose a standing cell ([`PositionOptimizer`]),
//!    simulate the outcome from there and fill all nine metrics
//!    ([`CandidateEvaluator`]).
//! 4. **Selection**: keep the best result, or fall back to moving or
//!    defending when nothing scores well ([`ActionSelector`]).
//!
//! Every hypothetical placement goes through [`Relocation`], which restores
//! the world when it goes out of scope.

pub mod context;
pub mod evaluation;
pub mod feasibility;
pub mod generator;
pub mod positioning;
pub mod selector;

pub use context::Relocation;
pub use evaluation::{CandidateEvaluation, CandidateEvaluator, Scored};
pub use feasibility::is_feasible;
pub use generator::{CandidateGenerator, MAX_MOVEMENT_SAMPLES, MovementSample};
pub use positioning::{PositionOptimizer, StandingPlan};
pub use selector::{ActionSelector, choose_best, choose_fallback};
