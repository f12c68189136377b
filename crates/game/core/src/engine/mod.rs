//! Turn order for a single encounter.
//!
//! [`Encounter`] owns the [`World`](crate::state::World) and walks actors
//! through a fixed initiative order. It is the collaborator the decision
//! engine drives: who is active, who is hostile, and ending a turn.

mod encounter;

pub use encounter::Encounter;
