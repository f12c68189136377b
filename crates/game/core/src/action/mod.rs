//! The action capability consumed by the decision engine.
//!
//! Action *kind* is a closed enum ([`ActionKind`]); the behaviour behind a
//! kind is open through the [`CombatAction`] trait so rulesets can add their
//! own actions. The crate ships a small set of concrete actions:
//!
//! - [`AttackAction`]: melee or ranged weapon attack against one creature
//! - [`SpellAction`]: save-based area spell
//! - [`MovementAction`]: move or dash to a reachable tile
//! - [`DodgeAction`]: defensive stance until the actor's next turn

mod combat;
mod defense;
mod error;
mod movement;
mod targeting;

use std::fmt;
use std::sync::Arc;

pub use combat::{AttackAction, AttackStyle, SpellAction};
pub use defense::DodgeAction;
pub use error::ActionError;
pub use movement::{MovementAction, MovementMode};
pub use targeting::{TargetingMode, tiles_in_area, tiles_in_range};

use crate::state::{Actor, EntityId, Position, World};

/// Tactical category of an action.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Attack,
    Spell,
    Move,
    Dash,
    Dodge,
    Help,
    Teleport,
    /// Ruleset-defined action the tactical AI does not reason about.
    Other,
}

impl ActionKind {
    /// Kinds the tactical AI knows how to score.
    pub const fn is_tactical(self) -> bool {
        !matches!(self, ActionKind::Other)
    }

    /// Move and dash: the target is a destination, not a creature.
    pub const fn is_movement(self) -> bool {
        matches!(self, ActionKind::Move | ActionKind::Dash)
    }

    pub const fn is_defensive(self) -> bool {
        matches!(self, ActionKind::Dodge)
    }
}

/// What happened when an action was performed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Moved { to: Position, steps: u32 },
    Attacked { target: EntityId, hit: bool, damage: u32 },
    Blasted { hits: Vec<(EntityId, u32)> },
    Defended,
}

/// Capability every action exposes to the engine.
///
/// Implementations must be deterministic for a given world: the engine
/// evaluates them repeatedly on temporarily modified copies.
pub trait CombatAction: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> ActionKind;

    fn targeting(&self) -> TargetingMode;

    /// Whether `actor` has the resources to perform this action now.
    fn can_afford(&self, actor: &Actor) -> bool;

    /// Target positions reachable as if `actor` stood at `origin`.
    fn valid_positions(&self, world: &World, actor: &Actor, origin: Position) -> Vec<Position>;

    /// Tiles touched by the effect when aimed at `target`.
    fn affected_positions(&self, _world: &World, target: Position) -> Vec<Position> {
        vec![target]
    }

    /// Expected damage per affected creature on a successful hit.
    fn average_damage(&self) -> u32 {
        0
    }

    fn perform(
        &self,
        world: &mut World,
        actor: EntityId,
        target: Position,
    ) -> Result<ActionOutcome, ActionError>;
}

/// Shared handle to an action. Cheap to clone into per-task world copies.
pub type ActionHandle = Arc<dyn CombatAction>;

/// Looks up the performing actor, failing when it is missing or cannot act.
pub(crate) fn acting_actor(world: &World, id: EntityId) -> Result<&Actor, ActionError> {
    let actor = world.actor(id).ok_or(ActionError::ActorNotFound(id))?;
    if !actor.can_act() {
        return Err(ActionError::CannotAct(id));
    }
    Ok(actor)
}
