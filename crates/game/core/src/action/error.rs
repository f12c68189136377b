use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position, ResourceKind, WorldError};

/// Errors raised when an action cannot be performed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {0} cannot act")]
    CannotAct(EntityId),

    #[error("not enough {kind}: needed {needed}, have {available}")]
    InsufficientResource {
        kind: ResourceKind,
        needed: u32,
        available: u32,
    },

    #[error("target {target} is out of reach from {origin}")]
    OutOfReach { origin: Position, target: Position },

    #[error("no living creature at {0}")]
    NoTarget(Position),

    #[error(transparent)]
    World(#[from] WorldError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResource { .. } | Self::OutOfReach { .. } | Self::NoTarget(_) => {
                ErrorSeverity::Recoverable
            }
            Self::CannotAct(_) => ErrorSeverity::Validation,
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
            Self::World(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            Self::CannotAct(_) => "ACTION_CANNOT_ACT",
            Self::InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            Self::OutOfReach { .. } => "ACTION_OUT_OF_REACH",
            Self::NoTarget(_) => "ACTION_NO_TARGET",
            Self::World(err) => err.error_code(),
        }
    }
}
