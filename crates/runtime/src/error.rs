//! Configuration errors.
//!
//! The decision path itself has no error taxonomy: "nothing worth doing" is
//! `None`. Only loading and validating [`AiConfig`](crate::AiConfig) can fail.

use std::path::PathBuf;

use game_core::{ErrorSeverity, GameError};

use crate::scoring::Metric;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("weight for {metric} must be finite and in (0, {max}], got {value}")]
    InvalidWeight { metric: Metric, value: f32, max: f32 },

    #[error("movement sample limit must be between 1 and {max}, got {value}")]
    InvalidSampleLimit { value: usize, max: usize },

    #[error("max_actions_per_turn must be at least 1")]
    ZeroActionLimit,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io { .. } => ErrorSeverity::Recoverable,
            Self::Parse(_)
            | Self::InvalidWeight { .. }
            | Self::InvalidSampleLimit { .. }
            | Self::ZeroActionLimit => ErrorSeverity::Validation,
            Self::Serialize(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CONFIG_IO",
            Self::Parse(_) => "CONFIG_PARSE",
            Self::Serialize(_) => "CONFIG_SERIALIZE",
            Self::InvalidWeight { .. } => "CONFIG_INVALID_WEIGHT",
            Self::InvalidSampleLimit { .. } => "CONFIG_INVALID_SAMPLE_LIMIT",
            Self::ZeroActionLimit => "CONFIG_ZERO_ACTION_LIMIT",
        }
    }
}
