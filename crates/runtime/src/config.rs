//! Decision engine configuration.
//!
//! [`AiConfig`] is plain data with serde derives and is usually loaded from
//! TOML. Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! archetype = "berserker"
//! strategy = "parallel"
//! search_radius = 4
//!
//! [weights]            # optional; overrides the archetype table
//! damage_to_enemy = 2.0
//! # ... all nine metrics
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::MAX_MOVEMENT_SAMPLES;
use crate::error::ConfigError;
use crate::scoring::{Archetype, WeightProfile};

/// How candidate evaluations are executed.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EvaluationStrategy {
    /// Relocate inside the live world, one candidate at a time.
    #[default]
    Sequential,
    /// Fan out over the rayon pool, one world copy per worker.
    Parallel,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    pub archetype: Archetype,
    pub strategy: EvaluationStrategy,
    /// Promotes decision logs from `debug` to `info`.
    pub verbose: bool,
    /// Half-width of the square searched for standing cells.
    pub search_radius: u32,
    /// Points subtracted per tile of Manhattan distance to a standing cell.
    pub movement_cost_per_tile: i64,
    /// Movement destinations simulated per movement action.
    pub movement_sample_limit: usize,
    /// Fallback prefers the best movement while its total stays above this.
    pub fallback_movement_threshold: i64,
    /// Primary results at or below this trigger the fallback path.
    pub poor_score_threshold: i64,
    pub max_actions_per_turn: u32,
    /// Explicit table; replaces the archetype's when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightProfile>,
}

impl AiConfig {
    pub const DEFAULT_SEARCH_RADIUS: u32 = 6;
    pub const DEFAULT_MOVEMENT_COST_PER_TILE: i64 = 5;
    pub const DEFAULT_MOVEMENT_SAMPLE_LIMIT: usize = 8;
    pub const DEFAULT_FALLBACK_MOVEMENT_THRESHOLD: i64 = -50;
    pub const DEFAULT_POOR_SCORE_THRESHOLD: i64 = 0;
    pub const DEFAULT_MAX_ACTIONS_PER_TURN: u32 = 8;

    pub fn for_archetype(archetype: Archetype) -> Self {
        Self {
            archetype,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: EvaluationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_weights(mut self, weights: WeightProfile) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_movement_sample_limit(mut self, limit: usize) -> Self {
        self.movement_sample_limit = limit;
        self
    }

    /// Active weight table: the explicit one, else the archetype's.
    pub fn profile(&self) -> WeightProfile {
        self.weights.unwrap_or_else(|| self.archetype.profile())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_MOVEMENT_SAMPLES).contains(&self.movement_sample_limit) {
            return Err(ConfigError::InvalidSampleLimit {
                value: self.movement_sample_limit,
                max: MAX_MOVEMENT_SAMPLES,
            });
        }
        if self.max_actions_per_turn == 0 {
            return Err(ConfigError::ZeroActionLimit);
        }
        if let Some(weights) = self.weights {
            WeightProfile::new(*weights.table())?;
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            "loaded AI config from {}: archetype={}, strategy={}",
            path.display(),
            config.archetype,
            config.strategy
        );
        Ok(config)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            archetype: Archetype::default(),
            strategy: EvaluationStrategy::default(),
            verbose: false,
            search_radius: Self::DEFAULT_SEARCH_RADIUS,
            movement_cost_per_tile: Self::DEFAULT_MOVEMENT_COST_PER_TILE,
            movement_sample_limit: Self::DEFAULT_MOVEMENT_SAMPLE_LIMIT,
            fallback_movement_threshold: Self::DEFAULT_FALLBACK_MOVEMENT_THRESHOLD,
            poor_score_threshold: Self::DEFAULT_POOR_SCORE_THRESHOLD,
            max_actions_per_turn: Self::DEFAULT_MAX_ACTIONS_PER_TURN,
            weights: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = AiConfig::from_toml_str("").unwrap();
        assert_eq!(config, AiConfig::default());
        assert_eq!(config.profile(), WeightProfile::DEFAULT);
    }

    #[test]
    fn archetype_and_strategy_parse_snake_case() {
        let config = AiConfig::from_toml_str(
            "archetype = \"defensive\"\nstrategy = \"parallel\"\nverbose = true\n",
        )
        .unwrap();
        assert_eq!(config.archetype, Archetype::Defensive);
        assert_eq!(config.strategy, EvaluationStrategy::Parallel);
        assert!(config.verbose);
        assert_eq!(config.profile(), WeightProfile::DEFENSIVE);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            AiConfig::from_toml_str("agression = 3\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_limits() {
        assert!(matches!(
            AiConfig::from_toml_str("movement_sample_limit = 0\n"),
            Err(ConfigError::InvalidSampleLimit { value: 0, .. })
        ));
        assert!(matches!(
            AiConfig::from_toml_str("movement_sample_limit = 17\n"),
            Err(ConfigError::InvalidSampleLimit { value: 17, .. })
        ));
        assert!(matches!(
            AiConfig::from_toml_str("max_actions_per_turn = 0\n"),
            Err(ConfigError::ZeroActionLimit)
        ));
    }

    #[test]
    fn explicit_weights_override_archetype() {
        let config = AiConfig::for_archetype(Archetype::Berserker).with_weights(WeightProfile::DEFENSIVE);
        assert_eq!(config.profile(), WeightProfile::DEFENSIVE);
    }
}
