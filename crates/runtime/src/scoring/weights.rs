//! Weight profiles and the built-in archetypes.
//!
//! A [`WeightProfile`] multiplies each raw metric. Coefficients are always
//! positive: whether a metric is good or bad is encoded in the raw score.
//!
//! | Metric | Default | Berserker | Defensive |
//! |---|---|---|---|
//! | damage_to_enemy | 1.0 | 1.5 | 0.7 |
//! | friendly_fire_penalty | 1.0 | 0.4 | 1.5 |
//! | kill_potential | 1.0 | 1.5 | 0.8 |
//! | survival_threat | 1.0 | 0.3 | 1.8 |
//! | enemy_proximity | 0.5 | 0.2 | 1.0 |
//! | movement_efficiency | 0.8 | 1.2 | 0.5 |
//! | threat_priority | 0.6 | 0.8 | 0.5 |
//! | low_health_bonus | 0.8 | 1.0 | 0.6 |
//! | tactical_value | 0.5 | 0.4 | 0.7 |

use serde::{Deserialize, Serialize};

use super::{Metric, MetricCategory, MetricTable, RawScores, WeightedScores};
use crate::error::ConfigError;

/// Upper bound for any single coefficient.
pub const MAX_WEIGHT: f32 = 10.0;

/// Built-in AI personalities.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    #[default]
    Default,
    /// Trades safety for damage.
    Berserker,
    /// Stays out of reach and avoids hitting allies.
    Defensive,
}

impl Archetype {
    pub const fn all() -> [Archetype; 3] {
        [Archetype::Default, Archetype::Berserker, Archetype::Defensive]
    }

    pub const fn profile(self) -> WeightProfile {
        match self {
            Archetype::Default => WeightProfile::DEFAULT,
            Archetype::Berserker => WeightProfile::BERSERKER,
            Archetype::Defensive => WeightProfile::DEFENSIVE,
        }
    }
}

/// Multiplicative coefficient per metric.
///
/// Serialized as a table with one named field per metric; every field is
/// required and unknown names are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NamedWeights", into = "NamedWeights")]
pub struct WeightProfile {
    weights: MetricTable<f32>,
}

impl WeightProfile {
    pub const DEFAULT: Self = Self::from_raw([1.0, 1.0, 1.0, 1.0, 0.5, 0.8, 0.6, 0.8, 0.5]);
    pub const BERSERKER: Self = Self::from_raw([1.5, 0.4, 1.5, 0.3, 0.2, 1.2, 0.8, 1.0, 0.4]);
    pub const DEFENSIVE: Self = Self::from_raw([0.7, 1.5, 0.8, 1.8, 1.0, 0.5, 0.5, 0.6, 0.7]);

    /// Creates a profile from trusted values in [`Metric::all`] order.
    const fn from_raw(values: [f32; Metric::COUNT]) -> Self {
        Self {
            weights: MetricTable::from_raw(values),
        }
    }

    /// Creates a profile, rejecting non-finite, non-positive or oversized
    /// coefficients.
    pub fn new(weights: MetricTable<f32>) -> Result<Self, ConfigError> {
        for (metric, value) in weights.iter() {
            if !value.is_finite() || value <= 0.0 || value > MAX_WEIGHT {
                return Err(ConfigError::InvalidWeight {
                    metric,
                    value,
                    max: MAX_WEIGHT,
                });
            }
        }
        Ok(Self { weights })
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> f32 {
        self.weights.get(metric)
    }

    pub fn table(&self) -> &MetricTable<f32> {
        &self.weights
    }

    /// `raw[i] × weight[i]`, truncated toward zero.
    pub fn weigh(&self, raw: &RawScores) -> WeightedScores {
        let mut weighted = WeightedScores::zero();
        for (metric, value) in raw.iter() {
            weighted[metric] = (value as f64 * self.get(metric) as f64) as i64;
        }
        weighted
    }

    /// Weighted sum of one metric family.
    pub fn weigh_category(&self, raw: &RawScores, category: MetricCategory) -> i64 {
        self.weigh(raw).category_total(category)
    }
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Wire form of [`WeightProfile`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedWeights {
    damage_to_enemy: f32,
    friendly_fire_penalty: f32,
    kill_potential: f32,
    survival_threat: f32,
    enemy_proximity: f32,
    movement_efficiency: f32,
    threat_priority: f32,
    low_health_bonus: f32,
    tactical_value: f32,
}

impl TryFrom<NamedWeights> for WeightProfile {
    type Error = ConfigError;

    fn try_from(named: NamedWeights) -> Result<Self, Self::Error> {
        WeightProfile::new(MetricTable::from_raw([
            named.damage_to_enemy,
            named.friendly_fire_penalty,
            named.kill_potential,
            named.survival_threat,
            named.enemy_proximity,
            named.movement_efficiency,
            named.threat_priority,
            named.low_health_bonus,
            named.tactical_value,
        ]))
    }
}

impl From<WeightProfile> for NamedWeights {
    fn from(profile: WeightProfile) -> Self {
        Self {
            damage_to_enemy: profile.get(Metric::DamageToEnemy),
            friendly_fire_penalty: profile.get(Metric::FriendlyFirePenalty),
            kill_potential: profile.get(Metric::KillPotential),
            survival_threat: profile.get(Metric::SurvivalThreat),
            enemy_proximity: profile.get(Metric::EnemyProximity),
            movement_efficiency: profile.get(Metric::MovementEfficiency),
            threat_priority: profile.get(Metric::ThreatPriority),
            low_health_bonus: profile.get(Metric::LowHealthBonus),
            tactical_value: profile.get(Metric::TacticalValue),
        }
    }
}
