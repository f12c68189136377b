//! Metric evaluators and the score tables they fill.
//!
//! Every candidate (action, target, standing cell) is described by nine raw
//! integer metrics in three categories:
//!
//! | Category | Metrics |
//! |---|---|
//! | Damage | damage-to-enemy, friendly-fire penalty, kill potential |
//! | Positioning | survival threat, enemy proximity, movement efficiency |
//! | Target selection | threat priority, low-health bonus, tactical value |
//!
//! Evaluators are pure functions of the world they are handed. Each returns
//! a [`RawScores`] with only its own metrics set; the evaluator in
//! [`crate::ai`] adds them together, weighs them with a [`WeightProfile`]
//! and sums the result.
//!
//! Sign lives in the raw metric (penalties are negative), never in the weight.

pub mod damage;
pub mod movement;
pub mod plan;
pub mod targeting;
pub mod threat;
pub mod weights;

use std::ops::{AddAssign, Index, IndexMut};

pub use damage::{KILL_POTENTIAL_BONUS, damage_scores, expected_damage, hit_probability};
pub use movement::{engagement_range, movement_efficiency, opportunity_attack_penalty};
pub use plan::plan_score;
pub use targeting::target_scores;
pub use threat::threat_scores;
pub use weights::{Archetype, MAX_WEIGHT, WeightProfile};

/// One named heuristic.
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
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Metric {
    DamageToEnemy = 0,
    FriendlyFirePenalty = 1,
    KillPotential = 2,
    SurvivalThreat = 3,
    EnemyProximity = 4,
    MovementEfficiency = 5,
    ThreatPriority = 6,
    LowHealthBonus = 7,
    TacticalValue = 8,
}

impl Metric {
    pub const COUNT: usize = 9;

    pub const fn all() -> [Metric; Self::COUNT] {
        [
            Metric::DamageToEnemy,
            Metric::FriendlyFirePenalty,
            Metric::KillPotential,
            Metric::SurvivalThreat,
            Metric::EnemyProximity,
            Metric::MovementEfficiency,
            Metric::ThreatPriority,
            Metric::LowHealthBonus,
            Metric::TacticalValue,
        ]
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    pub const fn category(self) -> MetricCategory {
        match self {
            Metric::DamageToEnemy | Metric::FriendlyFirePenalty | Metric::KillPotential => {
                MetricCategory::Damage
            }
            Metric::SurvivalThreat | Metric::EnemyProximity | Metric::MovementEfficiency => {
                MetricCategory::Positioning
            }
            Metric::ThreatPriority | Metric::LowHealthBonus | Metric::TacticalValue => {
                MetricCategory::TargetSelection
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MetricCategory {
    Damage,
    Positioning,
    TargetSelection,
}

impl MetricCategory {
    pub fn metrics(self) -> impl Iterator<Item = Metric> {
        Metric::all()
            .into_iter()
            .filter(move |metric| metric.category() == self)
    }
}

/// A value for every [`Metric`], indexed by the enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MetricTable<T> {
    values: [T; Metric::COUNT],
}

impl<T: Copy> MetricTable<T> {
    pub const fn from_raw(values: [T; Metric::COUNT]) -> Self {
        Self { values }
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> T {
        self.values[metric.as_index()]
    }

    #[inline]
    pub fn set(&mut self, metric: Metric, value: T) {
        self.values[metric.as_index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, T)> + '_ {
        Metric::all().into_iter().map(|metric| (metric, self.get(metric)))
    }

    pub fn as_array(&self) -> &[T; Metric::COUNT] {
        &self.values
    }
}

impl<T> Index<Metric> for MetricTable<T> {
    type Output = T;

    fn index(&self, metric: Metric) -> &T {
        &self.values[metric.as_index()]
    }
}

impl<T> IndexMut<Metric> for MetricTable<T> {
    fn index_mut(&mut self, metric: Metric) -> &mut T {
        &mut self.values[metric.as_index()]
    }
}

/// Raw metric outputs for one candidate.
pub type RawScores = MetricTable<i64>;

/// Raw scores multiplied by a weight profile, truncated toward zero.
pub type WeightedScores = MetricTable<i64>;

impl MetricTable<i64> {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum of all nine entries.
    pub fn total(&self) -> i64 {
        self.values.iter().sum()
    }

    pub fn category_total(&self, category: MetricCategory) -> i64 {
        category.metrics().map(|metric| self.get(metric)).sum()
    }
}

impl AddAssign for MetricTable<i64> {
    fn add_assign(&mut self, other: Self) {
        for (mine, theirs) in self.values.iter_mut().zip(other.values) {
            *mine += theirs;
        }
    }
}

impl serde::Serialize for MetricTable<i64> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Metric::COUNT))?;
        for (metric, value) in self.iter() {
            map.serialize_entry(metric.as_ref(), &value)?;
        }
        map.end()
    }
}
