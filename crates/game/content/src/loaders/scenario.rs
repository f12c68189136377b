//! Scenario loader.
//!
//! Loads a complete encounter (map, actors, initiative) from a RON file.
//!
//! ```ron
//! ScenarioSpec(
//!     name: "ambush",
//!     seed: 7,
//!     dimensions: (12, 12),
//!     tiles: [(4, 4, Wall)],
//!     actors: [
//!         ActorSpec(
//!             id: 1,
//!             name: "fighter",
//!             team: 0,
//!             position: (5, 5),
//!             hit_points: 24,
//!             actions: [Melee(name: "longsword", damage: 8), Move, Dash, Dodge],
//!         ),
//!     ],
//! )
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use game_core::{
    ActionHandle, Actor, AttackAction, DodgeAction, Encounter, EntityId, GameConfig,
    MapDimensions, MovementAction, Position, ResourceKind, ResourcePool, SpellAction, TeamId,
    TerrainKind, World,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One action in an actor's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSpec {
    Melee {
        name: String,
        damage: u32,
        #[serde(default)]
        attack_bonus: Option<i32>,
    },
    Ranged {
        name: String,
        range: u32,
        damage: u32,
        #[serde(default)]
        attack_bonus: Option<i32>,
    },
    Spell {
        name: String,
        range: u32,
        radius: u32,
        damage: u32,
        #[serde(default)]
        save_dc: Option<u32>,
    },
    Move,
    Dash,
    Dodge,
}

impl ActionSpec {
    /// Builds the action; movement actions use the actor's `speed`.
    pub fn build(&self, speed: u32) -> ActionHandle {
        match self {
            ActionSpec::Melee {
                name,
                damage,
                attack_bonus,
            } => {
                let attack = AttackAction::melee(name.clone(), *damage);
                Arc::new(match attack_bonus {
                    Some(bonus) => attack.with_attack_bonus(*bonus),
                    None => attack,
                })
            }
            ActionSpec::Ranged {
                name,
                range,
                damage,
                attack_bonus,
            } => {
                let attack = AttackAction::ranged(name.clone(), *range, *damage);
                Arc::new(match attack_bonus {
                    Some(bonus) => attack.with_attack_bonus(*bonus),
                    None => attack,
                })
            }
            ActionSpec::Spell {
                name,
                range,
                radius,
                damage,
                save_dc,
            } => {
                let spell = SpellAction::area(name.clone(), *range, *radius, *damage);
                Arc::new(match save_dc {
                    Some(dc) => spell.with_save_dc(*dc),
                    None => spell,
                })
            }
            ActionSpec::Move => Arc::new(MovementAction::walk(speed)),
            ActionSpec::Dash => Arc::new(MovementAction::dash(speed)),
            ActionSpec::Dodge => Arc::new(DodgeAction),
        }
    }
}

fn default_armor_class() -> u32 {
    GameConfig::DEFAULT_ARMOR_CLASS
}

fn default_speed() -> u32 {
    GameConfig::DEFAULT_SPEED
}

fn default_level() -> u32 {
    1
}

/// Actor entry in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub id: u32,
    pub name: String,
    pub team: u8,
    pub position: (i32, i32),
    pub hit_points: u32,
    /// Starting hit points; defaults to `hit_points`.
    #[serde(default)]
    pub current_hit_points: Option<u32>,
    #[serde(default = "default_armor_class")]
    pub armor_class: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_speed")]
    pub speed: u32,
    #[serde(default)]
    pub spell_slots: u32,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

impl ActorSpec {
    pub fn to_actor(&self) -> LoadResult<Actor> {
        if self.actions.len() > GameConfig::MAX_ACTIONS {
            bail!(
                "actor '{}' lists {} actions, at most {} are supported",
                self.name,
                self.actions.len(),
                GameConfig::MAX_ACTIONS
            );
        }

        let (x, y) = self.position;
        let resources = ResourcePool::standard(self.speed).with(ResourceKind::SpellSlot, self.spell_slots);
        let mut actor = Actor::new(
            EntityId(self.id),
            TeamId(self.team),
            Position::new(x, y),
            self.hit_points,
        )
        .with_name(self.name.clone())
        .with_armor_class(self.armor_class)
        .with_level(self.level)
        .with_resources(resources);
        if let Some(current) = self.current_hit_points {
            actor = actor.with_hit_points(current);
        }
        for action in &self.actions {
            actor = actor.with_action(action.build(self.speed));
        }
        Ok(actor)
    }
}

/// A complete encounter description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    #[serde(default = "GameConfig::default_seed")]
    pub seed: u64,
    pub dimensions: (u32, u32),
    /// Non-floor tiles as `(x, y, terrain)`.
    #[serde(default)]
    pub tiles: Vec<(i32, i32, TerrainKind)>,
    pub actors: Vec<ActorSpec>,
    /// Initiative order by actor id; defaults to id order.
    #[serde(default)]
    pub initiative: Option<Vec<u32>>,
}

impl ScenarioSpec {
    /// Builds the world described by this scenario.
    pub fn build_world(&self) -> LoadResult<World> {
        let (width, height) = self.dimensions;
        let mut world = World::new(MapDimensions::new(width, height), self.seed);

        for (x, y, terrain) in &self.tiles {
            world
                .set_terrain(Position::new(*x, *y), *terrain)
                .with_context(|| format!("scenario '{}': bad tile", self.name))?;
        }
        for spec in &self.actors {
            let actor = spec.to_actor()?;
            world
                .spawn(actor)
                .with_context(|| format!("scenario '{}': cannot place '{}'", self.name, spec.name))?;
        }

        Ok(world)
    }

    /// Builds the world and wraps it in an encounter ready for its first turn.
    pub fn build(&self) -> LoadResult<Encounter> {
        let world = self.build_world()?;
        let encounter = match &self.initiative {
            Some(order) => Encounter::new(world, order.iter().copied().map(EntityId).collect())
                .with_context(|| format!("scenario '{}': bad initiative order", self.name))?,
            None => Encounter::in_id_order(world),
        };

        tracing::debug!(
            "built scenario '{}' with {} actors",
            self.name,
            self.actors.len()
        );
        Ok(encounter)
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a `ScenarioSpec`
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a scenario from RON text.
    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use game_core::{ActionKind, Conditions};

    use super::*;

    const DUEL: &str = r#"
        ScenarioSpec(
            name: "duel",
            seed: 9,
            dimensions: (10, 10),
            tiles: [(3, 3, Wall)],
            actors: [
                ActorSpec(
                    id: 2,
                    name: "goblin",
                    team: 1,
                    position: (6, 6),
                    hit_points: 7,
                    actions: [Melee(name: "scimitar", damage: 5), Move],
                ),
                ActorSpec(
                    id: 1,
                    name: "wizard",
                    team: 0,
                    position: (5, 5),
                    hit_points: 12,
                    current_hit_points: Some(6),
                    armor_class: 12,
                    level: 5,
                    spell_slots: 2,
                    actions: [
                        Spell(name: "fireball", range: 8, radius: 1, damage: 14),
                        Ranged(name: "crossbow", range: 8, damage: 5, attack_bonus: Some(4)),
                        Dash,
                        Dodge,
                    ],
                ),
            ],
            initiative: Some([2, 1]),
        )
    "#;

    #[test]
    fn test_parse_and_build_scenario() {
        let spec = ScenarioLoader::parse(DUEL).expect("scenario parses");
        assert_eq!(spec.actors.len(), 2);

        let encounter = spec.build().expect("scenario builds");
        assert_eq!(encounter.active_actor(), Some(EntityId(2)));
        assert_eq!(encounter.world().terrain(Position::new(3, 3)), Some(TerrainKind::Wall));

        let wizard = encounter.world().actor(EntityId(1)).unwrap();
        assert_eq!(wizard.hit_points.current, 6);
        assert_eq!(wizard.armor_class, 12);
        assert_eq!(wizard.resources.remaining(ResourceKind::SpellSlot), 2);
        assert_eq!(wizard.conditions, Conditions::empty());
        let kinds: Vec<ActionKind> = wizard.actions.iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::Spell, ActionKind::Attack, ActionKind::Dash, ActionKind::Dodge]
        );

        let goblin = encounter.world().actor(EntityId(2)).unwrap();
        assert_eq!(goblin.armor_class, GameConfig::DEFAULT_ARMOR_CLASS);
        assert_eq!(goblin.resources.remaining(ResourceKind::Movement), GameConfig::DEFAULT_SPEED);
    }

    #[test]
    fn test_overlapping_actors_are_rejected() {
        let mut spec = ScenarioLoader::parse(DUEL).unwrap();
        spec.actors[1].position = (6, 6);
        let err = spec.build().unwrap_err();
        assert!(format!("{err:#}").contains("cannot place 'wizard'"));
    }

    #[test]
    fn test_unknown_initiative_entry_is_rejected() {
        let mut spec = ScenarioLoader::parse(DUEL).unwrap();
        spec.initiative = Some(vec![1, 2, 3]);
        assert!(spec.build().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DUEL.as_bytes()).unwrap();

        let spec = ScenarioLoader::load(file.path()).expect("scenario loads");
        assert_eq!(spec.name, "duel");
        assert_eq!(spec.seed, 9);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ScenarioLoader::load(Path::new("/nonexistent/scenario.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scenario.ron"));
    }
}
