//! Grid world: terrain, occupancy index, actors and pathfinding.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use pathfinding::prelude::{astar, dijkstra_all};

use super::{Actor, EntityId, Position};
use crate::env::{MapDimensions, PcgRng, RngOracle, RollContext, TerrainKind, compute_seed};
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while building or editing the world.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("position {0} is outside the map")]
    OutOfBounds(Position),

    #[error("position {0} is not passable")]
    Impassable(Position),

    #[error("position {position} is already occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: EntityId,
    },

    #[error("actor {0} already exists")]
    DuplicateActor(EntityId),

    #[error("actor {0} not found")]
    UnknownActor(EntityId),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds(_) | Self::Impassable(_) | Self::DuplicateActor(_) => {
                ErrorSeverity::Validation
            }
            Self::Occupied { .. } => ErrorSeverity::Recoverable,
            Self::UnknownActor(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds(_) => "WORLD_OUT_OF_BOUNDS",
            Self::Impassable(_) => "WORLD_IMPASSABLE",
            Self::Occupied { .. } => "WORLD_OCCUPIED",
            Self::DuplicateActor(_) => "WORLD_DUPLICATE_ACTOR",
            Self::UnknownActor(_) => "WORLD_UNKNOWN_ACTOR",
        }
    }
}

/// Occupancy index: which actor stands on which tile. One occupant per tile.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    occupancy: BTreeMap<Position, EntityId>,
}

impl TileMap {
    pub fn occupancy(&self) -> &BTreeMap<Position, EntityId> {
        &self.occupancy
    }

    pub fn occupant(&self, position: &Position) -> Option<EntityId> {
        self.occupancy.get(position).copied()
    }

    /// Returns false when the tile already holds a different entity.
    pub fn add_occupant(&mut self, position: Position, entity: EntityId) -> bool {
        match self.occupancy.get(&position) {
            Some(existing) => *existing == entity,
            None => {
                self.occupancy.insert(position, entity);
                true
            }
        }
    }

    pub fn remove_occupant(&mut self, position: &Position, entity: EntityId) -> bool {
        if self.occupancy.get(position) == Some(&entity) {
            self.occupancy.remove(position);
            true
        } else {
            false
        }
    }
}

/// The battlefield.
#[derive(Clone, Debug)]
pub struct World {
    dimensions: MapDimensions,
    terrain: Vec<TerrainKind>,
    tile_map: TileMap,
    actors: BTreeMap<EntityId, Actor>,
    seed: u64,
    nonce: u64,
}

impl World {
    /// Creates an all-floor map.
    pub fn new(dimensions: MapDimensions, seed: u64) -> Self {
        Self {
            dimensions,
            terrain: vec![TerrainKind::Floor; dimensions.area()],
            tile_map: TileMap::default(),
            actors: BTreeMap::new(),
            seed,
            nonce: 0,
        }
    }

    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> Result<(), WorldError> {
        let index = self
            .dimensions
            .index(position)
            .ok_or(WorldError::OutOfBounds(position))?;
        self.terrain[index] = terrain;
        Ok(())
    }

    /// Places a new actor on its own position.
    pub fn spawn(&mut self, actor: Actor) -> Result<(), WorldError> {
        let position = actor.position;
        if self.actors.contains_key(&actor.id) {
            return Err(WorldError::DuplicateActor(actor.id));
        }
        if !self.is_valid_position(position) {
            return Err(WorldError::OutOfBounds(position));
        }
        if !self.is_passable(position) {
            return Err(WorldError::Impassable(position));
        }
        if let Some(occupant) = self.tile_map.occupant(&position) {
            return Err(WorldError::Occupied { position, occupant });
        }

        self.tile_map.add_occupant(position, actor.id);
        self.actors.insert(actor.id, actor);
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn is_valid_position(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    /// Terrain at `position`, or `None` outside the map.
    pub fn terrain(&self, position: Position) -> Option<TerrainKind> {
        self.dimensions
            .index(position)
            .map(|index| self.terrain[index])
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.terrain(position).is_some_and(TerrainKind::is_passable)
    }

    pub fn tile_map(&self) -> &TileMap {
        &self.tile_map
    }

    pub fn occupant(&self, position: Position) -> Option<EntityId> {
        self.tile_map.occupant(&position)
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn actor_at(&self, position: Position) -> Option<&Actor> {
        self.occupant(position).and_then(|id| self.actors.get(&id))
    }

    /// All actors, dead or alive, in id order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Actors within Manhattan `radius` of `center` matching `filter`.
    pub fn actors_in_range<F>(&self, center: Position, radius: u32, filter: F) -> Vec<&Actor>
    where
        F: Fn(&Actor) -> bool,
    {
        self.actors
            .values()
            .filter(|actor| actor.position.manhattan_distance(center) <= radius)
            .filter(|actor| filter(actor))
            .collect()
    }

    /// Living actors hostile to `id`.
    pub fn hostiles_of(&self, id: EntityId) -> Vec<&Actor> {
        let Some(me) = self.actors.get(&id) else {
            return Vec::new();
        };
        self.actors
            .values()
            .filter(|other| other.is_alive() && other.is_hostile_to(me))
            .collect()
    }

    /// Living actors on the same team as `id`, excluding `id` itself.
    pub fn allies_of(&self, id: EntityId) -> Vec<&Actor> {
        let Some(me) = self.actors.get(&id) else {
            return Vec::new();
        };
        self.actors
            .values()
            .filter(|other| other.id != id && other.is_alive() && !other.is_hostile_to(me))
            .collect()
    }

    // ========================================================================
    // Occupancy
    // ========================================================================

    pub fn add_occupant(&mut self, position: Position, id: EntityId) -> bool {
        self.tile_map.add_occupant(position, id)
    }

    pub fn remove_occupant(&mut self, position: Position, id: EntityId) -> bool {
        self.tile_map.remove_occupant(&position, id)
    }

    // ========================================================================
    // Pathfinding
    // ========================================================================

    fn is_blocked(&self, position: Position, mover: Option<EntityId>) -> bool {
        match self.occupant(position) {
            Some(occupant) => Some(occupant) != mover,
            None => false,
        }
    }

    fn open_neighbors(
        &self,
        position: Position,
        mover: Option<EntityId>,
        goal: Option<Position>,
    ) -> ArrayVec<Position, 4> {
        position
            .neighbors()
            .into_iter()
            .filter(|next| self.is_passable(*next))
            .filter(|next| Some(*next) == goal || !self.is_blocked(*next, mover))
            .collect()
    }

    fn search(
        &self,
        start: Position,
        goal: Position,
        mover: Option<EntityId>,
        goal_may_be_occupied: bool,
    ) -> Option<Vec<Position>> {
        if start == goal {
            return Some(Vec::new());
        }
        if !self.is_passable(goal) {
            return None;
        }
        if !goal_may_be_occupied && self.is_blocked(goal, mover) {
            return None;
        }

        let exempt_goal = goal_may_be_occupied.then_some(goal);
        let (path, _cost) = astar(
            &start,
            |p| {
                self.open_neighbors(*p, mover, exempt_goal)
                    .into_iter()
                    .map(|n| (n, 1u32))
            },
            |p| p.manhattan_distance(goal),
            |p| *p == goal,
        )?;

        Some(path.into_iter().skip(1).collect())
    }

    /// Orthogonal step list from `start` to an enterable `end`, excluding
    /// `start`. The occupant of `start` is treated as the mover.
    pub fn find_path(&self, start: Position, end: Position) -> Option<Vec<Position>> {
        self.search(start, end, self.occupant(start), false)
    }

    /// Number of steps needed to stand next to or reach `goal` from `start`,
    /// where `goal` itself may be occupied (an enemy's tile).
    pub fn path_distance(&self, start: Position, goal: Position) -> Option<u32> {
        self.search(start, goal, self.occupant(start), true)
            .map(|path| path.len() as u32)
    }

    /// Like [`World::path_distance`] but for an explicit `mover`, which may
    /// not be standing on `start` yet (hypothetical destinations).
    pub fn path_distance_for(&self, mover: EntityId, start: Position, goal: Position) -> Option<u32> {
        self.search(start, goal, Some(mover), true)
            .map(|path| path.len() as u32)
    }

    /// Every tile `mover` can walk to from `origin` in at most `budget` steps,
    /// including `origin`, in row-major order.
    pub fn reachable_within(&self, mover: EntityId, origin: Position, budget: u32) -> Vec<Position> {
        let reach = dijkstra_all(&origin, |p| {
            self.open_neighbors(*p, Some(mover), None)
                .into_iter()
                .map(|n| (n, 1u32))
        });

        let mut cells: Vec<Position> = reach
            .into_iter()
            .filter(|(_, (_, cost))| *cost <= budget)
            .map(|(position, _)| position)
            .collect();
        cells.push(origin);
        cells.sort_by_key(|p| (p.y, p.x));
        cells.dedup();
        cells
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Walks `id` along `path`, spending one movement per step.
    ///
    /// # Panics
    ///
    /// Panics when the path is not a chain of enterable orthogonal steps
    /// starting next to the actor, or when the actor lacks the movement.
    /// Callers must only hand over paths produced by [`World::find_path`].
    pub fn move_actor(&mut self, id: EntityId, path: &[Position]) {
        let Some(actor) = self.actors.get(&id) else {
            panic!("move_actor: actor {id} does not exist");
        };
        let origin = actor.position;
        let Some(&destination) = path.last() else {
            return;
        };

        let mut previous = origin;
        for step in path {
            assert!(
                previous.manhattan_distance(*step) == 1,
                "move_actor: {id} cannot step from {previous} to {step}"
            );
            assert!(
                self.is_passable(*step) && !self.is_blocked(*step, Some(id)),
                "move_actor: {id} cannot enter {step}"
            );
            previous = *step;
        }

        let Some(actor) = self.actors.get_mut(&id) else {
            panic!("move_actor: actor {id} does not exist");
        };
        if let Err(err) = actor
            .resources
            .spend(crate::state::ResourceKind::Movement, path.len() as u32)
        {
            panic!("move_actor: {id} cannot afford {} steps: {err}", path.len());
        }
        actor.position = destination;

        self.tile_map.remove_occupant(&origin, id);
        self.tile_map.add_occupant(destination, id);

        tracing::trace!("{} walked {} -> {} ({} steps)", id, origin, destination, path.len());
    }

    /// Applies damage and returns the amount actually removed.
    pub fn apply_damage(&mut self, id: EntityId, amount: u32) -> Result<u32, WorldError> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(WorldError::UnknownActor(id))?;
        let dealt = actor.take_damage(amount);
        if actor.is_dead() {
            tracing::debug!("{} ({}) is down", actor.name, id);
        }
        Ok(dealt)
    }

    /// Rolls a d20 for `actor`; each call advances the roll nonce.
    pub fn roll_d20(&mut self, actor: EntityId, context: RollContext) -> u32 {
        self.nonce += 1;
        PcgRng.roll_d20(compute_seed(self.seed, self.nonce, actor.0, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ResourceKind, TeamId};

    fn world_with_actor(at: Position) -> World {
        let mut world = World::new(MapDimensions::new(10, 10), 7);
        world
            .spawn(Actor::new(EntityId(1), TeamId(0), at, 20))
            .unwrap();
        world
    }

    #[test]
    fn spawn_rejects_occupied_and_walls() {
        let mut world = world_with_actor(Position::new(2, 2));
        let err = world
            .spawn(Actor::new(EntityId(2), TeamId(1), Position::new(2, 2), 5))
            .unwrap_err();
        assert_eq!(err.error_code(), "WORLD_OCCUPIED");

        world.set_terrain(Position::new(3, 3), TerrainKind::Wall).unwrap();
        let err = world
            .spawn(Actor::new(EntityId(3), TeamId(1), Position::new(3, 3), 5))
            .unwrap_err();
        assert_eq!(err, WorldError::Impassable(Position::new(3, 3)));
    }

    #[test]
    fn path_goes_around_walls() {
        let mut world = world_with_actor(Position::new(0, 1));
        for y in 0..3 {
            world.set_terrain(Position::new(1, y), TerrainKind::Wall).unwrap();
        }
        let path = world
            .find_path(Position::new(0, 1), Position::new(2, 1))
            .expect("path exists");
        assert_eq!(path.last(), Some(&Position::new(2, 1)));
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn path_distance_allows_occupied_goal() {
        let mut world = world_with_actor(Position::new(0, 0));
        world
            .spawn(Actor::new(EntityId(2), TeamId(1), Position::new(3, 0), 5))
            .unwrap();
        assert!(world.find_path(Position::new(0, 0), Position::new(3, 0)).is_none());
        assert_eq!(world.path_distance(Position::new(0, 0), Position::new(3, 0)), Some(3));
    }

    #[test]
    fn path_distance_for_ignores_movers_own_tile() {
        // Corridor of height 1: going east from (0, 0) crosses the mover's tile.
        let mut world = World::new(MapDimensions::new(5, 1), 7);
        world
            .spawn(Actor::new(EntityId(1), TeamId(0), Position::new(1, 0), 20))
            .unwrap();
        world
            .spawn(Actor::new(EntityId(2), TeamId(1), Position::new(3, 0), 5))
            .unwrap();

        assert_eq!(world.path_distance(Position::new(0, 0), Position::new(3, 0)), None);
        assert_eq!(
            world.path_distance_for(EntityId(1), Position::new(0, 0), Position::new(3, 0)),
            Some(3)
        );
    }

    #[test]
    fn reachable_within_respects_budget() {
        let world = world_with_actor(Position::new(5, 5));
        let cells = world.reachable_within(EntityId(1), Position::new(5, 5), 1);
        assert_eq!(cells.len(), 5);
        assert!(cells.contains(&Position::new(5, 5)));
        assert!(cells.contains(&Position::new(5, 4)));
    }

    #[test]
    fn move_actor_updates_position_and_occupancy() {
        let mut world = world_with_actor(Position::new(0, 0));
        let path = world.find_path(Position::new(0, 0), Position::new(2, 0)).unwrap();
        world.move_actor(EntityId(1), &path);

        let actor = world.actor(EntityId(1)).unwrap();
        assert_eq!(actor.position, Position::new(2, 0));
        assert_eq!(actor.resources.remaining(ResourceKind::Movement), 4);
        assert_eq!(world.occupant(Position::new(2, 0)), Some(EntityId(1)));
        assert_eq!(world.occupant(Position::new(0, 0)), None);
    }

    #[test]
    #[should_panic(expected = "cannot step")]
    fn move_actor_panics_on_teleporting_path() {
        let mut world = world_with_actor(Position::new(0, 0));
        world.move_actor(EntityId(1), &[Position::new(4, 4)]);
    }
}
