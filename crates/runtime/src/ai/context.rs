//! Scoped relocation of an actor for hypothetical scoring.
//!
//! Scoring "what if I stood there" needs the world to look as if the actor
//! had already moved. [`Relocation`] moves the actor on construction and
//! puts it back when dropped, including during unwinding, so no exit path
//! can leave the world modified.

use std::ops::Deref;

use game_core::{EntityId, Position, World};

/// RAII guard holding an actor at a hypothetical position.
///
/// The guard derefs to a shared [`World`] only: code running inside the
/// scope reads the relocated world but cannot mutate it further.
pub struct Relocation<'w> {
    world: &'w mut World,
    actor: EntityId,
    origin: Position,
    destination: Position,
    vacated: bool,
    entered: bool,
}

impl<'w> Relocation<'w> {
    /// Moves only the actor's `position` field; the occupancy index keeps
    /// the actor on its true tile. Enough for metrics that measure distances
    /// from the actor.
    ///
    /// Returns `None` if the actor does not exist.
    pub fn position_only(world: &'w mut World, actor: EntityId, to: Position) -> Option<Self> {
        let moving = world.actor_mut(actor)?;
        let origin = moving.position;
        moving.position = to;

        Some(Self {
            world,
            actor,
            origin,
            destination: to,
            vacated: false,
            entered: false,
        })
    }

    /// Moves the actor's position and its occupancy entry, so area effects
    /// and tile lookups see it on `to`.
    ///
    /// Returns `None` if the actor does not exist or another actor holds `to`.
    pub fn with_occupancy(world: &'w mut World, actor: EntityId, to: Position) -> Option<Self> {
        let origin = world.actor(actor)?.position;
        if world.occupant(to).is_some_and(|occupant| occupant != actor) {
            return None;
        }

        let (vacated, entered) = if to == origin {
            (false, false)
        } else {
            let vacated = world.remove_occupant(origin, actor);
            let entered = world.occupant(to).is_none() && world.add_occupant(to, actor);
            (vacated, entered)
        };
        if let Some(moving) = world.actor_mut(actor) {
            moving.position = to;
        }

        Some(Self {
            world,
            actor,
            origin,
            destination: to,
            vacated,
            entered,
        })
    }

    pub fn actor_id(&self) -> EntityId {
        self.actor
    }

    /// Where the actor really stands.
    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn destination(&self) -> Position {
        self.destination
    }
}

impl Deref for Relocation<'_> {
    type Target = World;

    fn deref(&self) -> &World {
        self.world
    }
}

impl Drop for Relocation<'_> {
    fn drop(&mut self) {
        if self.entered {
            self.world.remove_occupant(self.destination, self.actor);
        }
        if self.vacated {
            self.world.add_occupant(self.origin, self.actor);
        }
        if let Some(actor) = self.world.actor_mut(self.actor) {
            actor.position = self.origin;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use game_core::{Actor, MapDimensions, TeamId};

    use super::*;

    fn world() -> World {
        let mut world = World::new(MapDimensions::new(8, 8), 0);
        world
            .spawn(Actor::new(EntityId(1), TeamId(0), Position::new(1, 1), 10))
            .unwrap();
        world
            .spawn(Actor::new(EntityId(2), TeamId(1), Position::new(4, 4), 10))
            .unwrap();
        world
    }

    fn snapshot(world: &World) -> (Position, Vec<(Position, EntityId)>) {
        let position = world.actor(EntityId(1)).unwrap().position;
        let occupancy = world
            .tile_map()
            .occupancy()
            .iter()
            .map(|(p, id)| (*p, *id))
            .collect();
        (position, occupancy)
    }

    #[test]
    fn position_only_leaves_occupancy_alone() {
        let mut world = world();
        let before = snapshot(&world);
        {
            let scope = Relocation::position_only(&mut world, EntityId(1), Position::new(3, 3)).unwrap();
            assert_eq!(scope.actor(EntityId(1)).unwrap().position, Position::new(3, 3));
            assert_eq!(scope.occupant(Position::new(1, 1)), Some(EntityId(1)));
            assert_eq!(scope.occupant(Position::new(3, 3)), None);
        }
        assert_eq!(snapshot(&world), before);
    }

    #[test]
    fn with_occupancy_moves_both_and_restores() {
        let mut world = world();
        let before = snapshot(&world);
        {
            let scope = Relocation::with_occupancy(&mut world, EntityId(1), Position::new(3, 3)).unwrap();
            assert_eq!(scope.occupant(Position::new(3, 3)), Some(EntityId(1)));
            assert_eq!(scope.occupant(Position::new(1, 1)), None);
            assert_eq!(scope.origin(), Position::new(1, 1));
        }
        assert_eq!(snapshot(&world), before);
    }

    #[test]
    fn refuses_tiles_held_by_others() {
        let mut world = world();
        let before = snapshot(&world);
        assert!(Relocation::with_occupancy(&mut world, EntityId(1), Position::new(4, 4)).is_none());
        assert!(Relocation::with_occupancy(&mut world, EntityId(9), Position::new(2, 2)).is_none());
        assert_eq!(snapshot(&world), before);
    }

    #[test]
    fn staying_put_is_a_no_op() {
        let mut world = world();
        let before = snapshot(&world);
        {
            let scope = Relocation::with_occupancy(&mut world, EntityId(1), Position::new(1, 1)).unwrap();
            assert_eq!(scope.occupant(Position::new(1, 1)), Some(EntityId(1)));
        }
        assert_eq!(snapshot(&world), before);
    }

    #[test]
    fn restores_while_unwinding() {
        let mut world = world();
        let before = snapshot(&world);

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _scope = Relocation::with_occupancy(&mut world, EntityId(1), Position::new(6, 6)).unwrap();
            panic!("metric blew up");
        }));

        assert!(result.is_err());
        assert_eq!(snapshot(&world), before);
    }
}
