use crate::state::{Actor, Conditions, EntityId, World, WorldError};

/// A fight in progress: the world plus initiative bookkeeping.
#[derive(Clone, Debug)]
pub struct Encounter {
    world: World,
    order: Vec<EntityId>,
    cursor: usize,
    round: u32,
}

impl Encounter {
    /// Starts an encounter with an explicit initiative order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownActor`] if `order` names an actor the
    /// world does not contain.
    pub fn new(world: World, order: Vec<EntityId>) -> Result<Self, WorldError> {
        if let Some(missing) = order.iter().find(|id| world.actor(**id).is_none()) {
            return Err(WorldError::UnknownActor(*missing));
        }

        Ok(Self::start(world, order))
    }

    /// Starts an encounter where actors act in id order.
    pub fn in_id_order(world: World) -> Self {
        let order = world.actors().map(|actor| actor.id).collect();
        Self::start(world, order)
    }

    fn start(world: World, order: Vec<EntityId>) -> Self {
        let mut encounter = Self {
            world,
            order,
            cursor: 0,
            round: 1,
        };
        if !encounter.is_living(0) {
            encounter.advance();
        }
        encounter
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    pub fn order(&self) -> &[EntityId] {
        &self.order
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// The actor whose turn it is, if it is still standing.
    pub fn active_actor(&self) -> Option<EntityId> {
        self.order
            .get(self.cursor)
            .copied()
            .filter(|id| self.world.actor(*id).is_some_and(Actor::is_alive))
    }

    /// Living actors hostile to `id`.
    pub fn hostile_actors(&self, id: EntityId) -> Vec<&Actor> {
        self.world.hostiles_of(id)
    }

    /// Living actors on `id`'s team, excluding `id`.
    pub fn allies(&self, id: EntityId) -> Vec<&Actor> {
        self.world.allies_of(id)
    }

    /// True once at most one team still has living actors.
    pub fn is_over(&self) -> bool {
        let mut teams = self
            .world
            .actors()
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.team);
        match teams.next() {
            None => true,
            Some(first) => teams.all(|team| team == first),
        }
    }

    /// Hands the turn to the next living actor in initiative order.
    ///
    /// The incoming actor's per-turn resources are refreshed and its dodge
    /// stance ends. Wrapping past the end of the order starts a new round.
    pub fn end_turn(&mut self) {
        let previous = self.order.get(self.cursor).copied();
        self.advance();

        let Some(next) = self.order.get(self.cursor).copied() else {
            return;
        };
        if let Some(actor) = self.world.actor_mut(next) {
            actor.resources.refresh_turn();
            actor.conditions.remove(Conditions::DODGING);
        }

        tracing::debug!(
            "turn passed from {:?} to {} (round {})",
            previous,
            next,
            self.round
        );
    }

    fn is_living(&self, index: usize) -> bool {
        self.order
            .get(index)
            .and_then(|id| self.world.actor(*id))
            .is_some_and(Actor::is_alive)
    }

    /// Moves the cursor to the next living actor; stays put when none is left.
    fn advance(&mut self) {
        let len = self.order.len();
        for step in 1..=len {
            let index = (self.cursor + step) % len;
            if self.is_living(index) {
                if self.cursor + step >= len {
                    self.round += 1;
                }
                self.cursor = index;
                return;
            }
        }
    }
}
