mod common;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;

use combat_runtime::{AiConfig, Archetype, EvaluationStrategy, TurnEndReason, take_turn};
use game_content::ScenarioLoader;
use game_core::{Actor, Encounter, EntityId, Position, TeamId, World};

use common::{FOE, HERO, Misfire, arena, fighter};

fn skirmish() -> Encounter {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../game/content/data/skirmish.ron");
    ScenarioLoader::load(&path).unwrap().build().unwrap()
}

fn assert_consistent(world: &World) {
    for actor in world.actors() {
        assert_eq!(world.occupant(actor.position), Some(actor.id), "{} is not on its tile", actor.id);
    }
    assert_eq!(world.tile_map().occupancy().len(), world.actors().count());
}

#[test]
fn skirmish_plays_out_with_consistent_world() {
    for strategy in [EvaluationStrategy::Sequential, EvaluationStrategy::Parallel] {
        let mut encounter = skirmish();
        let config = AiConfig::default().with_strategy(strategy);

        for _ in 0..60 {
            if encounter.is_over() {
                break;
            }
            let before = encounter.active_actor();
            let summary = take_turn(&mut encounter, &config);

            assert_eq!(summary.actor, before);
            assert!(summary.decisions.len() <= config.max_actions_per_turn as usize);
            assert_consistent(encounter.world());
            if !encounter.is_over() {
                assert_ne!(encounter.active_actor(), before);
            }
        }
    }
}

#[test]
fn same_scenario_same_story() {
    let config = AiConfig::for_archetype(Archetype::Berserker);
    let mut first = skirmish();
    let mut second = skirmish();

    for _ in 0..12 {
        let a = take_turn(&mut first, &config);
        let b = take_turn(&mut second, &config);
        assert_eq!(a.actor, b.actor);
        assert_eq!(a.end_reason, b.end_reason);
        assert_eq!(a.decisions.len(), b.decisions.len());
        for (a, b) in a.decisions.iter().zip(&b.decisions) {
            assert_eq!(a.action, b.action);
            assert_eq!(a.target, b.target);
            assert_eq!(a.outcome, b.outcome);
        }
    }
}

#[test]
fn dead_actor_slot_is_skipped() {
    let mut world = arena(8, 8);
    world.spawn(fighter(HERO, 0, 1, 1, 10)).unwrap();
    world.spawn(fighter(FOE, 1, 6, 6, 10)).unwrap();
    world.spawn(fighter(EntityId(3), 1, 6, 1, 10)).unwrap();
    let mut encounter = Encounter::in_id_order(world);
    encounter.world_mut().apply_damage(HERO, 10).unwrap();

    let summary = take_turn(&mut encounter, &AiConfig::default());

    assert_eq!(summary.actor, None);
    assert_eq!(summary.end_reason, TurnEndReason::NoActiveActor);
    assert_eq!(encounter.active_actor(), Some(FOE));
}

#[test]
fn turn_ends_even_when_an_action_panics() {
    let mut world = arena(8, 8);
    let hero = Actor::new(HERO, TeamId(0), Position::new(1, 1), 10).with_action(Arc::new(Misfire));
    world.spawn(hero).unwrap();
    world.spawn(fighter(FOE, 1, 2, 2, 10)).unwrap();
    let mut encounter = Encounter::in_id_order(world);

    let result = catch_unwind(AssertUnwindSafe(|| take_turn(&mut encounter, &AiConfig::default())));

    assert!(result.is_err());
    assert_eq!(encounter.active_actor(), Some(FOE));
}
