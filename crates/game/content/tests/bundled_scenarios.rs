use std::path::Path;

use game_content::ScenarioLoader;
use game_core::{EntityId, TeamId};

#[test]
fn skirmish_builds() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/skirmish.ron");
    let spec = ScenarioLoader::load(&path).expect("skirmish parses");
    let encounter = spec.build().expect("skirmish builds");

    assert_eq!(encounter.order().len(), spec.actors.len());
    assert_eq!(encounter.active_actor(), Some(EntityId(10)));
    assert!(!encounter.is_over());

    let world = encounter.world();
    for actor in world.actors() {
        assert!(!actor.actions.is_empty(), "{} has no actions", actor.name);
        assert_eq!(world.occupant(actor.position), Some(actor.id));
    }
    assert_eq!(world.actors().filter(|actor| actor.team == TeamId(0)).count(), 3);
    assert_eq!(world.actors().filter(|actor| actor.team == TeamId(1)).count(), 3);
}
