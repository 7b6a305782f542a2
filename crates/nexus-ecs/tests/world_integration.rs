//! Integration tests for the world facade: spawn/attach/update/despawn
//! flows and system-membership churn.

use nexus_ecs::{
    EcsError, Entity, Limits, Signature, System, SystemResult, World,
};
use std::collections::BTreeSet;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Frozen;

struct MoveSystem;

impl System for MoveSystem {
    fn name(&self) -> &str {
        "move"
    }

    fn run(
        &mut self,
        world: &mut World,
        entities: &BTreeSet<Entity>,
        dt: Duration,
    ) -> SystemResult {
        let dt = dt.as_secs_f32();
        for entity in entities {
            let velocity = *world.component::<Velocity>(*entity)?;
            let position = world.component_mut::<Position>(*entity)?;
            position.x += velocity.x * dt;
            position.y += velocity.y * dt;
        }
        Ok(())
    }
}

/// Despawns every member it sees; used to exercise mutation during update.
struct ReaperSystem;

impl System for ReaperSystem {
    fn name(&self) -> &str {
        "reaper"
    }

    fn run(
        &mut self,
        world: &mut World,
        entities: &BTreeSet<Entity>,
        _dt: Duration,
    ) -> SystemResult {
        for entity in entities {
            world.despawn(*entity)?;
        }
        Ok(())
    }
}

fn demo_world() -> World {
    let mut world = World::new(Limits::with_max_entities(64));
    world.register_component::<Position>().unwrap();
    world.register_component::<Velocity>().unwrap();
    world.register_component::<Frozen>().unwrap();
    world
}

#[test]
fn full_lifecycle_flow() {
    let mut world = demo_world();
    world
        .register_system_for::<(Position, Velocity)>(MoveSystem)
        .unwrap();

    let mut movers = Vec::new();
    for i in 0..10 {
        let entity = world.spawn().unwrap();
        world
            .add_component(entity, Position { x: 0.0, y: i as f32 })
            .unwrap();
        world
            .add_component(entity, Velocity { x: 1.0, y: 0.0 })
            .unwrap();
        movers.push(entity);
    }

    for _ in 0..4 {
        world.update(Duration::from_millis(500)).unwrap();
    }

    for (i, entity) in movers.iter().enumerate() {
        let position = world.component::<Position>(*entity).unwrap();
        assert!((position.x - 2.0).abs() < 1e-5);
        assert!((position.y - i as f32).abs() < 1e-5);
    }

    for entity in movers {
        world.despawn(entity).unwrap();
    }
    assert_eq!(world.entity_count(), 0);
}

#[test]
fn membership_churn_tracks_component_changes() {
    let mut world = demo_world();
    let movers = world
        .register_system_for::<(Position, Velocity)>(MoveSystem)
        .unwrap();

    let entity = world.spawn().unwrap();
    world
        .add_component(entity, Position { x: 0.0, y: 0.0 })
        .unwrap();
    assert!(!world.system_entities(movers).unwrap().contains(&entity));

    world
        .add_component(entity, Velocity { x: 2.0, y: 0.0 })
        .unwrap();
    assert!(world.system_entities(movers).unwrap().contains(&entity));

    // removing an uninvolved component keeps membership
    world.add_component(entity, Frozen).unwrap();
    world.remove_component::<Frozen>(entity).unwrap();
    assert!(world.system_entities(movers).unwrap().contains(&entity));

    // removing a required component evicts
    world.remove_component::<Velocity>(entity).unwrap();
    assert!(!world.system_entities(movers).unwrap().contains(&entity));
}

#[test]
fn system_mutating_entities_mid_frame() {
    let mut world = demo_world();

    // the reaper runs first and kills everything with Frozen; the move
    // system runs second and must not see the despawned entities
    world.register_system_for::<(Frozen,)>(ReaperSystem).unwrap();
    let movers = world
        .register_system_for::<(Position, Velocity)>(MoveSystem)
        .unwrap();

    let doomed = world.spawn().unwrap();
    world
        .add_component(doomed, Position { x: 0.0, y: 0.0 })
        .unwrap();
    world
        .add_component(doomed, Velocity { x: 1.0, y: 1.0 })
        .unwrap();
    world.add_component(doomed, Frozen).unwrap();

    let survivor = world.spawn().unwrap();
    world
        .add_component(survivor, Position { x: 0.0, y: 0.0 })
        .unwrap();
    world
        .add_component(survivor, Velocity { x: 1.0, y: 0.0 })
        .unwrap();

    world.update(Duration::from_secs(1)).unwrap();

    assert!(!world.is_alive(doomed));
    assert!(world.is_alive(survivor));
    assert_eq!(
        world.component::<Position>(survivor).unwrap(),
        &Position { x: 1.0, y: 0.0 }
    );
    assert_eq!(world.system_entities(movers).unwrap().len(), 1);
}

#[test]
fn id_recycling_does_not_leak_components() {
    let mut world = demo_world();

    let first = world.spawn().unwrap();
    world
        .add_component(first, Position { x: 9.0, y: 9.0 })
        .unwrap();
    world.despawn(first).unwrap();

    // cycle through the remaining ids until the recycled one returns
    let mut reborn = world.spawn().unwrap();
    while reborn != first {
        reborn = world.spawn().unwrap();
    }

    assert_eq!(world.signature(reborn).unwrap(), Signature::EMPTY);
    assert!(world.try_component::<Position>(reborn).is_none());
}

#[test]
fn entity_limit_reported() {
    let mut world = World::new(Limits::with_max_entities(2));
    world.spawn().unwrap();
    world.spawn().unwrap();

    assert!(matches!(world.spawn(), Err(EcsError::EntityLimit(2))));
}
