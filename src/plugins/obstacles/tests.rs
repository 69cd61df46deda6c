use std::time::Duration;

use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;

use super::catalog::{self, CATALOG};
use super::chain::{ChainPulse, ChainReactions};
use super::components::{CollisionBehavior, Dodging, Health, ObstacleKind};
use super::damage::normal_shot_damage;
use super::spawner::spawn_obstacle;

#[test]
fn durability_table_matches_the_kinds() {
    assert_eq!(ObstacleKind::Weak.max_health(), 1);
    assert_eq!(ObstacleKind::Strong.max_health(), 2);
    assert_eq!(ObstacleKind::Reinforced.max_health(), 3);

    // Only weak obstacles care about uncharged shots.
    assert_eq!(normal_shot_damage(ObstacleKind::Weak), 1);
    assert_eq!(normal_shot_damage(ObstacleKind::Strong), 0);
    assert_eq!(normal_shot_damage(ObstacleKind::Reinforced), 0);
}

#[test]
fn health_saturates_at_zero() {
    let mut health = Health::full(2);
    assert!(!health.take(1));
    assert_eq!(health.current, 1);
    assert!(health.take(5));
    assert_eq!(health.current, 0);
    // Already depleted: stays depleted, still reports zero.
    assert!(health.take(1));
    assert_eq!(health.current, 0);
}

#[test]
fn area_damage_eligibility_excludes_the_feedback_only_behaviors() {
    assert!(CollisionBehavior::Destroyable.takes_area_damage());
    assert!(CollisionBehavior::Bouncy.takes_area_damage());
    assert!(!CollisionBehavior::Indestructible.takes_area_damage());
    assert!(!CollisionBehavior::Avoidable.takes_area_damage());
}

#[test]
fn catalog_entries_are_sane() {
    assert!(!CATALOG.is_empty());
    for archetype in CATALOG {
        assert!(archetype.weight > 0.0, "{}: weight", archetype.name);
        assert!(
            archetype.size.cmpgt(Vec3::ZERO).all(),
            "{}: size",
            archetype.name
        );
        assert!(!archetype.lanes.is_empty(), "{}: lanes", archetype.name);
        if let Some(chain) = archetype.chain {
            assert!(chain.radius > 0.0 && chain.delay > 0.0);
        }
    }

    let cart = catalog::by_name("VendorCart").unwrap();
    assert!(cart.chain.is_some());

    let car = catalog::by_name("ParkedCar").unwrap();
    assert_eq!(car.behavior, CollisionBehavior::Indestructible);
    assert_eq!(car.score_value, 0);

    assert!(catalog::by_name("GiantSquid").is_none());
}

#[test]
fn spawn_obstacle_builds_the_full_component_set() {
    let mut world = World::new();
    let archetype = catalog::by_name("VendorCart").unwrap();

    let mut queue = CommandQueue::default();
    let entity = {
        let mut commands = Commands::new(&mut queue, &world);
        spawn_obstacle(&mut commands, archetype, Vec3::new(0.0, 0.6, 12.0))
    };
    queue.apply(&mut world);

    let obstacle = world.get::<super::Obstacle>(entity).unwrap();
    assert_eq!(obstacle.kind, ObstacleKind::Weak);
    assert_eq!(obstacle.score_value, 20);

    let health = world.get::<Health>(entity).unwrap();
    assert_eq!(health.current, 1);

    assert!(world.get::<super::ChainReaction>(entity).is_some());
    assert_eq!(
        world.get::<Transform>(entity).unwrap().translation,
        Vec3::new(0.0, 0.6, 12.0)
    );
}

#[test]
fn chain_queue_only_surrenders_due_pulses() {
    let mut queue = ChainReactions::default();
    queue.schedule(ChainPulse {
        due_at: 0.1,
        center: Vec3::ZERO,
        radius: 3.0,
    });
    queue.schedule(ChainPulse {
        due_at: 0.5,
        center: Vec3::ZERO,
        radius: 3.0,
    });

    assert!(!queue.is_empty());
    let due = queue.take_due(0.2);
    assert_eq!(due.len(), 1);
    assert!(!queue.is_empty());
}

#[test]
fn dodge_sweeps_out_and_snaps_back_home() {
    let mut world = World::new();
    world.init_resource::<Time>();

    let dodger = world
        .spawn((
            Transform::from_xyz(2.0, 0.5, 10.0),
            Dodging::sidestep(2.0, 1.0),
        ))
        .id();

    // Mid-dodge: displaced to the side.
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.3));
    run_system_once(&mut world, super::dodge_sidestep);
    let mid_x = world.get::<Transform>(dodger).unwrap().translation.x;
    assert!(mid_x > 2.5, "should be displaced, got {mid_x}");

    // After the timer: back home, component gone.
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.5));
    run_system_once(&mut world, super::dodge_sidestep);
    assert_eq!(world.get::<Transform>(dodger).unwrap().translation.x, 2.0);
    assert!(world.get::<Dodging>(dodger).is_none());
}
