use avian3d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::lanes::Lane;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::scoring::ComboReset;

use super::{apply_actions, Runner, RunnerAction, RUNNER_REST_Y};

fn test_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<Messages<RunnerAction>>();
    world.init_resource::<Messages<ComboReset>>();
    world
}

fn spawn_test_runner(world: &mut World, y: f32) -> Entity {
    let tunables = world.resource::<Tunables>().clone();
    world
        .spawn((
            Runner {
                lane: Lane::CENTER,
                jumps_left: tunables.max_jumps,
                sliding: false,
                slide_timer: Timer::from_seconds(tunables.slide_duration, TimerMode::Once),
            },
            Transform::from_xyz(0.0, y, 0.0),
            LinearVelocity::ZERO,
        ))
        .id()
}

#[test]
fn lane_switching_clamps_at_the_outer_lanes() {
    let mut world = test_world();
    let runner = spawn_test_runner(&mut world, RUNNER_REST_Y);

    world.write_message(RunnerAction::SwitchLeft);
    world.write_message(RunnerAction::SwitchLeft);
    run_system_once(&mut world, apply_actions);

    assert_eq!(world.get::<Runner>(runner).unwrap().lane, Lane::LEFT);

    world.write_message(RunnerAction::SwitchRight);
    run_system_once(&mut world, apply_actions);
    assert_eq!(world.get::<Runner>(runner).unwrap().lane, Lane::CENTER);
}

#[test]
fn jump_budget_covers_ground_and_air_jumps_only() {
    let mut world = test_world();
    let runner = spawn_test_runner(&mut world, RUNNER_REST_Y);
    let tunables = world.resource::<Tunables>().clone();

    // Ground jump.
    world.write_message(RunnerAction::Jump);
    run_system_once(&mut world, apply_actions);
    assert_eq!(
        world.get::<LinearVelocity>(runner).unwrap().0.y,
        tunables.jump_speed
    );
    assert_eq!(world.get::<Runner>(runner).unwrap().jumps_left, 1);

    // Airborne double jump uses the weaker force.
    world.get_mut::<Transform>(runner).unwrap().translation.y = 2.0;
    world.write_message(RunnerAction::Jump);
    run_system_once(&mut world, apply_actions);
    assert_eq!(
        world.get::<LinearVelocity>(runner).unwrap().0.y,
        tunables.double_jump_speed
    );
    assert_eq!(world.get::<Runner>(runner).unwrap().jumps_left, 0);

    // Out of jumps: velocity untouched.
    world.get_mut::<LinearVelocity>(runner).unwrap().0.y = -3.0;
    world.write_message(RunnerAction::Jump);
    run_system_once(&mut world, apply_actions);
    assert_eq!(world.get::<LinearVelocity>(runner).unwrap().0.y, -3.0);
}

#[test]
fn sliding_starts_grounded_and_resets_combo() {
    let mut world = test_world();
    let runner = spawn_test_runner(&mut world, RUNNER_REST_Y);

    world.write_message(RunnerAction::Slide);
    run_system_once(&mut world, apply_actions);
    assert!(world.get::<Runner>(runner).unwrap().sliding);

    let resets: Vec<ComboReset> = world
        .resource_mut::<Messages<ComboReset>>()
        .drain()
        .collect();
    assert_eq!(resets.len(), 1);
}

#[test]
fn sliding_is_refused_in_the_air() {
    let mut world = test_world();
    let runner = spawn_test_runner(&mut world, 3.0);

    world.write_message(RunnerAction::Slide);
    run_system_once(&mut world, apply_actions);
    assert!(!world.get::<Runner>(runner).unwrap().sliding);
}
