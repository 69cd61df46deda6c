//! Integration test harness.
//!
//! Keep integration tests headless and deterministic:
//! - `MinimalPlugins` provides the core ECS runtime; `StatesPlugin`,
//!   `AssetPlugin` and `ScenePlugin` cover what the gameplay plugins expect.
//! - `TimeUpdateStrategy::ManualDuration` pins the clock: every
//!   `app.update()` advances virtual time by exactly one tick, and the fixed
//!   timestep matches, so one update is one simulation tick.
//! - a capture system accumulates the simulation's outbound messages into a
//!   resource the tests can assert on after any number of ticks.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;

use urban_runner::common::lanes::Lane;
use urban_runner::plugins::obstacles::catalog;
use urban_runner::plugins::obstacles::spawner::spawn_obstacle;
use urban_runner::plugins::obstacles::ObstacleDestroyed;
use urban_runner::plugins::projectiles::{
    Ball, BallBounced, BallLaunched, ShotRefused, ShotRequest,
};

pub const TICK: f64 = 1.0 / 60.0;

/// Everything interesting the simulation said, accumulated per run.
#[derive(Resource, Default, Debug)]
pub struct Captured {
    pub launched: u32,
    pub refused: u32,
    pub destroyed: u32,
    pub bounces: u32,
    /// Worst simultaneous live-ball count seen on any tick.
    pub max_live_balls: usize,
}

fn capture(
    mut captured: ResMut<Captured>,
    mut launched: MessageReader<BallLaunched>,
    mut refused: MessageReader<ShotRefused>,
    mut destroyed: MessageReader<ObstacleDestroyed>,
    mut bounced: MessageReader<BallBounced>,
    balls: Query<(), With<Ball>>,
) {
    captured.launched += launched.read().count() as u32;
    captured.refused += refused.read().count() as u32;
    captured.destroyed += destroyed.read().count() as u32;
    captured.bounces += bounced.read().count() as u32;
    captured.max_live_balls = captured.max_live_balls.max(balls.iter().count());
}

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        TICK,
    )));
    app.insert_resource(Time::<Fixed>::from_seconds(TICK));

    urban_runner::game::configure_headless(&mut app);

    app.init_resource::<Captured>();
    app.add_systems(Last, capture);

    app
}

pub fn step(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Place an obstacle from the catalog at an explicit position.
pub fn place(app: &mut App, archetype_name: &str, position: Vec3) -> Entity {
    let archetype = catalog::by_name(archetype_name).expect("unknown archetype");

    let mut queue = bevy::ecs::world::CommandQueue::default();
    let entity = {
        let mut commands = Commands::new(&mut queue, app.world());
        spawn_obstacle(&mut commands, archetype, position)
    };
    queue.apply(app.world_mut());
    entity
}

/// Ask for a shot the way the input collaborator would.
pub fn shoot(app: &mut App, charged: bool, lane: Lane, origin: Vec3) {
    app.world_mut().write_message(ShotRequest {
        charged,
        lane,
        origin,
        forward: Vec3::Z,
    });
}
