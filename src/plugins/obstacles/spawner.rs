//! Obstacle spawning and cleanup.
//!
//! A deadline-driven spawner drops one archetype at a time ahead of the
//! runner; the interval between drops shrinks as the run goes on. Everything
//! random goes through the seeded RNG resource so headless runs replay
//! identically.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::runner::Runner;

use super::catalog::{Archetype, CATALOG};
use super::components::{Destroyed, Health, Obstacle};

/// Seeded RNG for archetype and lane rolls.
#[derive(Resource, Debug)]
pub struct SpawnRng(pub ChaCha8Rng);

impl SpawnRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for SpawnRng {
    fn default() -> Self {
        Self::seeded(0xC0FFEE)
    }
}

#[derive(Resource, Debug)]
pub struct SpawnSchedule {
    pub run_time: f32,
    pub next_at: f32,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            run_time: 0.0,
            next_at: 3.0,
        }
    }
}

pub fn reset_schedule(tunables: Res<Tunables>, mut sched: ResMut<SpawnSchedule>) {
    sched.run_time = 0.0;
    sched.next_at = tunables.max_spawn_interval;
}

pub fn spawn_obstacles(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut sched: ResMut<SpawnSchedule>,
    mut rng: ResMut<SpawnRng>,
    runner: Query<&Transform, With<Runner>>,
    mut commands: Commands,
) {
    let Ok(runner_tf) = runner.single() else {
        return;
    };

    sched.run_time += time.delta_secs();
    if sched.run_time < sched.next_at {
        return;
    }
    let interval = (tunables.max_spawn_interval - sched.run_time * tunables.spawn_interval_ramp)
        .max(tunables.min_spawn_interval);
    sched.next_at = sched.run_time + interval;

    let archetype = pick_weighted(&mut rng.0);
    let lane = archetype.lanes[rng.0.gen_range(0..archetype.lanes.len())];
    let layout = tunables.lane_layout();
    let position = Vec3::new(
        layout.lane_x(lane),
        archetype.size.y * 0.5,
        runner_tf.translation.z + tunables.spawn_ahead,
    );

    spawn_obstacle(&mut commands, archetype, position);
}

fn pick_weighted(rng: &mut ChaCha8Rng) -> &'static Archetype {
    let total: f32 = CATALOG.iter().map(|a| a.weight).sum();
    let mut roll = rng.gen_range(0.0..total);
    for archetype in CATALOG {
        if roll < archetype.weight {
            return archetype;
        }
        roll -= archetype.weight;
    }
    &CATALOG[CATALOG.len() - 1]
}

/// Spawn one obstacle from an archetype at an explicit position. Also the
/// entry point for tests and scripted layouts.
pub fn spawn_obstacle(commands: &mut Commands, archetype: &Archetype, position: Vec3) -> Entity {
    let mut entity = commands.spawn((
        Name::new(archetype.name),
        Obstacle {
            kind: archetype.kind,
            behavior: archetype.behavior,
            score_value: archetype.score_value,
            size: archetype.size,
        },
        Health::full(archetype.kind.max_health()),
        Transform::from_translation(position),
        RigidBody::Static,
        Collider::cuboid(archetype.size.x, archetype.size.y, archetype.size.z),
        CollisionLayers::new(Layer::Obstacle, [Layer::Runner, Layer::Ball]),
        DespawnOnExit(GameState::InGame),
    ));
    if let Some(chain) = archetype.chain {
        entity.insert(chain);
    }
    entity.id()
}

/// Drop obstacles that fell far enough behind the runner.
pub fn despawn_passed_obstacles(
    tunables: Res<Tunables>,
    runner: Query<&Transform, With<Runner>>,
    obstacles: Query<(Entity, &Transform), With<Obstacle>>,
    mut commands: Commands,
) {
    let Ok(runner_tf) = runner.single() else {
        return;
    };
    let cutoff = runner_tf.translation.z - tunables.despawn_behind;
    for (entity, tf) in &obstacles {
        if tf.translation.z < cutoff {
            commands.entity(entity).despawn();
        }
    }
}

/// Remove destroyed obstacles once the tick's messages are out.
pub fn despawn_destroyed_obstacles(
    obstacles: Query<Entity, (With<Obstacle>, With<Destroyed>)>,
    mut commands: Commands,
) {
    for entity in &obstacles {
        commands.entity(entity).despawn();
    }
}
