//! Obstacles: typed durability model + spawning + chain reactions.
//!
//! The spawner owns obstacle lifetime; everything else holds entity ids and
//! re-resolves them against the live query each tick. Destruction is a
//! two-step affair: damage resolution inserts the `Destroyed` guard (and
//! reports score exactly once), a `PostUpdate` sweep despawns the entity.
//! Splitting those keeps structural changes out of the fixed step and makes
//! "destroyed this tick, invisible to targeting next tick" hold by
//! construction.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::SimSet;

pub mod catalog;
pub mod chain;
pub mod components;
pub mod damage;
pub mod spawner;

pub use components::{
    ChainReaction, CollisionBehavior, Destroyed, Dodging, Health, Obstacle, ObstacleKind,
};

/// An obstacle was destroyed and scored. The `kind` doubles as the effect
/// hint for presentation listeners.
#[derive(Message, Clone, Copy, Debug)]
pub struct ObstacleDestroyed {
    pub entity: Entity,
    pub kind: ObstacleKind,
    pub position: Vec3,
}

/// Sub-lethal hit feedback (damage flash).
#[derive(Message, Clone, Copy, Debug)]
pub struct ObstacleDamaged {
    pub entity: Entity,
    pub remaining: u32,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<chain::ChainReactions>()
        .init_resource::<spawner::SpawnRng>()
        .init_resource::<spawner::SpawnSchedule>();

    app.add_message::<ObstacleDestroyed>()
        .add_message::<ObstacleDamaged>();

    app.add_systems(OnEnter(GameState::InGame), spawner::reset_schedule);

    app.add_systems(
        FixedUpdate,
        (
            spawner::spawn_obstacles.in_set(SimSet::Spawn),
            (chain::trigger_chain_pulses, dodge_sidestep).in_set(SimSet::Chain),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        (
            spawner::despawn_destroyed_obstacles,
            spawner::despawn_passed_obstacles.run_if(in_state(GameState::InGame)),
        ),
    );
}

/// Play out an avoidable obstacle's side-step and snap it back home.
pub fn dodge_sidestep(
    time: Res<Time>,
    mut commands: Commands,
    mut dodgers: Query<(Entity, &mut Transform, &mut Dodging)>,
) {
    for (entity, mut tf, mut dodging) in &mut dodgers {
        dodging.timer.tick(time.delta());
        if dodging.timer.is_finished() {
            tf.translation.x = dodging.origin_x;
            commands.entity(entity).remove::<Dodging>();
            continue;
        }
        // Triangular out-and-back sweep.
        let t = dodging.timer.fraction();
        let sweep = 1.0 - (2.0 * t - 1.0).abs();
        tf.translation.x = dodging.origin_x + dodging.direction * dodging.distance * sweep;
    }
}

#[cfg(test)]
mod tests;
