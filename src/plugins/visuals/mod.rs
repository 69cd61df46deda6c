//! Visuals plugin (render-only): dress gameplay entities in meshes.
//!
//! Gameplay spawns bare entities; this plugin watches for them and attaches
//! meshes/materials after the fact. The simulation never depends on any of
//! this existing; headless apps simply don't register it.

use bevy::prelude::*;

use crate::plugins::obstacles::{CollisionBehavior, Obstacle, ObstacleKind};
use crate::plugins::projectiles::Ball;
use crate::plugins::runner::{Runner, RUNNER_CAPSULE_LENGTH, RUNNER_CAPSULE_RADIUS};

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (dress_runner, dress_obstacles, dress_balls));
}

fn obstacle_color(obstacle: &Obstacle) -> Color {
    match obstacle.behavior {
        CollisionBehavior::Indestructible => Color::srgb(0.2, 0.3, 0.8),
        CollisionBehavior::Avoidable => Color::srgb(1.0, 0.5, 0.0),
        CollisionBehavior::Bouncy => Color::srgb(0.6, 0.6, 0.6),
        CollisionBehavior::Destroyable => match obstacle.kind {
            ObstacleKind::Weak => Color::srgb(0.2, 0.8, 0.2),
            ObstacleKind::Strong => Color::srgb(0.9, 0.2, 0.2),
            ObstacleKind::Reinforced => Color::srgb(0.5, 0.0, 1.0),
        },
    }
}

fn dress_runner(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<Entity, (Added<Runner>, Without<Mesh3d>)>,
) {
    for entity in &q {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Capsule3d::new(RUNNER_CAPSULE_RADIUS, RUNNER_CAPSULE_LENGTH))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.2, 0.75, 0.9),
                ..default()
            })),
        ));
    }
}

fn dress_obstacles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &Obstacle), (Added<Obstacle>, Without<Mesh3d>)>,
) {
    for (entity, obstacle) in &q {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(
                obstacle.size.x,
                obstacle.size.y,
                obstacle.size.z,
            ))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: obstacle_color(obstacle),
                ..default()
            })),
        ));
    }
}

fn dress_balls(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &Ball), (Added<Ball>, Without<Mesh3d>)>,
) {
    for (entity, ball) in &q {
        let color = if ball.charged {
            Color::srgb(1.0, 0.2, 0.2)
        } else {
            Color::srgb(0.2, 0.9, 1.0)
        };
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(0.25))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: LinearRgba::from(color) * 0.5,
                ..default()
            })),
        ));
    }
}
