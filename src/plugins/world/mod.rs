//! World plugin: spawns the road.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

/// Road half-width covers the three lanes plus shoulders.
const ROAD_WIDTH: f32 = 12.0;
const ROAD_LENGTH: f32 = 10_000.0;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_road);
}

fn spawn_road(mut commands: Commands) {
    // One long static slab; the run ends long before it does. Balls don't
    // collide with it at all (layer filters), so a low shot overflies the
    // road instead of dying on it.
    commands.spawn((
        Name::new("Road"),
        Transform::from_xyz(0.0, -0.5, ROAD_LENGTH * 0.4),
        RigidBody::Static,
        Collider::cuboid(ROAD_WIDTH, 1.0, ROAD_LENGTH),
        CollisionLayers::new(Layer::Ground, [Layer::Runner]),
        Friction::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}
