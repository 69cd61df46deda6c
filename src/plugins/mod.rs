//! Feature plugins.

use avian3d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod core;
pub mod obstacles;
pub mod physics;
pub mod projectiles;
pub mod runner;
pub mod scoring;
pub mod ui;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod visuals;

/// Fixed-tick simulation order: spawner → runner movement → ball flight →
/// chain pulses / obstacle reactions.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Spawn,
    Move,
    Flight,
    Chain,
}

/// Contact-resolution order after the physics step: collision outcomes first,
/// then the score/combo fallout.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveSet {
    Collisions,
    Outcomes,
}

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (SimSet::Spawn, SimSet::Move, SimSet::Flight, SimSet::Chain).chain(),
    );
    app.configure_sets(
        FixedPostUpdate,
        (
            ResolveSet::Collisions.after(CollisionEventSystems),
            ResolveSet::Outcomes,
        )
            .chain(),
    );

    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    runner::plugin(app);
    obstacles::plugin(app);
    scoring::plugin(app);
    ui::debug_hud::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    visuals::plugin(app);
    lighting::plugin(app);
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
