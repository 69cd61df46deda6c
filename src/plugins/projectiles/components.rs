use bevy::prelude::*;

use crate::common::lanes::Lane;

/// Flight phase. `Spent` is terminal; the despawn commit turns it into an
/// actual despawn and releases the ownership slot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    Seeking,
    Returning,
    Spent,
}

/// The boomerang ball. Heading is a unit vector steered every fixed tick;
/// `shooting_lane` and `launch_forward` are fixed at launch and never change,
/// even if the runner switches lanes mid-flight.
#[derive(Component, Debug, Clone)]
pub struct Ball {
    pub charged: bool,
    /// Zero for normal shots.
    pub explosion_radius: f32,
    pub speed: f32,
    pub return_speed: f32,
    pub max_distance: f32,
    pub travelled: f32,
    pub heading: Vec3,
    pub launch_forward: Vec3,
    pub shooting_lane: Lane,
    /// Lookup handle only: re-resolved against the live obstacle query
    /// every tick, never dereferenced across ticks.
    pub target: Option<Entity>,
    /// Last known runner position, so a vanished runner doesn't strand the
    /// ball mid-return.
    pub return_anchor: Vec3,
}

#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);
