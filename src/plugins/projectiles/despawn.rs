//! Spent-ball commit.
//!
//! This system owns the terminal invariants: a `Spent` ball is despawned and
//! its ownership slot is released, unconditionally, on every path: hit,
//! arrival, lifetime expiry. Centralizing the release here is what makes the
//! "slot is always freed" guarantee hold.

use bevy::prelude::*;

use super::components::{Ball, BallPhase};
use super::ownership::BallSlot;

pub fn despawn_spent_balls(
    mut commands: Commands,
    mut slot: ResMut<BallSlot>,
    balls: Query<(Entity, &BallPhase), With<Ball>>,
) {
    for (entity, phase) in &balls {
        if *phase != BallPhase::Spent {
            continue;
        }
        slot.on_destroyed(entity);
        commands.entity(entity).despawn();
    }
}

/// State teardown also frees the slot; the ball entities themselves are
/// cleaned up by `DespawnOnExit`.
pub fn release_slot_on_exit(mut slot: ResMut<BallSlot>) {
    slot.clear();
}
