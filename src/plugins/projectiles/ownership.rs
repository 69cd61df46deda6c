//! The single live-ball slot.
//!
//! The most important invariant of the whole shooting loop: never more than
//! one live ball for the runner. The launcher is the slot's only writer, and
//! it checks-and-claims in one pass, so within a tick the decision is atomic.
//! Every despawn path must release the slot; release is idempotent so the
//! abnormal paths (lifetime expiry, state exit) can call it blindly.

use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct BallSlot {
    live: Option<Entity>,
    ready_at: f32,
}

impl BallSlot {
    pub fn can_shoot(&self, now: f32) -> bool {
        self.live.is_none() && now >= self.ready_at
    }

    pub fn on_launch(&mut self, ball: Entity, cooldown: f32, now: f32) {
        self.live = Some(ball);
        self.ready_at = now + cooldown;
    }

    /// Idempotent: releasing an unknown or already-released ball is a no-op.
    pub fn on_destroyed(&mut self, ball: Entity) {
        if self.live == Some(ball) {
            self.live = None;
        }
    }

    pub fn live(&self) -> Option<Entity> {
        self.live
    }

    /// Unconditional release, for state teardown.
    pub fn clear(&mut self) {
        self.live = None;
    }
}
