//! Projectiles plugin: auto-aimed boomerang balls.
//!
//! # Philosophy: invariants first
//! Correctness checks sit at boundaries (the launcher validates a request
//! once, the despawn commit owns the terminal invariants) so the per-tick
//! hot paths (steering, contact resolution) stay straight-line.
//!
//! The load-bearing invariants:
//! - at most one live ball per runner, enforced by `BallSlot` **before** a
//!   ball entity exists, and released on every despawn path;
//! - a ball's shooting lane and launch forward are immutable after launch;
//! - one contact resolution per ball per tick;
//! - an obstacle is destroyed (and scored) at most once, guarded by the
//!   `Destroyed` marker.
//!
//! # Data flow (big picture)
//! ```text
//!  Update (variable dt)
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │ (A) Producer: runner input emits ShotRequest messages                 │
//! │ (B) Consumer: launch_requested_balls                                  │
//! │     - checks + claims BallSlot (atomic within the tick)               │
//! │     - initial aim via select_candidates                               │
//! │     - spawns the kinematic sensor ball, emits BallLaunched/ShotRefused│
//! └───────────────────────────────────────────────────────────────────────┘
//!               │
//!               v
//!  FixedUpdate (fixed dt)
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │ (C) drive_balls: re-select target, steer heading (adaptive bands),    │
//! │     advance travel budget, Seeking → Returning → Spent                │
//! └───────────────────────────────────────────────────────────────────────┘
//!               │
//!               v
//!  FixedPostUpdate
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │ (D) Physics emits CollisionStart messages (Avian)                     │
//! │ (E) resolve_ball_contacts: damage table, AoE, bounce/dodge, chain     │
//! │     scheduling; dedupe per ball per tick                              │
//! │ (F) scoring consumes ScoreEvent (ResolveSet::Outcomes)                │
//! └───────────────────────────────────────────────────────────────────────┘
//!               │
//!               v
//!  PostUpdate
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │ (G) despawn_spent_balls: release BallSlot + despawn                   │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::{ResolveSet, SimSet};

pub mod components;
pub mod messages;

pub mod collision;
pub mod despawn;
pub mod flight;
pub mod launch;
pub mod ownership;
pub mod targeting;

pub use components::{Ball, BallPhase, Lifetime};
pub use messages::{BallBounced, BallImpact, BallLaunched, ShotRefused, ShotRequest};
pub use ownership::BallSlot;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BallSlot>();

        app.add_message::<ShotRequest>()
            .add_message::<ShotRefused>()
            .add_message::<BallLaunched>()
            .add_message::<BallImpact>()
            .add_message::<BallBounced>();

        app.add_systems(
            Update,
            launch::launch_requested_balls
                .after(crate::plugins::runner::gather_input)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            flight::drive_balls
                .in_set(SimSet::Flight)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            collision::resolve_ball_contacts
                .in_set(ResolveSet::Collisions)
                .run_if(in_state(GameState::InGame)),
        );

        // Cleanup runs in every state: a spent ball must always free its slot.
        app.add_systems(PostUpdate, despawn::despawn_spent_balls);
        app.add_systems(OnExit(GameState::InGame), despawn::release_slot_on_exit);
    }
}
