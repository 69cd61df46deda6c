//! Durability rules and the single destruction path.
//!
//! Every way an obstacle can die funnels through [`destroy_obstacle`] so the
//! bookkeeping (guard marker, destruction message, score award, chain
//! scheduling) happens exactly once per obstacle. Callers are responsible
//! for checking the `Destroyed` guard (query filter or a per-run set) before
//! calling in.

use bevy::prelude::*;

use crate::plugins::scoring::ScoreEvent;

use super::chain::{ChainPulse, ChainReactions};
use super::components::{ChainReaction, Destroyed, Obstacle, ObstacleKind};
use super::ObstacleDestroyed;

/// Damage an uncharged shot deals to the given durability class.
pub fn normal_shot_damage(kind: ObstacleKind) -> u32 {
    if kind.damaged_by_normal_shot() { 1 } else { 0 }
}

/// Damage applied to everything caught in a charged blast.
pub const CHARGED_SHOT_DAMAGE: u32 = 2;

/// Damage applied by one chain-reaction pulse.
pub const CHAIN_PULSE_DAMAGE: u32 = 1;

/// Commit a destruction: set the guard, report it, award score once, and
/// schedule the chain pulse if this obstacle carries one.
#[allow(clippy::too_many_arguments)]
pub fn destroy_obstacle(
    commands: &mut Commands,
    destroyed_w: &mut MessageWriter<'_, ObstacleDestroyed>,
    score_w: &mut MessageWriter<'_, ScoreEvent>,
    chain_queue: &mut ChainReactions,
    now: f32,
    entity: Entity,
    obstacle: &Obstacle,
    position: Vec3,
    chain: Option<&ChainReaction>,
) {
    commands.entity(entity).insert(Destroyed);

    destroyed_w.write(ObstacleDestroyed {
        entity,
        kind: obstacle.kind,
        position,
    });
    score_w.write(ScoreEvent {
        points: obstacle.score_value,
        combo_eligible: true,
    });

    if let Some(chain) = chain {
        chain_queue.schedule(ChainPulse {
            due_at: now + chain.delay,
            center: position,
            radius: chain.radius,
        });
    }
}
