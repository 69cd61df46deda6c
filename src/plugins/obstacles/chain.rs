//! Delayed chain-reaction pulses.
//!
//! Destroying certain obstacles schedules a damage pulse a beat later. The
//! pulses live in a plain deadline queue advanced by the fixed tick; a pulse
//! that destroys another chain-flagged obstacle schedules the next pulse, so
//! cascades propagate one delay at a time. Each obstacle can only be
//! destroyed once (the guard marker plus a per-run set), which bounds the
//! recursion.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::plugins::scoring::ScoreEvent;

use super::components::{ChainReaction, CollisionBehavior, Destroyed, Health, Obstacle};
use super::damage::{self, CHAIN_PULSE_DAMAGE};
use super::{ObstacleDamaged, ObstacleDestroyed};

#[derive(Debug, Clone, Copy)]
pub struct ChainPulse {
    pub due_at: f32,
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Resource, Debug, Default)]
pub struct ChainReactions {
    pending: Vec<ChainPulse>,
}

impl ChainReactions {
    pub fn schedule(&mut self, pulse: ChainPulse) {
        self.pending.push(pulse);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn take_due(&mut self, now: f32) -> Vec<ChainPulse> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_at <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due
    }
}

/// Fire every pulse whose deadline has passed.
pub fn trigger_chain_pulses(
    time: Res<Time>,
    mut commands: Commands,
    mut queue: ResMut<ChainReactions>,
    mut obstacles: Query<
        (
            Entity,
            &Transform,
            &Obstacle,
            &mut Health,
            Option<&ChainReaction>,
        ),
        Without<Destroyed>,
    >,
    mut destroyed_w: MessageWriter<ObstacleDestroyed>,
    mut damaged_w: MessageWriter<ObstacleDamaged>,
    mut score_w: MessageWriter<ScoreEvent>,
) {
    if queue.is_empty() {
        return;
    }
    let now = time.elapsed_secs();
    let due = queue.take_due(now);
    if due.is_empty() {
        return;
    }

    // Guard markers inserted below are deferred, so track same-run
    // destructions explicitly: a second pulse must not hit them again.
    let mut gone: HashSet<Entity> = HashSet::default();

    for pulse in due {
        let r2 = pulse.radius * pulse.radius;
        let caught: Vec<Entity> = obstacles
            .iter()
            .filter(|(entity, tf, obstacle, ..)| {
                !gone.contains(entity)
                    && obstacle.behavior == CollisionBehavior::Destroyable
                    && tf.translation.distance_squared(pulse.center) <= r2
            })
            .map(|(entity, ..)| entity)
            .collect();

        for entity in caught {
            let Ok((entity, tf, obstacle, mut health, chain)) = obstacles.get_mut(entity) else {
                continue;
            };
            if health.take(CHAIN_PULSE_DAMAGE) {
                gone.insert(entity);
                damage::destroy_obstacle(
                    &mut commands,
                    &mut destroyed_w,
                    &mut score_w,
                    &mut queue,
                    now,
                    entity,
                    obstacle,
                    tf.translation,
                    chain,
                );
            } else {
                damaged_w.write(ObstacleDamaged {
                    entity,
                    remaining: health.current,
                });
            }
        }
    }
}
