//! Ball-contact resolution.
//!
//! Reads `CollisionStart` messages and applies the damage rules. Dedupe is a
//! per-run set keyed on the ball entity: a ball geometrically overlapping two
//! obstacles in the same tick still resolves exactly one contact (the first
//! message wins), and a ball that went `Spent` stops resolving anything.
//!
//! Outcomes per behavior, uncharged shots:
//! - Destroyable: damage if the durability class allows it, otherwise a
//!   ricochet. The ball is consumed only on a confirmed kill (see
//!   `Tunables::consume_on_hit` for the always-consume variant).
//! - Indestructible: ricochet feedback, never damage, never score.
//! - Bouncy: heading reflects off the contact instead of the ball being
//!   consumed, unless the hit would be lethal anyway.
//! - Avoidable: the obstacle side-steps; the ball flies on untouched.
//!
//! Charged shots blast everything damage-eligible inside the explosion
//! radius for 2 and always consume the ball.

use avian3d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::obstacles::chain::ChainReactions;
use crate::plugins::obstacles::damage::{self, CHARGED_SHOT_DAMAGE};
use crate::plugins::obstacles::{
    ChainReaction, CollisionBehavior, Destroyed, Dodging, Health, Obstacle, ObstacleDamaged,
    ObstacleDestroyed,
};
use crate::plugins::scoring::ScoreEvent;

use super::components::{Ball, BallPhase};
use super::messages::{BallBounced, BallImpact};

/// Mirror a heading off a surface normal.
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[allow(clippy::too_many_arguments)]
pub fn resolve_ball_contacts(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut balls: Query<(&mut Ball, &mut BallPhase, &Transform), Without<Obstacle>>,
    mut obstacles: Query<
        (
            Entity,
            &Transform,
            &Obstacle,
            &mut Health,
            Option<&ChainReaction>,
        ),
        (Without<Destroyed>, Without<Ball>),
    >,
    mut chain_queue: ResMut<ChainReactions>,
    mut impact_w: MessageWriter<BallImpact>,
    mut bounce_w: MessageWriter<BallBounced>,
    mut damaged_w: MessageWriter<ObstacleDamaged>,
    mut destroyed_w: MessageWriter<ObstacleDestroyed>,
    mut score_w: MessageWriter<ScoreEvent>,
    mut resolved: Local<HashSet<Entity>>,
) {
    resolved.clear();
    let now = time.elapsed_secs();

    for ev in started.read() {
        let b1 = balls.contains(ev.collider1);
        let b2 = balls.contains(ev.collider2);
        if !(b1 ^ b2) {
            continue; // must be exactly one ball
        }
        let (ball_e, other) = if b1 {
            (ev.collider1, ev.collider2)
        } else {
            (ev.collider2, ev.collider1)
        };

        // One resolution per ball per tick.
        if !resolved.insert(ball_e) {
            continue;
        }

        let Ok((mut ball, mut phase, ball_tf)) = balls.get_mut(ball_e) else {
            continue;
        };
        if *phase == BallPhase::Spent {
            continue;
        }
        // Contacts with anything that isn't an obstacle (or is already
        // destroyed) are non-events for the ball.
        if !obstacles.contains(other) {
            continue;
        }

        let contact = ball_tf.translation;

        if ball.charged && ball.explosion_radius > 0.0 {
            // Area blast around the contact point. The obstacle that was hit
            // is inside its own radius, so one pass covers it too.
            let r2 = ball.explosion_radius * ball.explosion_radius;
            let caught: Vec<Entity> = obstacles
                .iter()
                .filter(|(_, tf, obstacle, ..)| {
                    obstacle.behavior.takes_area_damage()
                        && tf.translation.distance_squared(contact) <= r2
                })
                .map(|(entity, ..)| entity)
                .collect();

            for entity in caught {
                let Ok((entity, tf, obstacle, mut health, chain)) = obstacles.get_mut(entity)
                else {
                    continue;
                };
                if health.take(CHARGED_SHOT_DAMAGE) {
                    damage::destroy_obstacle(
                        &mut commands,
                        &mut destroyed_w,
                        &mut score_w,
                        &mut chain_queue,
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

            impact_w.write(BallImpact {
                position: contact,
                charged: true,
            });
            // Charged shots are always consumed, kills or not.
            *phase = BallPhase::Spent;
            continue;
        }

        let Ok((obstacle_e, obstacle_tf, obstacle, mut health, chain)) = obstacles.get_mut(other)
        else {
            continue;
        };
        let obstacle_pos = obstacle_tf.translation;

        match obstacle.behavior {
            CollisionBehavior::Avoidable => {
                // Dodge away from the incoming ball rather than take the hit.
                let away = (obstacle_pos.x - contact.x).signum();
                commands
                    .entity(obstacle_e)
                    .insert_if_new(Dodging::sidestep(obstacle_pos.x, away));
            }
            CollisionBehavior::Indestructible => {
                bounce_w.write(BallBounced { position: contact });
            }
            CollisionBehavior::Bouncy => {
                let dmg = damage::normal_shot_damage(obstacle.kind);
                if dmg > 0 && dmg >= health.current {
                    health.take(dmg);
                    damage::destroy_obstacle(
                        &mut commands,
                        &mut destroyed_w,
                        &mut score_w,
                        &mut chain_queue,
                        now,
                        obstacle_e,
                        obstacle,
                        obstacle_pos,
                        chain,
                    );
                    impact_w.write(BallImpact {
                        position: contact,
                        charged: false,
                    });
                    *phase = BallPhase::Spent;
                } else {
                    if dmg > 0 {
                        health.take(dmg);
                        damaged_w.write(ObstacleDamaged {
                            entity: obstacle_e,
                            remaining: health.current,
                        });
                    }
                    // Sub-lethal: bounce off instead of being consumed. The
                    // contact normal is approximated as the horizontal
                    // obstacle-to-ball direction.
                    let normal = (Vec3::new(contact.x, 0.0, contact.z)
                        - Vec3::new(obstacle_pos.x, 0.0, obstacle_pos.z))
                    .normalize_or_zero();
                    if normal != Vec3::ZERO {
                        ball.heading = reflect(ball.heading, normal).normalize_or_zero();
                    }
                    bounce_w.write(BallBounced { position: contact });
                }
            }
            CollisionBehavior::Destroyable => {
                let dmg = damage::normal_shot_damage(obstacle.kind);
                if dmg == 0 {
                    // Too tough for an uncharged shot: ricochet, no damage.
                    bounce_w.write(BallBounced { position: contact });
                } else if health.take(dmg) {
                    damage::destroy_obstacle(
                        &mut commands,
                        &mut destroyed_w,
                        &mut score_w,
                        &mut chain_queue,
                        now,
                        obstacle_e,
                        obstacle,
                        obstacle_pos,
                        chain,
                    );
                    impact_w.write(BallImpact {
                        position: contact,
                        charged: false,
                    });
                    *phase = BallPhase::Spent;
                } else {
                    damaged_w.write(ObstacleDamaged {
                        entity: obstacle_e,
                        remaining: health.current,
                    });
                    impact_w.write(BallImpact {
                        position: contact,
                        charged: false,
                    });
                    if tunables.consume_on_hit {
                        *phase = BallPhase::Spent;
                    }
                }
            }
        }
    }
}
