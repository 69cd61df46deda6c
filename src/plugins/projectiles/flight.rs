//! Per-tick ball flight control.
//!
//! One system drives every live ball through the Seeking → Returning → Spent
//! state machine. While seeking, the heading is blended toward the best
//! candidate with a rate that rises as the ball closes in (far balls turn
//! lazily, near balls lock on hard, which is what keeps typical ball speeds
//! from overshooting). With no candidate the ball never just drifts: it
//! either eases back onto its launch line (if it recently had a target) or
//! steers toward the shooting lane's centreline, so its path stays
//! recoverable.
//!
//! Movement is velocity-driven: the flight controller only decides the
//! heading and writes `LinearVelocity`; the physics step integrates it.
//! Ground contact is deliberately a non-event for balls: their collision
//! filters don't include the ground layer, so a low shot overflies the road
//! and comes back like everything else.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::obstacles::{Destroyed, Obstacle};
use crate::plugins::runner::Runner;

use super::components::{Ball, BallPhase, Lifetime};
use super::targeting::select_candidates;

/// Rotate `current` toward `desired` by an angular fraction of `rate * dt`.
pub(crate) fn steer(current: Vec3, desired: Vec3, rate: f32, dt: f32) -> Vec3 {
    let from = current.normalize_or_zero();
    let to = desired.normalize_or_zero();
    if from == Vec3::ZERO {
        return to;
    }
    if to == Vec3::ZERO {
        return from;
    }
    let t = (rate * dt).clamp(0.0, 1.0);
    let arc = Quat::from_rotation_arc(from, to);
    (Quat::IDENTITY.slerp(arc, t) * from).normalize_or_zero()
}

/// Seek turn rate for the current distance to target: three bands, tighter
/// turns the closer the ball gets.
pub(crate) fn seek_rate(distance: f32, tunables: &Tunables) -> f32 {
    if distance <= tunables.seek_band_near {
        tunables.seek_rate_near
    } else if distance <= tunables.seek_band_far {
        tunables.seek_rate_mid
    } else {
        tunables.seek_rate_far
    }
}

pub fn drive_balls(
    time: Res<Time>,
    tunables: Res<Tunables>,
    runner: Query<&Transform, (With<Runner>, Without<Ball>)>,
    obstacles: Query<(Entity, &Transform, &Obstacle), (Without<Destroyed>, Without<Ball>)>,
    mut balls: Query<
        (
            &mut Ball,
            &mut BallPhase,
            &Transform,
            &mut LinearVelocity,
            &mut Lifetime,
        ),
        Without<Obstacle>,
    >,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let layout = tunables.lane_layout();
    let shooter = runner.single().ok().map(|tf| tf.translation);

    for (mut ball, mut phase, tf, mut velocity, mut lifetime) in &mut balls {
        // Safety net against runaway balls, independent of phase.
        lifetime.tick(time.delta());
        if lifetime.is_finished() && *phase != BallPhase::Spent {
            debug!("ball lifetime expired mid-flight");
            *phase = BallPhase::Spent;
            velocity.0 = Vec3::ZERO;
            continue;
        }

        let pos = tf.translation;
        match *phase {
            BallPhase::Seeking => {
                let candidates = select_candidates(
                    pos,
                    ball.launch_forward,
                    ball.shooting_lane,
                    &layout,
                    tunables.detection_radius,
                    tunables.max_aim_angle_deg,
                    obstacles.iter().map(|(e, t, o)| (e, t.translation, o.behavior)),
                );

                if let Some(primary) = candidates.first() {
                    ball.target = Some(primary.entity);
                    if let Ok((_, target_tf, _)) = obstacles.get(primary.entity) {
                        let target_pos = target_tf.translation;
                        let desired = (target_pos - pos).normalize_or_zero();
                        if desired != Vec3::ZERO {
                            let rate = seek_rate(target_pos.distance(pos), &tunables);
                            ball.heading = steer(ball.heading, desired, rate, dt);
                        }
                    }
                } else if ball.target.is_some() {
                    // Lost the target: ease back onto the launch line before
                    // giving up on it.
                    ball.heading =
                        steer(ball.heading, ball.launch_forward, tunables.recenter_rate, dt);
                    if ball.heading.angle_between(ball.launch_forward)
                        <= tunables.recenter_done_deg.to_radians()
                    {
                        ball.target = None;
                    }
                } else {
                    // Empty lane: hold a recoverable path along the centreline.
                    let aim = Vec3::new(
                        layout.lane_x(ball.shooting_lane),
                        pos.y,
                        pos.z + tunables.lane_lookahead,
                    );
                    let desired = (aim - pos).normalize_or_zero();
                    if desired != Vec3::ZERO {
                        ball.heading =
                            steer(ball.heading, desired, tunables.lane_correct_rate, dt);
                    }
                }

                velocity.0 = ball.heading * ball.speed;
                ball.travelled += ball.speed * dt;
                if ball.travelled >= ball.max_distance {
                    *phase = BallPhase::Returning;
                    ball.target = None;
                }
            }
            BallPhase::Returning => {
                // A vanished runner keeps its last known anchor; the ball
                // still comes home instead of flying off.
                if let Some(shooter_pos) = shooter {
                    ball.return_anchor = shooter_pos;
                }
                let home = ball.return_anchor + Vec3::Y * tunables.return_height;
                let to_home = home - pos;
                if pos.distance(ball.return_anchor) <= tunables.arrival_radius {
                    // Caught by the runner: silent despawn, no damage.
                    *phase = BallPhase::Spent;
                    velocity.0 = Vec3::ZERO;
                } else {
                    let dir = to_home.normalize_or_zero();
                    ball.heading = dir;
                    velocity.0 = dir * ball.return_speed;
                }
            }
            BallPhase::Spent => {
                velocity.0 = Vec3::ZERO;
            }
        }
    }
}
