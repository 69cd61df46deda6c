//! Shot consumer: turn requests into live balls.
//!
//! Single consumer of `ShotRequest` and the only writer of `BallSlot`, so
//! check-and-claim is one uninterrupted decision. A refusal is an outcome,
//! not an error: the request is dropped with a `ShotRefused` note and the
//! game carries on.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::obstacles::{Destroyed, Obstacle};

use super::components::{Ball, BallPhase, Lifetime};
use super::messages::{BallLaunched, ShotRefused, ShotRequest};
use super::ownership::BallSlot;
use super::targeting::select_candidates;

pub fn launch_requested_balls(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut requests: MessageReader<ShotRequest>,
    obstacles: Query<(Entity, &Transform, &Obstacle), Without<Destroyed>>,
    mut slot: ResMut<BallSlot>,
    mut launched_w: MessageWriter<BallLaunched>,
    mut refused_w: MessageWriter<ShotRefused>,
) {
    let now = time.elapsed_secs();
    let layout = tunables.lane_layout();

    for req in requests.read() {
        if !slot.can_shoot(now) {
            debug!("shot refused: ball already live or cooling down");
            refused_w.write(ShotRefused {
                charged: req.charged,
            });
            continue;
        }

        let forward = req.forward.normalize_or_zero();
        let forward = if forward == Vec3::ZERO { Vec3::Z } else { forward };

        // Initial aim: nearest candidate ahead in the shooting lane, else
        // straight out along the runner's forward.
        let candidates = select_candidates(
            req.origin,
            forward,
            req.lane,
            &layout,
            tunables.detection_radius,
            tunables.max_aim_angle_deg,
            obstacles.iter().map(|(e, t, o)| (e, t.translation, o.behavior)),
        );
        let heading = candidates
            .first()
            .and_then(|c| obstacles.get(c.entity).ok())
            .map(|(_, tf, _)| (tf.translation - req.origin).normalize_or_zero())
            .filter(|h| *h != Vec3::ZERO)
            .unwrap_or(forward);

        let (max_distance, explosion_radius, cooldown) = if req.charged {
            (
                tunables.charged_max_distance,
                tunables.explosion_radius,
                tunables.charged_cooldown,
            )
        } else {
            (tunables.normal_max_distance, 0.0, tunables.normal_cooldown)
        };

        let ball = commands
            .spawn((
                Name::new(if req.charged { "Ball(Charged)" } else { "Ball" }),
                Ball {
                    charged: req.charged,
                    explosion_radius,
                    speed: tunables.ball_speed,
                    return_speed: tunables.ball_return_speed,
                    max_distance,
                    travelled: 0.0,
                    heading,
                    launch_forward: forward,
                    shooting_lane: req.lane,
                    target: None,
                    return_anchor: req.origin,
                },
                BallPhase::Seeking,
                Lifetime(Timer::from_seconds(tunables.ball_lifetime, TimerMode::Once)),
                Transform::from_translation(req.origin),
                RigidBody::Kinematic,
                Collider::sphere(tunables.ball_radius),
                CollisionLayers::new(Layer::Ball, [Layer::Obstacle]),
                Sensor,
                CollisionEventsEnabled,
                LinearVelocity(heading * tunables.ball_speed),
                DespawnOnExit(GameState::InGame),
            ))
            .id();

        slot.on_launch(ball, cooldown, now);
        launched_w.write(BallLaunched {
            ball,
            charged: req.charged,
        });
    }
}
