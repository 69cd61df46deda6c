//! Runner plugin: the auto-running shooter.
//!
//! Pipeline:
//! - Update: sample input, emit discrete `RunnerAction`s and `ShotRequest`s
//! - FixedUpdate: apply actions + drive the kinematic-feeling dynamic body
//!   (auto-run forward, lerp toward the target lane, gravity does the rest)
//!
//! The runner is the external "input collaborator" as far as the shooting
//! core is concerned: everything it feeds the projectile subsystem goes
//! through messages, so headless tests can drive the same systems by writing
//! messages directly.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::lanes::Lane;
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::obstacles::{Destroyed, Obstacle};
use crate::plugins::projectiles::ShotRequest;
use crate::plugins::scoring::ComboReset;
use crate::plugins::{ResolveSet, SimSet};

pub const RUNNER_CAPSULE_RADIUS: f32 = 0.4;
pub const RUNNER_CAPSULE_LENGTH: f32 = 1.0;
pub const RUNNER_SLIDE_LENGTH: f32 = 0.2;
/// Capsule center height when standing on the ground.
pub const RUNNER_REST_Y: f32 = RUNNER_CAPSULE_LENGTH / 2.0 + RUNNER_CAPSULE_RADIUS;

#[derive(Component, Debug)]
pub struct Runner {
    pub lane: Lane,
    pub jumps_left: u8,
    pub sliding: bool,
    pub slide_timer: Timer,
}

/// Discrete control events. Input devices produce these; tests write them
/// directly.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerAction {
    SwitchLeft,
    SwitchRight,
    Jump,
    Slide,
}

/// Forward speed ramp for the current run.
#[derive(Resource, Debug, Default)]
pub struct GameSpeed {
    pub current: f32,
    pub run_time: f32,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<GameSpeed>();
    app.add_message::<RunnerAction>();

    app.add_systems(OnEnter(GameState::InGame), (spawn_runner, reset_speed));

    app.add_systems(
        Update,
        gather_input.run_if(in_state(GameState::InGame)),
    );
    app.add_systems(
        Update,
        restart_input.run_if(in_state(GameState::GameOver)),
    );

    app.add_systems(
        FixedUpdate,
        (ramp_speed, apply_actions, update_slide, move_runner)
            .chain()
            .in_set(SimSet::Move)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        end_run_on_contact
            .in_set(ResolveSet::Collisions)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_runner(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("Runner"),
        Runner {
            lane: Lane::CENTER,
            jumps_left: tunables.max_jumps,
            sliding: false,
            slide_timer: Timer::from_seconds(tunables.slide_duration, TimerMode::Once),
        },
        Transform::from_xyz(0.0, RUNNER_REST_Y, 0.0),
        RigidBody::Dynamic,
        Collider::capsule(RUNNER_CAPSULE_RADIUS, RUNNER_CAPSULE_LENGTH),
        LockedAxes::ROTATION_LOCKED,
        CollisionLayers::new(Layer::Runner, [Layer::Ground, Layer::Obstacle]),
        LinearVelocity::ZERO,
        Friction::ZERO,
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

fn reset_speed(tunables: Res<Tunables>, mut speed: ResMut<GameSpeed>) {
    speed.current = tunables.base_run_speed;
    speed.run_time = 0.0;
}

/// Sample the keyboard into discrete actions and shot requests.
///
/// `Option<Res<ButtonInput>>` keeps this a no-op in headless apps without an
/// input plugin.
pub fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    runner: Query<(&Transform, &Runner)>,
    tunables: Res<Tunables>,
    mut actions_w: MessageWriter<RunnerAction>,
    mut shots_w: MessageWriter<ShotRequest>,
) {
    let Some(keys) = keys else {
        return;
    };

    if keys.just_pressed(KeyCode::ArrowLeft) || keys.just_pressed(KeyCode::KeyA) {
        actions_w.write(RunnerAction::SwitchLeft);
    }
    if keys.just_pressed(KeyCode::ArrowRight) || keys.just_pressed(KeyCode::KeyD) {
        actions_w.write(RunnerAction::SwitchRight);
    }
    if keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::ArrowUp) {
        actions_w.write(RunnerAction::Jump);
    }
    if keys.just_pressed(KeyCode::ArrowDown) || keys.just_pressed(KeyCode::KeyS) {
        actions_w.write(RunnerAction::Slide);
    }

    let quick = keys.just_pressed(KeyCode::KeyJ);
    let charged = keys.just_pressed(KeyCode::KeyK);
    if quick || charged {
        let Ok((tf, runner)) = runner.single() else {
            return;
        };
        shots_w.write(ShotRequest {
            charged,
            lane: runner.lane,
            origin: tf.translation + tunables.muzzle_offset,
            forward: Vec3::Z,
        });
    }
}

fn restart_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::Enter) {
        next.set(GameState::InGame);
    }
}

fn ramp_speed(time: Res<Time>, tunables: Res<Tunables>, mut speed: ResMut<GameSpeed>) {
    speed.run_time += time.delta_secs();
    speed.current =
        (tunables.base_run_speed + speed.run_time * tunables.run_speed_ramp).min(tunables.max_run_speed);
}

pub fn apply_actions(
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut actions: MessageReader<RunnerAction>,
    mut runner: Query<(Entity, &Transform, &mut Runner, &mut LinearVelocity)>,
    mut combo_w: MessageWriter<ComboReset>,
) {
    let Ok((entity, tf, mut runner, mut velocity)) = runner.single_mut() else {
        return;
    };
    let grounded = tf.translation.y <= RUNNER_REST_Y + 0.05;

    for action in actions.read() {
        match action {
            RunnerAction::SwitchLeft => {
                runner.lane = runner.lane.shifted(-1);
            }
            RunnerAction::SwitchRight => {
                runner.lane = runner.lane.shifted(1);
            }
            RunnerAction::Jump => {
                if runner.sliding || runner.jumps_left == 0 {
                    continue;
                }
                runner.jumps_left -= 1;
                // Reset vertical velocity so air jumps feel consistent.
                velocity.0.y = if grounded {
                    tunables.jump_speed
                } else {
                    tunables.double_jump_speed
                };
                combo_w.write(ComboReset);
            }
            RunnerAction::Slide => {
                if !grounded || runner.sliding {
                    continue;
                }
                runner.sliding = true;
                runner.slide_timer.reset();
                commands
                    .entity(entity)
                    .insert(Collider::capsule(RUNNER_CAPSULE_RADIUS, RUNNER_SLIDE_LENGTH));
                combo_w.write(ComboReset);
            }
        }
    }
}

fn update_slide(
    time: Res<Time>,
    mut commands: Commands,
    mut runner: Query<(Entity, &mut Runner)>,
) {
    let Ok((entity, mut runner)) = runner.single_mut() else {
        return;
    };
    if !runner.sliding {
        return;
    }
    runner.slide_timer.tick(time.delta());
    if runner.slide_timer.is_finished() {
        runner.sliding = false;
        commands
            .entity(entity)
            .insert(Collider::capsule(RUNNER_CAPSULE_RADIUS, RUNNER_CAPSULE_LENGTH));
    }
}

/// Auto-run forward and steer toward the target lane. Vertical velocity is
/// left to gravity.
fn move_runner(
    tunables: Res<Tunables>,
    speed: Res<GameSpeed>,
    mut runner: Query<(&Transform, &mut Runner, &mut LinearVelocity)>,
) {
    let Ok((tf, mut runner, mut velocity)) = runner.single_mut() else {
        return;
    };

    let layout = tunables.lane_layout();
    let target_x = layout.lane_x(runner.lane);

    velocity.0.z = speed.current;
    velocity.0.x = (target_x - tf.translation.x) * tunables.lane_change_speed;

    // Landing refills the jump budget.
    let grounded = tf.translation.y <= RUNNER_REST_Y + 0.05;
    if grounded && velocity.0.y <= 0.0 {
        runner.jumps_left = tunables.max_jumps;
        velocity.0.y = velocity.0.y.max(0.0);
    }
}

/// Any contact with a live obstacle ends the run.
fn end_run_on_contact(
    mut started: MessageReader<CollisionStart>,
    runner: Query<(), With<Runner>>,
    obstacles: Query<(), (With<Obstacle>, Without<Destroyed>)>,
    mut next: ResMut<NextState<GameState>>,
) {
    for ev in started.read() {
        let pair = [(ev.collider1, ev.collider2), (ev.collider2, ev.collider1)];
        for (a, b) in pair {
            if runner.contains(a) && obstacles.contains(b) {
                info!("runner hit an obstacle, run over");
                next.set(GameState::GameOver);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests;
