//! Camera plugin (render-only): chase camera behind the runner.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::runner::Runner;

const CHASE_OFFSET: Vec3 = Vec3::new(0.0, 4.5, -7.0);
const LOOK_AHEAD: Vec3 = Vec3::new(0.0, 1.0, 4.0);

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_runner
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera { responsiveness: 5.0 },
        Transform::from_translation(CHASE_OFFSET).looking_at(LOOK_AHEAD, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_runner(
    time: Res<Time>,
    // Disjointness proof: Runner entities are not MainCamera entities.
    q_runner: Query<&Transform, (With<Runner>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Runner>>,
) {
    let Ok(tf_runner) = q_runner.single() else {
        return;
    };
    let Ok((mut tf_cam, cam)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-cam.responsiveness * dt).exp();

    let goal = tf_runner.translation + CHASE_OFFSET;
    tf_cam.translation = tf_cam.translation.lerp(goal, alpha);

    let target = tf_runner.translation + LOOK_AHEAD;
    tf_cam.look_at(target, Vec3::Y);
}
