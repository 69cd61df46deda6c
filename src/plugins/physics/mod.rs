use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let gravity = app.world().resource::<Tunables>().gravity;
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::NEG_Y * gravity));
}
