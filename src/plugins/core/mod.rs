//! Core plugin: shared resources and global settings.

use crate::common::tunables::Tunables;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    // Configuration is rejected at startup, never silently clamped.
    let tunables = Tunables::default()
        .validated()
        .expect("default tunables must validate");
    app.insert_resource(tunables);
    app.insert_resource(ClearColor(Color::srgb(0.35, 0.55, 0.75)));
}

#[cfg(test)]
mod tests;
