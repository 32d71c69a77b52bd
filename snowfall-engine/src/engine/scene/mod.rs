//! Static scene dressing: lights and debug helpers.

use bevy::prelude::*;

use crate::engine::core::frame_loop::SetupSet;

/// Line-mesh helpers shown only with the debug flag.
pub mod debug_helpers;

/// Key directional light with shadows plus ambient fill.
pub mod lighting;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, lighting::spawn_lighting.in_set(SetupSet::Scene));
    }
}
