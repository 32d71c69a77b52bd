//! Tracked hand controllers.

use bevy::prelude::*;

use crate::engine::core::frame_loop::{FrameLoopAppExt, FrameSet, SetupSet};

/// Controller model loading and attachment.
pub mod controller_models;

/// Controller devices, per-frame pose polling and button events.
///
/// Devices exist only when the platform exposes a controller input API.
pub mod controllers;

pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<controllers::ControllerButtonEvent>()
            .add_systems(
                Startup,
                (
                    controllers::spawn_controllers,
                    controller_models::load_controller_model,
                )
                    .chain()
                    .in_set(SetupSet::Devices),
            )
            .add_systems(Update, controller_models::attach_controller_models)
            .add_frame_systems(
                FrameSet::Controllers,
                (
                    controllers::update_controllers,
                    controllers::log_controller_buttons,
                )
                    .chain(),
            );
    }
}
