//! VR display collaborators.
//!
//! The headset runtime sits behind the `VrPlatform`, `VrDisplay` and
//! `ControllerInput` traits. Without one, the desktop "magic window"
//! platform stands in.

use bevy::prelude::*;

use crate::engine::core::frame_loop::{FrameLoopAppExt, FrameSet, SetupSet};
use crate::engine::render::stereo::spawn_camera_rig;

/// Display, platform and controller traits plus the runtime resources holding them.
pub mod display;

/// Head pose tracking for the camera rig.
pub mod head_tracking;

/// Headless and magic-window platforms.
pub mod platform;

/// Standing reference frame and play area.
pub mod stage;

pub struct VrPlugin;

impl Plugin for VrPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<stage::StandingMatrix>()
            .add_systems(
                Startup,
                stage::apply_stage_parameters
                    .in_set(SetupSet::Scene)
                    .after(spawn_camera_rig),
            )
            .add_frame_systems(FrameSet::Dynamic, head_tracking::update_head_pose);
    }
}
