//! Stereo presentation.
//!
//! A camera rig with one camera per eye. Both eyes share the primary window:
//! side by side while the display presents, left eye only otherwise.

use bevy::prelude::*;

use crate::engine::core::frame_loop::{FrameLoopAppExt, FrameSet, SetupSet};

/// Camera rig, eye viewports and frame submission.
pub mod stereo;

pub struct StereoPlugin;

impl Plugin for StereoPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<stereo::PresentationChanged>()
            .insert_resource(ClearColor(stereo::sky_colour()))
            .add_systems(Startup, stereo::spawn_camera_rig.in_set(SetupSet::Scene))
            .add_systems(Update, stereo::sync_eye_viewports)
            .add_frame_systems(FrameSet::Dynamic, stereo::track_presentation)
            .add_frame_systems(
                FrameSet::Render,
                (stereo::update_eye_cameras, stereo::submit_stereo_frame).chain(),
            );
    }
}
