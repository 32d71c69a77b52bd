//! Snowfall particle field.
//!
//! Seeds are sampled once on the host and uploaded as a texture; the vertex
//! shader displaces them every frame from a single elapsed-time uniform.

use bevy::prelude::*;

use crate::engine::core::frame_loop::{FrameLoopAppExt, FrameSet, SetupSet};

/// Particle seeds, field dimensions and the field component.
pub mod field;

/// Host-side displacement fallback, parallelised with rayon.
pub mod host_displacement;

/// `SnowfallMaterial` and its uniform.
pub mod material;

/// Index mesh expanded to quads in the vertex shader.
pub mod mesh;

/// The motion law.
pub mod motion;

/// Seed texture layout and upload.
pub mod seed_texture;

/// Spawning, per-frame update and sprite publishing.
pub mod systems;

pub struct SnowfallPlugin;

impl Plugin for SnowfallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, systems::spawn_snowfall.in_set(SetupSet::Scene))
            .add_systems(Update, systems::publish_sprite_texture)
            .add_frame_systems(
                FrameSet::Particles,
                (
                    systems::update_particle_fields,
                    host_displacement::apply_host_displacement
                        .run_if(systems::host_displacement_enabled),
                    systems::sync_snowfall_time,
                )
                    .chain(),
            );
    }
}
