//! Snowfall material: seed texture, optional sprite and the shared motion uniform
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, CompareFunction, RenderPipelineDescriptor, ShaderRef, ShaderType,
    SpecializedMeshPipelineError,
};
use bevy::{prelude::*, reflect::TypePath};
use constants::render_settings::SNOWFALL_DEPTH_BIAS;

use crate::config::DisplacementMode;
use crate::engine::particles::field::ParticleField;
use crate::engine::particles::mesh::ATTRIBUTE_PARTICLE_VERTEX;
use crate::engine::particles::seed_texture::SeedTextureLayout;

pub const SNOWFALL_SHADER_PATH: &str = "shaders/snowfall.wgsl";

/// Sprite appearance shared by every particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteParams {
    pub scale: f32,
    pub size: f32,
    pub opacity: f32,
    pub tint: Color,
}

/// Mirrors `SnowfallUniform` in `snowfall.wgsl`; field order matters.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct SnowfallUniform {
    pub tint: Vec3,
    pub opacity: f32,
    pub height: f32,
    pub speed_vertical: f32,
    pub speed_horizontal: f32,
    pub elapsed_time: f32,
    pub radius_x: f32,
    pub radius_z: f32,
    pub scale: f32,
    pub size: f32,
    pub seed_texture_width: u32,
    pub displace_on_device: u32,
}

impl SnowfallUniform {
    pub fn new(field: &ParticleField, sprite: &SpriteParams, mode: DisplacementMode) -> Self {
        let motion = field.motion();
        let tint = sprite.tint.to_linear();

        Self {
            tint: Vec3::new(tint.red, tint.green, tint.blue),
            opacity: sprite.opacity,
            height: field.dimensions().height,
            speed_vertical: motion.speed_vertical,
            speed_horizontal: motion.speed_horizontal,
            elapsed_time: field.elapsed(),
            radius_x: motion.radius_x,
            radius_z: motion.radius_z,
            scale: sprite.scale,
            size: sprite.size,
            seed_texture_width: SeedTextureLayout::for_count(field.len()).width,
            displace_on_device: u32::from(mode == DisplacementMode::Device),
        }
    }
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct SnowfallMaterial {
    #[uniform(0)]
    pub params: SnowfallUniform,

    // Read with textureLoad; Rgba32Float is not filterable.
    #[texture(1, sample_type = "float", filterable = false)]
    pub seed_texture: Handle<Image>,

    /// `None` until the sprite finishes loading; the bind group then uses a white fallback.
    #[texture(2)]
    #[sampler(3)]
    pub sprite: Option<Handle<Image>>,
}

impl Material for SnowfallMaterial {
    fn vertex_shader() -> ShaderRef {
        SNOWFALL_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SNOWFALL_SHADER_PATH.into()
    }

    /// Bevy blends `Add` as premultiplied alpha; the fragment shader
    /// premultiplies and writes zero alpha to get `SrcAlpha, One`.
    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn depth_bias(&self) -> f32 {
        SNOWFALL_DEPTH_BIAS
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout
            .0
            .get_layout(&[ATTRIBUTE_PARTICLE_VERTEX.at_shader_location(0)])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;

        // Snow draws over everything and never occludes.
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
            depth_stencil.depth_compare = CompareFunction::Always;
        }
        Ok(())
    }
}
