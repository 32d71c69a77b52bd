use bevy::prelude::*;
use bevy::render::mesh::{MeshVertexAttribute, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::VertexFormat;
use constants::texture::VERTICES_PER_PARTICLE;

#[derive(Component)]
pub struct Snowfall;

/// Packed `particle * 6 + corner` id, read at shader location 0.
pub const ATTRIBUTE_PARTICLE_VERTEX: MeshVertexAttribute =
    MeshVertexAttribute::new("Snowfall_ParticleVertex", 906_118_203, VertexFormat::Uint32);

/// Create the particle index mesh expanded to screen-aligned quads in the vertex shader.
/// Vertices carry only their packed id; the real position comes from the seed texture.
pub fn create_particle_index_mesh(particle_count: usize) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );

    // 6 vertices per particle, 2 triangles.
    let ids: Vec<u32> = (0..(particle_count * VERTICES_PER_PARTICLE) as u32).collect();

    mesh.insert_attribute(ATTRIBUTE_PARTICLE_VERTEX, ids);
    mesh
}
