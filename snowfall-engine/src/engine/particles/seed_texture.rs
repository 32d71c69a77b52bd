//! Packing of particle seeds into an `Rgba32Float` texture.
//!
//! Particle `i` lives at texel `(i % width, i / width)`. The vertex shader
//! reads it back with `textureLoad`, so no filtering or sampling is involved.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bytemuck::Zeroable;
use constants::texture::SEED_TEXTURE_WIDTH;

use crate::engine::particles::field::ParticleSeed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTextureLayout {
    pub width: u32,
    pub height: u32,
}

impl SeedTextureLayout {
    pub fn for_count(count: usize) -> Self {
        let width = count.clamp(1, SEED_TEXTURE_WIDTH);
        let height = count.div_ceil(width).max(1);
        Self {
            width: width as u32,
            height: height as u32,
        }
    }

    pub fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Build the seed image. Texels past the last particle are zero.
pub fn create_seed_image(seeds: &[ParticleSeed], usage: RenderAssetUsages) -> Image {
    let layout = SeedTextureLayout::for_count(seeds.len());
    let mut texels = seeds.to_vec();
    texels.resize(layout.texel_count(), ParticleSeed::zeroed());

    Image::new(
        Extent3d {
            width: layout.width,
            height: layout.height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        bytemuck::cast_slice(&texels).to_vec(),
        TextureFormat::Rgba32Float,
        usage,
    )
}

/// Overwrite the leading texels of an existing seed image.
pub fn write_seed_texels(image: &mut Image, texels: &[ParticleSeed]) {
    let bytes: &[u8] = bytemuck::cast_slice(texels);
    if let Some(data) = image.data.as_mut() {
        let len = bytes.len().min(data.len());
        data[..len].copy_from_slice(&bytes[..len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_fields_use_a_single_row() {
        let layout = SeedTextureLayout::for_count(4);
        assert_eq!(layout, SeedTextureLayout { width: 4, height: 1 });
    }

    #[test]
    fn large_fields_wrap_rows() {
        let layout = SeedTextureLayout::for_count(200_000);
        assert_eq!(layout.width, 2048);
        assert_eq!(layout.height, 98);
        assert!(layout.texel_count() >= 200_000);
    }

    #[test]
    fn image_holds_one_texel_per_seed_with_zero_padding() {
        let seeds = vec![
            ParticleSeed {
                position: [1.0, 2.0, 3.0],
                uniqueness: 0.5,
            };
            2050
        ];
        let image = create_seed_image(&seeds, RenderAssetUsages::MAIN_WORLD);
        let data = image.data.as_ref().unwrap();

        assert_eq!(image.texture_descriptor.format, TextureFormat::Rgba32Float);
        assert_eq!(data.len(), 2048 * 2 * 16);

        let texel = |i: usize| -> ParticleSeed { bytemuck::pod_read_unaligned(&data[i * 16..(i + 1) * 16]) };
        assert_eq!(texel(2049), seeds[2049]);
        assert_eq!(texel(2050), ParticleSeed::zeroed());
    }
}
