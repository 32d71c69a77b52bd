//! Host-side displacement fallback.
//!
//! Recomputes every particle position each frame and rewrites the seed
//! texture so the shader can draw texels as-is.

use bevy::prelude::*;
use bytemuck::Zeroable;
use rayon::prelude::*;

use crate::engine::particles::field::{ParticleField, ParticleSeed};
use crate::engine::particles::motion::displace;
use crate::engine::particles::systems::SeedTexture;
use crate::engine::particles::seed_texture::write_seed_texels;

/// Fill `out` with displaced positions, keeping each particle's uniqueness in `w`.
pub fn displaced_texels(field: &ParticleField, out: &mut Vec<ParticleSeed>) {
    let motion = field.motion();
    let height = field.dimensions().height;
    let elapsed = field.elapsed();

    out.resize(field.len(), ParticleSeed::zeroed());
    out.par_iter_mut()
        .zip(field.seeds().par_iter())
        .for_each(|(texel, seed)| {
            *texel = ParticleSeed {
                position: displace(seed, &motion, height, elapsed).to_array(),
                uniqueness: seed.uniqueness,
            };
        });
}

pub fn apply_host_displacement(
    fields: Query<(&ParticleField, &SeedTexture)>,
    mut images: ResMut<Assets<Image>>,
    mut scratch: Local<Vec<ParticleSeed>>,
) {
    for (field, seed_texture) in &fields {
        displaced_texels(field, &mut scratch);
        if let Some(image) = images.get_mut(&seed_texture.0) {
            write_seed_texels(image, &scratch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::particles::field::FieldDimensions;
    use crate::engine::particles::motion::MotionParams;

    #[test]
    fn matches_the_motion_law() {
        let mut field = ParticleField::new(
            500,
            FieldDimensions::new(10.0, 10.0, 10.0),
            MotionParams {
                speed_vertical: 0.3,
                speed_horizontal: 0.6,
                radius_x: 0.2,
                radius_z: 0.2,
            },
            Some(11),
        )
        .unwrap();
        field.update(0.016, 17.25);

        let mut texels = Vec::new();
        displaced_texels(&field, &mut texels);

        assert_eq!(texels.len(), 500);
        for (index, texel) in texels.iter().enumerate() {
            assert_eq!(Some(Vec3::from_array(texel.position)), field.position(index));
            assert_eq!(texel.uniqueness, field.seeds()[index].uniqueness);
        }
    }
}
