use bevy::prelude::*;
use bytemuck::{Pod, Zeroable};
use constants::texture::MAX_PARTICLES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::particles::motion::{MotionParams, displace};
use crate::error::ConfigurationError;

/// Bounding volume of a field: centred on x/z, `[0, height)` on y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl FieldDimensions {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (axis, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigurationError::InvalidDimension { axis, value });
            }
        }
        Ok(())
    }
}

/// Initial state of one snowflake, laid out as one RGBA32F texel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleSeed {
    pub position: [f32; 3],
    /// Per-particle phase offset in `[0, 1)`.
    pub uniqueness: f32,
}

/// Fixed-size set of procedurally animated snowflakes.
///
/// Seeds are sampled once; afterwards only the shared elapsed time changes.
#[derive(Component, Debug, Clone)]
pub struct ParticleField {
    dimensions: FieldDimensions,
    motion: MotionParams,
    seeds: Vec<ParticleSeed>,
    elapsed: f32,
}

impl ParticleField {
    pub fn new(
        count: usize,
        dimensions: FieldDimensions,
        motion: MotionParams,
        seed: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(entropy_seed));
        Self::with_rng(count, dimensions, motion, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(
        count: usize,
        dimensions: FieldDimensions,
        motion: MotionParams,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        if count == 0 {
            return Err(ConfigurationError::EmptyField);
        }
        if count > MAX_PARTICLES {
            return Err(ConfigurationError::TooManyParticles {
                count,
                max: MAX_PARTICLES,
            });
        }
        dimensions.validate()?;
        motion.validate()?;

        let seeds = (0..count)
            .map(|_| ParticleSeed {
                position: [
                    centred(rng, dimensions.width),
                    rng.random::<f32>() * dimensions.height,
                    centred(rng, dimensions.depth),
                ],
                uniqueness: rng.random::<f32>(),
            })
            .collect();

        Ok(Self {
            dimensions,
            motion,
            seeds,
            elapsed: 0.0,
        })
    }

    /// Publish the shared time parameter. Positions are not touched.
    pub fn update(&mut self, _delta: f32, elapsed: f32) {
        self.elapsed = elapsed;
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn seeds(&self) -> &[ParticleSeed] {
        &self.seeds
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn dimensions(&self) -> FieldDimensions {
        self.dimensions
    }

    pub fn motion(&self) -> MotionParams {
        self.motion
    }

    /// Where particle `index` is drawn at the current elapsed time.
    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.seeds
            .get(index)
            .map(|seed| displace(seed, &self.motion, self.dimensions.height, self.elapsed))
    }
}

/// Uniform sample in `[-extent / 2, extent / 2)`.
fn centred<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    extent * (rng.random::<f32>() - 0.5)
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}
