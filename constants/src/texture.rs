/// Width of the particle seed texture. Rows are added until every particle has a texel.
pub const SEED_TEXTURE_WIDTH: usize = 2048;

/// Largest field the seed texture can address with a single 2048x2048 allocation.
pub const MAX_PARTICLES: usize = SEED_TEXTURE_WIDTH * SEED_TEXTURE_WIDTH;

/// Vertices emitted per particle (two triangles forming a screen-aligned quad)
pub const VERTICES_PER_PARTICLE: usize = 6;
