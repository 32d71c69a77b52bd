/// Number of snowflakes in the default scene
pub const DEFAULT_PARTICLE_COUNT: usize = 200_000;

/// Default bounding volume of the field (metres). The field is centred on x/z
/// and spans [0, height) on y.
pub const DEFAULT_FIELD_WIDTH: f32 = 10.0;
pub const DEFAULT_FIELD_HEIGHT: f32 = 10.0;
pub const DEFAULT_FIELD_DEPTH: f32 = 10.0;

/// Vertical fall speed (metres per second)
pub const SPEED_VERTICAL: f32 = 0.3;

/// Angular speed of the horizontal drift (radians per second)
pub const SPEED_HORIZONTAL: f32 = 0.6;

/// Radii of the horizontal drift circle
pub const DRIFT_RADIUS_X: f32 = 0.2;
pub const DRIFT_RADIUS_Z: f32 = 0.2;

/// Perspective point scaling: pixel size = SIZE * (SCALE / distance)
pub const POINT_SCALE: f32 = 2.0;
pub const POINT_SIZE: f32 = 4.0;

pub const OPACITY: f32 = 0.1;

/// Tint applied to the sprite, sRGB
pub const TINT_SRGB: [f32; 3] = [1.0, 1.0, 1.0];

/// Sprite texture, relative to the asset root
pub const SPRITE_TEXTURE_PATH: &str = "textures/snowflake.png";
