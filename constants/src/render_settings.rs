/// Background and fog colour (0xc6ccff) as sRGB components
pub const SKY_COLOUR_SRGB: [f32; 3] = [198.0 / 255.0, 204.0 / 255.0, 1.0];

/// Distance at which fog starts to blend in (metres)
pub const FOG_START: f32 = 4.0;

/// Distance at which fog fully hides geometry (metres)
pub const FOG_END: f32 = 11.0;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 50.0;

/// Relative intensity of the key and ambient lights
pub const DIRECTIONAL_LIGHT_INTENSITY: f32 = 0.8;
pub const AMBIENT_LIGHT_INTENSITY: f32 = 0.8;

/// Direction the directional light shines from, normalised at setup.
pub const DIRECTIONAL_LIGHT_POSITION: [f32; 3] = [1.0, 2.0, -1.0];

/// Half extent of the orthographic shadow volume
pub const SHADOW_VOLUME_HALF_EXTENT: f32 = 10.0;

/// Sort bias that keeps the snowfall after every other transparent item.
pub const SNOWFALL_DEPTH_BIAS: f32 = 1.0e4;

/// Directional light shadow map resolution (texels per side)
pub const SHADOW_MAP_SIZE: usize = 2048;
