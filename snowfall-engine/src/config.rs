//! Startup configuration.
//!
//! Every setting has a default taken from the `constants` crate. A JSON file
//! (`snowfall.json` next to the executable, native only) may override any
//! subset of them once at startup; nothing is reconfigured while running.

use std::path::Path;

use bevy::prelude::*;
use constants::snowfall::{
    DEFAULT_FIELD_DEPTH, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_PARTICLE_COUNT,
    DRIFT_RADIUS_X, DRIFT_RADIUS_Z, OPACITY, POINT_SCALE, POINT_SIZE, SPEED_HORIZONTAL,
    SPEED_VERTICAL, SPRITE_TEXTURE_PATH, TINT_SRGB,
};
use serde::{Deserialize, Serialize};

use crate::engine::particles::field::FieldDimensions;
use crate::engine::particles::material::SpriteParams;
use crate::engine::particles::motion::MotionParams;
use crate::error::ConfigError;

pub const CONFIG_PATH: &str = "snowfall.json";
pub const DEBUG_ENV_VAR: &str = "SNOWFALL_DEBUG";

/// Where particle displacement is evaluated each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplacementMode {
    /// Vertex shader displaces seeds; the host only publishes elapsed time.
    #[default]
    Device,
    /// Host recomputes every position and rewrites the seed texture.
    Host,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowfallConfig {
    pub particle_count: usize,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub speed_vertical: f32,
    pub speed_horizontal: f32,
    pub radius_x: f32,
    pub radius_z: f32,
    pub scale: f32,
    pub size: f32,
    pub opacity: f32,
    pub tint: [f32; 3],
    pub sprite_path: String,
    pub displacement: DisplacementMode,
    /// Use the desktop "magic window" display when no headset runtime is linked.
    pub emulate_display: bool,
    pub debug: bool,
    /// Fixed RNG seed for reproducible fields.
    pub seed: Option<u64>,
}

impl Default for SnowfallConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            depth: DEFAULT_FIELD_DEPTH,
            speed_vertical: SPEED_VERTICAL,
            speed_horizontal: SPEED_HORIZONTAL,
            radius_x: DRIFT_RADIUS_X,
            radius_z: DRIFT_RADIUS_Z,
            scale: POINT_SCALE,
            size: POINT_SIZE,
            opacity: OPACITY,
            tint: TINT_SRGB,
            sprite_path: SPRITE_TEXTURE_PATH.to_string(),
            displacement: DisplacementMode::Device,
            emulate_display: true,
            debug: false,
            seed: None,
        }
    }
}

impl SnowfallConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn dimensions(&self) -> FieldDimensions {
        FieldDimensions::new(self.width, self.height, self.depth)
    }

    pub fn motion(&self) -> MotionParams {
        MotionParams {
            speed_vertical: self.speed_vertical,
            speed_horizontal: self.speed_horizontal,
            radius_x: self.radius_x,
            radius_z: self.radius_z,
        }
    }

    pub fn sprite(&self) -> SpriteParams {
        SpriteParams {
            scale: self.scale,
            size: self.size,
            opacity: self.opacity,
            tint: Color::srgb(self.tint[0], self.tint[1], self.tint[2]),
        }
    }
}

/// Outcome of reading the startup config, logged once the log plugin is up.
#[derive(Resource, Debug, Default)]
pub struct ConfigReport {
    pub loaded_from: Option<String>,
    pub error: Option<ConfigError>,
}

/// Read the config file (native) and the debug switch for this launch.
pub fn load_startup_config() -> (SnowfallConfig, ConfigReport) {
    let mut report = ConfigReport::default();

    #[cfg(not(target_arch = "wasm32"))]
    let mut config = {
        let path = Path::new(CONFIG_PATH);
        if path.exists() {
            match SnowfallConfig::load(path) {
                Ok(config) => {
                    report.loaded_from = Some(CONFIG_PATH.to_string());
                    config
                }
                Err(error) => {
                    report.error = Some(error);
                    SnowfallConfig::default()
                }
            }
        } else {
            SnowfallConfig::default()
        }
    };

    #[cfg(target_arch = "wasm32")]
    let mut config = SnowfallConfig::default();

    config.debug |= debug_requested();
    (config, report)
}

pub fn report_config(report: Res<ConfigReport>, config: Res<SnowfallConfig>) {
    if let Some(error) = &report.error {
        warn!("Falling back to default snowfall settings: {error}");
    } else if let Some(path) = &report.loaded_from {
        info!("Snowfall settings loaded from {path}");
    }

    info!(
        "Snowfall: {} particles in {}x{}x{} m, {:?} displacement{}",
        config.particle_count,
        config.width,
        config.height,
        config.depth,
        config.displacement,
        if config.debug { ", debug helpers on" } else { "" }
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn debug_requested() -> bool {
    std::env::args().any(|arg| arg == "--debug") || std::env::var_os(DEBUG_ENV_VAR).is_some()
}

#[cfg(target_arch = "wasm32")]
fn debug_requested() -> bool {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .is_some_and(|query| query_has_flag(&query, "debug"))
}

/// True when `flag` appears in a `?a=1&b` style query string and is not
/// explicitly switched off with `false` or `0`.
pub fn query_has_flag(query: &str, flag: &str) -> bool {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            Some((key, parts.next()))
        })
        .any(|(key, value)| key == flag && !matches!(value, Some("false") | Some("0")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_scene() {
        let config = SnowfallConfig::default();
        assert_eq!(config.particle_count, 200_000);
        assert_eq!(config.dimensions(), FieldDimensions::new(10.0, 10.0, 10.0));
        assert_eq!(config.displacement, DisplacementMode::Device);
        assert!(!config.debug);
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let config = SnowfallConfig::from_json_str(
            r#"{ "particle_count": 5000, "displacement": "host", "debug": true }"#,
        )
        .unwrap();

        assert_eq!(config.particle_count, 5000);
        assert_eq!(config.displacement, DisplacementMode::Host);
        assert!(config.debug);
        assert_eq!(config.speed_vertical, SPEED_VERTICAL);
        assert_eq!(config.sprite_path, SPRITE_TEXTURE_PATH);
    }

    #[test]
    fn negative_count_is_a_parse_error() {
        assert!(SnowfallConfig::from_json_str(r#"{ "particle_count": -1 }"#).is_err());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let error = SnowfallConfig::load(Path::new("does/not/exist/snowfall.json")).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn query_flag_parsing() {
        assert!(query_has_flag("?debug", "debug"));
        assert!(query_has_flag("?a=1&debug=true", "debug"));
        assert!(!query_has_flag("?debug=false", "debug"));
        assert!(!query_has_flag("?debugger", "debug"));
        assert!(!query_has_flag("", "debug"));
    }
}
