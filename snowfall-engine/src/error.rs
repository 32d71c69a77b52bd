//! Error types for scene configuration.

use thiserror::Error;

/// Rejected particle field parameters. Fatal for the field: it is never created.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("particle count must be positive")]
    EmptyField,

    #[error("particle count {count} exceeds seed texture capacity of {max}")]
    TooManyParticles { count: usize, max: usize },

    #[error("field {axis} must be a positive finite length, got {value}")]
    InvalidDimension { axis: &'static str, value: f32 },

    #[error("motion parameter {name} must be finite, got {value}")]
    InvalidMotionParameter { name: &'static str, value: f32 },
}

/// Failure to read the optional startup config file. Defaults are used instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
