//! Host-side statement of the snowflake motion law.
//!
//! The vertex shader in `shaders/snowfall.wgsl` evaluates the same law on the
//! device. This copy drives the host displacement fallback and the tests.

use bevy::prelude::*;

use crate::engine::particles::field::ParticleSeed;
use crate::error::ConfigurationError;

/// Shared drift parameters for every particle in a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub speed_vertical: f32,
    pub speed_horizontal: f32,
    pub radius_x: f32,
    pub radius_z: f32,
}

impl MotionParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [
            ("speed_vertical", self.speed_vertical),
            ("speed_horizontal", self.speed_horizontal),
            ("radius_x", self.radius_x),
            ("radius_z", self.radius_z),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::InvalidMotionParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Floored modulo into `[0, height)`.
pub fn wrap_height(y: f32, height: f32) -> f32 {
    let wrapped = y - height * (y / height).floor();
    // Rounding can land exactly on `height` for tiny negative inputs.
    if wrapped >= height {
        0.0
    } else {
        wrapped.max(0.0)
    }
}

/// Position of `seed` after `elapsed` seconds in a field of the given height.
pub fn displace(seed: &ParticleSeed, params: &MotionParams, height: f32, elapsed: f32) -> Vec3 {
    let [x0, y0, z0] = seed.position;
    let uniqueness = seed.uniqueness;

    Vec3::new(
        x0 + ((elapsed - z0 - uniqueness) * params.speed_horizontal).cos() * params.radius_x,
        wrap_height(y0 - elapsed * params.speed_vertical, height),
        z0 + ((elapsed - x0 - uniqueness) * params.speed_horizontal).sin() * params.radius_z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: MotionParams = MotionParams {
        speed_vertical: 0.3,
        speed_horizontal: 0.6,
        radius_x: 0.2,
        radius_z: 0.2,
    };

    fn seed(x: f32, y: f32, z: f32, uniqueness: f32) -> ParticleSeed {
        ParticleSeed {
            position: [x, y, z],
            uniqueness,
        }
    }

    #[test]
    fn falls_and_wraps_into_height() {
        let p = displace(&seed(0.0, 9.9, 0.0, 0.5), &PARAMS, 10.0, 1.0);
        assert!((p.y - 9.6).abs() < 1e-5);

        for elapsed in [0.0, 0.5, 33.0, 34.0, 1234.5, 99_999.0] {
            for y0 in [0.0, 0.01, 4.2, 9.99] {
                let y = displace(&seed(1.0, y0, -2.0, 0.3), &PARAMS, 10.0, elapsed).y;
                assert!((0.0..10.0).contains(&y), "y={y} for y0={y0} t={elapsed}");
            }
        }
    }

    #[test]
    fn wrap_reenters_at_the_top() {
        // 0.1 below the floor comes back 0.1 below the ceiling.
        assert!((wrap_height(-0.1, 10.0) - 9.9).abs() < 1e-5);
        assert_eq!(wrap_height(-1.0e-9, 10.0), 0.0);
    }

    #[test]
    fn continuous_away_from_the_wrap() {
        let s = seed(2.0, 5.0, -3.0, 0.7);
        let step = 1.0e-3;
        let mut previous = displace(&s, &PARAMS, 10.0, 0.0);
        for i in 1..1000 {
            let current = displace(&s, &PARAMS, 10.0, i as f32 * step);
            assert!(current.distance(previous) < 1.0e-3, "jump at step {i}");
            previous = current;
        }
    }

    #[test]
    fn uniqueness_decorrelates_identical_seeds() {
        let a = displace(&seed(1.0, 5.0, 1.0, 0.1), &PARAMS, 10.0, 2.0);
        let b = displace(&seed(1.0, 5.0, 1.0, 0.9), &PARAMS, 10.0, 2.0);
        assert!((a.x - b.x).abs() > 1e-3 || (a.z - b.z).abs() > 1e-3);
        assert_eq!(a.y, b.y);
    }

    #[test]
    fn non_finite_parameters_rejected() {
        let params = MotionParams {
            speed_vertical: f32::NAN,
            ..PARAMS
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::InvalidMotionParameter { name: "speed_vertical", .. })
        ));
    }
}
