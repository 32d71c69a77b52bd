use bevy::pbr::{CascadeShadowConfigBuilder, DirectionalLightShadowMap, light_consts};
use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_LIGHT_INTENSITY, CAMERA_NEAR, DIRECTIONAL_LIGHT_INTENSITY,
    DIRECTIONAL_LIGHT_POSITION, SHADOW_MAP_SIZE, SHADOW_VOLUME_HALF_EXTENT,
};

use crate::config::SnowfallConfig;
use crate::engine::core::scene_context::SceneContext;
use crate::engine::scene::debug_helpers::spawn_shadow_volume_helper;

/// Full-strength illuminance the relative intensities scale.
const KEY_LIGHT_FULL_LUX: f32 = light_consts::lux::OVERCAST_DAY;
const AMBIENT_FULL_BRIGHTNESS: f32 = 500.0;

#[derive(Component)]
pub struct KeyLight;

pub fn key_light_transform() -> Transform {
    let direction = Vec3::from_array(DIRECTIONAL_LIGHT_POSITION).normalize();
    Transform::from_translation(direction).looking_at(Vec3::ZERO, Vec3::Y)
}

pub fn spawn_lighting(
    mut commands: Commands,
    config: Res<SnowfallConfig>,
    mut context: ResMut<SceneContext>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shadow_depth = 2.0 * SHADOW_VOLUME_HALF_EXTENT;

    let light = commands
        .spawn((
            DirectionalLight {
                color: Color::WHITE,
                illuminance: KEY_LIGHT_FULL_LUX * DIRECTIONAL_LIGHT_INTENSITY,
                shadows_enabled: true,
                ..default()
            },
            key_light_transform(),
            CascadeShadowConfigBuilder {
                num_cascades: 1,
                minimum_distance: CAMERA_NEAR,
                first_cascade_far_bound: shadow_depth,
                maximum_distance: shadow_depth,
                ..default()
            }
            .build(),
            KeyLight,
            Name::new("key-light"),
        ))
        .id();

    commands.insert_resource(DirectionalLightShadowMap {
        size: SHADOW_MAP_SIZE,
    });
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_FULL_BRIGHTNESS * AMBIENT_LIGHT_INTENSITY,
        ..default()
    });

    if config.debug {
        spawn_shadow_volume_helper(&mut commands, &mut meshes, &mut materials, light);
    }
    context.key_light = Some(light);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_light_shines_from_above_and_behind() {
        let transform = key_light_transform();
        let expected = Vec3::new(1.0, 2.0, -1.0).normalize();

        assert!(transform.translation.abs_diff_eq(expected, 1e-6));
        // The light looks back at the origin.
        assert!(transform.forward().as_vec3().abs_diff_eq(-expected, 1e-5));
    }
}
