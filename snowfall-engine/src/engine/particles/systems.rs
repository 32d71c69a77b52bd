use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::NoFrustumCulling;

use crate::config::{DisplacementMode, SnowfallConfig};
use crate::engine::core::scene_context::SceneContext;
use crate::engine::loading::pending_asset::{AssetPoll, PendingAsset};
use crate::engine::particles::field::ParticleField;
use crate::engine::particles::material::{SnowfallMaterial, SnowfallUniform};
use crate::engine::particles::mesh::{Snowfall, create_particle_index_mesh};
use crate::engine::particles::seed_texture::create_seed_image;
use crate::engine::timing::clock::FrameTime;

/// Seed texture backing a field's material.
#[derive(Component)]
pub struct SeedTexture(pub Handle<Image>);

/// Sprite requested at setup, published into the material once loaded.
#[derive(Resource)]
pub struct SnowfallSprite(pub PendingAsset<Image>);

pub fn spawn_snowfall(
    mut commands: Commands,
    config: Res<SnowfallConfig>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<SnowfallMaterial>>,
    mut context: ResMut<SceneContext>,
) {
    let field = match ParticleField::new(
        config.particle_count,
        config.dimensions(),
        config.motion(),
        config.seed,
    ) {
        Ok(field) => field,
        Err(error) => {
            error!("Snowfall not created: {error}");
            return;
        }
    };

    // Host displacement rewrites the texture, so it must stay in the main world.
    let usage = match config.displacement {
        DisplacementMode::Device => RenderAssetUsages::RENDER_WORLD,
        DisplacementMode::Host => RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    };
    let seed_texture = images.add(create_seed_image(field.seeds(), usage));

    let material = materials.add(SnowfallMaterial {
        params: SnowfallUniform::new(&field, &config.sprite(), config.displacement),
        seed_texture: seed_texture.clone(),
        sprite: None,
    });
    let mesh = meshes.add(create_particle_index_mesh(field.len()));

    let sprite = asset_server.load(config.sprite_path.clone());
    commands.insert_resource(SnowfallSprite(PendingAsset::new(sprite)));

    let count = field.len();
    let entity = commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            Visibility::default(),
            NoFrustumCulling,
            NotShadowCaster,
            NotShadowReceiver,
            Snowfall,
            SeedTexture(seed_texture),
            field,
            Name::new("snowfall"),
        ))
        .id();
    context.snowfall = Some(entity);

    info!("✓ Snowfall created with {count} particles");
}

pub fn update_particle_fields(frame_time: Res<FrameTime>, mut fields: Query<&mut ParticleField>) {
    for mut field in &mut fields {
        field.update(frame_time.delta, frame_time.elapsed);
    }
}

/// Copy each field's elapsed time into its material uniform.
pub fn sync_snowfall_time(
    fields: Query<(&ParticleField, &MeshMaterial3d<SnowfallMaterial>)>,
    mut materials: ResMut<Assets<SnowfallMaterial>>,
) {
    for (field, material) in &fields {
        let elapsed = field.elapsed();
        let stale = materials
            .get(&material.0)
            .is_some_and(|material| material.params.elapsed_time != elapsed);
        if stale {
            if let Some(material) = materials.get_mut(&material.0) {
                material.params.elapsed_time = elapsed;
            }
        }
    }
}

pub fn publish_sprite_texture(
    asset_server: Res<AssetServer>,
    sprite: Option<ResMut<SnowfallSprite>>,
    fields: Query<&MeshMaterial3d<SnowfallMaterial>, With<Snowfall>>,
    mut materials: ResMut<Assets<SnowfallMaterial>>,
) {
    let Some(mut sprite) = sprite else {
        return;
    };

    match sprite.0.poll(&asset_server) {
        AssetPoll::Ready => {
            for material in &fields {
                if let Some(material) = materials.get_mut(&material.0) {
                    material.sprite = Some(sprite.0.handle().clone());
                }
            }
            info!("✓ Snowflake sprite loaded");
        }
        AssetPoll::Failed(reason) => {
            warn!("Snowflake sprite failed to load, drawing untextured sprites: {reason}");
        }
        AssetPoll::Waiting | AssetPoll::Settled => {}
    }
}

pub fn host_displacement_enabled(config: Res<SnowfallConfig>) -> bool {
    config.displacement == DisplacementMode::Host
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::particles::field::FieldDimensions;

    #[test]
    fn fields_follow_frame_time() {
        let config = SnowfallConfig::default();
        let field = ParticleField::new(8, FieldDimensions::new(2.0, 2.0, 2.0), config.motion(), Some(5))
            .unwrap();

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(FrameTime {
                delta: 0.5,
                elapsed: 3.0,
                frame: 7,
            })
            .add_systems(Update, update_particle_fields);
        let entity = app.world_mut().spawn(field).id();

        app.update();
        assert_eq!(app.world().get::<ParticleField>(entity).map(|f| f.elapsed()), Some(3.0));
    }

    fn spawn_app(config: SnowfallConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<Image>()
            .init_asset::<SnowfallMaterial>()
            .insert_resource(config)
            .init_resource::<SceneContext>()
            .add_systems(Startup, spawn_snowfall);
        app
    }

    #[test]
    fn invalid_field_leaves_the_scene_without_snow() {
        let mut app = spawn_app(SnowfallConfig {
            particle_count: 0,
            ..default()
        });
        app.update();

        let world = app.world_mut();
        assert!(world.resource::<SceneContext>().snowfall.is_none());
        assert!(world.get_resource::<SnowfallSprite>().is_none());
        assert_eq!(world.query::<&ParticleField>().iter(world).count(), 0);
        assert_eq!(world.resource::<Assets<SnowfallMaterial>>().len(), 0);
    }

    #[test]
    fn oversized_field_is_rejected_the_same_way() {
        let mut app = spawn_app(SnowfallConfig {
            particle_count: constants::texture::MAX_PARTICLES + 1,
            ..default()
        });
        app.update();

        let world = app.world_mut();
        assert!(world.resource::<SceneContext>().snowfall.is_none());
        assert_eq!(world.query::<&Snowfall>().iter(world).count(), 0);
    }
}
