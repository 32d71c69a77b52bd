use bevy::prelude::*;
use constants::vr::CONTROLLER_MODEL_PATH;

use crate::engine::core::scene_context::SceneContext;
use crate::engine::loading::pending_asset::{AssetPoll, PendingAsset};

/// Controller model, loaded once and instanced on every controller.
#[derive(Resource)]
pub struct ControllerModel(pub PendingAsset<Scene>);

#[derive(Component)]
pub struct ControllerVisual;

pub fn load_controller_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    context: Res<SceneContext>,
) {
    if context.controllers.is_empty() {
        return;
    }

    let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(CONTROLLER_MODEL_PATH));
    commands.insert_resource(ControllerModel(PendingAsset::new(handle)));
}

pub fn attach_controller_models(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    model: Option<ResMut<ControllerModel>>,
    context: Res<SceneContext>,
) {
    let Some(mut model) = model else {
        return;
    };

    match model.0.poll(&asset_server) {
        AssetPoll::Ready => {
            for &controller in &context.controllers {
                commands.spawn((
                    SceneRoot(model.0.handle().clone()),
                    ControllerVisual,
                    ChildOf(controller),
                ));
            }
            info!("✓ Controller model attached to {} controllers", context.controllers.len());
        }
        AssetPoll::Failed(reason) => {
            warn!("Controller model {CONTROLLER_MODEL_PATH} failed to load, controllers stay bare: {reason}");
        }
        AssetPoll::Waiting | AssetPoll::Settled => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn controller_model_ships_with_the_assets() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join(CONTROLLER_MODEL_PATH);
        let bytes = std::fs::read(&path).unwrap();

        // Binary glTF header: magic, version 2, total length.
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize, bytes.len());
    }
}
