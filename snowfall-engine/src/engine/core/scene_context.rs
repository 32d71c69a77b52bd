use bevy::prelude::*;

/// Entities making up the scene, filled in by the setup systems.
#[derive(Resource, Debug, Default)]
pub struct SceneContext {
    pub rig: Option<Entity>,
    pub head: Option<Entity>,
    pub eyes: Vec<Entity>,
    pub snowfall: Option<Entity>,
    pub controllers: Vec<Entity>,
    pub key_light: Option<Entity>,
}

impl SceneContext {
    pub fn summary(&self) -> String {
        format!(
            "rig: {}, eyes: {}, snowfall: {}, controllers: {}, key light: {}",
            self.rig.is_some(),
            self.eyes.len(),
            self.snowfall.is_some(),
            self.controllers.len(),
            self.key_light.is_some()
        )
    }
}

pub fn log_scene_context(context: Res<SceneContext>) {
    info!("Scene ready ({})", context.summary());
}
