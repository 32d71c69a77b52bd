use bevy::prelude::*;

use crate::engine::core::scene_context::SceneContext;
use crate::engine::render::stereo::CameraRig;
use crate::engine::vr::display::{ActiveDisplay, StageParameters};

/// Transform from the sitting origin to the standing reference frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct StandingMatrix(pub Mat4);

impl Default for StandingMatrix {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

#[derive(Component)]
pub struct StageFloor;

/// Play area extent, if the display reported a usable one.
pub fn play_area(stage: &StageParameters) -> Option<Vec2> {
    let size = Vec2::new(stage.size_x, stage.size_z);
    (size.is_finite() && size.min_element() > 0.0).then_some(size)
}

pub fn apply_stage_parameters(
    mut commands: Commands,
    display: Option<Res<ActiveDisplay>>,
    context: Res<SceneContext>,
    mut standing: ResMut<StandingMatrix>,
    mut rigs: Query<&mut Transform, With<CameraRig>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(stage) = display.and_then(|display| display.stage_parameters()) else {
        return;
    };

    standing.0 = stage.sitting_to_standing;
    let stage_transform = Transform::from_matrix(stage.sitting_to_standing);

    if let Some(mut rig) = context.rig.and_then(|rig| rigs.get_mut(rig).ok()) {
        *rig = stage_transform;
    }

    if let Some(size) = play_area(&stage) {
        commands.spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(size.x, size.y))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.85, 0.87, 0.95),
                perceptual_roughness: 1.0,
                ..default()
            })),
            stage_transform,
            StageFloor,
            Name::new("stage-floor"),
        ));
        info!("Stage play area {:.1} x {:.1} m", size.x, size.y);
    }
}
