use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::render::camera::{ClearColorConfig, Viewport};
use bevy::window::{PrimaryWindow, WindowResized};
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, FOG_END, FOG_START, SKY_COLOUR_SRGB,
};
use constants::vr::DEFAULT_USER_HEIGHT;

use crate::engine::core::frame_loop::FrameStats;
use crate::engine::core::scene_context::SceneContext;
use crate::engine::timing::clock::FrameTime;
use crate::engine::vr::display::{ActiveDisplay, Eye};
use crate::engine::vr::head_tracking::HeadTracked;

/// Root of the camera rig, placed in the standing reference frame.
#[derive(Component)]
pub struct CameraRig;

#[derive(Component, Debug, Clone, Copy)]
pub struct EyeCamera {
    pub eye: Eye,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationChanged {
    pub presenting: bool,
}

/// Where an eye draws inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeLayout {
    FullWindow,
    Region { position: UVec2, size: UVec2 },
    Hidden,
}

pub fn sky_colour() -> Color {
    Color::srgb(SKY_COLOUR_SRGB[0], SKY_COLOUR_SRGB[1], SKY_COLOUR_SRGB[2])
}

/// Presenting splits the window in half per eye; otherwise the left eye
/// covers the window alone.
pub fn eye_layout(eye: Eye, presenting: bool, window_size: UVec2) -> EyeLayout {
    let half_width = window_size.x / 2;
    if !presenting || half_width == 0 || window_size.y == 0 {
        return match eye {
            Eye::Left => EyeLayout::FullWindow,
            Eye::Right => EyeLayout::Hidden,
        };
    }

    let size = UVec2::new(half_width, window_size.y);
    let position = match eye {
        Eye::Left => UVec2::ZERO,
        Eye::Right => UVec2::new(half_width, 0),
    };
    EyeLayout::Region { position, size }
}

pub fn spawn_camera_rig(mut commands: Commands, mut context: ResMut<SceneContext>) {
    let rig = commands
        .spawn((CameraRig, Transform::default(), Visibility::default(), Name::new("camera-rig")))
        .id();

    let head = commands
        .spawn((
            HeadTracked,
            Transform::from_xyz(0.0, DEFAULT_USER_HEIGHT, 0.0),
            Visibility::default(),
            Name::new("head"),
            ChildOf(rig),
        ))
        .id();

    let eyes: Vec<Entity> = Eye::BOTH
        .into_iter()
        .map(|eye| {
            commands
                .spawn((
                    Camera3d::default(),
                    Camera {
                        order: eye.index() as isize,
                        is_active: eye == Eye::Left,
                        // The left eye clears the whole target before either eye draws.
                        clear_color: match eye {
                            Eye::Left => ClearColorConfig::Custom(sky_colour()),
                            Eye::Right => ClearColorConfig::None,
                        },
                        ..default()
                    },
                    Projection::Perspective(PerspectiveProjection {
                        fov: CAMERA_FOV_DEGREES.to_radians(),
                        near: CAMERA_NEAR,
                        far: CAMERA_FAR,
                        ..default()
                    }),
                    DistanceFog {
                        color: sky_colour(),
                        falloff: FogFalloff::Linear {
                            start: FOG_START,
                            end: FOG_END,
                        },
                        ..default()
                    },
                    EyeCamera { eye },
                    Transform::default(),
                    Name::new(format!("eye-{eye:?}").to_lowercase()),
                    ChildOf(head),
                ))
                .id()
        })
        .collect();

    context.rig = Some(rig);
    context.head = Some(head);
    context.eyes = eyes;
}

/// Resize and presentation changes only touch viewports; the loop keeps running.
pub fn sync_eye_viewports(
    mut resized: EventReader<WindowResized>,
    mut presentation: EventReader<PresentationChanged>,
    added: Query<(), Added<EyeCamera>>,
    display: Option<Res<ActiveDisplay>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut eyes: Query<(&EyeCamera, &mut Camera)>,
) {
    let resized = resized.read().count() > 0;
    let presentation_changed = presentation.read().count() > 0;
    if !resized && !presentation_changed && added.is_empty() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };

    let presenting = display.is_some_and(|display| display.is_presenting());
    let window_size = window.physical_size();

    for (eye_camera, mut camera) in &mut eyes {
        match eye_layout(eye_camera.eye, presenting, window_size) {
            EyeLayout::FullWindow => {
                camera.is_active = true;
                camera.viewport = None;
            }
            EyeLayout::Region { position, size } => {
                camera.is_active = true;
                camera.viewport = Some(Viewport {
                    physical_position: position,
                    physical_size: size,
                    ..default()
                });
            }
            EyeLayout::Hidden => {
                camera.is_active = false;
            }
        }
    }
}

pub fn track_presentation(
    display: Res<ActiveDisplay>,
    mut last: Local<Option<bool>>,
    mut events: EventWriter<PresentationChanged>,
) {
    let presenting = display.is_presenting();
    if *last == Some(presenting) {
        return;
    }
    if last.is_some() {
        info!("Display presentation changed, presenting: {presenting}");
    }
    *last = Some(presenting);
    events.write(PresentationChanged { presenting });
}

/// Place each eye at its offset and field of view for this frame.
pub fn update_eye_cameras(
    display: Res<ActiveDisplay>,
    mut eyes: Query<(&EyeCamera, &mut Transform, &mut Projection)>,
) {
    let presenting = display.is_presenting();
    for (eye_camera, mut transform, mut projection) in &mut eyes {
        let params = display.eye_parameters(eye_camera.eye);
        let offset = if presenting { params.offset } else { Vec3::ZERO };
        if transform.translation != offset {
            transform.translation = offset;
        }

        let fov = params.fov_degrees.to_radians();
        let stale = matches!(&*projection, Projection::Perspective(perspective) if perspective.fov != fov);
        if stale {
            if let Projection::Perspective(perspective) = &mut *projection {
                perspective.fov = fov;
            }
        }
    }
}

/// Hand the frame for this `delta` to the display.
pub fn submit_stereo_frame(
    mut display: ResMut<ActiveDisplay>,
    frame_time: Res<FrameTime>,
    mut stats: ResMut<FrameStats>,
) {
    display.submit_frame(&frame_time);
    stats.submitted += 1;
}
