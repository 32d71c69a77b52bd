use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use constants::vr::{CONTROLLER_COUNT, GUIDE_RAY_LENGTH};

use crate::config::SnowfallConfig;
use crate::engine::core::scene_context::SceneContext;
use crate::engine::timing::clock::FrameTime;
use crate::engine::vr::display::{
    ControllerButton, ControllerButtons, ControllerInput, ControllerInputApi, VrRuntime,
};
use crate::engine::vr::stage::StandingMatrix;

/// A tracked hand controller. Hidden until its hardware reports a pose.
#[derive(Component, Debug)]
pub struct ControllerDevice {
    index: usize,
    standing: Mat4,
    last_polled_frame: Option<u64>,
    buttons: ControllerButtons,
    tracked: bool,
}

#[derive(Component)]
pub struct GuideRay;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerButtonEvent {
    pub controller: usize,
    pub button: ControllerButton,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseRefresh {
    /// Already polled this frame; nothing changed.
    AlreadyPolled,
    /// No hardware or tracking lost.
    Lost,
    Tracked(Transform),
}

impl ControllerDevice {
    pub fn new(index: usize, standing: Mat4) -> Self {
        Self {
            index,
            standing,
            last_polled_frame: None,
            buttons: ControllerButtons::default(),
            tracked: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    /// Poll the hardware at most once per `frame`. Button edges are passed to `on_button`.
    pub fn refresh(
        &mut self,
        frame: u64,
        input: &mut dyn ControllerInput,
        mut on_button: impl FnMut(ControllerButton, bool),
    ) -> PoseRefresh {
        if self.last_polled_frame == Some(frame) {
            return PoseRefresh::AlreadyPolled;
        }
        self.last_polled_frame = Some(frame);

        let Some(state) = input.poll(self.index) else {
            self.tracked = false;
            return PoseRefresh::Lost;
        };

        for (button, pressed) in self.buttons.changes(state.buttons) {
            on_button(button, pressed);
        }
        self.buttons = state.buttons;
        self.tracked = true;

        let pose = Mat4::from_rotation_translation(state.orientation, state.position);
        PoseRefresh::Tracked(Transform::from_matrix(self.standing * pose))
    }
}

pub fn spawn_controllers(
    mut commands: Commands,
    mut runtime: ResMut<VrRuntime>,
    standing: Res<StandingMatrix>,
    config: Res<SnowfallConfig>,
    mut context: ResMut<SceneContext>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(input) = runtime.controller_input() else {
        warn!("Controller input API not available, tracked controllers disabled");
        return;
    };
    commands.insert_resource(ControllerInputApi(input));

    let guide_ray = config.debug.then(|| {
        (
            meshes.add(create_guide_ray_mesh()),
            materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                ..default()
            }),
        )
    });

    for index in 0..CONTROLLER_COUNT {
        let controller = commands
            .spawn((
                ControllerDevice::new(index, standing.0),
                Transform::default(),
                Visibility::Hidden,
                Name::new(format!("controller-{index}")),
            ))
            .id();

        if let Some((mesh, material)) = &guide_ray {
            commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_scale(Vec3::new(1.0, 1.0, GUIDE_RAY_LENGTH)),
                GuideRay,
                ChildOf(controller),
            ));
        }
        context.controllers.push(controller);
    }

    info!("Spawned {CONTROLLER_COUNT} tracked controllers");
}

/// Unit line pointing down -Z, scaled per controller.
pub fn create_guide_ray_mesh() -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(
        Mesh::ATTRIBUTE_POSITION,
        vec![[0.0_f32, 0.0, 0.0], [0.0, 0.0, -1.0]],
    );
    mesh
}

pub fn update_controllers(
    frame_time: Res<FrameTime>,
    input: Option<ResMut<ControllerInputApi>>,
    mut devices: Query<(&mut ControllerDevice, &mut Transform, &mut Visibility)>,
    mut events: EventWriter<ControllerButtonEvent>,
) {
    let Some(mut input) = input else {
        return;
    };

    for (mut device, mut transform, mut visibility) in &mut devices {
        let controller = device.index();
        let mut edges = Vec::new();
        let refresh = device.refresh(frame_time.frame, &mut *input.0, |button, pressed| {
            edges.push(ControllerButtonEvent {
                controller,
                button,
                pressed,
            })
        });

        match refresh {
            PoseRefresh::AlreadyPolled => {}
            PoseRefresh::Lost => {
                visibility.set_if_neq(Visibility::Hidden);
            }
            PoseRefresh::Tracked(pose) => {
                *transform = pose;
                visibility.set_if_neq(Visibility::Visible);
            }
        }
        events.write_batch(edges);
    }
}

pub fn log_controller_buttons(mut events: EventReader<ControllerButtonEvent>) {
    for event in events.read() {
        debug!(
            "Controller {} {:?} {}",
            event.controller,
            event.button,
            if event.pressed { "pressed" } else { "released" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::vr::display::ControllerState;
    use crate::engine::vr::platform::HeadlessPlatform;

    /// Hardware behind index 0 only.
    #[derive(Default)]
    struct OneController {
        polls: usize,
        trigger: bool,
    }

    impl ControllerInput for OneController {
        fn poll(&mut self, index: usize) -> Option<ControllerState> {
            self.polls += 1;
            (index == 0).then_some(ControllerState {
                position: Vec3::new(0.2, 1.0, -0.3),
                orientation: Quat::IDENTITY,
                buttons: ControllerButtons {
                    trigger: self.trigger,
                    ..default()
                },
            })
        }
    }

    #[test]
    fn polled_at_most_once_per_frame() {
        let mut input = OneController::default();
        let mut device = ControllerDevice::new(0, Mat4::IDENTITY);

        assert!(matches!(device.refresh(1, &mut input, |_, _| {}), PoseRefresh::Tracked(_)));
        assert_eq!(device.refresh(1, &mut input, |_, _| {}), PoseRefresh::AlreadyPolled);
        assert!(matches!(device.refresh(2, &mut input, |_, _| {}), PoseRefresh::Tracked(_)));
        assert_eq!(input.polls, 2);
    }

    #[test]
    fn pose_is_relative_to_the_standing_frame() {
        let mut input = OneController::default();
        let mut device = ControllerDevice::new(0, Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0)));

        let PoseRefresh::Tracked(transform) = device.refresh(1, &mut input, |_, _| {}) else {
            panic!("controller 0 has hardware");
        };
        assert!(transform.translation.abs_diff_eq(Vec3::new(0.2, 1.5, -0.3), 1e-6));
    }

    #[test]
    fn missing_hardware_is_not_an_error() {
        let mut input = OneController::default();
        let mut device = ControllerDevice::new(1, Mat4::IDENTITY);

        assert_eq!(device.refresh(1, &mut input, |_, _| {}), PoseRefresh::Lost);
        assert!(!device.is_tracked());
    }

    #[test]
    fn trigger_edges_are_reported_once() {
        let mut input = OneController::default();
        let mut device = ControllerDevice::new(0, Mat4::IDENTITY);
        let mut edges = Vec::new();

        device.refresh(1, &mut input, |b, p| edges.push((b, p)));
        input.trigger = true;
        device.refresh(2, &mut input, |b, p| edges.push((b, p)));
        device.refresh(3, &mut input, |b, p| edges.push((b, p)));
        input.trigger = false;
        device.refresh(4, &mut input, |b, p| edges.push((b, p)));

        assert_eq!(
            edges,
            vec![(ControllerButton::Trigger, true), (ControllerButton::Trigger, false)]
        );
    }

    #[test]
    fn system_hides_controllers_without_hardware() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ControllerButtonEvent>()
            .insert_resource(FrameTime {
                delta: 0.016,
                elapsed: 0.016,
                frame: 1,
            })
            .insert_resource(ControllerInputApi(Box::new(OneController::default())))
            .add_systems(Update, update_controllers);

        let present = app
            .world_mut()
            .spawn((ControllerDevice::new(0, Mat4::IDENTITY), Transform::default(), Visibility::Hidden))
            .id();
        let absent = app
            .world_mut()
            .spawn((ControllerDevice::new(1, Mat4::IDENTITY), Transform::default(), Visibility::Hidden))
            .id();

        app.update();

        let world = app.world();
        assert_eq!(world.get::<Visibility>(present), Some(&Visibility::Visible));
        assert_eq!(world.get::<Visibility>(absent), Some(&Visibility::Hidden));
        assert_eq!(world.get::<Transform>(absent), Some(&Transform::default()));
    }

    #[test]
    fn no_input_api_spawns_no_controllers() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .insert_resource(VrRuntime::new(HeadlessPlatform))
            .insert_resource(SnowfallConfig {
                debug: true,
                ..default()
            })
            .init_resource::<StandingMatrix>()
            .init_resource::<SceneContext>()
            .add_systems(Startup, spawn_controllers);

        app.update();

        let world = app.world_mut();
        assert!(world.resource::<SceneContext>().controllers.is_empty());
        assert!(world.get_resource::<ControllerInputApi>().is_none());
        assert_eq!(world.query::<&ControllerDevice>().iter(world).count(), 0);
        assert_eq!(world.query::<&GuideRay>().iter(world).count(), 0);
    }
}
