use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::config::{load_startup_config, report_config};
use crate::engine::core::app_state::FrameLoopState;
use crate::engine::core::frame_loop::{FrameLoopAppExt, FrameLoopPlugin, FrameSet, SetupSet};
use crate::engine::core::scene_context::{SceneContext, log_scene_context};
use crate::engine::core::window_config::create_window_config;
use crate::engine::input::ControllerPlugin;
use crate::engine::particles::SnowfallPlugin;
use crate::engine::particles::material::SnowfallMaterial;
use crate::engine::render::StereoPlugin;
use crate::engine::scene::ScenePlugin;
use crate::engine::systems::frame_budget::{
    follow_primary_monitor, init_frame_budget, monitor_frame_budget,
};
use crate::engine::timing::clock::advance_frame_clock;
use crate::engine::vr::VrPlugin;
use crate::engine::vr::display::{VrPlatform, VrRuntime};
use crate::engine::vr::platform::{HeadlessPlatform, MagicWindowPlatform};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{create_native_overlays, fps_text_update_system};

pub fn create_app() -> App {
    let (config, config_report) = load_startup_config();

    // No headset runtime is linked; emulate one or leave the loop idle.
    let platform: Box<dyn VrPlatform> = if config.emulate_display {
        Box::new(MagicWindowPlatform)
    } else {
        Box::new(HeadlessPlatform)
    };

    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(MaterialPlugin::<SnowfallMaterial> {
            // Additive sprites neither write depth nor cast shadows.
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .add_plugins(FrameTimeDiagnosticsPlugin::default());

    // Initialise resources early
    app.insert_resource(config)
        .insert_resource(config_report)
        .insert_resource(VrRuntime::from_boxed(platform))
        .init_resource::<SceneContext>();

    app.add_plugins((
        FrameLoopPlugin,
        StereoPlugin,
        VrPlugin,
        ScenePlugin,
        SnowfallPlugin,
        ControllerPlugin,
    ));

    app.add_systems(
        Startup,
        (
            report_config.before(SetupSet::Display),
            log_scene_context.after(SetupSet::Devices),
        ),
    )
    .add_systems(OnEnter(FrameLoopState::Running), init_frame_budget)
    .add_frame_systems(
        FrameSet::Clock,
        (follow_primary_monitor, monitor_frame_budget)
            .chain()
            .after(advance_frame_clock),
    );

    // Add fps overlay only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, create_native_overlays)
            .add_systems(Update, fps_text_update_system);
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "info,wgpu_core=warn,wgpu_hal=warn,naga=warn".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
