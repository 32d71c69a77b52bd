use bevy::prelude::*;
use bevy::window::PresentMode;

/// Primary window. Vsync paces the frame loop to the display refresh.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: "Snowfall".into(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Snowfall".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
