//! Snowfall VR engine.

/// Application setup, frame loop and scene context.
pub mod core;

/// Tracked controllers.
pub mod input;

/// Asynchronous asset loading.
pub mod loading;

/// Snowfall particle field.
pub mod particles;

/// Stereo cameras and frame submission.
pub mod render;

/// Lights and debug helpers.
pub mod scene;

/// Diagnostics.
pub mod systems;

/// Frame clock.
pub mod timing;

/// VR display collaborators.
pub mod vr;
