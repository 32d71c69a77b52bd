//! Core application setup and frame loop orchestration.
//!
//! Assembles plugins, resources and the ordered startup and per-frame system
//! sets. The loop starts once a display has been acquired.

/// Application factory with plugin registration and system scheduling.
///
/// Configures Bevy app with windowing, asset loading, the snowfall material and every scene plugin.
pub mod app_setup;

/// Frame loop state machine and the display acquisition transition.
///
/// Stays `Idle` when no display exists; moves to `Running` otherwise.
pub mod app_state;

/// Ordered frame and startup system sets.
///
/// Clock, controllers, particles, other dynamic entities, then render.
pub mod frame_loop;

/// Scene entity registry filled during setup.
pub mod scene_context;

/// Platform-specific window configuration for web and native targets.
pub mod window_config;
