//! Runtime diagnostics.

/// Native FPS overlay fed by the frame time diagnostics.
pub mod fps_tracking;

/// Dropped-frame accounting against the display refresh interval.
pub mod frame_budget;
