//! Constants shared across the snowfall workspace.
//!
//! Kept free of engine types so tests and tooling can read them without
//! pulling in the renderer.

pub mod render_settings;
pub mod snowfall;
pub mod texture;
pub mod vr;
