//! Frame timing.

/// Monotonic frame clock producing per-frame delta and elapsed time
pub mod clock;
