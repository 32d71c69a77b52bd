//! Asynchronous asset loading.
//!
//! Assets are requested once at setup and published to their consumers when
//! the asset server reports them loaded. There are no retries.

/// Single-assignment wrapper over an asset handle.
///
/// Tracks one load through `Pending` to `Published` or `Failed`.
pub mod pending_asset;
