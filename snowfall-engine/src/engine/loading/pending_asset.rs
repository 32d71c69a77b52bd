use bevy::asset::LoadState;
use bevy::prelude::*;

/// Load progress as seen by a pending asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadProgress {
    Loading,
    Loaded,
    Failed(String),
}

impl From<Option<LoadState>> for LoadProgress {
    fn from(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => Self::Loaded,
            Some(LoadState::Failed(error)) => Self::Failed(error.to_string()),
            _ => Self::Loading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    Pending,
    Published,
    Failed,
}

/// What the consumer should do after a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetPoll {
    /// Still loading.
    Waiting,
    /// Loaded on this poll: publish the handle now.
    Ready,
    /// Failed on this poll: run in degraded mode.
    Failed(String),
    /// Already published or failed on an earlier poll.
    Settled,
}

/// Single-assignment wrapper over an asset handle.
///
/// The transition out of `Pending` happens exactly once, so the handle is
/// published to its consumer a single time and failures are reported once.
#[derive(Debug, Clone)]
pub struct PendingAsset<A: Asset> {
    handle: Handle<A>,
    state: PendingState,
}

impl<A: Asset> PendingAsset<A> {
    pub fn new(handle: Handle<A>) -> Self {
        Self {
            handle,
            state: PendingState::Pending,
        }
    }

    pub fn handle(&self) -> &Handle<A> {
        &self.handle
    }

    pub fn state(&self) -> PendingState {
        self.state
    }

    pub fn poll(&mut self, asset_server: &AssetServer) -> AssetPoll {
        if self.state != PendingState::Pending {
            return AssetPoll::Settled;
        }
        let progress = LoadProgress::from(asset_server.get_load_state(&self.handle));
        self.advance(progress)
    }

    pub fn advance(&mut self, progress: LoadProgress) -> AssetPoll {
        if self.state != PendingState::Pending {
            return AssetPoll::Settled;
        }

        match progress {
            LoadProgress::Loading => AssetPoll::Waiting,
            LoadProgress::Loaded => {
                self.state = PendingState::Published;
                AssetPoll::Ready
            }
            LoadProgress::Failed(reason) => {
                self.state = PendingState::Failed;
                AssetPoll::Failed(reason)
            }
        }
    }
}
