use bevy::prelude::*;

use crate::engine::vr::display::{ActiveDisplay, VrRuntime};

/// Frame loop lifecycle. `Idle` is terminal when no display is found.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum FrameLoopState {
    #[default]
    Idle,
    Running,
}

#[derive(Component)]
pub struct FpsText;

/// Take the first display the platform reports and start the loop on it.
pub fn acquire_display(
    mut commands: Commands,
    mut runtime: ResMut<VrRuntime>,
    mut next_state: ResMut<NextState<FrameLoopState>>,
) {
    let Some(vr_display) = runtime.first_display() else {
        info!("No VR display available, frame loop stays idle");
        return;
    };

    info!(
        "→ Acquired display '{}' ({:.0} Hz), transitioning to Running state",
        vr_display.name(),
        vr_display.refresh_rate()
    );
    commands.insert_resource(ActiveDisplay(vr_display));
    next_state.set(FrameLoopState::Running);
}
