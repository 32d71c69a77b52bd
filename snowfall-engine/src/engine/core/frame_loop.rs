//! Per-refresh frame loop.
//!
//! Winit redraws once per vsync and every redraw runs one `App::update`, so
//! the `Update` schedule is the frame callback. Its steps are chained sets
//! that only run once a display has been acquired.

use bevy::ecs::system::ScheduleSystem;
use bevy::prelude::*;

use crate::engine::core::app_state::{FrameLoopState, acquire_display};
use crate::engine::timing::clock::{
    FrameClock, FrameTime, SystemClockSource, advance_frame_clock, start_frame_clock,
};

/// Ordered steps of one frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Sample the clock and publish `FrameTime`.
    Clock,
    Controllers,
    Particles,
    /// Everything else that moves: head tracking, presentation tracking.
    Dynamic,
    /// Update eye cameras and hand the frame to the display.
    Render,
}

/// Ordered startup steps.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupSet {
    Display,
    Scene,
    Devices,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub submitted: u64,
}

pub trait FrameLoopAppExt {
    /// Run `systems` every frame inside `set`.
    fn add_frame_systems<M>(
        &mut self,
        set: FrameSet,
        systems: impl IntoScheduleConfigs<ScheduleSystem, M>,
    ) -> &mut Self;
}

impl FrameLoopAppExt for App {
    fn add_frame_systems<M>(
        &mut self,
        set: FrameSet,
        systems: impl IntoScheduleConfigs<ScheduleSystem, M>,
    ) -> &mut Self {
        self.add_systems(Update, systems.in_set(set))
    }
}

pub struct FrameLoopPlugin;

impl Plugin for FrameLoopPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<FrameClock>() {
            app.insert_resource(FrameClock::new(SystemClockSource::default()));
        }

        app.init_state::<FrameLoopState>()
            .init_resource::<FrameTime>()
            .init_resource::<FrameStats>()
            .configure_sets(
                Startup,
                (SetupSet::Display, SetupSet::Scene, SetupSet::Devices).chain(),
            )
            .configure_sets(
                Update,
                (
                    FrameSet::Clock,
                    FrameSet::Controllers,
                    FrameSet::Particles,
                    FrameSet::Dynamic,
                    FrameSet::Render,
                )
                    .chain()
                    .run_if(in_state(FrameLoopState::Running)),
            )
            .add_systems(Startup, acquire_display.in_set(SetupSet::Display))
            .add_systems(OnEnter(FrameLoopState::Running), start_frame_clock)
            .add_frame_systems(FrameSet::Clock, advance_frame_clock);
    }
}
