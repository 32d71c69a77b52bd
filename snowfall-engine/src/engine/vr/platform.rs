//! Platforms available without a headset runtime.

use bevy::prelude::*;
use constants::vr::DEFAULT_REFRESH_RATE_HZ;

use crate::engine::timing::clock::FrameTime;
use crate::engine::vr::display::{ControllerInput, HeadPose, VrDisplay, VrPlatform};

/// Platform with no displays and no controllers. The frame loop stays idle.
#[derive(Debug, Default)]
pub struct HeadlessPlatform;

impl VrPlatform for HeadlessPlatform {
    fn displays(&mut self) -> Vec<Box<dyn VrDisplay>> {
        Vec::new()
    }

    fn controller_input(&mut self) -> Option<Box<dyn ControllerInput>> {
        None
    }
}

/// Desktop emulation: one mono display with a fixed standing head pose.
#[derive(Debug, Default)]
pub struct MagicWindowPlatform;

impl VrPlatform for MagicWindowPlatform {
    fn displays(&mut self) -> Vec<Box<dyn VrDisplay>> {
        vec![Box::new(MagicWindowDisplay::default())]
    }

    fn controller_input(&mut self) -> Option<Box<dyn ControllerInput>> {
        None
    }
}

#[derive(Debug, Default)]
pub struct MagicWindowDisplay;

impl VrDisplay for MagicWindowDisplay {
    fn name(&self) -> &str {
        "Magic Window"
    }

    fn refresh_rate(&self) -> f32 {
        DEFAULT_REFRESH_RATE_HZ
    }

    fn pose(&mut self) -> Option<HeadPose> {
        // Orientation only; head tracking supplies the standing height.
        Some(HeadPose {
            orientation: Some(Quat::IDENTITY),
            position: None,
        })
    }

    fn is_presenting(&self) -> bool {
        false
    }

    // The window swap chain presents desktop frames.
    fn submit_frame(&mut self, _frame: &FrameTime) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_has_nothing() {
        let mut platform = HeadlessPlatform;
        assert!(platform.displays().is_empty());
        assert!(platform.controller_input().is_none());
    }

    #[test]
    fn magic_window_is_a_mono_display() {
        let mut platform = MagicWindowPlatform;
        let mut displays = platform.displays();
        assert_eq!(displays.len(), 1);

        let display = &mut displays[0];
        assert!(!display.is_presenting());
        assert!(display.stage_parameters().is_none());
        assert_eq!(display.pose().and_then(|pose| pose.position), None);
    }
}
