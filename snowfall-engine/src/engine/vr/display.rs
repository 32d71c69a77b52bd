use bevy::prelude::*;
use constants::render_settings::CAMERA_FOV_DEGREES;
use constants::vr::{DEFAULT_IPD, DEFAULT_REFRESH_RATE_HZ};

use crate::engine::timing::clock::FrameTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    pub fn index(self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeParameters {
    /// Eye position relative to the head.
    pub offset: Vec3,
    pub fov_degrees: f32,
}

impl EyeParameters {
    pub fn symmetric(eye: Eye, ipd: f32) -> Self {
        let half = ipd * 0.5;
        Self {
            offset: match eye {
                Eye::Left => Vec3::new(-half, 0.0, 0.0),
                Eye::Right => Vec3::new(half, 0.0, 0.0),
            },
            fov_degrees: CAMERA_FOV_DEGREES,
        }
    }
}

/// Room-scale data reported by a display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageParameters {
    pub sitting_to_standing: Mat4,
    pub size_x: f32,
    pub size_z: f32,
}

/// Head pose; either part may be missing on orientation-only devices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadPose {
    pub orientation: Option<Quat>,
    pub position: Option<Vec3>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerButtons {
    pub trigger: bool,
    pub grip: bool,
    pub menu: bool,
    pub thumbpad: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    Trigger,
    Grip,
    Menu,
    Thumbpad,
}

impl ControllerButtons {
    fn get(&self, button: ControllerButton) -> bool {
        match button {
            ControllerButton::Trigger => self.trigger,
            ControllerButton::Grip => self.grip,
            ControllerButton::Menu => self.menu,
            ControllerButton::Thumbpad => self.thumbpad,
        }
    }

    /// Buttons whose pressed state differs between `self` and `next`.
    pub fn changes(self, next: ControllerButtons) -> impl Iterator<Item = (ControllerButton, bool)> {
        [
            ControllerButton::Trigger,
            ControllerButton::Grip,
            ControllerButton::Menu,
            ControllerButton::Thumbpad,
        ]
        .into_iter()
        .filter(move |button| self.get(*button) != next.get(*button))
        .map(move |button| (button, next.get(button)))
    }
}

/// Tracked controller sample, relative to the standing frame's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    pub position: Vec3,
    pub orientation: Quat,
    pub buttons: ControllerButtons,
}

/// A head-mounted display (or an emulation of one).
pub trait VrDisplay: Send + Sync {
    fn name(&self) -> &str;

    fn refresh_rate(&self) -> f32 {
        DEFAULT_REFRESH_RATE_HZ
    }

    fn stage_parameters(&self) -> Option<StageParameters> {
        None
    }

    /// Latest head pose, `None` while tracking is lost.
    fn pose(&mut self) -> Option<HeadPose>;

    fn eye_parameters(&self, eye: Eye) -> EyeParameters {
        EyeParameters::symmetric(eye, DEFAULT_IPD)
    }

    fn is_presenting(&self) -> bool;

    /// Hand over the frame rendered for `frame`.
    fn submit_frame(&mut self, frame: &FrameTime);
}

/// Gamepad-style access to tracked controllers.
pub trait ControllerInput: Send + Sync {
    /// `None` when no hardware backs `index` or it is not tracked.
    fn poll(&mut self, index: usize) -> Option<ControllerState>;
}

/// Entry point to whatever VR runtime is linked in.
pub trait VrPlatform: Send + Sync {
    fn displays(&mut self) -> Vec<Box<dyn VrDisplay>>;

    /// `None` when the platform has no controller input API at all.
    fn controller_input(&mut self) -> Option<Box<dyn ControllerInput>>;
}

#[derive(Resource)]
pub struct VrRuntime {
    platform: Box<dyn VrPlatform>,
}

impl VrRuntime {
    pub fn new(platform: impl VrPlatform + 'static) -> Self {
        Self::from_boxed(Box::new(platform))
    }

    pub fn from_boxed(platform: Box<dyn VrPlatform>) -> Self {
        Self { platform }
    }

    /// First display reported by the platform, if any.
    pub fn first_display(&mut self) -> Option<Box<dyn VrDisplay>> {
        self.platform.displays().into_iter().next()
    }

    pub fn controller_input(&mut self) -> Option<Box<dyn ControllerInput>> {
        self.platform.controller_input()
    }
}

/// The display the frame loop presents to.
#[derive(Resource)]
pub struct ActiveDisplay(pub Box<dyn VrDisplay>);

impl std::ops::Deref for ActiveDisplay {
    type Target = dyn VrDisplay;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for ActiveDisplay {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

#[derive(Resource)]
pub struct ControllerInputApi(pub Box<dyn ControllerInput>);
