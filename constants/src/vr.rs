/// Eye height used when a display reports orientation without position (metres)
pub const DEFAULT_USER_HEIGHT: f32 = 1.6;

/// Inter-pupillary distance used by displays that do not report eye offsets
pub const DEFAULT_IPD: f32 = 0.064;

/// Refresh rate assumed for the frame budget when a display does not report one
pub const DEFAULT_REFRESH_RATE_HZ: f32 = 90.0;

/// Frames slower than this multiple of the refresh interval count as dropped
pub const DROPPED_FRAME_FACTOR: f32 = 1.5;

/// Number of tracked controllers the scene creates
pub const CONTROLLER_COUNT: usize = 2;

/// Controller model, relative to the asset root
pub const CONTROLLER_MODEL_PATH: &str = "models/controller.glb";

/// Length of the debug guide ray drawn from each controller (metres)
pub const GUIDE_RAY_LENGTH: f32 = 5.0;
