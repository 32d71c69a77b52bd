use bevy::prelude::*;
use bevy::window::{Monitor, PrimaryMonitor};
use constants::vr::{DEFAULT_REFRESH_RATE_HZ, DROPPED_FRAME_FACTOR};

use crate::engine::timing::clock::FrameTime;
use crate::engine::vr::display::ActiveDisplay;

/// Seconds between dropped-frame warnings.
const REPORT_INTERVAL: f32 = 5.0;

/// Refresh interval of the active display and the frames that missed it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FrameBudget {
    pub interval: f32,
    pub dropped: u64,
    reported: u64,
    last_report: f32,
}

impl Default for FrameBudget {
    fn default() -> Self {
        Self::for_refresh_rate(DEFAULT_REFRESH_RATE_HZ)
    }
}

impl FrameBudget {
    pub fn for_refresh_rate(hz: f32) -> Self {
        Self {
            interval: refresh_interval(hz),
            dropped: 0,
            reported: 0,
            last_report: 0.0,
        }
    }

    /// Switch to a new refresh rate, keeping the dropped-frame tally.
    pub fn retarget(&mut self, hz: f32) {
        self.interval = refresh_interval(hz);
    }

    /// Count the frame if it overran the budget. Returns true when dropped.
    pub fn record(&mut self, delta: f32) -> bool {
        let dropped = delta > self.interval * DROPPED_FRAME_FACTOR;
        if dropped {
            self.dropped += 1;
        }
        dropped
    }

    /// Frames dropped since the last report, if a report is due at `elapsed`.
    pub fn take_report(&mut self, elapsed: f32) -> Option<u64> {
        let pending = self.dropped - self.reported;
        if pending == 0 || elapsed - self.last_report < REPORT_INTERVAL {
            return None;
        }
        self.reported = self.dropped;
        self.last_report = elapsed;
        Some(pending)
    }
}

fn refresh_interval(hz: f32) -> f32 {
    let hz = if hz.is_finite() && hz > 0.0 {
        hz
    } else {
        DEFAULT_REFRESH_RATE_HZ
    };
    1.0 / hz
}

pub fn init_frame_budget(mut commands: Commands, display: Res<ActiveDisplay>) {
    let budget = FrameBudget::for_refresh_rate(display.refresh_rate());
    info!("Frame budget {:.2} ms", budget.interval * 1000.0);
    commands.insert_resource(budget);
}

/// An emulated display paces to the desktop monitor, not to a headset.
pub fn follow_primary_monitor(
    display: Res<ActiveDisplay>,
    monitors: Query<&Monitor, (With<PrimaryMonitor>, Changed<Monitor>)>,
    mut budget: ResMut<FrameBudget>,
) {
    if display.is_presenting() {
        return;
    }
    let Some(millihertz) = monitors.iter().find_map(|monitor| monitor.refresh_rate_millihertz) else {
        return;
    };

    let hz = millihertz as f32 / 1000.0;
    budget.retarget(hz);
    info!("Frame budget follows the primary monitor: {hz:.1} Hz, {:.2} ms", budget.interval * 1000.0);
}

pub fn monitor_frame_budget(frame_time: Res<FrameTime>, mut budget: ResMut<FrameBudget>) {
    // The first frame has no previous sample to compare against.
    if frame_time.frame <= 1 {
        return;
    }
    budget.record(frame_time.delta);
    if let Some(dropped) = budget.take_report(frame_time.elapsed) {
        warn!(
            "{dropped} frames exceeded the {:.1} ms budget ({} total)",
            budget.interval * 1000.0,
            budget.dropped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::vr::platform::MagicWindowDisplay;

    #[test]
    fn frames_past_one_and_a_half_intervals_are_dropped() {
        let mut budget = FrameBudget::for_refresh_rate(90.0);
        assert!(!budget.record(1.0 / 90.0));
        assert!(!budget.record(0.016));
        assert!(budget.record(0.017));
        assert_eq!(budget.dropped, 1);
    }

    #[test]
    fn reports_are_throttled() {
        let mut budget = FrameBudget::for_refresh_rate(60.0);
        budget.record(0.1);
        assert_eq!(budget.take_report(1.0), None);
        assert_eq!(budget.take_report(6.0), Some(1));
        budget.record(0.1);
        assert_eq!(budget.take_report(7.0), None);
        assert_eq!(budget.take_report(11.5), Some(1));
        assert_eq!(budget.take_report(20.0), None);
    }

    #[test]
    fn vsync_jitter_at_sixty_hz_is_not_dropped() {
        let mut budget = FrameBudget::for_refresh_rate(60.0);
        assert!(!budget.record(1.0 / 60.0 + 0.0002));
        assert!(!budget.record(0.024));
        assert!(budget.record(0.026));
    }

    fn primary_monitor(refresh_rate_millihertz: Option<u32>) -> (Monitor, PrimaryMonitor) {
        (
            Monitor {
                name: Some("desk".to_string()),
                physical_height: 1080,
                physical_width: 1920,
                physical_position: IVec2::ZERO,
                refresh_rate_millihertz,
                scale_factor: 1.0,
                video_modes: Vec::new(),
            },
            PrimaryMonitor,
        )
    }

    fn budget_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(ActiveDisplay(Box::new(MagicWindowDisplay::default())))
            .insert_resource(FrameBudget::for_refresh_rate(DEFAULT_REFRESH_RATE_HZ))
            .add_systems(Update, follow_primary_monitor);
        app
    }

    #[test]
    fn emulated_display_follows_the_monitor_refresh_rate() {
        let mut app = budget_app();
        app.world_mut().spawn(primary_monitor(Some(60_000)));
        app.update();

        let mut budget = app.world_mut().resource_mut::<FrameBudget>();
        assert!((budget.interval - 1.0 / 60.0).abs() < 1e-6);
        assert!(!budget.record(1.0 / 60.0 + 0.0002));
    }

    #[test]
    fn unknown_monitor_rate_keeps_the_default() {
        let mut app = budget_app();
        app.world_mut().spawn(primary_monitor(None));
        app.update();

        assert_eq!(*app.world().resource::<FrameBudget>(), FrameBudget::default());
    }

    #[test]
    fn unusable_refresh_rate_falls_back() {
        assert_eq!(FrameBudget::for_refresh_rate(0.0), FrameBudget::default());
    }
}
