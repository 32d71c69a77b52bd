use std::time::Duration;

use bevy::platform::time::Instant;
use bevy::prelude::*;

/// Monotonic time source sampled once per frame.
pub trait ClockSource: Send + Sync + 'static {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`, which maps to `performance.now()` on wasm.
pub struct SystemClockSource {
    origin: Instant,
}

impl Default for SystemClockSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl ClockSource for SystemClockSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Timing published for the current frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, never negative.
    pub delta: f32,
    /// Seconds since the clock started, never decreasing.
    pub elapsed: f32,
    /// Number of ticks so far, starting at 1 for the first frame.
    pub frame: u64,
}

#[derive(Resource)]
pub struct FrameClock {
    source: Box<dyn ClockSource>,
    start: Option<Duration>,
    last: Duration,
    elapsed: Duration,
    frame: u64,
}

impl FrameClock {
    pub fn new(source: impl ClockSource) -> Self {
        Self {
            source: Box::new(source),
            start: None,
            last: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame: 0,
        }
    }

    /// Record the start instant. Later calls are ignored; the clock is never reset.
    pub fn start(&mut self) {
        if self.start.is_none() {
            let now = self.source.now();
            self.start = Some(now);
            self.last = now;
        }
    }

    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Sample the source. Starts the clock on first use.
    pub fn tick(&mut self) -> FrameTime {
        self.start();
        let now = self.source.now();
        let start = self.start.unwrap_or(now);

        // A source running backwards yields a zero delta and holds elapsed.
        let delta = now.saturating_sub(self.last);
        self.last = self.last.max(now);
        self.elapsed = self.elapsed.max(now.saturating_sub(start));
        self.frame += 1;

        FrameTime {
            delta: delta.as_secs_f32(),
            elapsed: self.elapsed.as_secs_f32(),
            frame: self.frame,
        }
    }
}

pub fn start_frame_clock(mut clock: ResMut<FrameClock>) {
    clock.start();
    info!("Frame clock started");
}

pub fn advance_frame_clock(mut clock: ResMut<FrameClock>, mut frame_time: ResMut<FrameTime>) {
    *frame_time = clock.tick();
}

/// Clock source driven by hand, for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualClockSource {
    nanos: std::sync::Arc<std::sync::atomic::AtomicU64>,
}

#[cfg(test)]
impl ManualClockSource {
    pub fn set_secs(&self, secs: f64) {
        self.nanos.store(
            (secs * 1.0e9) as u64,
            std::sync::atomic::Ordering::SeqCst,
        );
    }
}

#[cfg(test)]
impl ClockSource for ManualClockSource {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(std::sync::atomic::Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_and_elapsed_follow_samples() {
        let source = ManualClockSource::default();
        let mut clock = FrameClock::new(source.clone());
        clock.start();

        source.set_secs(0.016);
        let first = clock.tick();
        assert!((first.delta - 0.016).abs() < 1e-6);

        source.set_secs(0.033);
        let second = clock.tick();
        assert!((second.delta - 0.017).abs() < 1e-6);
        assert!((second.elapsed - 0.033).abs() < 1e-6);
        assert_eq!(second.frame, 2);
    }

    #[test]
    fn backwards_source_never_rewinds_elapsed() {
        let source = ManualClockSource::default();
        let mut clock = FrameClock::new(source.clone());
        clock.start();

        source.set_secs(1.0);
        let forward = clock.tick();
        source.set_secs(0.5);
        let backward = clock.tick();

        assert_eq!(backward.delta, 0.0);
        assert_eq!(backward.elapsed, forward.elapsed);
    }

    #[test]
    fn tick_starts_an_unstarted_clock() {
        let source = ManualClockSource::default();
        source.set_secs(2.0);
        let mut clock = FrameClock::new(source.clone());

        let first = clock.tick();
        assert!(clock.is_started());
        assert_eq!(first.delta, 0.0);
        assert_eq!(first.elapsed, 0.0);
    }
}
