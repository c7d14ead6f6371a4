//! Fixed-interval frame clock.
//!
//! The host loop requests a frame as often as the display allows and asks the
//! clock whether enough time has passed to run a tick. Early frames are
//! dropped, never backfilled. When a tick runs, the leftover time past a
//! whole interval is carried over so the cadence stays locked to the
//! interval grid.

use bevy_ecs::prelude::Resource;

pub const DEFAULT_FPS: u32 = 60;
/// Milliseconds a frame may arrive early and still count as on time.
pub const DEFAULT_TOLERANCE_MS: f64 = 1.5;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    pub fps: u32,
    /// Target milliseconds between ticks.
    pub interval: f64,
    pub tolerance: f64,
    /// Timestamp the current interval is measured from.
    pub then: f64,
    /// Ticks run so far.
    pub ticks: u64,
    /// Frames skipped because they arrived too early.
    pub dropped: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS, DEFAULT_TOLERANCE_MS, 0.0)
    }
}

impl FrameClock {
    pub fn new(fps: u32, tolerance: f64, start_ms: f64) -> Self {
        let fps = fps.max(1);
        FrameClock {
            fps,
            interval: 1000.0 / fps as f64,
            tolerance,
            then: start_ms,
            ticks: 0,
            dropped: 0,
        }
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.max(1);
        self.interval = 1000.0 / self.fps as f64;
    }

    /// Decide whether the frame arriving at `now_ms` runs a tick.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let delta = now_ms - self.then;
        if delta >= self.interval - self.tolerance {
            self.then = now_ms - (delta % self.interval);
            self.ticks += 1;
            true
        } else {
            self.dropped += 1;
            false
        }
    }
}
