//! Real-time frame pacing
//!
//! A thin layer over [`crate::sim::tick`]: wait out the frame floor, then
//! turn the elapsed ticks into a clamped `dt`.

use crate::platform::Clock;
use crate::sim::clamp_delta;

/// Enforces a minimum frame interval and bounds the step size
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    /// Frame floor (ms)
    pub interval_ms: u64,
    /// Largest step handed to the simulation (s)
    pub max_delta: f32,
}

impl FramePacer {
    pub fn new(interval_ms: u64, max_delta: f32) -> Self {
        Self {
            interval_ms,
            max_delta,
        }
    }

    /// Block until at least `interval_ms` has passed since `last_tick`,
    /// then return the clamped delta and move `last_tick` to now.
    pub fn wait_for_frame(&self, clock: &mut impl Clock, last_tick: &mut u64) -> f32 {
        let mut now = clock.ticks();
        loop {
            let elapsed = now.wrapping_sub(*last_tick);
            if elapsed >= self.interval_ms {
                break;
            }
            clock.delay(self.interval_ms - elapsed);
            now = clock.ticks();
        }

        let dt = clamp_delta(now.wrapping_sub(*last_tick), self.max_delta);
        *last_tick = now;
        dt
    }
}
