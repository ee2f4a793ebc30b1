use std::time::Duration;

/// Default catch-up cap: frames longer than this many ticks drop the excess.
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 5;

/// Converts variable frame durations into whole fixed-length ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_ticks_per_frame: u32,
}

impl FixedTimestep {
    /// Accumulator for a simulation running at `tick_rate_hz`.
    ///
    /// Non-finite or non-positive rates fall back to 60 Hz.
    pub fn new(tick_rate_hz: f32) -> Self {
        let rate = if tick_rate_hz.is_finite() && tick_rate_hz > 0.0 {
            tick_rate_hz
        } else {
            60.0
        };
        Self {
            dt: 1.0 / rate,
            accumulator: 0.0,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
        }
    }

    pub fn with_max_ticks_per_frame(mut self, max: u32) -> Self {
        self.max_ticks_per_frame = max.max(1);
        self
    }

    /// Length of one tick in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add a frame's elapsed time and return how many ticks to run now.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        self.accumulator += frame.as_secs_f32();
        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if self.accumulator >= self.dt {
            tracing::debug!(
                dropped_secs = self.accumulator,
                "Frame exceeded catch-up cap, dropping backlog"
            );
            self.accumulator %= self.dt;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }
}
