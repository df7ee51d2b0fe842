use crate::core::error::EngineError;

/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f64 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

/// Countdown timer, one-shot or repeating.
///
/// Repeating timers wrap by the full duration, keeping the overshoot
/// remainder so their cadence is frame-rate independent.
#[derive(Debug, Clone)]
pub struct Timer {
    duration: f64,
    elapsed: f64,
    repeating: bool,
}

impl Timer {
    /// Fails with `InvalidArgument` unless `duration` is a positive finite
    /// number.
    pub fn new(duration: f64, repeating: bool) -> Result<Self, EngineError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "timer duration must be > 0, got {duration}"
            )));
        }
        Ok(Self {
            duration,
            elapsed: 0.0,
            repeating,
        })
    }

    /// Advance by `dt` seconds. Returns true on the tick the timer fires.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.repeating && self.elapsed >= self.duration {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.duration {
            return false;
        }
        if self.repeating {
            while self.elapsed >= self.duration {
                self.elapsed -= self.duration;
            }
        } else {
            self.elapsed = self.duration;
        }
        true
    }

    /// Whether a one-shot timer has fired. Repeating timers never finish.
    pub fn finished(&self) -> bool {
        !self.repeating && self.elapsed >= self.duration
    }

    /// Seconds until the next fire.
    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Progress toward the next fire, in [0, 1].
    pub fn fraction(&self) -> f64 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Rewind to zero without changing the mode.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
