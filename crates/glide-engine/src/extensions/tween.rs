// extensions/tween.rs
//
// Tween system — time-driven interpolation of scalar values.
// Completely decoupled from Entity/Scene internals.
//
// Usage:
//   let mut tweens = TweenManager::new();
//   tweens.add("fade", Tween::new(1.0, 0.0, 0.5, Easing::QuadOut)?);
//   tweens.update_all(dt);  // Advances all tweens, fires callbacks

use std::fmt;

use crate::core::error::EngineError;
use super::easing::{ease, Easing};

/// Lifecycle of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    /// Created with a delay that has not elapsed yet.
    Pending,
    /// Actively interpolating.
    Running,
    /// Suspended; `elapsed` is retained.
    Paused,
    /// Finished (or stopped). Updates are no-ops until `reset`.
    Completed,
}

/// Playback direction. Only flips for yoyo tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenDirection {
    Forward,
    Backward,
}

type UpdateCallback = Box<dyn FnMut(f64)>;
type CompleteCallback = Box<dyn FnMut()>;

/// One scalar interpolation in progress.
///
/// Values run from `start_value` to `end_value` over `duration` seconds,
/// shaped by `easing`, after an optional `delay`. Looping tweens wrap their
/// clock (preserving any overshoot remainder, so speed is frame-rate
/// independent); yoyo tweens additionally reverse direction each cycle.
pub struct Tween {
    pub start_value: f64,
    pub end_value: f64,
    pub duration: f64,
    pub easing: Easing,
    pub looping: bool,
    pub yoyo: bool,
    pub delay: f64,
    elapsed: f64,
    direction: TweenDirection,
    state: TweenState,
    on_update: Vec<UpdateCallback>,
    on_complete: Vec<CompleteCallback>,
}

impl Tween {
    /// Create a tween from `start` to `end` over `duration` seconds.
    /// Fails with `InvalidArgument` if `duration` is not a positive finite
    /// number.
    pub fn new(start: f64, end: f64, duration: f64, easing: Easing) -> Result<Self, EngineError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "tween duration must be > 0, got {duration}"
            )));
        }
        Ok(Self {
            start_value: start,
            end_value: end,
            duration,
            easing,
            looping: false,
            yoyo: false,
            delay: 0.0,
            elapsed: 0.0,
            direction: TweenDirection::Forward,
            state: TweenState::Running,
            on_update: Vec::new(),
            on_complete: Vec::new(),
        })
    }

    // -- Builder methods --

    /// Restart from the beginning (or reverse, with yoyo) on completion.
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Reverse direction each cycle. Only meaningful together with looping.
    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Wait `delay` seconds before interpolation starts. Fails with
    /// `InvalidArgument` on a negative or non-finite delay.
    pub fn with_delay(mut self, delay: f64) -> Result<Self, EngineError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "tween delay must be >= 0, got {delay}"
            )));
        }
        self.delay = delay;
        if delay > 0.0 && self.elapsed < delay {
            self.state = TweenState::Pending;
        }
        Ok(self)
    }

    /// Register a callback fired with the interpolated value on every
    /// effective update. Callbacks run synchronously in registration order.
    pub fn on_update(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_update.push(Box::new(callback));
        self
    }

    /// Register a callback fired exactly once when a non-looping tween
    /// first reaches full progress. `stop()` does not fire it.
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete.push(Box::new(callback));
        self
    }

    // -- Per-frame update --

    /// Advance by `dt` seconds and return the current interpolated value.
    ///
    /// Returns `None` while the delay has not elapsed, while paused, and
    /// after completion (including after `stop()` — a deliberate no-op, not
    /// an error, until `reset()` is called).
    pub fn update(&mut self, dt: f64) -> Option<f64> {
        match self.state {
            TweenState::Paused | TweenState::Completed => return None,
            TweenState::Pending | TweenState::Running => {}
        }

        self.elapsed += dt;
        if self.elapsed < self.delay {
            self.state = TweenState::Pending;
            return None;
        }
        self.state = TweenState::Running;

        let mut t = (self.elapsed - self.delay) / self.duration;
        if t >= 1.0 {
            if !self.looping {
                self.state = TweenState::Completed;
                let value = self.value_at(1.0);
                for cb in &mut self.on_update {
                    cb(value);
                }
                for cb in &mut self.on_complete {
                    cb();
                }
                return Some(value);
            }
            // Wrap whole cycles, keeping the overshoot remainder so a large
            // dt spanning several cycles stays frame-rate independent.
            while t >= 1.0 {
                t -= 1.0;
                self.elapsed -= self.duration;
                if self.yoyo {
                    self.direction = match self.direction {
                        TweenDirection::Forward => TweenDirection::Backward,
                        TweenDirection::Backward => TweenDirection::Forward,
                    };
                }
            }
        }

        let value = self.value_at(t);
        for cb in &mut self.on_update {
            cb(value);
        }
        Some(value)
    }

    /// Suspend without losing the clock. No effect on a completed tween.
    pub fn pause(&mut self) {
        if self.state != TweenState::Completed {
            self.state = TweenState::Paused;
        }
    }

    /// Resume a paused tween where it left off.
    pub fn resume(&mut self) {
        if self.state == TweenState::Paused {
            self.state = if self.elapsed < self.delay {
                TweenState::Pending
            } else {
                TweenState::Running
            };
        }
    }

    /// Force-complete. Does not fire `on_complete`.
    pub fn stop(&mut self) {
        self.state = TweenState::Completed;
    }

    /// Rewind to the beginning. Does not fire callbacks.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.direction = TweenDirection::Forward;
        self.state = if self.delay > 0.0 {
            TweenState::Pending
        } else {
            TweenState::Running
        };
    }

    // -- Read-only accessors --

    /// Normalized progress, clamped to [0, 1]. The delay does not count
    /// toward progress.
    pub fn progress(&self) -> f64 {
        ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    /// The value the tween currently reports, without advancing the clock.
    pub fn value(&self) -> f64 {
        self.value_at(self.progress())
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn direction(&self) -> TweenDirection {
        self.direction
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_complete(&self) -> bool {
        self.state == TweenState::Completed
    }

    fn value_at(&self, t: f64) -> f64 {
        match self.direction {
            TweenDirection::Forward => ease(self.start_value, self.end_value, t, self.easing),
            TweenDirection::Backward => ease(self.end_value, self.start_value, t, self.easing),
        }
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("looping", &self.looping)
            .field("yoyo", &self.yoyo)
            .field("delay", &self.delay)
            .field("elapsed", &self.elapsed)
            .field("direction", &self.direction)
            .field("state", &self.state)
            .field("on_update", &self.on_update.len())
            .field("on_complete", &self.on_complete.len())
            .finish()
    }
}

/// Owns named tweens and advances them together.
///
/// Storage is a flat Vec with linear lookup, so iteration order is the
/// insertion order — deterministic for tests and replays. Completed
/// non-looping tweens stay retrievable until removed; the manager never
/// auto-evicts.
#[derive(Debug, Default)]
pub struct TweenManager {
    tweens: Vec<(String, Tween)>,
}

impl TweenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween under `name`. An existing entry under the same name is
    /// replaced in place (keeping its slot in iteration order); the old
    /// tween is dropped without firing its callbacks.
    pub fn add(&mut self, name: impl Into<String>, tween: Tween) {
        let name = name.into();
        if let Some(slot) = self.tweens.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = tween;
        } else {
            self.tweens.push((name, tween));
        }
    }

    /// Remove a tween by name. Returns true if one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        if let Some(idx) = self.tweens.iter().position(|(n, _)| n == name) {
            // Not swap_remove: later entries must keep their relative order.
            self.tweens.remove(idx);
            true
        } else {
            false
        }
    }

    pub fn get(&self, name: &str) -> Option<&Tween> {
        self.tweens.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tween> {
        self.tweens
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    /// Advance every tween in insertion order, firing their callbacks.
    pub fn update_all(&mut self, dt: f64) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.update(dt);
        }
    }

    /// Pause every tween.
    pub fn pause_all(&mut self) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.pause();
        }
    }

    /// Resume every paused tween.
    pub fn resume_all(&mut self) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.resume();
        }
    }

    /// Stop every tween (no completion callbacks) and clear the manager.
    pub fn stop_all(&mut self) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.stop();
        }
        self.tweens.clear();
    }

    /// Iterate `(name, tween)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tween)> {
        self.tweens.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
