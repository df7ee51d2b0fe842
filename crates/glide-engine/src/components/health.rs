//! Health component with explicit observers.
//!
//! Comparisons are named methods (`is_below`, `compare_to`) rather than
//! overloaded operators: an `==` that means "compare value" against numbers
//! but "compare alive-state" against booleans is ambiguous, and that dual
//! meaning is deliberately not supported here.

use std::cmp::Ordering;
use std::fmt;

use crate::core::error::EngineError;

type ValueCallback = Box<dyn FnMut(f64)>;
type EmptyCallback = Box<dyn FnMut()>;

/// Current/maximum health with observer lists.
///
/// Observers are plain boxed closures invoked synchronously in registration
/// order — no hidden dispatch.
pub struct Health {
    current: f64,
    max: f64,
    on_damage: Vec<ValueCallback>,
    on_heal: Vec<ValueCallback>,
    on_death: Vec<EmptyCallback>,
    death_fired: bool,
}

impl Health {
    /// Create at full health. Fails with `InvalidArgument` unless `max` is
    /// a positive finite number.
    pub fn new(max: f64) -> Result<Self, EngineError> {
        if !max.is_finite() || max <= 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "max health must be > 0, got {max}"
            )));
        }
        Ok(Self {
            current: max,
            max,
            on_damage: Vec::new(),
            on_heal: Vec::new(),
            on_death: Vec::new(),
            death_fired: false,
        })
    }

    // -- Observer registration --

    /// Observe damage. The callback receives the amount applied.
    pub fn on_damage(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_damage.push(Box::new(callback));
    }

    /// Observe healing. The callback receives the amount applied.
    pub fn on_heal(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_heal.push(Box::new(callback));
    }

    /// Observe death. Fires exactly once per depletion; healing back above
    /// zero re-arms it.
    pub fn on_death(&mut self, callback: impl FnMut() + 'static) {
        self.on_death.push(Box::new(callback));
    }

    // -- Mutation --

    /// Subtract `amount` (negative amounts are ignored), clamped at zero.
    pub fn damage(&mut self, amount: f64) {
        let amount = amount.max(0.0);
        if amount == 0.0 {
            return;
        }
        self.current = (self.current - amount).max(0.0);
        for cb in &mut self.on_damage {
            cb(amount);
        }
        if self.current == 0.0 && !self.death_fired {
            self.death_fired = true;
            for cb in &mut self.on_death {
                cb();
            }
        }
    }

    /// Add `amount` (negative amounts are ignored), clamped at the maximum.
    pub fn heal(&mut self, amount: f64) {
        let amount = amount.max(0.0);
        if amount == 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.max);
        if self.current > 0.0 {
            self.death_fired = false;
        }
        for cb in &mut self.on_heal {
            cb(amount);
        }
    }

    // -- Named comparisons --

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Whether current health is strictly below `threshold`.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.current < threshold
    }

    /// Order by current health.
    pub fn compare_to(&self, other: &Health) -> Ordering {
        self.current.total_cmp(&other.current)
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Current health as a fraction of the maximum, in [0, 1].
    pub fn fraction(&self) -> f64 {
        self.current / self.max
    }
}

impl fmt::Debug for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Health")
            .field("current", &self.current)
            .field("max", &self.max)
            .field("on_damage", &self.on_damage.len())
            .field("on_heal", &self.on_heal.len())
            .field("on_death", &self.on_death.len())
            .finish()
    }
}
