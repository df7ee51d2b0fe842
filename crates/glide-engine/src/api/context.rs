use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::physics::PhysicsConfig;
use crate::core::time::FixedTimestep;

/// Engine configuration, provided by the game or loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fixed timestep in seconds (default: 1/60).
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f64,
    /// Default gravitational acceleration for new bodies, in m/s²
    /// (+Y is screen-down).
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    /// Physics step tuning.
    #[serde(default)]
    pub physics: PhysicsConfig,
}

fn default_fixed_dt() -> f64 {
    1.0 / 60.0
}

fn default_gravity() -> f64 {
    9.8
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_dt: default_fixed_dt(),
            gravity: default_gravity(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON string. Missing fields fall back
    /// to their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-frame clock and configuration, created once at startup and passed by
/// reference into update calls. There is no global mutable state: whatever
/// needs the frame clock takes a `&GameContext`.
#[derive(Debug)]
pub struct GameContext {
    config: EngineConfig,
    fixed: FixedTimestep,
    dt: f64,
    time: f64,
    frame: u64,
}

impl GameContext {
    pub fn new(config: EngineConfig) -> Self {
        let fixed = FixedTimestep::new(config.fixed_dt);
        Self {
            config,
            fixed,
            dt: 0.0,
            time: 0.0,
            frame: 0,
        }
    }

    /// Start a new frame with the wall-clock delta the host loop measured.
    /// Returns the number of fixed steps to run this frame.
    pub fn begin_frame(&mut self, frame_dt: f64) -> u32 {
        self.dt = frame_dt;
        self.time += frame_dt;
        self.frame += 1;
        self.fixed.accumulate(frame_dt)
    }

    /// The current frame's delta in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Total elapsed time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Frame counter, starting at 1 for the first `begin_frame`.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The fixed timestep in seconds.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed.dt()
    }

    /// Interpolation alpha between fixed steps.
    pub fn alpha(&self) -> f64 {
        self.fixed.alpha()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_with_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert!((config.fixed_dt - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(config.gravity, 9.8);
        assert_eq!(config.physics.max_steps, 8);
    }

    #[test]
    fn from_json_overrides() {
        let json = r#"{
            "gravity": 20.0,
            "physics": { "skin": 1.0 }
        }"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.gravity, 20.0);
        assert_eq!(config.physics.skin, 1.0);
        assert_eq!(config.physics.max_steps, 8);
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn begin_frame_advances_clock() {
        let mut ctx = GameContext::new(EngineConfig::default());
        let steps = ctx.begin_frame(1.0 / 60.0);
        assert_eq!(steps, 1);
        assert_eq!(ctx.frame(), 1);
        assert!((ctx.time() - 1.0 / 60.0).abs() < 1e-12);

        ctx.begin_frame(1.0 / 60.0);
        assert_eq!(ctx.frame(), 2);
    }
}
