use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::collision::{resolve_rect, CollisionContact, Rect, ResolveOptions};
use crate::core::error::EngineError;

/// World-to-screen conversion: 1 meter = 50 pixels. Applied only at the
/// collision boundary; integration itself runs in meters.
pub const PIXELS_PER_METER: f64 = 50.0;

/// Tuning for the integration step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Upper bound on sub-steps per frame. Sub-stepping keeps any single
    /// step's displacement bounded relative to the smallest obstacle, so
    /// fast bodies cannot tunnel through thin geometry.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// Contact tolerance in pixels for the grounded check.
    #[serde(default = "default_skin")]
    pub skin: f64,
}

fn default_max_steps() -> u32 {
    8
}

fn default_skin() -> f64 {
    2.0
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            skin: default_skin(),
        }
    }
}

/// Builder for describing a physics body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    /// Mass in kilograms. Must be positive.
    pub mass: f64,
    /// Collision rect extent in pixels.
    pub size: DVec2,
    /// Initial position in meters (top-left of the collision rect).
    pub position: DVec2,
    /// Initial velocity in meters/second.
    pub velocity: DVec2,
    /// Gravitational acceleration in m/s², applied along +Y (screen down).
    pub gravity: f64,
    /// Reflect instead of stopping on contact.
    pub bounce: bool,
    /// Velocity retained per reflection.
    pub bounce_factor: f64,
    /// Horizontal damping while grounded, in [0, 1].
    pub ground_friction: f64,
    /// Speeds below this snap to zero (m/s).
    pub min_velocity_threshold: f64,
}

impl BodyDesc {
    /// A body with the given mass and pixel-space extent; everything else
    /// starts at sensible platformer defaults.
    pub fn new(mass: f64, size: DVec2) -> Self {
        Self {
            mass,
            size,
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            gravity: 9.8,
            bounce: false,
            bounce_factor: 0.6,
            ground_friction: 0.0,
            min_velocity_threshold: 0.01,
        }
    }

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_bounce_factor(mut self, factor: f64) -> Self {
        self.bounce_factor = factor;
        self
    }

    pub fn with_ground_friction(mut self, friction: f64) -> Self {
        self.ground_friction = friction;
        self
    }

    pub fn with_min_velocity_threshold(mut self, threshold: f64) -> Self {
        self.min_velocity_threshold = threshold;
        self
    }
}

/// A rectangle body integrated with semi-implicit Euler.
///
/// Positions and velocities are meter-space; the pixel-space collision rect
/// is derived through `PIXELS_PER_METER` when the resolver runs.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Acceleration applied during the most recent step (m/s²).
    pub acceleration: DVec2,
    accumulated_force: DVec2,
    pub mass: f64,
    pub gravity: f64,
    pub bounce_enabled: bool,
    pub bounce_factor: f64,
    pub ground_friction: f64,
    pub min_velocity_threshold: f64,
    pub is_grounded: bool,
    /// Collision rect extent in pixels.
    pub size: DVec2,
}

impl PhysicsBody {
    /// Build a body from a description. Fails with `InvalidArgument` on a
    /// non-positive mass or a ground friction outside [0, 1] — these are
    /// configuration errors, not recoverable runtime conditions.
    pub fn new(desc: &BodyDesc) -> Result<Self, EngineError> {
        if !desc.mass.is_finite() || desc.mass <= 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "body mass must be > 0, got {}",
                desc.mass
            )));
        }
        if !(0.0..=1.0).contains(&desc.ground_friction) {
            return Err(EngineError::InvalidArgument(format!(
                "ground friction must be in [0, 1], got {}",
                desc.ground_friction
            )));
        }
        Ok(Self {
            position: desc.position,
            velocity: desc.velocity,
            acceleration: DVec2::ZERO,
            accumulated_force: DVec2::ZERO,
            mass: desc.mass,
            gravity: desc.gravity,
            bounce_enabled: desc.bounce,
            bounce_factor: desc.bounce_factor,
            ground_friction: desc.ground_friction,
            min_velocity_threshold: desc.min_velocity_threshold,
            is_grounded: false,
            size: desc.size,
        })
    }

    /// Accumulate a force in newtons. Forces apply for the next `step` call
    /// and are cleared afterwards.
    pub fn apply_force(&mut self, force: DVec2) {
        self.accumulated_force += force;
    }

    /// Apply an instantaneous impulse (kg·m/s): changes velocity directly.
    pub fn apply_impulse(&mut self, impulse: DVec2) {
        self.velocity += impulse / self.mass;
    }

    /// The body's pixel-space collision rect at its current position.
    pub fn pixel_rect(&self) -> Rect {
        Rect::from_pos_size(self.position * PIXELS_PER_METER, self.size)
    }

    /// Advance the body by `dt` seconds against the frame's obstacle
    /// snapshot, resolving collisions along the way.
    ///
    /// `control_force` is the external steering input for this frame
    /// (newtons); ground friction only damps horizontal velocity when it is
    /// zero on X, and the grounded state it reads is the one the *previous*
    /// frame's resolution computed, so the result does not depend on
    /// ordering within a single update.
    ///
    /// Returns every contact produced this frame, in resolution order.
    pub fn step(
        &mut self,
        dt: f64,
        control_force: DVec2,
        obstacles: &[Rect],
        config: &PhysicsConfig,
    ) -> Vec<CollisionContact> {
        let steps = self.substep_count(dt, obstacles, config);
        let sub_dt = dt / steps as f64;
        let was_grounded = self.is_grounded;
        let resolve_opts = ResolveOptions {
            skin: config.skin,
            bounce_factor: self.bounce_enabled.then_some(self.bounce_factor),
        };

        let mut contacts = Vec::new();
        let mut grounded = false;

        for _ in 0..steps {
            self.acceleration = (self.accumulated_force + control_force) / self.mass
                + DVec2::new(0.0, self.gravity);
            self.velocity += self.acceleration * sub_dt;

            if was_grounded && control_force.x == 0.0 {
                self.velocity.x *= 1.0 - self.ground_friction;
            }
            if self.velocity.length() < self.min_velocity_threshold {
                self.velocity = DVec2::ZERO;
            }

            let prev_px = self.position * PIXELS_PER_METER;
            self.position += self.velocity * sub_dt;

            let rect = self.pixel_rect();
            let mut vel_px = self.velocity * PIXELS_PER_METER;
            let outcome = resolve_rect(prev_px, rect, &mut vel_px, obstacles, &resolve_opts);

            self.position = outcome.rect.pos / PIXELS_PER_METER;
            self.velocity = vel_px / PIXELS_PER_METER;
            grounded |= outcome.grounded;
            contacts.extend(outcome.contacts);
        }

        // Forces are consumed once per frame; sub-stepping only exists for
        // integration stability.
        self.accumulated_force = DVec2::ZERO;
        self.is_grounded = grounded;
        contacts
    }

    /// Enough sub-steps that a single step's displacement stays under half
    /// the smallest obstacle dimension, capped at `max_steps`.
    fn substep_count(&self, dt: f64, obstacles: &[Rect], config: &PhysicsConfig) -> u32 {
        let min_dim = obstacles
            .iter()
            .map(|ob| ob.size.x.min(ob.size.y))
            .fold(f64::INFINITY, f64::min);
        if !min_dim.is_finite() || min_dim <= 0.0 {
            return 1;
        }
        let travel_px = self.velocity.length() * dt * PIXELS_PER_METER;
        let needed = (travel_px / (min_dim * 0.5)).ceil();
        (needed as u32).clamp(1, config.max_steps.max(1))
    }
}
