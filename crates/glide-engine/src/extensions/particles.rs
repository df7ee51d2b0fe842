// extensions/particles.rs
//
// Minimal particle system: an emitter decides *when* to spawn, a pool owns
// the particles and integrates them. Rendering is the host's problem — a
// particle is just position, velocity, remaining life and an eased alpha.

use glam::DVec2;

use crate::core::error::EngineError;
use super::easing::Easing;

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no-std compatible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [lo, hi).
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// How the emitter releases particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionMode {
    /// Emit particles continuously at a fixed rate.
    Continuous,
    /// Emit particles in bursts.
    Burst,
}

/// Decides how many particles to spawn each tick.
#[derive(Debug, Clone)]
pub struct Emitter {
    /// Whether the emitter is actively spawning.
    pub active: bool,
    /// Emission mode (continuous or burst).
    pub mode: EmissionMode,
    /// Particles per second (Continuous mode).
    pub rate: f64,
    /// Particles per burst (Burst mode).
    pub burst_count: u32,
    /// Seconds between bursts (0 = one-shot).
    pub burst_interval: f64,
    /// Internal accumulator for continuous emission.
    accumulator: f64,
    /// Internal timer for burst intervals.
    burst_timer: f64,
    /// Whether the first burst has fired (for one-shot bursts).
    burst_fired: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            active: true,
            mode: EmissionMode::Continuous,
            rate: 10.0,
            burst_count: 8,
            burst_interval: 0.0,
            accumulator: 0.0,
            burst_timer: 0.0,
            burst_fired: false,
        }
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Builder pattern --

    pub fn with_mode(mut self, mode: EmissionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_burst_count(mut self, count: u32) -> Self {
        self.burst_count = count;
        self
    }

    pub fn with_burst_interval(mut self, interval: f64) -> Self {
        self.burst_interval = interval;
        self
    }

    /// Advance the emitter by `dt` seconds. Returns the number of particles to spawn.
    pub fn tick(&mut self, dt: f64) -> usize {
        if !self.active {
            return 0;
        }

        match self.mode {
            EmissionMode::Continuous => {
                self.accumulator += self.rate * dt;
                let count = self.accumulator as usize;
                self.accumulator -= count as f64;
                count
            }
            EmissionMode::Burst => {
                if self.burst_interval <= 0.0 {
                    // One-shot burst
                    if !self.burst_fired {
                        self.burst_fired = true;
                        self.burst_count as usize
                    } else {
                        0
                    }
                } else {
                    self.burst_timer += dt;
                    if self.burst_timer >= self.burst_interval {
                        self.burst_timer -= self.burst_interval;
                        self.burst_count as usize
                    } else {
                        0
                    }
                }
            }
        }
    }
}

/// One live particle, in pixel space.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub age: f64,
    pub lifetime: f64,
    /// Render opacity in [0, 1], derived from remaining life.
    pub alpha: f64,
}

/// Fixed-capacity particle pool with eased fade-out.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
    /// Curve mapping normalized age to faded-out amount.
    pub fade: Easing,
    /// Downward acceleration in px/s².
    pub gravity: f64,
    /// Per-second velocity decay factor.
    pub drag: f64,
    rng: Rng,
}

impl ParticlePool {
    /// Fails with `InvalidArgument` on a zero capacity.
    pub fn new(capacity: usize, seed: u64) -> Result<Self, EngineError> {
        if capacity == 0 {
            return Err(EngineError::InvalidArgument(
                "particle pool capacity must be > 0".into(),
            ));
        }
        Ok(Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            fade: Easing::QuadOut,
            gravity: 0.0,
            drag: 0.0,
            rng: Rng::new(seed),
        })
    }

    pub fn with_fade(mut self, fade: Easing) -> Self {
        self.fade = fade;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_drag(mut self, drag: f64) -> Self {
        self.drag = drag;
        self
    }

    /// Spawn one particle. Silently dropped when the pool is full.
    pub fn spawn(&mut self, pos: DVec2, vel: DVec2, lifetime: f64) {
        if self.particles.len() >= self.capacity {
            return;
        }
        self.particles.push(Particle {
            pos,
            vel,
            age: 0.0,
            lifetime: lifetime.max(f64::MIN_POSITIVE),
            alpha: 1.0,
        });
    }

    /// Spawn `count` particles radiating from `pos` with random directions
    /// and speeds drawn from `speed_range` (px/s).
    pub fn spawn_radial(&mut self, pos: DVec2, speed_range: (f64, f64), lifetime: f64, count: usize) {
        for _ in 0..count {
            let angle = self.rng.range(0.0, std::f64::consts::TAU);
            let speed = self.rng.range(speed_range.0, speed_range.1);
            let vel = DVec2::new(angle.cos(), angle.sin()) * speed;
            self.spawn(pos, vel, lifetime);
        }
    }

    /// Integrate all particles by `dt` seconds and drop the expired ones.
    pub fn update(&mut self, dt: f64) {
        let gravity = self.gravity;
        let drag = self.drag;
        let fade = self.fade;
        for p in self.particles.iter_mut() {
            p.age += dt;
            p.vel.y += gravity * dt;
            p.vel *= (1.0 - drag * dt).max(0.0);
            p.pos += p.vel * dt;
            p.alpha = 1.0 - fade.apply((p.age / p.lifetime).clamp(0.0, 1.0));
        }
        self.particles.retain(|p| p.age < p.lifetime);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
