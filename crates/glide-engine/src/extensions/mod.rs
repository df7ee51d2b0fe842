// extensions/mod.rs
//
// Optional extension modules. These are decoupled from core Entity/Scene —
// games opt-in by creating these systems.

pub mod easing;
pub mod particles;
pub mod tween;

pub use easing::{ease, ease_vec2, lerp, lerp_vec2, Easing};
pub use particles::{EmissionMode, Emitter, Particle, ParticlePool, Rng};
pub use tween::{Tween, TweenDirection, TweenManager, TweenState};
