pub mod api;
pub mod components;
pub mod core;
pub mod extensions;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::context::{EngineConfig, GameContext};
pub use api::types::EntityId;
pub use components::entity::Entity;
pub use components::health::Health;
// `crate::` prefix disambiguates our `core` module from the builtin crate
pub use crate::core::collision::{
    resolve_rect, CollisionContact, ContactSide, Rect, ResolveOptions, ResolveOutcome,
};
pub use crate::core::error::EngineError;
pub use crate::core::physics::{BodyDesc, PhysicsBody, PhysicsConfig, PIXELS_PER_METER};
pub use crate::core::scene::Scene;
pub use crate::core::time::{FixedTimestep, Timer};
pub use systems::motion::{step_bodies, BodyContacts};

// Extensions — decoupled optional systems
pub use extensions::{
    ease, ease_vec2, lerp, lerp_vec2,
    Easing,
    EmissionMode, Emitter, Particle, ParticlePool, Rng,
    Tween, TweenDirection, TweenManager, TweenState,
};
