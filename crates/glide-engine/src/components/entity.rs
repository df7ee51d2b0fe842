use glam::DVec2;

use crate::api::types::EntityId;
use crate::components::health::Health;
use crate::core::physics::PhysicsBody;

/// Fat Entity — a single struct with optional components.
/// Designed for simplicity and rapid prototyping over ECS purity.
#[derive(Debug)]
pub struct Entity {
    /// Unique identifier, assigned by `Scene::spawn`.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped by systems).
    pub active: bool,
    /// Position in pixel space (top-left). Synced from the body after each
    /// motion pass when a body is present.
    pub pos: DVec2,
    /// Extent in pixel space.
    pub size: DVec2,
    /// Physics body (optional — entities without one are static decor).
    pub body: Option<PhysicsBody>,
    /// Health component (optional).
    pub health: Option<Health>,
}

impl Entity {
    /// Create a new entity at the origin. The id is a placeholder until the
    /// entity is spawned into a scene.
    pub fn new() -> Self {
        Self {
            id: EntityId(0),
            tag: String::new(),
            active: true,
            pos: DVec2::ZERO,
            size: DVec2::ONE,
            body: None,
            health: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: DVec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: DVec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.pos = body.pixel_rect().pos;
        self.size = body.size;
        self.body = Some(body);
        self
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = Some(health);
        self
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}
