/// Unique identifier for an entity in the scene. Allocated by
/// `Scene::spawn`; never reused within one scene's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);
