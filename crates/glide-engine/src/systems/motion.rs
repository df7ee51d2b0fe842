//! Motion system — steps every body in a scene and syncs entity positions.

use glam::DVec2;

use crate::api::types::EntityId;
use crate::core::collision::{CollisionContact, Rect};
use crate::core::physics::{PhysicsConfig, PIXELS_PER_METER};
use crate::core::scene::Scene;

/// Contacts one entity's body produced during a motion pass.
#[derive(Debug, Clone)]
pub struct BodyContacts {
    pub entity: EntityId,
    pub contacts: Vec<CollisionContact>,
}

/// Step every active entity's physics body by `dt` against the frame's
/// obstacle snapshot, then sync `entity.pos` from the corrected body
/// position.
///
/// Obstacles are the static level geometry captured at the start of the
/// frame — never other dynamic bodies — so the result does not depend on
/// entity iteration order. Steering forces belong on the bodies themselves
/// via `apply_force` before this runs.
///
/// Call this once per frame. Returns the contacts per entity, in scene
/// order, for callers that react to landings and hits.
pub fn step_bodies(
    scene: &mut Scene,
    obstacles: &[Rect],
    dt: f64,
    config: &PhysicsConfig,
) -> Vec<BodyContacts> {
    let mut reports = Vec::new();

    for entity in scene.iter_mut() {
        if !entity.active {
            continue;
        }
        let Some(body) = entity.body.as_mut() else {
            continue;
        };

        let contacts = body.step(dt, DVec2::ZERO, obstacles, config);
        entity.pos = body.position * PIXELS_PER_METER;

        if !contacts.is_empty() {
            reports.push(BodyContacts {
                entity: entity.id,
                contacts,
            });
        }
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::core::collision::ContactSide;
    use crate::core::physics::{BodyDesc, PhysicsBody};

    #[test]
    fn bodies_fall_and_positions_sync() {
        let mut scene = Scene::new();
        let desc = BodyDesc::new(1.0, DVec2::new(20.0, 20.0))
            .with_position(DVec2::new(2.0, 2.0));
        let id = scene.spawn(Entity::new().with_body(PhysicsBody::new(&desc).unwrap()));

        for _ in 0..30 {
            step_bodies(&mut scene, &[], 1.0 / 60.0, &PhysicsConfig::default());
        }

        let entity = scene.get(id).unwrap();
        assert!(entity.pos.y > 100.0, "entity.pos should track the falling body");
        let body = entity.body.as_ref().unwrap();
        assert!((entity.pos - body.position * PIXELS_PER_METER).length() < 1e-9);
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut scene = Scene::new();
        let desc = BodyDesc::new(1.0, DVec2::new(20.0, 20.0));
        let mut entity = Entity::new().with_body(PhysicsBody::new(&desc).unwrap());
        entity.active = false;
        let id = scene.spawn(entity);

        step_bodies(&mut scene, &[], 1.0 / 60.0, &PhysicsConfig::default());
        let body = scene.get(id).unwrap().body.as_ref().unwrap();
        assert_eq!(body.velocity, DVec2::ZERO);
    }

    #[test]
    fn landing_reports_contacts_for_the_right_entity() {
        let mut scene = Scene::new();
        // One body high above the floor, one resting far away from it
        let faller = BodyDesc::new(1.0, DVec2::new(20.0, 20.0))
            .with_position(DVec2::new(1.0, 9.0));
        let drifter = BodyDesc::new(1.0, DVec2::new(20.0, 20.0))
            .with_position(DVec2::new(100.0, 0.0))
            .with_gravity(0.0);
        let faller_id = scene.spawn(Entity::new().with_body(PhysicsBody::new(&faller).unwrap()));
        scene.spawn(Entity::new().with_body(PhysicsBody::new(&drifter).unwrap()));

        let floor = Rect::new(0.0, 500.0, 600.0, 100.0);
        let mut landed = None;
        for _ in 0..120 {
            let reports = step_bodies(&mut scene, &[floor], 1.0 / 60.0, &PhysicsConfig::default());
            if let Some(report) = reports
                .iter()
                .find(|r| r.contacts.iter().any(|c| c.side == ContactSide::Bottom))
            {
                landed = Some(report.entity);
                break;
            }
        }
        assert_eq!(landed, Some(faller_id));
    }
}
