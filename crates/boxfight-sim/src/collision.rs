//! Discrete push-out between an entity's box and static or moving boxes.
//!
//! Each overlap moves the entity a fixed `push_step` away from the other
//! box's center. The step is not scaled by dt, so how fast an overlap
//! separates depends on frame rate. There is no continuous detection; fast
//! movers can tunnel through thin walls.
//!
//! Floors are the exception: an entity whose feet are on a floor, or sunk
//! into it by less than the foot depth, stands on it instead of being pushed.

use boxfight_core::catalog::ObstacleKind;
use boxfight_core::geometry::{Aabb, Vec3};

use crate::config::ArenaConfig;
use crate::entity::Entity;
use crate::obstacle::ObstacleRegistry;

/// Displacement that moves `this` away from `other`, or `None` when the boxes
/// do not overlap. Coincident centers give a zero push.
pub fn push_out(this: &Aabb, other: &Aabb, step: f32) -> Option<Vec3> {
    if !this.overlaps(other) {
        return None;
    }
    Some((this.center() - other.center()).normalize_or_zero() * step)
}

/// Support from a floor whose top is at `surface`. Returns false when the
/// feet are too far below the surface, in which case the floor pushes like
/// any other obstacle. Feet above the surface, or an entity moving upward,
/// pass freely.
fn stand_on_floor(entity: &mut Entity, surface: f32, config: &ArenaConfig) -> bool {
    let feet = entity.position.y;
    if feet < surface - config.entity_foot_depth {
        return false;
    }
    if feet <= surface && entity.velocity.y <= 0.0 {
        entity.position.y = surface;
        entity.velocity.y = 0.0;
        entity.grounded = true;
    }
    true
}

/// Resolve the entity against every obstacle it overlaps, oldest obstacle
/// first. Returns the number of overlaps resolved.
pub fn resolve_obstacles(
    entity: &mut Entity,
    obstacles: &ObstacleRegistry,
    config: &ArenaConfig,
) -> usize {
    let mut bounds = config.entity_bounds(entity.position);
    let mut contacts = 0;
    for obstacle in obstacles.all() {
        if !bounds.overlaps(&obstacle.bounds) {
            continue;
        }
        let supported = obstacle.kind == ObstacleKind::Floor
            && stand_on_floor(entity, obstacle.bounds.max.y, config);
        if !supported
            && let Some(push) = push_out(&bounds, &obstacle.bounds, config.push_step)
        {
            entity.position += push;
        }
        contacts += 1;
        bounds = config.entity_bounds(entity.position);
    }
    contacts
}

/// Push `entities[index]` out of every other entity it overlaps, in creation
/// order, using the others' current positions.
pub fn resolve_entities(entities: &mut [Entity], index: usize, config: &ArenaConfig) -> usize {
    let Some(mut position) = entities.get(index).map(|e| e.position) else {
        return 0;
    };
    let mut contacts = 0;
    for (j, other) in entities.iter().enumerate() {
        if j == index {
            continue;
        }
        let bounds = config.entity_bounds(position);
        let other_bounds = config.entity_bounds(other.position);
        if let Some(push) = push_out(&bounds, &other_bounds, config.push_step) {
            position += push;
            contacts += 1;
        }
    }
    entities[index].position = position;
    contacts
}
