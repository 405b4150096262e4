use boxfight_core::geometry::Vec3;
use boxfight_core::intent::Intent;

use crate::config::ArenaConfig;
use crate::entity::Entity;

/// Height of the ground plane.
pub const GROUND_Y: f32 = 0.0;

/// Unit forward vector for a heading. Forward at yaw 0 is -Z.
pub fn forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Unit right vector for a heading. Right at yaw 0 is +X.
pub fn right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

fn axis(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Advance one entity by `dt` seconds under its intent and gravity.
///
/// Horizontal velocity is replaced every tick; vertical velocity
/// accumulates gravity. Semi-implicit Euler, then the ground plane clamp.
pub fn integrate(entity: &mut Entity, intent: &Intent, dt: f32, config: &ArenaConfig) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    let horizontal =
        (forward(entity.yaw) * axis(intent.forward) + right(entity.yaw) * axis(intent.strafe))
            * config.move_speed;
    entity.velocity.x = horizontal.x;
    entity.velocity.z = horizontal.z;

    if intent.jump && entity.grounded {
        entity.velocity.y = config.jump_velocity();
        entity.grounded = false;
    }

    entity.velocity.y += config.gravity * dt;
    entity.position += entity.velocity * dt;

    if entity.position.y < GROUND_Y {
        entity.position.y = GROUND_Y;
        entity.velocity.y = 0.0;
        entity.grounded = true;
    } else {
        entity.grounded = false;
    }
}
