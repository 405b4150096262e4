use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use boxfight_core::geometry::Vec3;
use boxfight_core::intent::{EntityId, InputFrame, Intent};

use crate::config::ArenaConfig;

/// Horizontal offsets shorter than this give no usable heading.
const MIN_HEADING_DIST_SQ: f32 = 1e-8;

/// What a controller may know about the world when choosing an intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub position: Vec3,
    pub yaw: f32,
    /// The entity's target, if it has one and it still exists.
    pub target: Option<TargetInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub id: EntityId,
    pub position: Vec3,
    pub health: i32,
}

impl TargetInfo {
    pub fn is_live(&self) -> bool {
        self.health > 0
    }
}

/// Source of per-tick intent for one entity.
pub trait IntentProvider {
    fn next_intent(
        &mut self,
        seen: &Perception,
        config: &ArenaConfig,
        rng: &mut StdRng,
    ) -> Intent;
}

/// Yaw at which the entity's forward axis points along `dir`.
/// Forward at yaw 0 is -Z.
pub fn yaw_facing(dir: Vec3) -> f32 {
    (-dir.x).atan2(-dir.z)
}

/// Intent from the latest input frame of the human player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanController {
    frame: InputFrame,
}

impl HumanController {
    /// Take a new input frame. Held state is replaced, pointer motion
    /// accumulates, and a weapon switch stays pending until a tick uses it.
    pub fn submit(&mut self, frame: InputFrame) {
        let frame = frame.sanitized();
        let look = self.frame.look_delta;
        let pending_switch = self.frame.weapon_switch;
        self.frame = frame;
        self.frame.look_delta.dx += look.dx;
        self.frame.look_delta.dy += look.dy;
        if self.frame.weapon_switch.is_none() {
            self.frame.weapon_switch = pending_switch;
        }
    }

    pub fn frame(&self) -> &InputFrame {
        &self.frame
    }
}

impl IntentProvider for HumanController {
    fn next_intent(
        &mut self,
        seen: &Perception,
        config: &ArenaConfig,
        _rng: &mut StdRng,
    ) -> Intent {
        let look = std::mem::take(&mut self.frame.look_delta);
        Intent {
            forward: -self.frame.move_axes.dz,
            strafe: -self.frame.move_axes.dx,
            jump: self.frame.jump_pressed,
            fire: self.frame.shoot_held,
            weapon_switch: self.frame.weapon_switch.take(),
            yaw: seen.yaw - look.dx * config.look_sensitivity,
        }
    }
}

/// The bot: run straight at the target, hop at random, shoot when close.
///
/// No pathing and no obstacle avoidance. The only state is the target id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorController {
    pub target: Option<EntityId>,
}

impl BehaviorController {
    pub fn new(target: Option<EntityId>) -> Self {
        Self { target }
    }
}

impl IntentProvider for BehaviorController {
    fn next_intent(
        &mut self,
        seen: &Perception,
        config: &ArenaConfig,
        rng: &mut StdRng,
    ) -> Intent {
        let Some(target) = seen.target else {
            return Intent::idle(seen.yaw);
        };

        let mut intent = Intent::idle(seen.yaw);

        let offset = target.position - seen.position;
        let flat = Vec3::new(offset.x, 0.0, offset.z);
        if flat.length_squared() > MIN_HEADING_DIST_SQ {
            intent.yaw = yaw_facing(flat.normalize());
            intent.forward = 1.0;
        }

        let chance = if config.bot_jump_chance.is_finite() {
            config.bot_jump_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        intent.jump = rng.random_bool(chance);
        intent.fire = target.is_live() && offset.length() < config.engagement_range;
        intent
    }
}
