use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use boxfight_core::geometry::Vec3;
use boxfight_core::intent::{EntityId, Intent};
use boxfight_core::snapshot::EntitySnapshot;

use crate::behavior::{BehaviorController, HumanController, IntentProvider, Perception};
use crate::config::ArenaConfig;
use crate::weapon::Weapon;

/// Who decides what an entity does. Fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    Human(HumanController),
    Autonomous(BehaviorController),
}

impl IntentProvider for Controller {
    fn next_intent(
        &mut self,
        seen: &Perception,
        config: &ArenaConfig,
        rng: &mut StdRng,
    ) -> Intent {
        match self {
            Controller::Human(c) => c.next_intent(seen, config, rng),
            Controller::Autonomous(c) => c.next_intent(seen, config, rng),
        }
    }
}

/// A simulated combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Heading in radians. Forward at yaw 0 is -Z.
    pub yaw: f32,
    pub health: i32,
    pub grounded: bool,
    weapons: [Weapon; 3],
    active_weapon: usize,
    controller: Controller,
}

impl Entity {
    pub fn new(id: EntityId, position: Vec3, health: i32, controller: Controller) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            health,
            grounded: position.y <= 0.0,
            weapons: Weapon::loadout(),
            active_weapon: 0,
            controller,
        }
    }

    pub fn human(id: EntityId, position: Vec3, health: i32) -> Self {
        Self::new(
            id,
            position,
            health,
            Controller::Human(HumanController::default()),
        )
    }

    pub fn autonomous(
        id: EntityId,
        position: Vec3,
        health: i32,
        target: Option<EntityId>,
    ) -> Self {
        Self::new(
            id,
            position,
            health,
            Controller::Autonomous(BehaviorController::new(target)),
        )
    }

    pub fn is_autonomous(&self) -> bool {
        matches!(self.controller, Controller::Autonomous(_))
    }

    pub fn is_eliminated(&self) -> bool {
        self.health <= 0
    }

    pub fn target(&self) -> Option<EntityId> {
        match &self.controller {
            Controller::Autonomous(bot) => bot.target,
            Controller::Human(_) => None,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn weapons(&self) -> &[Weapon; 3] {
        &self.weapons
    }

    pub fn weapons_mut(&mut self) -> &mut [Weapon; 3] {
        &mut self.weapons
    }

    pub fn active_weapon_index(&self) -> usize {
        self.active_weapon
    }

    pub fn active_weapon(&self) -> &Weapon {
        &self.weapons[self.active_weapon]
    }

    pub fn active_weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapons[self.active_weapon]
    }

    /// Select a weapon slot. Out-of-range slots are ignored. Other weapons
    /// keep their cooldown and reload timers.
    pub fn switch_weapon(&mut self, slot: usize) -> bool {
        if slot >= self.weapons.len() {
            tracing::debug!(entity = self.id, slot, "Ignored out-of-range weapon slot");
            return false;
        }
        self.active_weapon = slot;
        true
    }

    /// Subtract damage. Returns true if this hit took health from above zero
    /// to zero or below.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        let was_standing = self.health > 0;
        self.health = self.health.saturating_sub(damage);
        was_standing && self.health <= 0
    }

    pub fn snapshot(&self) -> EntitySnapshot {
        let weapon = self.active_weapon();
        EntitySnapshot {
            id: self.id,
            position: self.position,
            yaw: self.yaw,
            health: self.health,
            active_slot: u8::try_from(self.active_weapon).unwrap_or(u8::MAX),
            active_weapon: weapon.kind(),
            ammo: weapon.ammo(),
            max_ammo: weapon.max_ammo(),
            reloading: weapon.is_reloading(),
            eliminated: self.is_eliminated(),
            autonomous: self.is_autonomous(),
        }
    }
}
