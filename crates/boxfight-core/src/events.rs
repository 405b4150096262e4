use serde::{Deserialize, Serialize};

use crate::catalog::{ObstacleKind, WeaponKind};
use crate::geometry::Vec3;
use crate::intent::EntityId;

/// Observable things that happened during a tick, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    WeaponFired {
        shooter: EntityId,
        weapon: WeaponKind,
        ammo_left: u32,
    },
    Hit {
        shooter: EntityId,
        target: EntityId,
        damage: i32,
        health_left: i32,
    },
    /// Health crossed to zero or below. The entity stays in the simulation.
    Eliminated { entity: EntityId, by: EntityId },
    ReloadStarted {
        entity: EntityId,
        weapon: WeaponKind,
    },
    ReloadCompleted {
        entity: EntityId,
        weapon: WeaponKind,
    },
    ObstaclePlaced { kind: ObstacleKind, position: Vec3 },
    /// The oldest obstacle was dropped to keep the registry within capacity.
    ObstacleEvicted { kind: ObstacleKind, position: Vec3 },
}

impl SimEvent {
    pub fn is_elimination(&self) -> bool {
        matches!(self, SimEvent::Eliminated { .. })
    }
}
