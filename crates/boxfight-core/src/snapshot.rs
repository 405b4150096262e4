use serde::{Deserialize, Serialize};

use crate::catalog::WeaponKind;
use crate::error::SimError;
use crate::geometry::Vec3;
use crate::intent::EntityId;
use crate::time::SimInstant;

/// Read-only view of one entity for presentation and HUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub position: Vec3,
    pub yaw: f32,
    pub health: i32,
    /// Loadout slot of the active weapon.
    pub active_slot: u8,
    pub active_weapon: WeaponKind,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    pub eliminated: bool,
    pub autonomous: bool,
}

/// Everything the presentation layer reads after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimInstant,
    pub paused: bool,
    pub entities: Vec<EntitySnapshot>,
    pub obstacle_count: usize,
}

impl WorldSnapshot {
    pub fn entity(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// MessagePack encoding for handing the snapshot across a process or
    /// thread boundary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SimError> {
        rmp_serde::to_vec(self).map_err(|e| SimError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, SimError> {
        rmp_serde::from_slice(data).map_err(|e| SimError::Snapshot(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorldSnapshot {
        WorldSnapshot {
            time: SimInstant::from_micros(1_500_000),
            paused: false,
            entities: vec![EntitySnapshot {
                id: 1,
                position: Vec3::new(1.0, 0.0, -2.0),
                yaw: 0.5,
                health: 70,
                active_slot: 1,
                active_weapon: WeaponKind::Shotgun,
                ammo: 3,
                max_ammo: 5,
                reloading: false,
                eliminated: false,
                autonomous: true,
            }],
            obstacle_count: 4,
        }
    }

    #[test]
    fn lookup_by_id() {
        let snap = sample();
        assert_eq!(snap.entity(1).map(|e| e.health), Some(70));
        assert!(snap.entity(9).is_none());
    }

    #[test]
    fn bytes_roundtrip() {
        let snap = sample();
        let data = snap.to_bytes().unwrap();
        assert_eq!(WorldSnapshot::from_bytes(&data).unwrap(), snap);
    }

    #[test]
    fn truncated_bytes_are_an_error() {
        let data = sample().to_bytes().unwrap();
        let err = WorldSnapshot::from_bytes(&data[..data.len() / 2]).unwrap_err();
        assert!(matches!(err, SimError::Snapshot(_)));
    }
}
