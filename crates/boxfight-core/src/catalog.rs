use serde::{Deserialize, Serialize};

/// Weapon archetypes carried by every entity, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Assault,
    Shotgun,
    Sniper,
}

impl WeaponKind {
    /// Loadout slot order: index 0 is the assault rifle.
    pub const LOADOUT: [WeaponKind; 3] = [
        WeaponKind::Assault,
        WeaponKind::Shotgun,
        WeaponKind::Sniper,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Assault => "assault",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Sniper => "sniper",
        }
    }
}

/// Obstacle shapes the placement collaborator can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Wall,
    Ramp,
    Floor,
}
