use serde::{Deserialize, Serialize};

use boxfight_core::error::SimError;
use boxfight_core::geometry::{Aabb, Vec3};

/// Data-driven configuration for an arena session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Vertical acceleration (units/s^2, negative is down).
    pub gravity: f32,
    /// Horizontal speed at full intent (units/s).
    pub move_speed: f32,
    /// Apex height of a jump from the ground.
    pub jump_height: f32,
    /// Fixed push-out distance applied per overlapping box per tick. Not
    /// scaled by dt, so separation speed depends on frame rate.
    pub push_step: f32,
    /// Bots fire when their target is strictly closer than this.
    pub engagement_range: f32,
    /// Per-tick probability that a bot wants to jump.
    pub bot_jump_chance: f64,
    /// Radians of yaw per unit of horizontal pointer motion.
    pub look_sensitivity: f32,
    pub starting_health: i32,
    /// Maximum live obstacles before the oldest is evicted.
    pub obstacle_capacity: usize,
    /// Placement grid cell size.
    pub grid_size: f32,
    /// Entity box half-width on X and Z.
    pub entity_half_width: f32,
    /// Distance the entity box extends below its position.
    pub entity_foot_depth: f32,
    /// Distance the entity box extends above its position.
    pub entity_head_height: f32,
    /// Seed for bot randomness. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    /// Spawn point of the human entity in the standard session.
    pub human_spawn: Vec3,
    /// Spawn points of the bots in the standard session, one bot each.
    pub bot_spawns: Vec<Vec3>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            move_speed: 5.0,
            jump_height: 2.0,
            push_step: 0.1,
            engagement_range: 20.0,
            bot_jump_chance: 0.1,
            look_sensitivity: 0.002,
            starting_health: 100,
            obstacle_capacity: 100,
            grid_size: 5.0,
            entity_half_width: 0.5,
            entity_foot_depth: 0.75,
            entity_head_height: 1.5,
            rng_seed: None,
            human_spawn: Vec3::ZERO,
            bot_spawns: vec![Vec3::new(20.0, 0.0, 20.0)],
        }
    }
}

impl ArenaConfig {
    /// Load config from `BOXFIGHT_ARENA_CONFIG` or `config/arena.toml`,
    /// falling back to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("BOXFIGHT_ARENA_CONFIG")
            .unwrap_or_else(|_| "config/arena.toml".to_string());
        if !std::path::Path::new(&path).exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            },
        }
    }

    pub fn load_from(path: &str) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{path}: {e}")))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, SimError> {
        toml::from_str::<Self>(contents).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Initial upward speed that reaches `jump_height` under `gravity`.
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.jump_height * -self.gravity).max(0.0).sqrt()
    }

    /// World-space box of an entity standing at `position`.
    pub fn entity_bounds(&self, position: Vec3) -> Aabb {
        Aabb::new(
            position
                + Vec3::new(
                    -self.entity_half_width,
                    -self.entity_foot_depth,
                    -self.entity_half_width,
                ),
            position
                + Vec3::new(
                    self.entity_half_width,
                    self.entity_head_height,
                    self.entity_half_width,
                ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_jump_velocity() {
        let cfg = ArenaConfig::default();
        let expected = (2.0f32 * 2.0 * 9.8).sqrt();
        assert!((cfg.jump_velocity() - expected).abs() < 1e-5);
    }

    #[test]
    fn entity_bounds_cover_body_and_head() {
        let cfg = ArenaConfig::default();
        let b = cfg.entity_bounds(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(b.min, Vec3::new(0.5, -0.75, -0.5));
        assert_eq!(b.max, Vec3::new(1.5, 1.5, 0.5));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ArenaConfig::from_toml(
            "move_speed = 7.5\nrng_seed = 42\nbot_spawns = [[5.0, 0.0, 5.0], [-5.0, 0.0, 5.0]]\n",
        )
        .unwrap();
        assert_eq!(cfg.move_speed, 7.5);
        assert_eq!(cfg.rng_seed, Some(42));
        assert_eq!(cfg.bot_spawns.len(), 2);
        assert_eq!(cfg.gravity, -9.8);
        assert_eq!(cfg.obstacle_capacity, 100);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = ArenaConfig::from_toml("move_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = ArenaConfig::load_from("/nonexistent/boxfight/arena.toml").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
