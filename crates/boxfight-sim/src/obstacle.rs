use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use boxfight_core::catalog::ObstacleKind;
use boxfight_core::geometry::{Aabb, Vec3};

/// Edge length of every placeable piece.
pub const PIECE_SIZE: f32 = 5.0;
/// Wall thickness along Z.
pub const WALL_THICKNESS: f32 = 0.5;

/// A static collidable box owned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub bounds: Aabb,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            bounds: Aabb::from_center_half_extents(position, half_extents(kind)),
        }
    }
}

/// Half extents of the axis-aligned box enclosing a piece of the given kind.
pub fn half_extents(kind: ObstacleKind) -> Vec3 {
    let half = PIECE_SIZE / 2.0;
    match kind {
        ObstacleKind::Wall => Vec3::new(half, half, WALL_THICKNESS / 2.0),
        // A cube tilted 45 degrees about X spans size * sqrt(2) on Y and Z.
        ObstacleKind::Ramp => Vec3::new(
            half,
            half * std::f32::consts::SQRT_2,
            half * std::f32::consts::SQRT_2,
        ),
        // Flat walkable slab at the piece's height.
        ObstacleKind::Floor => Vec3::new(half, 0.0, half),
    }
}

/// Snap a point onto the placement grid: X and Z round to the nearest cell,
/// Y drops to the ground plane.
pub fn snap_to_grid(point: Vec3, grid_size: f32) -> Vec3 {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return Vec3::new(point.x, 0.0, point.z);
    }
    Vec3::new(
        (point.x / grid_size).round() * grid_size,
        0.0,
        (point.z / grid_size).round() * grid_size,
    )
}

/// Bounded, insertion-ordered obstacle store with FIFO eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleRegistry {
    obstacles: VecDeque<Obstacle>,
    capacity: usize,
}

impl ObstacleRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            obstacles: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Append an obstacle. Returns the evicted oldest obstacle if the
    /// registry went over capacity.
    pub fn insert(&mut self, obstacle: Obstacle) -> Option<Obstacle> {
        self.obstacles.push_back(obstacle);
        if self.obstacles.len() > self.capacity {
            self.obstacles.pop_front()
        } else {
            None
        }
    }

    /// Live obstacles, oldest first.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
