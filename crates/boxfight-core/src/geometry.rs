use serde::{Deserialize, Serialize};

pub use glam::Vec3;

/// Directions closer to zero than this on an axis are treated as parallel to
/// that axis' slabs.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Inclusive overlap on all three axes. Boxes that share a face or an
    /// edge overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Slab test for a ray starting at `origin` travelling along `dir`.
    ///
    /// Returns the distance (in units of `dir`) at which the ray enters the
    /// box, or 0 when the origin is already inside. Hits behind the origin
    /// are ignored.
    pub fn ray_entry(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if d.abs() < PARALLEL_EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, y, z), Vec3::splat(0.5))
    }

    #[test]
    fn overlapping_boxes() {
        assert!(unit_at(0.0, 0.0, 0.0).overlaps(&unit_at(0.5, 0.2, -0.3)));
    }

    #[test]
    fn touching_boxes_overlap() {
        assert!(unit_at(0.0, 0.0, 0.0).overlaps(&unit_at(1.0, 0.0, 0.0)));
        assert!(unit_at(0.0, 0.0, 0.0).overlaps(&unit_at(1.0, 1.0, 1.0)));
        assert!(!unit_at(0.0, 0.0, 0.0).overlaps(&unit_at(1.001, 0.0, 0.0)));
    }

    #[test]
    fn separated_on_one_axis_is_enough() {
        assert!(!unit_at(0.0, 0.0, 0.0).overlaps(&unit_at(0.0, 3.0, 0.0)));
    }

    #[test]
    fn zero_thickness_slab_overlaps_straddling_box() {
        let slab = Aabb::new(Vec3::new(-2.5, 0.0, -2.5), Vec3::new(2.5, 0.0, 2.5));
        assert!(slab.overlaps(&unit_at(0.0, 0.0, 0.0)));
        assert!(!slab.overlaps(&unit_at(0.0, 2.0, 0.0)));
    }

    #[test]
    fn new_orders_corners() {
        let b = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.center(), Vec3::ZERO);
        assert_eq!(b.size(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn ray_hits_box_in_front() {
        let t = unit_at(0.0, 0.0, -5.0).ray_entry(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(t, Some(4.5));
    }

    #[test]
    fn ray_ignores_box_behind() {
        assert!(
            unit_at(0.0, 0.0, 5.0)
                .ray_entry(Vec3::ZERO, Vec3::NEG_Z)
                .is_none()
        );
    }

    #[test]
    fn ray_parallel_outside_slab_misses() {
        assert!(
            unit_at(0.0, 3.0, -5.0)
                .ray_entry(Vec3::ZERO, Vec3::NEG_Z)
                .is_none()
        );
    }

    #[test]
    fn ray_from_inside_enters_at_zero() {
        assert_eq!(unit_at(0.0, 0.0, 0.0).ray_entry(Vec3::ZERO, Vec3::X), Some(0.0));
        assert!(unit_at(0.0, 0.0, 0.0).contains_point(Vec3::ZERO));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn overlap_is_symmetric(
                ax in -10.0f32..10.0, ay in -10.0f32..10.0, az in -10.0f32..10.0,
                bx in -10.0f32..10.0, by in -10.0f32..10.0, bz in -10.0f32..10.0,
                half in 0.1f32..4.0,
            ) {
                let a = Aabb::from_center_half_extents(Vec3::new(ax, ay, az), Vec3::splat(half));
                let b = Aabb::from_center_half_extents(Vec3::new(bx, by, bz), Vec3::splat(1.0));
                prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            }

            #[test]
            fn ray_entry_point_lies_on_box(
                z in -50.0f32..-1.0,
                x in -0.4f32..0.4,
            ) {
                let b = unit_at(0.0, 0.0, z);
                let origin = Vec3::new(x, 0.0, 0.0);
                let t = b.ray_entry(origin, Vec3::NEG_Z);
                prop_assert!(t.is_some());
                let hit = origin + Vec3::NEG_Z * t.unwrap_or_default();
                prop_assert!((hit.z - b.max.z).abs() < 1e-3);
            }
        }
    }
}
