//! Axis-aligned box primitive.

use super::Hittable;
use crate::SurfaceHit;
use prism_math::{Aabb, Interval, Ray, Vec3};

/// Tolerance when matching a hit point to one of the six faces.
const FACE_EPSILON: f32 = 1e-6;

/// An axis-aligned box given by its center and full edge lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    bounds: Aabb,
}

impl Cuboid {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            bounds: Aabb::from_center_size(center, size),
        }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let range = self.bounds.slab_range(ray)?;

        // Entry point, or the exit point when the ray starts inside
        let t = if ray_t.surrounds(range.min) {
            range.min
        } else if ray_t.surrounds(range.max) {
            range.max
        } else {
            return None;
        };

        let normal = self.bounds.face_normal(ray.at(t), FACE_EPSILON);
        Some(SurfaceHit::new(ray, t, normal, None))
    }
}
