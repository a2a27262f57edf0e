//! Infinite plane.

use super::Hittable;
use crate::SurfaceHit;
use prism_math::{Interval, Ray, Vec3};

/// Denominators below this are treated as a ray parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An infinite plane through `position` with unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    position: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a plane. `normal` is normalized; a zero normal falls back to +Y.
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        let normal = normal.try_normalize().unwrap_or(Vec3::Y);
        Self { position, normal }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Parameter where the ray crosses the plane, if inside `ray_t`.
    pub(crate) fn intersect_t(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.position - ray.origin()).dot(self.normal) / denom;
        ray_t.surrounds(t).then_some(t)
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let t = self.intersect_t(ray, ray_t)?;
        Some(SurfaceHit::new(ray, t, self.normal, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::*;

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0));

        let hit = plane.hit(&ray, forward()).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
        assert!(hit.tex_coord.is_none());
        assert_valid_hit(&hit, &ray);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1e-8, 0.0));
        assert!(plane.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(plane.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_plane_hit_from_below_flips_normal() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);

        let hit = plane.hit(&ray, forward()).unwrap();
        assert_eq!(hit.normal, Vec3::NEG_Y);
        assert!(!hit.front_face);
    }
}
