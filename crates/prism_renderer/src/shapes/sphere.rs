//! Sphere primitive for ray tracing.

use super::Hittable;
use crate::SurfaceHit;
use prism_math::{roots, Interval, Ray, Vec2, Vec3};
use std::f32::consts::PI;

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a point on the unit sphere.
    pub(crate) fn sphere_uv(n: Vec3) -> Vec2 {
        let u = -n.z.atan2(n.x) / (2.0 * PI) + 0.5;
        let v = (-n.y).clamp(-1.0, 1.0).acos() / PI;
        Vec2::new(u, v)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let (t0, t1) = roots::solve_quadratic(a, b, c)?;

        // Find the nearest root in the acceptable range
        let t = if ray_t.surrounds(t0) {
            t0
        } else if ray_t.surrounds(t1) {
            t1
        } else {
            return None;
        };

        let outward_normal = (ray.at(t) - self.center) / self.radius;
        let uv = Self::sphere_uv(outward_normal);

        Some(SurfaceHit::new(ray, t, outward_normal, Some(uv)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::*;

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.hit(&ray, forward()).unwrap();
        assert!((hit.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert_valid_hit(&hit, &ray);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_near_and_far_hits_through_center() {
        let center = Vec3::new(1.0, 2.0, -6.0);
        let sphere = Sphere::new(center, 1.5);
        let origin = Vec3::new(1.0, 2.0, 0.0);
        let ray = Ray::new(origin, (center - origin).normalize());
        let to_center = (origin - center).length();

        let near = sphere.hit(&ray, forward()).unwrap();
        assert!((near.t - (to_center - 1.5)).abs() < 1e-4);
        assert!(near.front_face);

        // Normal parallel to (hit - center)
        let radial = (near.point - center).normalize();
        assert!(near.outward_normal().dot(radial) > 0.9999);

        // Skip the near hit to get the far one
        let far = sphere
            .hit(&ray, Interval::new(near.t + 1e-3, f32::INFINITY))
            .unwrap();
        assert!((far.t - (to_center + 1.5)).abs() < 1e-4);
        assert!(!far.front_face);
        assert_valid_hit(&far, &ray);
    }

    #[test]
    fn test_sphere_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.hit(&ray, forward()).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn test_sphere_origin_on_surface_does_not_self_intersect() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0);

        let outward = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        assert!(sphere.hit(&outward, forward()).is_none());

        let inward = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::NEG_Z);
        let hit = sphere.hit(&inward, forward()).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_uv() {
        let uv = Sphere::sphere_uv(Vec3::NEG_Y);
        assert!(uv.y.abs() < 1e-6);

        let uv = Sphere::sphere_uv(Vec3::Y);
        assert!((uv.y - 1.0).abs() < 1e-6);

        let uv = Sphere::sphere_uv(Vec3::X);
        assert!((uv.x - 0.5).abs() < 1e-6);
        assert!((uv.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_unnormalized_direction() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));

        // Distance is measured in multiples of the direction
        let hit = sphere.hit(&ray, forward()).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);
    }
}
