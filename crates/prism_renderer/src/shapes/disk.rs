//! Flat disk: a plane clipped to a radius.

use super::{Hittable, Plane};
use crate::SurfaceHit;
use prism_math::{Interval, Ray, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    plane: Plane,
    radius: f32,
}

impl Disk {
    pub fn new(center: Vec3, normal: Vec3, radius: f32) -> Self {
        Self {
            plane: Plane::new(center, normal),
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.plane.position()
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Disk {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let t = self.plane.intersect_t(ray, ray_t)?;

        let offset = ray.at(t) - self.plane.position();
        if offset.length_squared() > self.radius * self.radius {
            return None;
        }

        Some(SurfaceHit::new(ray, t, self.plane.normal(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::*;

    #[test]
    fn test_disk_hit_inside_radius() {
        let disk = Disk::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, 1.0);
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z);

        let hit = disk.hit(&ray, forward()).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-5);
        assert_valid_hit(&hit, &ray);
    }

    #[test]
    fn test_disk_miss_outside_radius() {
        let disk = Disk::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, 1.0);
        let ray = Ray::new(Vec3::new(0.8, 0.8, 0.0), Vec3::NEG_Z);
        assert!(disk.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_disk_edge_is_inclusive() {
        let disk = Disk::new(Vec3::ZERO, Vec3::Y, 2.0);
        let ray = Ray::new(Vec3::new(2.0, 1.0, 0.0), Vec3::NEG_Y);
        assert!(disk.hit(&ray, forward()).is_some());
    }
}
