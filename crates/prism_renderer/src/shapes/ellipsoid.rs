//! Axis-aligned ellipsoid.

use super::Hittable;
use crate::SurfaceHit;
use prism_math::{roots, Interval, Ray, Vec3};

/// An ellipsoid with per-axis radii, intersected as a unit sphere in
/// scaled space.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    position: Vec3,
    radii: Vec3,
}

impl Ellipsoid {
    pub fn new(position: Vec3, radii: Vec3) -> Self {
        Self {
            position,
            radii: radii.abs().max(Vec3::splat(f32::EPSILON)),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn radii(&self) -> Vec3 {
        self.radii
    }
}

impl Hittable for Ellipsoid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        // Into the space where the ellipsoid is a unit sphere. The parameter
        // t is unchanged by the scaling.
        let o = (ray.origin() - self.position) / self.radii;
        let d = ray.direction() / self.radii;

        let a = d.length_squared();
        let b = 2.0 * o.dot(d);
        let c = o.length_squared() - 1.0;

        let (t0, t1) = roots::solve_quadratic(a, b, c)?;
        let t = if ray_t.surrounds(t0) {
            t0
        } else if ray_t.surrounds(t1) {
            t1
        } else {
            return None;
        };

        // Gradient of the implicit surface: scaled by the inverse squared radii
        let local = (ray.at(t) - self.position) / (self.radii * self.radii);
        Some(SurfaceHit::new(ray, t, local, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::*;

    #[test]
    fn test_ellipsoid_hit_along_long_axis() {
        let e = Ellipsoid::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(1.0, 1.0, 3.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = e.hit(&ray, forward()).unwrap();
        assert!((hit.t - 7.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert_valid_hit(&hit, &ray);
    }

    #[test]
    fn test_ellipsoid_matches_sphere_when_isotropic() {
        let e = Ellipsoid::new(Vec3::new(0.0, 0.0, -4.0), Vec3::splat(1.0));
        let s = crate::shapes::Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0);
        let ray = Ray::new(Vec3::new(0.2, 0.3, 0.0), Vec3::new(0.0, 0.0, -1.0));

        let he = e.hit(&ray, forward()).unwrap();
        let hs = s.hit(&ray, forward()).unwrap();
        assert!((he.t - hs.t).abs() < 1e-5);
        assert!((he.normal - hs.normal).length() < 1e-5);
    }

    #[test]
    fn test_ellipsoid_normal_uses_inverse_square_radii() {
        let e = Ellipsoid::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        // Hits the surface at (sqrt(2), sqrt(0.5), 0) coming straight down
        let x = 2.0_f32.sqrt();
        let ray = Ray::new(Vec3::new(x, 5.0, 0.0), Vec3::NEG_Y);

        let hit = e.hit(&ray, forward()).unwrap();
        let p = hit.point;
        let expected = Vec3::new(p.x / 4.0, p.y, 0.0).normalize();
        assert!((hit.normal - expected).length() < 1e-4);
    }

    #[test]
    fn test_ellipsoid_miss() {
        let e = Ellipsoid::new(Vec3::new(0.0, 0.0, -4.0), Vec3::new(0.5, 2.0, 0.5));
        let ray = Ray::new(Vec3::new(0.6, 0.0, 0.0), Vec3::NEG_Z);
        assert!(e.hit(&ray, forward()).is_none());
    }
}
