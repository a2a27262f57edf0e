//! Torus around the Y axis, intersected by solving a quartic in f64.

use super::Hittable;
use crate::SurfaceHit;
use prism_math::roots::{self, QuarticOptions};
use prism_math::{Interval, Ray, Vec3};

/// Gradient magnitudes below this fall back to the radial normal.
const GRADIENT_EPSILON: f64 = 1e-9;

/// A ring torus lying in the XZ plane through `position`.
///
/// Implicit form, relative to the centre:
/// `(x^2 + y^2 + z^2 + R^2 - r^2)^2 - 4R^2 (x^2 + z^2) = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct Torus {
    position: Vec3,
    major_radius: f32,
    minor_radius: f32,
    options: QuarticOptions,
}

impl Torus {
    pub fn new(position: Vec3, major_radius: f32, minor_radius: f32) -> Self {
        Self {
            position,
            major_radius: major_radius.abs(),
            minor_radius: minor_radius.abs(),
            options: QuarticOptions::default(),
        }
    }

    /// Largest imaginary part a quartic root may have and still be a hit.
    pub fn with_tolerance(mut self, imag_tolerance: f64) -> Self {
        self.options.imag_tolerance = imag_tolerance;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn major_radius(&self) -> f32 {
        self.major_radius
    }

    pub fn minor_radius(&self) -> f32 {
        self.minor_radius
    }

    fn coefficients(&self, o: [f64; 3], d: [f64; 3]) -> [f64; 5] {
        let big_r2 = (self.major_radius as f64).powi(2);
        let small_r2 = (self.minor_radius as f64).powi(2);

        let dd = dot(d, d);
        let od = dot(o, d);
        let oo = dot(o, o);
        let k = oo - small_r2 - big_r2;

        [
            dd * dd,
            4.0 * dd * od,
            2.0 * dd * k + 4.0 * od * od + 4.0 * big_r2 * d[1] * d[1],
            4.0 * od * k + 8.0 * big_r2 * o[1] * d[1],
            k * k + 4.0 * big_r2 * (o[1] * o[1] - small_r2),
        ]
    }

    /// Outward normal at a centre-relative point on the surface.
    fn normal_at(&self, p: [f64; 3]) -> Option<Vec3> {
        let big_r = self.major_radius as f64;
        let big_r2 = big_r * big_r;
        let small_r2 = (self.minor_radius as f64).powi(2);

        let g = dot(p, p) + big_r2 - small_r2;
        let gradient = [
            4.0 * g * p[0] - 8.0 * big_r2 * p[0],
            4.0 * g * p[1],
            4.0 * g * p[2] - 8.0 * big_r2 * p[2],
        ];
        if dot(gradient, gradient).sqrt() > GRADIENT_EPSILON {
            return to_vec3(gradient).try_normalize();
        }

        // Away from the tube's core circle: project onto it and point outward
        let ring = (p[0] * p[0] + p[2] * p[2]).sqrt();
        if ring < GRADIENT_EPSILON {
            return None;
        }
        let core = [big_r * p[0] / ring, 0.0, big_r * p[2] / ring];
        to_vec3([p[0] - core[0], p[1] - core[1], p[2] - core[2]]).try_normalize()
    }
}

impl Hittable for Torus {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let o = to_f64(ray.origin() - self.position);
        let d = to_f64(ray.direction());

        // Solve along the unit direction so the quartic stays well scaled,
        // then convert distances back into multiples of the ray direction
        let length = dot(d, d).sqrt();
        if length == 0.0 || !length.is_finite() {
            return None;
        }
        let unit = [d[0] / length, d[1] / length, d[2] / length];

        let s = roots::solve_quartic(self.coefficients(o, unit), &self.options)
            .into_iter()
            .find(|&s| ray_t.surrounds((s / length) as f32))?;
        let t = (s / length) as f32;

        let local = [o[0] + s * unit[0], o[1] + s * unit[1], o[2] + s * unit[2]];
        let normal = self.normal_at(local)?;

        Some(SurfaceHit::new(ray, t, normal, None))
    }
}

fn to_f64(v: Vec3) -> [f64; 3] {
    [v.x as f64, v.y as f64, v.z as f64]
}

fn to_vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::*;

    fn ring() -> Torus {
        Torus::new(Vec3::ZERO, 1.0, 0.25)
    }

    #[test]
    fn test_torus_outer_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = ring().hit(&ray, forward()).unwrap();

        assert!((hit.t - 3.75).abs() < 1e-4, "t = {}", hit.t);
        assert!((hit.normal - Vec3::Z).length() < 1e-4);
        assert!(hit.front_face);
        assert_valid_hit(&hit, &ray);
    }

    #[test]
    fn test_torus_hole_misses() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(ring().hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_torus_inner_wall_from_centre() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = ring().hit(&ray, forward()).unwrap();

        assert!((hit.t - 0.75).abs() < 1e-4);
        // Inner wall faces the hole
        assert!((hit.normal - Vec3::NEG_X).length() < 1e-4);
        assert!(hit.front_face);
    }

    #[test]
    fn test_torus_top_of_tube() {
        let ray = Ray::new(Vec3::new(1.0, 3.0, 0.0), Vec3::NEG_Y);
        let hit = ring().hit(&ray, forward()).unwrap();

        assert!((hit.t - 2.75).abs() < 1e-4);
        assert!((hit.normal - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_torus_respects_interval() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        // Range ends before the first wall
        assert!(ring().hit(&ray, Interval::new(1e-5, 3.0)).is_none());

        // Range starts past the first wall: next root is the far side of the tube
        let hit = ring().hit(&ray, Interval::new(4.0, 100.0)).unwrap();
        assert!((hit.t - 4.25).abs() < 1e-4);
        assert!(!hit.front_face);
    }

    #[test]
    fn test_torus_radial_normal_fallback() {
        let torus = ring();
        // Where |p|^2 = R^2 + r^2 in the ring plane the gradient vanishes
        let x = 1.0625_f64.sqrt();
        let n = torus.normal_at([x, 0.0, 0.0]).unwrap();
        assert!((n - Vec3::X).length() < 1e-5);

        // On the axis there is no radial direction either
        assert!(torus.normal_at([0.0, 0.0, 0.0]).is_none());
    }

    #[test]
    fn test_torus_short_direction() {
        // Same line as a unit-speed ray, travelled 10^4 times slower
        let slow = Ray::new(Vec3::new(1.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1e-4));
        let hit = ring().hit(&slow, forward()).unwrap();

        // Tube edge on x = 1 sits where sqrt(1 + z^2) - 1 = r, i.e. z = 0.75
        assert!((hit.t * 1e-4 - 3.25).abs() < 1e-3, "t = {}", hit.t);
        assert!((hit.point - Vec3::new(1.0, 0.0, 0.75)).length() < 1e-3);
        assert_valid_hit(&hit, &slow);

        let unit = Ray::new(Vec3::new(1.0, 0.0, 4.0), Vec3::NEG_Z);
        let reference = ring().hit(&unit, forward()).unwrap();
        assert!((hit.normal - reference.normal).length() < 1e-4);
    }

    #[test]
    fn test_torus_long_direction() {
        let fast = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -50.0));
        let hit = ring().hit(&fast, forward()).unwrap();
        assert!((hit.t * 50.0 - 3.75).abs() < 1e-3, "t = {}", hit.t);
    }

    #[test]
    fn test_torus_tolerance_builder() {
        let torus = ring().with_tolerance(1e-3);
        assert_eq!(torus.options.imag_tolerance, 1e-3);
    }
}
