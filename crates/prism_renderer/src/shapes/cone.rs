//! Finite cone: apex on top, capped by a disk at the base.

use super::{Disk, Hittable};
use crate::SurfaceHit;
use prism_math::{roots, Interval, Ray, Vec3};

const EPSILON: f32 = 1e-6;

/// A Y-aligned cone whose base disk is centred on `position` and whose apex
/// sits `height` above it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cone {
    position: Vec3,
    radius: f32,
    height: f32,
    apex: Vec3,
    /// Squared slope `(radius / height)^2`
    k2: f32,
    base: Disk,
}

impl Cone {
    pub fn new(position: Vec3, radius: f32, height: f32) -> Self {
        let radius = radius.max(0.0);
        let height = height.max(f32::EPSILON);
        let k = radius / height;

        Self {
            position,
            radius,
            height,
            apex: position + Vec3::Y * height,
            k2: k * k,
            base: Disk::new(position, Vec3::NEG_Y, radius),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn apex(&self) -> Vec3 {
        self.apex
    }

    /// Nearest hit on the slanted side, between base and apex.
    fn hit_side(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, Vec3)> {
        let o = ray.origin() - self.apex;
        let d = ray.direction();

        let a = d.x * d.x + d.z * d.z - self.k2 * d.y * d.y;
        let b = 2.0 * (o.x * d.x + o.z * d.z - self.k2 * o.y * d.y);
        let c = o.x * o.x + o.z * o.z - self.k2 * o.y * o.y;

        let candidates = if a.abs() > EPSILON {
            let (t0, t1) = roots::solve_quadratic_with_tolerance(a, b, c, EPSILON)?;
            [Some(t0), Some(t1)]
        } else if b.abs() > EPSILON {
            // Ray parallel to the slope: the quadratic degenerates to a line
            [Some(-c / b), None]
        } else {
            return None;
        };

        candidates.into_iter().flatten().find_map(|t| {
            if !ray_t.surrounds(t) {
                return None;
            }
            // Apex-relative height; the cone occupies [-height, 0]
            let y_local = o.y + t * d.y;
            if !(-self.height..=0.0).contains(&y_local) {
                return None;
            }
            let lp = ray.at(t) - self.apex;
            // Gradient of x^2 + z^2 - k^2 y^2
            let gradient = Vec3::new(lp.x, -self.k2 * lp.y, lp.z);
            let normal = gradient.try_normalize()?;
            Some((t, normal))
        })
    }
}

impl Hittable for Cone {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let side = self.hit_side(ray, ray_t);

        let search = match side {
            Some((t, _)) => ray_t.with_max(t),
            None => ray_t,
        };
        let base = self
            .base
            .hit(ray, search)
            .map(|hit| (hit.t, self.base.normal()));

        let (t, outward_normal) = base.or(side)?;
        Some(SurfaceHit::new(ray, t, outward_normal, None))
    }
}
