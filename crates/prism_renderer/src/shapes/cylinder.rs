//! Finite, capped cylinder standing on the XZ plane.

use super::{Disk, Hittable};
use crate::SurfaceHit;
use prism_math::{roots, Interval, Ray, Vec2, Vec3};
use std::f32::consts::PI;

/// Quadratic coefficients below this are treated as zero.
const EPSILON: f32 = 1e-6;

/// A Y-aligned cylinder with its base centred on `position`.
///
/// The caps are disks built once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    position: Vec3,
    radius: f32,
    height: f32,
    bottom_cap: Disk,
    top_cap: Disk,
}

#[derive(Clone, Copy)]
enum Part {
    Lateral,
    Bottom,
    Top,
}

impl Cylinder {
    pub fn new(position: Vec3, radius: f32, height: f32) -> Self {
        let radius = radius.max(0.0);
        let height = height.max(0.0);
        let top_center = position + Vec3::Y * height;

        Self {
            position,
            radius,
            height,
            bottom_cap: Disk::new(position, Vec3::NEG_Y, radius),
            top_cap: Disk::new(top_center, Vec3::Y, radius),
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

    /// Nearest lateral-surface hit inside the height range.
    fn hit_lateral(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, Vec3)> {
        let d = ray.direction();
        let oc = ray.origin() - self.position;

        let a = d.x * d.x + d.z * d.z;
        if a.abs() <= EPSILON {
            // Parallel to the axis: only the caps can be hit
            return None;
        }
        let b = 2.0 * (oc.x * d.x + oc.z * d.z);
        let c = oc.x * oc.x + oc.z * oc.z - self.radius * self.radius;

        let (t0, t1) = roots::solve_quadratic_with_tolerance(a, b, c, EPSILON)?;

        [t0, t1].into_iter().find_map(|t| {
            if !ray_t.surrounds(t) {
                return None;
            }
            let y_local = oc.y + t * d.y;
            if !(0.0..=self.height).contains(&y_local) {
                return None;
            }
            let p = ray.at(t) - self.position;
            let radial = Vec3::new(p.x, 0.0, p.z);
            Some((t, radial))
        })
    }

    fn tex_coord(&self, part: Part, point: Vec3) -> Vec2 {
        let center = match part {
            Part::Lateral | Part::Bottom => self.position,
            Part::Top => self.top_cap.center(),
        };

        let r = point - center;
        let u = -r.z.atan2(r.x) / (2.0 * PI) + 0.5;
        let v = match part {
            // Axial position along the side
            Part::Lateral => (point.y - self.position.y) / self.height,
            // Radial distance across a cap
            Part::Bottom | Part::Top => (r.x * r.x + r.z * r.z).sqrt() / self.radius,
        };

        Vec2::new(u - u.floor(), v.clamp(0.0, 1.0))
    }
}

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let mut best: Option<(f32, Vec3, Part)> = None;

        if let Some((t, normal)) = self.hit_lateral(ray, ray_t) {
            best = Some((t, normal, Part::Lateral));
        }

        for (cap, part) in [(&self.bottom_cap, Part::Bottom), (&self.top_cap, Part::Top)] {
            let search = match best {
                Some((t, _, _)) => ray_t.with_max(t),
                None => ray_t,
            };
            if let Some(hit) = cap.hit(ray, search) {
                best = Some((hit.t, cap.normal(), part));
            }
        }

        let (t, outward_normal, part) = best?;
        let uv = self.tex_coord(part, ray.at(t));

        Some(SurfaceHit::new(ray, t, outward_normal, Some(uv)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::*;

    fn column() -> Cylinder {
        Cylinder::new(Vec3::new(0.0, -1.0, -5.0), 1.0, 2.0)
    }

    #[test]
    fn test_cylinder_lateral_hit() {
        let cyl = column();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = cyl.hit(&ray, forward()).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert_valid_hit(&hit, &ray);

        // Radial normal has no axial component
        assert!(hit.normal.y.abs() < 1e-6);
    }

    #[test]
    fn test_cylinder_top_cap_hit() {
        let cyl = column();
        let ray = Ray::new(Vec3::new(0.3, 5.0, -5.0), Vec3::NEG_Y);

        let hit = cyl.hit(&ray, forward()).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);

        let uv = hit.tex_coord.unwrap();
        assert!((uv.y - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_cylinder_bottom_cap_hit() {
        let cyl = column();
        let ray = Ray::new(Vec3::new(0.0, -4.0, -5.2), Vec3::Y);

        let hit = cyl.hit(&ray, forward()).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_cylinder_above_height_misses() {
        let cyl = column();
        let ray = Ray::new(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Z);
        assert!(cyl.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_cylinder_picks_nearest_of_side_and_cap() {
        let cyl = column();
        // Enters through the side, would leave through the top cap
        let ray = Ray::new(Vec3::new(0.0, -0.5, 0.0), Vec3::new(0.0, 0.3, -1.0));

        let hit = cyl.hit(&ray, forward()).unwrap();
        assert!(hit.normal.y.abs() < 1e-6, "expected side hit, got {:?}", hit.normal);
        assert!((hit.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_cylinder_lateral_uv_range() {
        let cyl = column();
        let ray = Ray::new(Vec3::new(-3.0, 0.0, -5.0), Vec3::X);

        let hit = cyl.hit(&ray, forward()).unwrap();
        let uv = hit.tex_coord.unwrap();
        assert!((0.0..1.0).contains(&uv.x));
        assert!((uv.y - 0.5).abs() < 1e-5);
    }
}
