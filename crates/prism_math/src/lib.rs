//! Math primitives shared by the Prism crates.
//!
//! Vector types come straight from `glam`; this crate adds the ray,
//! interval and bounds types the tracer works with, plus polynomial
//! root solvers for implicit surfaces.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
pub mod roots;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_reexports_compose() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let bounds = Aabb::from_points(Vec3::splat(1.0), Vec3::splat(2.0));
        assert!(bounds.slab_range(&ray).is_none());
    }
}
