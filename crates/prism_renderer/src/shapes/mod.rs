//! Ray-intersectable shapes.
//!
//! Every shape is a pure function of its parameters: `hit` never mutates
//! the shape, so one shape can be tested against any number of rays from
//! any number of threads.

mod cone;
mod cuboid;
mod cylinder;
mod disk;
mod ellipsoid;
mod plane;
mod sphere;
mod torus;
mod triangle;

pub use cone::Cone;
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use disk::Disk;
pub use ellipsoid::Ellipsoid;
pub use plane::Plane;
pub use sphere::Sphere;
pub use torus::Torus;
pub use triangle::Triangle;

use crate::SurfaceHit;
use prism_math::{Interval, Ray};

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection whose parameter lies strictly inside `ray_t`.
    ///
    /// The returned normal is unit length and faces against the ray.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit>;
}

/// The closed set of shapes a surface can have.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Disk(Disk),
    Aabb(Cuboid),
    Triangle(Triangle),
    Cylinder(Cylinder),
    Cone(Cone),
    Ellipsoid(Ellipsoid),
    Torus(Torus),
}

impl Shape {
    /// Short lowercase name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
            Shape::Disk(_) => "disk",
            Shape::Aabb(_) => "aabb",
            Shape::Triangle(_) => "triangle",
            Shape::Cylinder(_) => "cylinder",
            Shape::Cone(_) => "cone",
            Shape::Ellipsoid(_) => "ellipsoid",
            Shape::Torus(_) => "torus",
        }
    }
}

impl Hittable for Shape {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        // A zero-length direction never hits anything
        if ray.is_degenerate() {
            return None;
        }

        match self {
            Shape::Sphere(s) => s.hit(ray, ray_t),
            Shape::Plane(s) => s.hit(ray, ray_t),
            Shape::Disk(s) => s.hit(ray, ray_t),
            Shape::Aabb(s) => s.hit(ray, ray_t),
            Shape::Triangle(s) => s.hit(ray, ray_t),
            Shape::Cylinder(s) => s.hit(ray, ray_t),
            Shape::Cone(s) => s.hit(ray, ray_t),
            Shape::Ellipsoid(s) => s.hit(ray, ray_t),
            Shape::Torus(s) => s.hit(ray, ray_t),
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                fn from(shape: $ty) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape! {
    Sphere => Sphere,
    Plane => Plane,
    Disk => Disk,
    Aabb => Cuboid,
    Triangle => Triangle,
    Cylinder => Cylinder,
    Cone => Cone,
    Ellipsoid => Ellipsoid,
    Torus => Torus,
}
