//! Intersection records.

use crate::scene::{Surface, SurfaceId};
use prism_math::{Ray, Vec2, Vec3};

/// Geometry of a ray-shape intersection, before it is tied to a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
    /// Whether the ray hit the side the shape's own normal points to
    pub front_face: bool,
    /// Texture coordinates in [0, 1), for shapes that define them
    pub tex_coord: Option<Vec2>,
}

impl SurfaceHit {
    /// Build a hit from the shape's outward normal.
    ///
    /// The stored normal is flipped when needed so that
    /// `normal.dot(ray.direction) <= 0`; `front_face` remembers which side
    /// was hit.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, tex_coord: Option<Vec2>) -> Self {
        let outward_normal = outward_normal.normalize_or_zero();
        let front_face = ray.direction().dot(outward_normal) < 0.0;

        Self {
            t,
            point: ray.at(t),
            normal: if front_face { outward_normal } else { -outward_normal },
            front_face,
            tex_coord,
        }
    }

    /// Normal on the side the shape's own normal points to.
    pub fn outward_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }
}

/// A ray-surface intersection, valid for one shading evaluation.
#[derive(Clone, Copy)]
pub struct Intercept<'a> {
    pub point: Vec3,
    /// Unit normal, oriented against `ray_direction`
    pub normal: Vec3,
    /// Distance along the ray, in multiples of `ray_direction`
    pub distance: f32,
    /// The surface that was hit
    pub surface: &'a Surface,
    /// Index of `surface` in its scene
    pub surface_id: SurfaceId,
    /// Direction of the ray that produced this hit, as cast
    pub ray_direction: Vec3,
    pub tex_coord: Option<Vec2>,
    /// Whether the ray arrived from outside the surface
    pub front_face: bool,
}

impl<'a> Intercept<'a> {
    pub fn new(hit: SurfaceHit, ray: &Ray, surface: &'a Surface, surface_id: SurfaceId) -> Self {
        Self {
            point: hit.point,
            normal: hit.normal,
            distance: hit.t,
            surface,
            surface_id,
            ray_direction: ray.direction(),
            tex_coord: hit.tex_coord,
            front_face: hit.front_face,
        }
    }

    /// Normal on the outside of the surface, regardless of which side was hit.
    pub fn outward_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }
}

impl std::fmt::Debug for Intercept<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intercept")
            .field("point", &self.point)
            .field("normal", &self.normal)
            .field("distance", &self.distance)
            .field("surface_id", &self.surface_id)
            .field("front_face", &self.front_face)
            .finish()
    }
}
