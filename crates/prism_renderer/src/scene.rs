//! Runtime scene: surfaces, lights and an optional environment map.

use std::sync::Arc;

use prism_core::EnvironmentMap;
use prism_math::{Interval, Ray, Vec3};

use crate::shapes::{Hittable, Shape};
use crate::{Color, Intercept, Light, Material};

/// Stable index of a surface within its [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub(crate) usize);

impl SurfaceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A shape paired with the material it is shaded with.
///
/// Materials are shared; many surfaces may point at one.
#[derive(Debug, Clone)]
pub struct Surface {
    pub shape: Shape,
    pub material: Arc<Material>,
}

impl Surface {
    pub fn new(shape: impl Into<Shape>, material: Arc<Material>) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }
}

/// Everything a render reads. Built once, then shared read-only.
#[derive(Debug, Default)]
pub struct Scene {
    surfaces: Vec<Surface>,
    lights: Vec<Light>,
    environment: Option<EnvironmentMap>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a surface; ids are handed out in insertion order.
    pub fn add_surface(&mut self, surface: Surface) -> SurfaceId {
        self.surfaces.push(surface);
        SurfaceId(self.surfaces.len() - 1)
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn set_environment(&mut self, environment: Option<EnvironmentMap>) {
        self.environment = environment;
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn environment(&self) -> Option<&EnvironmentMap> {
        self.environment.as_ref()
    }

    /// Nearest intercept along `origin + t * direction` with `t` strictly
    /// inside `ray_t`, skipping `exclude`.
    ///
    /// Every surface is tested; the search range shrinks to the closest hit
    /// found so far.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        exclude: Option<SurfaceId>,
        ray_t: Interval,
    ) -> Option<Intercept<'_>> {
        let ray = Ray::new(origin, direction);
        let mut closest = ray_t;
        let mut nearest = None;

        for (index, surface) in self.surfaces.iter().enumerate() {
            let id = SurfaceId(index);
            if exclude == Some(id) {
                continue;
            }

            if let Some(hit) = surface.shape.hit(&ray, closest) {
                closest = closest.with_max(hit.t);
                nearest = Some(Intercept::new(hit, &ray, surface, id));
            }
        }

        nearest
    }

    /// Environment color seen along `direction`; black without a map.
    pub fn env_map_color(&self, _point: Vec3, direction: Vec3) -> Color {
        match &self.environment {
            Some(environment) => environment.sample_direction(direction),
            None => Color::ZERO,
        }
    }
}
