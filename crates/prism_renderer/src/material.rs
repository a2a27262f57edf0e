//! Surface materials and the recursive shading model.

use std::sync::Arc;

use prism_core::Texture;
use prism_math::{Vec2, Vec3};

use crate::{Intercept, Tracer};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How a surface treats light beyond its direct illumination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaterialKind {
    /// Lit directly by every unshadowed light
    #[default]
    Opaque,
    /// Mirror: shows what the reflected ray sees
    Reflective,
    /// Glass-like: reflected and refracted rays split by Fresnel weights
    Transparent,
}

/// Appearance of a surface. Immutable once built and shared between surfaces.
#[derive(Debug, Clone)]
pub struct Material {
    pub diffuse: Color,
    /// Specular exponent
    pub spec: f32,
    /// Specular coefficient in [0, 1]
    pub ks: f32,
    /// Index of refraction, at least 1
    pub ior: f32,
    pub kind: MaterialKind,
    pub texture: Option<Arc<Texture>>,
}

impl Material {
    pub fn new(diffuse: Color) -> Self {
        Self {
            diffuse,
            spec: 1.0,
            ks: 0.0,
            ior: 1.0,
            kind: MaterialKind::Opaque,
            texture: None,
        }
    }

    pub fn with_specular(mut self, spec: f32, ks: f32) -> Self {
        self.spec = spec;
        self.ks = ks;
        self
    }

    pub fn with_ior(mut self, ior: f32) -> Self {
        self.ior = ior;
        self
    }

    pub fn with_kind(mut self, kind: MaterialKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Diffuse color, modulated by the texture when there is both a texture
    /// and a texture coordinate.
    pub fn base_color(&self, tex_coord: Option<Vec2>) -> Color {
        match (&self.texture, tex_coord) {
            (Some(texture), Some(uv)) => self.diffuse * texture.sample(uv.x, uv.y),
            _ => self.diffuse,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::ONE)
    }
}

/// Color of an intercept: direct light, shadows, then reflection and
/// refraction traced through `tracer` one level deeper.
///
/// Each channel of the result is at most 1.
pub fn shade(intercept: &Intercept<'_>, tracer: &Tracer<'_>, depth: u32) -> Color {
    let material = &intercept.surface.material;
    let base = material.base_color(intercept.tex_coord);

    let mut light_color = Color::ZERO;
    let mut spec_color = Color::ZERO;

    for light in tracer.scene().lights() {
        if tracer.is_shadowed(intercept, light) {
            continue;
        }

        spec_color += light.specular(intercept, tracer.viewer());
        if material.kind == MaterialKind::Opaque {
            light_color += light.diffuse(intercept);
        }
    }

    let mut reflect_color = Color::ZERO;
    let mut refract_color = Color::ZERO;

    match material.kind {
        MaterialKind::Opaque => {}
        MaterialKind::Reflective => {
            let dir = reflect(intercept.normal, -intercept.ray_direction);
            reflect_color = tracer.trace(intercept.point, dir, Some(intercept.surface_id), depth + 1);
        }
        MaterialKind::Transparent => {
            let incident = intercept.ray_direction.normalize_or_zero();
            // The normal faces the incoming ray, so +bias stays on its side
            let normal = intercept.normal;
            let bias = normal * tracer.config().bias;
            let (n1, n2) = if intercept.front_face {
                (1.0, material.ior)
            } else {
                (material.ior, 1.0)
            };

            let reflect_dir = reflect(normal, -incident);
            reflect_color = tracer.trace(intercept.point + bias, reflect_dir, None, depth + 1);

            if !total_internal_reflection(normal, incident, n1, n2) {
                let refract_dir = refract(normal, incident, n1, n2);
                refract_color = tracer.trace(intercept.point - bias, refract_dir, None, depth + 1);

                let (kr, kt) = fresnel(normal, incident, n1, n2);
                reflect_color *= kr;
                refract_color *= kt;
            }
        }
    }

    let color = base * (light_color + reflect_color + refract_color) + spec_color;
    color.min(Color::ONE)
}

/// Mirror `dir` about `normal`: `normalize(2(n.d)n - d)`.
///
/// `dir` points away from the surface, so reflecting an incoming ray takes
/// its negation.
#[inline]
pub fn reflect(normal: Vec3, dir: Vec3) -> Vec3 {
    (2.0 * normal.dot(dir) * normal - dir).normalize_or_zero()
}

/// Flip the normal onto the incident side when needed.
///
/// Returns the oriented normal, the cosine of the incidence angle and the
/// indices ordered as (from, to). A normal that already faces the incident
/// ray keeps `n1` as the medium the ray is travelling in.
fn orient(normal: Vec3, incident: Vec3, n1: f32, n2: f32) -> (Vec3, f32, f32, f32) {
    let c1 = normal.dot(incident);
    if c1 < 0.0 {
        (normal, -c1, n1, n2)
    } else {
        (-normal, c1, n2, n1)
    }
}

/// Direction of `incident` after crossing from index `n1` into `n2`.
///
/// Under total internal reflection the result is zero.
pub fn refract(normal: Vec3, incident: Vec3, n1: f32, n2: f32) -> Vec3 {
    let (normal, c1, n1, n2) = orient(normal, incident, n1, n2);
    let eta = n1 / n2;
    let k = 1.0 - eta * eta * (1.0 - c1 * c1);
    if k < 0.0 {
        return Vec3::ZERO;
    }
    (eta * (incident + c1 * normal) - k.sqrt() * normal).normalize_or_zero()
}

/// Whether `incident` cannot cross from `n1` into `n2` at all.
pub fn total_internal_reflection(normal: Vec3, incident: Vec3, n1: f32, n2: f32) -> bool {
    let (_, c1, n1, n2) = orient(normal, incident, n1, n2);
    let sin_t = n1 / n2 * (1.0 - c1 * c1).max(0.0).sqrt();
    sin_t >= 1.0
}

/// Reflected and transmitted fractions `(kr, kt)` for unpolarised light,
/// averaging the s and p Fresnel terms. `kr + kt == 1`.
pub fn fresnel(normal: Vec3, incident: Vec3, n1: f32, n2: f32) -> (f32, f32) {
    let (_, c1, n1, n2) = orient(normal, incident, n1, n2);
    let s2 = n1 / n2 * (1.0 - c1 * c1).max(0.0).sqrt();
    if s2 >= 1.0 {
        return (1.0, 0.0);
    }
    let c2 = (1.0 - s2 * s2).max(0.0).sqrt();

    let s_denom = n1 * c1 + n2 * c2;
    let p_denom = n1 * c2 + n2 * c1;
    if s_denom <= 0.0 || p_denom <= 0.0 {
        return (1.0, 0.0);
    }

    let rs = ((n1 * c1 - n2 * c2) / s_denom).powi(2);
    let rp = ((n1 * c2 - n2 * c1) / p_denom).powi(2);
    let kr = ((rs + rp) / 2.0).clamp(0.0, 1.0);
    (kr, 1.0 - kr)
}
