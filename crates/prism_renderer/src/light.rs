//! Light sources and their per-intercept contributions.
//!
//! Each light answers two questions about an intercept: how much diffuse
//! light reaches it, and how bright the specular highlight is when seen from
//! a viewer. Shadowing is the caller's job; [`Light::shadow_ray`] says where
//! to look.

use prism_math::Vec3;

use crate::{Color, Intercept};

/// Ambient light, present everywhere and never shadowed.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity: intensity.max(0.0),
        }
    }
}

/// Light arriving from infinitely far away along a fixed direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Unit direction the light travels in
    direction: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            direction: unit_or_down(direction, "directional"),
            color,
            intensity: intensity.max(0.0),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

/// Omnidirectional light at a position, falling off with distance squared.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity: intensity.max(0.0),
        }
    }
}

/// Point light restricted to a cone with a soft edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    direction: Vec3,
    /// Full brightness inside this angle, in degrees
    inner_angle: f32,
    /// No light outside this angle, in degrees
    outer_angle: f32,
    pub color: Color,
    pub intensity: f32,
}

impl SpotLight {
    pub fn new(
        position: Vec3,
        direction: Vec3,
        inner_angle: f32,
        outer_angle: f32,
        color: Color,
        intensity: f32,
    ) -> Self {
        let (inner_angle, outer_angle) = if inner_angle > outer_angle {
            log::warn!(
                "Spot light inner angle {} exceeds outer angle {}; swapping",
                inner_angle,
                outer_angle
            );
            (outer_angle, inner_angle)
        } else {
            (inner_angle, outer_angle)
        };

        Self {
            position,
            direction: unit_or_down(direction, "spot"),
            inner_angle,
            outer_angle,
            color,
            intensity: intensity.max(0.0),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.inner_angle, self.outer_angle)
    }

    /// Cone falloff in [0, 1] for light travelling along `-to_light`.
    pub fn edge_attenuation(&self, to_light: Vec3) -> f32 {
        let cos_inner = self.inner_angle.to_radians().cos();
        let cos_outer = self.outer_angle.to_radians().cos();
        let denom = cos_inner - cos_outer;
        if denom.abs() < 1e-8 {
            return 0.0;
        }

        let cos_theta = self.direction.dot(-to_light);
        ((cos_theta - cos_outer) / denom).clamp(0.0, 1.0)
    }
}

/// Any light a scene can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    pub fn color(&self) -> Color {
        match self {
            Light::Ambient(l) => l.color,
            Light::Directional(l) => l.color,
            Light::Point(l) => l.color,
            Light::Spot(l) => l.color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient(l) => l.intensity,
            Light::Directional(l) => l.intensity,
            Light::Point(l) => l.intensity,
            Light::Spot(l) => l.intensity,
        }
    }

    /// Direction from `point` toward the light and how far away it is.
    ///
    /// `None` for ambient light, which comes from nowhere in particular, and
    /// for a point or spot light sitting exactly on `point`.
    pub fn shadow_ray(&self, point: Vec3) -> Option<(Vec3, f32)> {
        match self {
            Light::Ambient(_) => None,
            Light::Directional(l) => Some((-l.direction, f32::INFINITY)),
            Light::Point(PointLight { position, .. }) | Light::Spot(SpotLight { position, .. }) => {
                toward(*position, point)
            }
        }
    }

    /// Diffuse light reaching the intercept.
    pub fn diffuse(&self, intercept: &Intercept<'_>) -> Color {
        let normal = intercept.normal;

        match self {
            Light::Ambient(l) => l.color * l.intensity,
            Light::Directional(l) => {
                let lambert = normal.dot(-l.direction).clamp(0.0, 1.0);
                l.color * l.intensity * lambert
            }
            Light::Point(l) => match toward(l.position, intercept.point) {
                Some((wi, dist)) => {
                    let lambert = normal.dot(wi).max(0.0);
                    l.color * lambert * l.intensity / (dist * dist)
                }
                None => Color::ZERO,
            },
            Light::Spot(l) => match toward(l.position, intercept.point) {
                Some((wi, dist)) => {
                    let lambert = normal.dot(wi).max(0.0);
                    l.color * lambert * l.intensity / (dist * dist) * l.edge_attenuation(wi)
                }
                None => Color::ZERO,
            },
        }
    }

    /// Specular highlight at the intercept as seen from `viewer`.
    ///
    /// Uses the intercept's material exponent and coefficient.
    pub fn specular(&self, intercept: &Intercept<'_>, viewer: Vec3) -> Color {
        let material = &intercept.surface.material;

        let (wi, scale) = match self {
            Light::Ambient(_) => return Color::ZERO,
            Light::Directional(l) => (-l.direction, l.intensity),
            Light::Point(l) => match toward(l.position, intercept.point) {
                Some((wi, dist)) => (wi, l.intensity / (dist * dist)),
                None => return Color::ZERO,
            },
            Light::Spot(l) => match toward(l.position, intercept.point) {
                Some((wi, dist)) => (wi, l.intensity / (dist * dist) * l.edge_attenuation(wi)),
                None => return Color::ZERO,
            },
        };

        let Some(view_dir) = (viewer - intercept.point).try_normalize() else {
            return Color::ZERO;
        };
        let reflected = crate::material::reflect(intercept.normal, wi);

        let highlight = view_dir.dot(reflected).max(0.0).powf(material.spec);
        self.color() * highlight * material.ks * scale
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}

/// Unit vector from `point` to `position` and the distance between them.
fn toward(position: Vec3, point: Vec3) -> Option<(Vec3, f32)> {
    let offset = position - point;
    let dist = offset.length();
    if dist == 0.0 || !dist.is_finite() {
        return None;
    }
    Some((offset / dist, dist))
}

fn unit_or_down(direction: Vec3, kind: &str) -> Vec3 {
    match direction.try_normalize() {
        Some(dir) => dir,
        None => {
            log::warn!("Zero-length {} light direction; pointing it down", kind);
            Vec3::NEG_Y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Surface, SurfaceId};
    use crate::shapes::Plane;
    use crate::{Material, SurfaceHit};
    use prism_math::Ray;
    use std::sync::Arc;

    /// Intercept on the floor plane y = 0 at `point`, seen from straight above.
    fn floor_intercept<'a>(surface: &'a Surface, point: Vec3) -> Intercept<'a> {
        let ray = Ray::new(point + Vec3::Y, Vec3::NEG_Y);
        let hit = SurfaceHit::new(&ray, 1.0, Vec3::Y, None);
        Intercept::new(hit, &ray, surface, SurfaceId(0))
    }

    fn floor(spec: f32, ks: f32) -> Surface {
        let material = Material::new(Color::ONE).with_specular(spec, ks);
        Surface::new(Plane::new(Vec3::ZERO, Vec3::Y), Arc::new(material))
    }

    #[test]
    fn test_ambient_is_constant() {
        let surface = floor(1.0, 0.0);
        let hit = floor_intercept(&surface, Vec3::ZERO);
        let light = Light::from(AmbientLight::new(Color::new(1.0, 0.5, 0.0), 0.2));

        let diffuse = light.diffuse(&hit);
        assert!((diffuse - Color::new(0.2, 0.1, 0.0)).length() < 1e-6);
        assert_eq!(light.specular(&hit, Vec3::new(0.0, 5.0, 0.0)), Color::ZERO);
        assert!(light.shadow_ray(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_directional_lambert() {
        let surface = floor(1.0, 0.0);
        let hit = floor_intercept(&surface, Vec3::ZERO);

        let overhead = Light::from(DirectionalLight::new(Vec3::NEG_Y, Color::ONE, 1.0));
        assert!((overhead.diffuse(&hit) - Color::ONE).length() < 1e-6);

        let slanted = Light::from(DirectionalLight::new(Vec3::new(1.0, -1.0, 0.0), Color::ONE, 1.0));
        let expected = std::f32::consts::FRAC_1_SQRT_2;
        assert!((slanted.diffuse(&hit).x - expected).abs() < 1e-5);

        let below = Light::from(DirectionalLight::new(Vec3::Y, Color::ONE, 1.0));
        assert_eq!(below.diffuse(&hit), Color::ZERO);
    }

    #[test]
    fn test_directional_direction_is_normalized() {
        let light = DirectionalLight::new(Vec3::new(0.0, -5.0, 0.0), Color::ONE, 1.0);
        assert_eq!(light.direction(), Vec3::NEG_Y);

        let degenerate = DirectionalLight::new(Vec3::ZERO, Color::ONE, 1.0);
        assert_eq!(degenerate.direction(), Vec3::NEG_Y);
    }

    #[test]
    fn test_directional_specular_peak() {
        let surface = floor(16.0, 0.5);
        let hit = floor_intercept(&surface, Vec3::ZERO);
        let light = Light::from(DirectionalLight::new(Vec3::NEG_Y, Color::ONE, 2.0));

        // Mirror direction points straight up, so a viewer overhead sees the peak
        let spec = light.specular(&hit, Vec3::new(0.0, 3.0, 0.0));
        assert!((spec - Color::splat(1.0)).length() < 1e-5, "{:?}", spec);

        // Off to the side the highlight falls away
        let grazing = light.specular(&hit, Vec3::new(10.0, 0.1, 0.0));
        assert!(grazing.x < 1e-3);
    }

    #[test]
    fn test_point_light_inverse_square() {
        let surface = floor(1.0, 0.0);
        let hit = floor_intercept(&surface, Vec3::ZERO);

        let near = Light::from(PointLight::new(Vec3::new(0.0, 1.0, 0.0), Color::ONE, 1.0));
        let far = Light::from(PointLight::new(Vec3::new(0.0, 2.0, 0.0), Color::ONE, 1.0));

        assert!((near.diffuse(&hit).x - 1.0).abs() < 1e-6);
        assert!((far.diffuse(&hit).x - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_point_light_at_hit_point_contributes_nothing() {
        let surface = floor(8.0, 1.0);
        let hit = floor_intercept(&surface, Vec3::ZERO);
        let light = Light::from(PointLight::new(Vec3::ZERO, Color::ONE, 1.0));

        assert_eq!(light.diffuse(&hit), Color::ZERO);
        assert_eq!(light.specular(&hit, Vec3::Y), Color::ZERO);
        assert!(light.shadow_ray(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_shadow_ray_targets() {
        let sun = Light::from(DirectionalLight::new(Vec3::NEG_Y, Color::ONE, 1.0));
        let (dir, dist) = sun.shadow_ray(Vec3::ZERO).unwrap();
        assert_eq!(dir, Vec3::Y);
        assert!(dist.is_infinite());

        let bulb = Light::from(PointLight::new(Vec3::new(0.0, 0.0, 4.0), Color::ONE, 1.0));
        let (dir, dist) = bulb.shadow_ray(Vec3::ZERO).unwrap();
        assert_eq!(dir, Vec3::Z);
        assert!((dist - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_spot_light_cone() {
        let surface = floor(1.0, 0.0);
        let spot = SpotLight::new(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::NEG_Y,
            30.0,
            40.0,
            Color::ONE,
            1.0,
        );
        let light = Light::from(spot);

        // Straight below: full brightness
        let centre = floor_intercept(&surface, Vec3::ZERO);
        assert!((light.diffuse(&centre).x - 1.0).abs() < 1e-5);

        // 60 degrees off axis: outside the cone
        let outside = floor_intercept(&surface, Vec3::new(3.0_f32.sqrt(), 0.0, 0.0));
        assert_eq!(light.diffuse(&outside), Color::ZERO);
    }

    #[test]
    fn test_spot_light_soft_edge() {
        let spot = SpotLight::new(Vec3::ZERO, Vec3::NEG_Y, 30.0, 40.0, Color::ONE, 1.0);

        let at = |degrees: f32| {
            let rad = degrees.to_radians();
            // Light travels along (sin, -cos); the vector back to the light is its negation
            let travel = Vec3::new(rad.sin(), -rad.cos(), 0.0);
            spot.edge_attenuation(-travel)
        };

        assert!((at(20.0) - 1.0).abs() < 1e-6);
        assert_eq!(at(45.0), 0.0);
        let mid = at(35.0);
        assert!(mid > 0.0 && mid < 1.0, "mid = {}", mid);
    }

    #[test]
    fn test_spot_light_swaps_inverted_angles() {
        let spot = SpotLight::new(Vec3::ZERO, Vec3::NEG_Y, 50.0, 20.0, Color::ONE, 1.0);
        assert_eq!(spot.angles(), (20.0, 50.0));
    }

    #[test]
    fn test_spot_light_equal_angles_gives_zero() {
        let spot = SpotLight::new(Vec3::ZERO, Vec3::NEG_Y, 30.0, 30.0, Color::ONE, 1.0);
        assert_eq!(spot.edge_attenuation(Vec3::Y), 0.0);
    }
}
