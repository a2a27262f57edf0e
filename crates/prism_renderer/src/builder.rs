//! Turns a parsed scene description into a runtime [`Scene`] and [`Camera`].
//!
//! This is where malformed input is caught: the tracer itself never fails,
//! so everything it relies on (positive radii, non-degenerate triangles,
//! sane material coefficients) is checked here.

use std::collections::BTreeMap;
use std::sync::Arc;

use prism_core::scene::{vec3, CameraDesc, LightDesc, MaterialDesc, MaterialKindDesc, SurfaceDesc};
use prism_core::{EnvironmentMap, SceneDescription, SceneError, SceneResult, TextureCache};
use prism_math::Vec3;

use crate::scene::{Scene, Surface};
use crate::shapes::{Cone, Cuboid, Cylinder, Disk, Ellipsoid, Plane, Shape, Sphere, Torus, Triangle};
use crate::{
    AmbientLight, Camera, DirectionalLight, Light, Material, MaterialKind, PointLight,
    RenderConfig, SpotLight,
};

impl Scene {
    /// Build a scene from its description, loading textures through `cache`.
    ///
    /// Relative texture paths resolve against the description's base directory
    /// when it has one.
    pub fn from_description(desc: &SceneDescription, cache: &mut TextureCache) -> SceneResult<Scene> {
        desc.check_references()?;
        if let Some(dir) = &desc.base_dir {
            cache.set_base_dir(dir.clone());
        }

        let mut materials = BTreeMap::new();
        for (name, material) in &desc.materials {
            let built = build_material(name, material, desc, cache)?;
            materials.insert(name.as_str(), Arc::new(built));
        }

        let mut scene = Scene::new();

        for (index, surface) in desc.surfaces.iter().enumerate() {
            let shape = build_shape(surface)
                .map_err(|reason| SceneError::Invalid(format!("surface {}: {}", index, reason)))?;
            let material = materials
                .get(surface.material())
                .cloned()
                .ok_or_else(|| SceneError::UnknownMaterial(surface.material().to_string()))?;
            scene.add_surface(Surface::new(shape, material));
        }

        for (index, light) in desc.lights.iter().enumerate() {
            let light = build_light(light)
                .map_err(|reason| SceneError::Invalid(format!("light {}: {}", index, reason)))?;
            scene.add_light(light);
        }

        if let Some(path) = &desc.environment {
            let texture = cache.load(path)?;
            scene.set_environment(Some(EnvironmentMap::new(texture)));
        }

        log::debug!(
            "Built scene: {} surfaces, {} lights, {} materials, environment {}",
            scene.surfaces().len(),
            scene.lights().len(),
            materials.len(),
            if scene.environment().is_some() { "on" } else { "off" }
        );

        Ok(scene)
    }
}

impl Camera {
    /// Build and initialize a camera from its description.
    pub fn from_description(desc: &CameraDesc) -> SceneResult<Camera> {
        if desc.width == 0 || desc.height == 0 {
            return Err(SceneError::Invalid(format!(
                "camera resolution {}x{} is empty",
                desc.width, desc.height
            )));
        }
        if !(desc.fov > 0.0 && desc.fov < 180.0) {
            return Err(SceneError::Invalid(format!(
                "camera fov {} must be between 0 and 180 degrees",
                desc.fov
            )));
        }

        let position = vec3(desc.position);
        let look_at = vec3(desc.look_at);
        let up = vec3(desc.up);
        let forward = look_at - position;
        if forward.length_squared() < 1e-12 {
            return Err(SceneError::Invalid("camera looks at its own position".into()));
        }
        if forward.cross(up).length_squared() < 1e-12 {
            return Err(SceneError::Invalid("camera up vector is parallel to the view direction".into()));
        }

        let mut camera = Camera::new()
            .with_resolution(desc.width, desc.height)
            .with_position(position, look_at, up)
            .with_fov(desc.fov);
        camera.initialize();
        Ok(camera)
    }
}

impl RenderConfig {
    /// Default configuration with the description's background color.
    pub fn from_description(desc: &SceneDescription) -> RenderConfig {
        RenderConfig {
            background: vec3(desc.background),
            ..Default::default()
        }
    }
}

fn build_material(
    name: &str,
    desc: &MaterialDesc,
    scene: &SceneDescription,
    cache: &mut TextureCache,
) -> SceneResult<Material> {
    let invalid = |reason: String| SceneError::Invalid(format!("material '{}': {}", name, reason));

    if desc.diffuse.iter().any(|c| !c.is_finite() || *c < 0.0) {
        return Err(invalid(format!("diffuse {:?} must be non-negative", desc.diffuse)));
    }
    if !(desc.spec >= 0.0) {
        return Err(invalid(format!("specular exponent {} must be >= 0", desc.spec)));
    }
    if !(0.0..=1.0).contains(&desc.ks) {
        return Err(invalid(format!("ks {} must be in [0, 1]", desc.ks)));
    }
    if !(desc.ior >= 1.0) {
        return Err(invalid(format!("ior {} must be >= 1", desc.ior)));
    }

    let kind = match desc.kind {
        MaterialKindDesc::Opaque => MaterialKind::Opaque,
        MaterialKindDesc::Reflective => MaterialKind::Reflective,
        MaterialKindDesc::Transparent => MaterialKind::Transparent,
    };

    let mut material = Material::new(vec3(desc.diffuse))
        .with_specular(desc.spec, desc.ks)
        .with_ior(desc.ior)
        .with_kind(kind);

    if let Some(texture_name) = &desc.texture {
        let path = scene
            .textures
            .get(texture_name)
            .ok_or_else(|| SceneError::UnknownTexture(texture_name.clone()))?;
        material = material.with_texture(cache.load(path)?);
    }

    Ok(material)
}

fn positive(what: &str, value: f32) -> Result<f32, String> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} must be positive, got {}", what, value))
    }
}

fn nonzero(what: &str, v: [f32; 3]) -> Result<Vec3, String> {
    let v = vec3(v);
    if v.length_squared() > 1e-12 && v.is_finite() {
        Ok(v)
    } else {
        Err(format!("{} {:?} must be non-zero", what, v))
    }
}

fn build_shape(desc: &SurfaceDesc) -> Result<Shape, String> {
    let shape = match desc {
        SurfaceDesc::Sphere { position, radius, .. } => {
            Sphere::new(vec3(*position), positive("radius", *radius)?).into()
        }
        SurfaceDesc::Plane { position, normal, .. } => {
            Plane::new(vec3(*position), nonzero("normal", *normal)?).into()
        }
        SurfaceDesc::Disk {
            position,
            normal,
            radius,
            ..
        } => Disk::new(
            vec3(*position),
            nonzero("normal", *normal)?,
            positive("radius", *radius)?,
        )
        .into(),
        SurfaceDesc::Aabb { center, size, .. } => {
            let size = vec3(*size);
            if size.min_element() <= 0.0 {
                return Err(format!("box size {:?} must be positive on every axis", size));
            }
            Cuboid::new(vec3(*center), size).into()
        }
        SurfaceDesc::Triangle { v0, v1, v2, .. } => {
            let triangle = Triangle::new(vec3(*v0), vec3(*v1), vec3(*v2));
            if triangle.is_degenerate() {
                return Err("triangle has zero area".to_string());
            }
            triangle.into()
        }
        SurfaceDesc::Cylinder {
            position,
            radius,
            height,
            ..
        } => Cylinder::new(
            vec3(*position),
            positive("radius", *radius)?,
            positive("height", *height)?,
        )
        .into(),
        SurfaceDesc::Cone {
            position,
            radius,
            height,
            ..
        } => Cone::new(
            vec3(*position),
            positive("radius", *radius)?,
            positive("height", *height)?,
        )
        .into(),
        SurfaceDesc::Ellipsoid { position, radii, .. } => {
            let radii = vec3(*radii);
            if radii.min_element() <= 0.0 || !radii.is_finite() {
                return Err(format!("ellipsoid radii {:?} must be positive", radii));
            }
            Ellipsoid::new(vec3(*position), radii).into()
        }
        SurfaceDesc::Torus {
            position,
            major_radius,
            minor_radius,
            ..
        } => Torus::new(
            vec3(*position),
            positive("major radius", *major_radius)?,
            positive("minor radius", *minor_radius)?,
        )
        .into(),
    };

    Ok(shape)
}

fn build_light(desc: &LightDesc) -> Result<Light, String> {
    let non_negative = |intensity: f32| {
        if intensity >= 0.0 && intensity.is_finite() {
            Ok(intensity)
        } else {
            Err(format!("intensity {} must be non-negative", intensity))
        }
    };

    let light = match desc {
        LightDesc::Ambient { color, intensity } => {
            AmbientLight::new(vec3(*color), non_negative(*intensity)?).into()
        }
        LightDesc::Directional {
            direction,
            color,
            intensity,
        } => DirectionalLight::new(vec3(*direction), vec3(*color), non_negative(*intensity)?).into(),
        LightDesc::Point {
            position,
            color,
            intensity,
        } => PointLight::new(vec3(*position), vec3(*color), non_negative(*intensity)?).into(),
        LightDesc::Spot {
            position,
            direction,
            inner_angle,
            outer_angle,
            color,
            intensity,
        } => SpotLight::new(
            vec3(*position),
            vec3(*direction),
            *inner_angle,
            *outer_angle,
            vec3(*color),
            non_negative(*intensity)?,
        )
        .into(),
    };

    Ok(light)
}
