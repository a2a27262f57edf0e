//! Scene description types.
//!
//! A scene file is a JSON document naming materials, surfaces, lights, a
//! camera and an optional environment map. These types mirror the file
//! one-to-one and carry no rendering logic; the renderer validates them and
//! turns them into its own runtime scene.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::texture::TextureError;

/// Errors produced while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed scene file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("Unknown texture '{0}'")]
    UnknownTexture(String),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level scene file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraDesc,

    /// Environment map path, looked up by direction when rays escape.
    pub environment: Option<String>,

    /// Color for primary rays that miss everything when no environment is set.
    pub background: [f32; 3],

    /// Named texture paths, referenced from materials.
    pub textures: BTreeMap<String, String>,

    pub materials: BTreeMap<String, MaterialDesc>,

    pub surfaces: Vec<SurfaceDesc>,

    pub lights: Vec<LightDesc>,

    /// Directory that relative texture paths resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            fov: 60.0,
            width: 640,
            height: 360,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKindDesc {
    #[default]
    Opaque,
    Reflective,
    Transparent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDesc {
    pub diffuse: [f32; 3],
    /// Specular exponent
    pub spec: f32,
    /// Specular coefficient
    pub ks: f32,
    pub ior: f32,
    pub kind: MaterialKindDesc,
    /// Name of an entry in `SceneDescription::textures`
    pub texture: Option<String>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            diffuse: [1.0, 1.0, 1.0],
            spec: 1.0,
            ks: 0.0,
            ior: 1.0,
            kind: MaterialKindDesc::Opaque,
            texture: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceDesc {
    Sphere {
        position: [f32; 3],
        radius: f32,
        material: String,
    },
    Plane {
        position: [f32; 3],
        normal: [f32; 3],
        material: String,
    },
    Disk {
        position: [f32; 3],
        normal: [f32; 3],
        radius: f32,
        material: String,
    },
    Aabb {
        center: [f32; 3],
        size: [f32; 3],
        material: String,
    },
    Triangle {
        v0: [f32; 3],
        v1: [f32; 3],
        v2: [f32; 3],
        material: String,
    },
    Cylinder {
        position: [f32; 3],
        radius: f32,
        height: f32,
        material: String,
    },
    Cone {
        position: [f32; 3],
        radius: f32,
        height: f32,
        material: String,
    },
    Ellipsoid {
        position: [f32; 3],
        radii: [f32; 3],
        material: String,
    },
    Torus {
        position: [f32; 3],
        major_radius: f32,
        minor_radius: f32,
        material: String,
    },
}

impl SurfaceDesc {
    /// Name of the material this surface references.
    pub fn material(&self) -> &str {
        match self {
            SurfaceDesc::Sphere { material, .. }
            | SurfaceDesc::Plane { material, .. }
            | SurfaceDesc::Disk { material, .. }
            | SurfaceDesc::Aabb { material, .. }
            | SurfaceDesc::Triangle { material, .. }
            | SurfaceDesc::Cylinder { material, .. }
            | SurfaceDesc::Cone { material, .. }
            | SurfaceDesc::Ellipsoid { material, .. }
            | SurfaceDesc::Torus { material, .. } => material,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Directional {
        #[serde(default = "default_down")]
        direction: [f32; 3],
        #[serde(default = "default_white")]
        color: [f32; 3],
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    Ambient {
        #[serde(default = "default_white")]
        color: [f32; 3],
        #[serde(default = "default_ambient_intensity")]
        intensity: f32,
    },
    Point {
        position: [f32; 3],
        #[serde(default = "default_white")]
        color: [f32; 3],
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    Spot {
        position: [f32; 3],
        #[serde(default = "default_down")]
        direction: [f32; 3],
        #[serde(default = "default_inner_angle")]
        inner_angle: f32,
        #[serde(default = "default_outer_angle")]
        outer_angle: f32,
        #[serde(default = "default_white")]
        color: [f32; 3],
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
}

fn default_down() -> [f32; 3] {
    [0.0, -1.0, 0.0]
}

fn default_white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_intensity() -> f32 {
    1.0
}

fn default_ambient_intensity() -> f32 {
    0.1
}

fn default_inner_angle() -> f32 {
    30.0
}

fn default_outer_angle() -> f32 {
    40.0
}

/// Convert a description triple into a vector.
#[inline]
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

/// Load a scene description from a JSON file.
///
/// Relative texture paths in the scene resolve against the file's directory.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let mut desc = load_scene_from_str(&contents)?;
    desc.base_dir = path.parent().map(Path::to_path_buf);

    log::debug!(
        "Parsed scene {}: {} materials, {} surfaces, {} lights",
        path.display(),
        desc.materials.len(),
        desc.surfaces.len(),
        desc.lights.len()
    );

    Ok(desc)
}

/// Parse a scene description from a JSON string.
pub fn load_scene_from_str(contents: &str) -> SceneResult<SceneDescription> {
    let desc: SceneDescription = serde_json::from_str(contents)?;
    desc.check_references()?;
    Ok(desc)
}

impl SceneDescription {
    /// Verify that every material and texture name used is declared.
    pub fn check_references(&self) -> SceneResult<()> {
        for surface in &self.surfaces {
            if !self.materials.contains_key(surface.material()) {
                return Err(SceneError::UnknownMaterial(surface.material().to_string()));
            }
        }

        for material in self.materials.values() {
            if let Some(texture) = &material.texture {
                if !self.textures.contains_key(texture) {
                    return Err(SceneError::UnknownTexture(texture.clone()));
                }
            }
        }

        Ok(())
    }
}
