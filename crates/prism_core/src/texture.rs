//! Texture loading, sampling and caching.
//!
//! Textures are the renderer's only image inputs: surface textures are
//! sampled by UV, environment maps by direction. Both are immutable once
//! loaded and shared through `Arc`, so any number of render threads can
//! sample them concurrently.

use std::collections::HashMap;
use std::f32::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use prism_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported texture format: {0}")]
    UnsupportedFormat(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
///
/// Stores pixels in linear RGB float format for rendering.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data (linear, 0-1 range), row-major, top row first
    pub pixels: Vec<Vec3>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    ///
    /// `pixels` must hold `width * height` entries; missing entries read as black.
    pub fn new(width: u32, height: u32, pixels: Vec<Vec3>, path: impl Into<String>) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        load_texture_file(path.as_ref())
    }

    /// Sample the texture at UV coordinates (bilinear filtering).
    ///
    /// (0, 0) is the bottom-left texel. `u` wraps around so the seam of a
    /// spherical mapping is continuous; `v` is clamped to [0, 1] so the poles
    /// do not bleed into each other.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let u = if u.is_finite() { u.rem_euclid(1.0) } else { 0.0 };
        let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };

        // Convert to pixel coordinates
        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image coordinates

        let x0 = (x.floor() as u32).min(self.width - 1);
        let y0 = (y.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let top = self.get_pixel(x0, y0).lerp(self.get_pixel(x1, y0), fx);
        let bottom = self.get_pixel(x0, y1).lerp(self.get_pixel(x1, y1), fx);

        top.lerp(bottom, fy)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Vec3 {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Vec3::ZERO)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Vec3>()
    }
}

/// A texture looked up by world direction instead of UV.
#[derive(Clone, Debug)]
pub struct EnvironmentMap {
    texture: Arc<Texture>,
}

impl EnvironmentMap {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self { texture }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Sample the map in the given direction using a latitude/longitude
    /// projection: the horizontal angle around +Y maps to `u`, the angle
    /// down from +Y maps to `v` (top row is straight up).
    ///
    /// A zero direction returns black.
    pub fn sample_direction(&self, direction: Vec3) -> Vec3 {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return Vec3::ZERO;
        }

        let (u, v) = direction_to_uv(dir);
        self.texture.sample(u, v)
    }
}

/// Spherical projection of a unit direction onto [0, 1]^2.
pub fn direction_to_uv(dir: Vec3) -> (f32, f32) {
    let u = dir.z.atan2(dir.x) / (2.0 * PI) + 0.5;
    let v = 1.0 - dir.y.clamp(-1.0, 1.0).acos() / PI;
    (u, v)
}

/// Cache for loaded textures.
///
/// Textures are loaded on-demand and cached for reuse.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Set the base directory for resolving relative paths.
    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = Some(base_dir.into());
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(load_texture_file(&full_path)?);

        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Register an in-memory texture under `path`.
    ///
    /// Later `load` calls with the same key return it without touching disk.
    pub fn insert(&mut self, path: impl Into<String>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(path.into(), texture.clone());
        texture
    }

    /// Get a cached texture without loading.
    pub fn get(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    /// Check if a texture is cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.textures.contains_key(path)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a texture from a file path.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    if !path.exists() {
        return Err(TextureError::LoadError(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let format = image::ImageFormat::from_path(path)
        .map_err(|_| TextureError::UnsupportedFormat(path.display().to_string()))?;
    let img = image::open(path).map_err(|e| {
        TextureError::LoadError(format!("Failed to open {} ({:?}): {}", path.display(), format, e))
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    // Channels are taken as stored, no colour-space conversion
    let pixels: Vec<Vec3> = rgb
        .pixels()
        .map(|p| Vec3::new(byte_to_unit(p[0]), byte_to_unit(p[1]), byte_to_unit(p[2])))
        .collect();

    Ok(Texture::new(
        width,
        height,
        pixels,
        path.to_string_lossy().to_string(),
    ))
}

fn byte_to_unit(value: u8) -> f32 {
    value as f32 / 255.0
}
