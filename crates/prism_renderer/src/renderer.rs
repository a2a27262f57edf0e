//! Ray-cast orchestration: primary rays, depth-limited secondary rays and
//! the frame buffer.

use std::path::Path;
use std::time::Instant;

use prism_math::{Interval, Ray, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::material::shade;
use crate::scene::{Scene, SurfaceId};
use crate::{Camera, Color, Intercept, Light, HIT_EPSILON};

/// Errors raised when writing a finished frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Frame buffer is empty")]
    EmptyFrame,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel; 1 shoots a single ray through the pixel centre
    pub samples_per_pixel: u32,
    /// Deepest reflection/refraction level that is still traced
    pub max_depth: u32,
    /// Color for primary rays that miss when there is no environment map
    pub background: Color,
    /// Edge length of the square tiles used by the parallel renderer
    pub bucket_size: u32,
    /// Minimum hit distance, so rays leaving a surface do not hit it again
    pub hit_epsilon: f32,
    /// Normal offset for refraction and glass reflection origins
    pub bias: f32,
    /// Seed for jittered sampling
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            max_depth: 5,
            background: Color::ZERO,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
            hit_epsilon: HIT_EPSILON,
            bias: 0.001,
            seed: 0,
        }
    }
}

/// Read-only view of a scene used while shading.
///
/// Holds everything a shading call may need to cast more rays; cheap to
/// copy and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
    viewer: Vec3,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig, viewer: Vec3) -> Self {
        Self {
            scene,
            config,
            viewer,
        }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn config(&self) -> &'a RenderConfig {
        self.config
    }

    /// Position specular highlights are seen from.
    pub fn viewer(&self) -> Vec3 {
        self.viewer
    }

    /// Nearest intercept for a ray at recursion level `depth`.
    ///
    /// Rays deeper than `max_depth` are not cast at all.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        exclude: Option<SurfaceId>,
        depth: u32,
    ) -> Option<Intercept<'a>> {
        if depth > self.config.max_depth {
            return None;
        }

        self.scene.cast_ray(
            origin,
            direction,
            exclude,
            Interval::beyond(self.config.hit_epsilon),
        )
    }

    /// Color seen by a secondary ray: the shaded hit, or the environment
    /// when the ray escapes or is too deep to cast.
    pub fn trace(&self, origin: Vec3, direction: Vec3, exclude: Option<SurfaceId>, depth: u32) -> Color {
        match self.cast_ray(origin, direction, exclude, depth) {
            Some(hit) => shade(&hit, self, depth),
            None => self.scene.env_map_color(origin, direction),
        }
    }

    /// Color seen by a camera ray. Misses show the environment map, or the
    /// background color when there is none.
    pub fn trace_primary(&self, ray: &Ray) -> Color {
        match self.cast_ray(ray.origin(), ray.direction(), None, 0) {
            Some(hit) => shade(&hit, self, 0),
            None if self.scene.environment().is_some() => {
                self.scene.env_map_color(ray.origin(), ray.direction())
            }
            None => self.config.background,
        }
    }

    /// Whether another surface blocks `light` from the intercept.
    ///
    /// Directional lights are blocked by anything along the way; point and
    /// spot lights only by surfaces closer than the light itself.
    pub fn is_shadowed(&self, intercept: &Intercept<'_>, light: &Light) -> bool {
        let Some((direction, distance)) = light.shadow_ray(intercept.point) else {
            return false;
        };

        self.scene
            .cast_ray(
                intercept.point,
                direction,
                Some(intercept.surface_id),
                Interval::new(self.config.hit_epsilon, distance),
            )
            .is_some()
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGB. No gamma is applied, so a texel loaded
/// from byte `n` is written back as `n`.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_01(color.x)).round() as u8;
    let g = (255.0 * clamp_01(color.y)).round() as u8;
    let b = (255.0 * clamp_01(color.z)).round() as u8;
    [r, g, b]
}

/// Per-pixel RNG seed, so every pixel samples the same way no matter which
/// thread renders it.
fn pixel_seed(seed: u64, x: u32, y: u32) -> u64 {
    seed ^ (x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
}

/// Render a single pixel.
pub fn render_pixel(camera: &Camera, tracer: &Tracer<'_>, x: u32, y: u32) -> Color {
    let samples = tracer.config().samples_per_pixel.max(1);
    if samples == 1 {
        return tracer.trace_primary(&camera.get_ray(x, y, Vec2::ZERO));
    }

    let mut rng = StdRng::seed_from_u64(pixel_seed(tracer.config().seed, x, y));
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let offset = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5);
        let ray = camera.get_ray(x, y, offset);
        pixel_color += tracer.trace_primary(&ray);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Row-major frame buffer, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to RGB bytes, each channel clamped to [0, 1] first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Write the frame to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyFrame);
        }

        let image = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8())
            .ok_or(RenderError::EmptyFrame)?;
        image.save(path.as_ref())?;

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let tracer = Tracer::new(scene, config, camera.position());
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, &tracer, x, y);
            image.set(x, y, color);
        }
    }

    log::info!(
        "Rendered {}x{} in {:.2?}",
        camera.image_width,
        camera.image_height,
        start.elapsed()
    );

    image
}
