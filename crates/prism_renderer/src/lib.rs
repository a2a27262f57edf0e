//! Prism ray tracer core.
//!
//! A Whitted-style recursive ray tracer: primary rays from a pinhole camera,
//! hard shadows, mirror reflection and Fresnel-weighted refraction over a
//! closed set of analytic shapes. Every pixel is independent, so frames can
//! be rendered on one thread ([`render`]) or split into buckets across the
//! rayon pool ([`render_parallel`]) with identical results.

mod bucket;
mod builder;
mod camera;
mod intercept;
mod light;
mod material;
mod renderer;
mod scene;
pub mod shapes;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use intercept::{Intercept, SurfaceHit};
pub use light::{AmbientLight, DirectionalLight, Light, PointLight, SpotLight};
pub use material::{fresnel, reflect, refract, shade, total_internal_reflection, Color, Material, MaterialKind};
pub use renderer::{color_to_rgb, render, render_pixel, ImageBuffer, RenderConfig, RenderError, Tracer};
pub use scene::{Scene, Surface, SurfaceId};
pub use shapes::{Hittable, Shape};

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Aabb, Interval, Ray, Vec2, Vec3};

/// Smallest hit distance a ray accepts by default.
pub const HIT_EPSILON: f32 = 1e-5;
