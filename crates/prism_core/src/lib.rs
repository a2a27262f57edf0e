//! Prism Core - scene description and texture collaborators.
//!
//! This crate provides:
//!
//! - **Textures**: `Texture` (UV sampling), `EnvironmentMap` (direction
//!   sampling) and `TextureCache` for load-once sharing
//! - **Scene description**: serde types for JSON scene files and a loader
//!
//! # Example
//!
//! ```ignore
//! use prism_core::scene::load_scene;
//!
//! let desc = load_scene("demos/vaporwave.json")?;
//! println!("{} surfaces, {} lights", desc.surfaces.len(), desc.lights.len());
//! ```

pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use scene::{
    load_scene, load_scene_from_str, CameraDesc, LightDesc, MaterialDesc, MaterialKindDesc,
    SceneDescription, SceneError, SceneResult, SurfaceDesc,
};
pub use texture::{EnvironmentMap, Texture, TextureCache, TextureError, TextureResult};
