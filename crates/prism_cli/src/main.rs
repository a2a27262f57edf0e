//! `prism`: render a JSON scene file to an image.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use prism_core::{load_scene, TextureCache};
use prism_renderer::{render, render_parallel, Camera, RenderConfig, Scene};

/// Render a scene description with the Prism ray tracer.
#[derive(Parser, Debug)]
#[command(name = "prism", version, about)]
struct Args {
    /// Scene file (JSON)
    scene: PathBuf,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "output.bmp")]
    output: PathBuf,

    /// Override the scene's image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the scene's image height
    #[arg(long)]
    height: Option<u32>,

    /// Deepest reflection/refraction level to trace
    #[arg(long)]
    max_depth: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Bucket edge length for the parallel renderer
    #[arg(long)]
    bucket_size: Option<u32>,

    /// Seed for jittered sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Render on the calling thread only
    #[arg(long)]
    single_threaded: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Loading scene {}", args.scene.display());

    let start = Instant::now();
    let mut desc = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    if let Some(width) = args.width {
        desc.camera.width = width;
    }
    if let Some(height) = args.height {
        desc.camera.height = height;
    }

    let mut cache = TextureCache::new();
    let scene = Scene::from_description(&desc, &mut cache).context("Failed to build scene")?;
    let camera = Camera::from_description(&desc.camera).context("Invalid camera")?;
    let config = render_config(&args, RenderConfig::from_description(&desc));

    log::info!(
        "Scene ready in {:.2?}: {} surfaces, {} lights, {} textures",
        start.elapsed(),
        scene.surfaces().len(),
        scene.lights().len(),
        cache.len()
    );
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        config.max_depth
    );

    let image = if args.single_threaded {
        render(&camera, &scene, &config)
    } else {
        render_parallel(&camera, &scene, &config)
    };

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Done in {:.2?}", start.elapsed());
    Ok(())
}

/// Apply command-line overrides on top of the scene's configuration.
fn render_config(args: &Args, mut config: RenderConfig) -> RenderConfig {
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples.max(1);
    }
    if let Some(bucket_size) = args.bucket_size {
        config.bucket_size = bucket_size;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config
}
