//! Builds a small scene in code and renders it.
//!
//! Run with `cargo run --release --example simple_render [out.png]`.

use std::sync::Arc;

use prism_renderer::shapes::{Cone, Cylinder, Ellipsoid, Plane, Sphere, Torus, Triangle};
use prism_renderer::{
    render_parallel, AmbientLight, Camera, Color, DirectionalLight, Material, MaterialKind,
    PointLight, RenderConfig, Scene, SpotLight, Surface, Vec3,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "simple_render.png".to_string());

    let mut camera = Camera::new()
        .with_resolution(640, 360)
        .with_position(Vec3::new(0.0, 1.5, 4.0), Vec3::new(0.0, 0.0, -4.0), Vec3::Y)
        .with_fov(55.0);
    camera.initialize();

    let scene = build_scene();
    let config = RenderConfig {
        samples_per_pixel: 4,
        background: Color::new(0.05, 0.05, 0.1),
        ..Default::default()
    };

    let image = render_parallel(&camera, &scene, &config);
    if let Err(err) = image.save(&output) {
        log::error!("Could not write {}: {}", output, err);
        std::process::exit(1);
    }
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let floor = Arc::new(Material::new(Color::new(0.6, 0.6, 0.65)).with_specular(4.0, 0.1));
    let chrome = Arc::new(
        Material::new(Color::splat(0.95))
            .with_kind(MaterialKind::Reflective)
            .with_specular(128.0, 0.6),
    );
    let glass = Arc::new(
        Material::new(Color::ONE)
            .with_kind(MaterialKind::Transparent)
            .with_ior(1.5)
            .with_specular(256.0, 0.9),
    );
    let pink = Arc::new(Material::new(Color::new(0.95, 0.35, 0.6)).with_specular(32.0, 0.3));
    let teal = Arc::new(Material::new(Color::new(0.2, 0.7, 0.7)).with_specular(16.0, 0.2));

    scene.add_surface(Surface::new(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y), floor));
    scene.add_surface(Surface::new(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0), chrome.clone()));
    scene.add_surface(Surface::new(Sphere::new(Vec3::new(1.6, -0.4, -2.5), 0.6), glass.clone()));
    scene.add_surface(Surface::new(Torus::new(Vec3::new(-1.8, 0.0, -3.0), 0.6, 0.2), pink.clone()));
    scene.add_surface(Surface::new(Cylinder::new(Vec3::new(2.8, -1.0, -5.0), 0.4, 1.8), teal.clone()));
    scene.add_surface(Surface::new(Cone::new(Vec3::new(-3.0, -1.0, -5.5), 0.6, 1.6), teal));
    scene.add_surface(Surface::new(
        Ellipsoid::new(Vec3::new(0.0, 2.2, -6.0), Vec3::new(1.5, 0.4, 0.4)),
        pink,
    ));
    scene.add_surface(Surface::new(
        Triangle::new(
            Vec3::new(-4.0, -1.0, -8.0),
            Vec3::new(4.0, -1.0, -8.0),
            Vec3::new(0.0, 4.0, -8.0),
        ),
        chrome,
    ));
    scene.add_surface(Surface::new(Sphere::new(Vec3::new(-0.8, -0.7, -1.8), 0.3), glass));

    scene.add_light(DirectionalLight::new(Vec3::new(-0.5, -1.0, -0.8), Color::ONE, 0.7));
    scene.add_light(PointLight::new(Vec3::new(2.0, 3.0, -1.0), Color::new(1.0, 0.8, 0.6), 8.0));
    scene.add_light(SpotLight::new(
        Vec3::new(-2.0, 4.0, -3.0),
        Vec3::new(0.3, -1.0, 0.0),
        20.0,
        30.0,
        Color::new(0.6, 0.7, 1.0),
        20.0,
    ));
    scene.add_light(AmbientLight::new(Color::ONE, 0.1));

    scene
}
