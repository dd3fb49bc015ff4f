//! Simple path tracer example.
//!
//! Renders the reference scene plus a mirror ball and saves to PPM format.

use lux_renderer::{
    render, CancelToken, Material, RenderConfig, SceneDescription, SphereDescription, Vec3,
};
use std::path::Path;

fn main() {
    println!("Lux Path Tracer - Simple Example");
    println!("================================");

    let mut description = SceneDescription::reference();
    description.spheres.push(SphereDescription {
        center: Vec3::new(0.0, 1.6, 1.5),
        radius: 0.6,
        material: Material::Mirror,
    });
    description.render = RenderConfig {
        width: 320,
        height: 240,
        passes: 32,
        seed: 1,
        ..Default::default()
    };

    let start = std::time::Instant::now();
    let (camera, scene) = description.build().expect("Invalid scene");
    println!("Scene built in {:?}", start.elapsed());

    println!(
        "Rendering {}x{} @ {} spp...",
        description.render.width, description.render.height, description.render.passes
    );

    let start = std::time::Instant::now();
    let rendered = render(&camera, &scene, &description.render, &CancelToken::new())
        .expect("Render failed");
    println!(
        "Rendered in {:?} ({:.2} bounces/sample)",
        start.elapsed(),
        rendered.stats.mean_bounces()
    );

    let mut image = rendered.image;
    image.gamma_correct(description.render.gamma);

    let filename = "output.ppm";
    image.save(Path::new(filename)).expect("Failed to save image");
    println!("Saved to {}", filename);
}
