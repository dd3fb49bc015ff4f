//! Lux renderer - CPU Monte Carlo path tracing
//!
//! Estimates the radiance reaching a pinhole camera through each pixel of a
//! sphere scene and accumulates it into a frame buffer for PPM/PNG output.

mod camera;
mod description;
mod framebuffer;
mod hittable;
mod integrator;
mod material;
mod random;
mod renderer;
mod scene;
mod sphere;

pub use camera::Camera;
pub use description::{CameraDescription, SceneDescription, SceneFileError, SphereDescription};
pub use framebuffer::{quantize, FrameBuffer, OutputError, OutputResult, DEFAULT_GAMMA};
pub use hittable::{HitRecord, Hittable};
pub use integrator::{IntegratorConfig, PathIntegrator, PathSample};
pub use material::{Color, Material};
pub use random::{cosine_hemisphere, row_rng, stream_seed, HemisphereSample, RandomSource};
pub use renderer::{
    render, render_pass, render_with_progress, CancelToken, RenderConfig, RenderError, RenderStats, Rendered,
};
pub use scene::{Scene, SceneError};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Interval, Ray, Vec3};
