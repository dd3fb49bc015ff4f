//! Supersampled render driver.
//!
//! Runs the configured number of supersample passes over the full pixel
//! grid. Passes run one after another; inside a pass rows are spread over
//! the rayon pool, each row owned by exactly one worker with its own
//! generator. Every pixel cell therefore has a single writer at any time and
//! accumulation needs no atomics.

use crate::{
    framebuffer::DEFAULT_GAMMA, random::row_rng, Camera, FrameBuffer, IntegratorConfig,
    PathIntegrator, PathSample, RandomSource, Scene, SceneError,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Errors that can stop a render before it starts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    Config(#[from] SceneError),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Supersample passes over the full image (samples per pixel)
    pub passes: u32,
    /// Seed for every per-row generator
    pub seed: u64,
    /// Worker threads, 0 uses the global rayon pool
    pub threads: usize,
    /// Gamma exponent applied before output
    pub gamma: f32,
    /// Path integrator settings
    pub integrator: IntegratorConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            passes: 10,
            seed: 0,
            threads: 0,
            gamma: DEFAULT_GAMMA,
            integrator: IntegratorConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.passes == 0 {
            return Err(SceneError::NoPasses);
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(SceneError::InvalidGamma(self.gamma));
        }
        self.integrator.validate()
    }
}

/// Cooperative cancellation flag, checked between passes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Path statistics gathered while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Camera samples traced
    pub samples: u64,
    /// Scattering events over all paths
    pub bounces: u64,
    /// Paths cut off at the depth ceiling
    pub truncated: u64,
}

impl RenderStats {
    fn record(&mut self, sample: &PathSample) {
        self.samples += 1;
        self.bounces += sample.bounces as u64;
        self.truncated += sample.truncated as u64;
    }

    /// Mean path length in bounces.
    pub fn mean_bounces(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.bounces as f64 / self.samples as f64
        }
    }
}

impl Add for RenderStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            samples: self.samples + other.samples,
            bounces: self.bounces + other.bounces,
            truncated: self.truncated + other.truncated,
        }
    }
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Output of [`render`].
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Linear radiance, not yet gamma corrected
    pub image: FrameBuffer,
    /// Passes that finished before cancellation (all of them if not cancelled)
    pub passes_completed: u32,
    pub stats: RenderStats,
}

/// Map a pixel coordinate plus jitter to `[-1, 1]`.
#[inline]
fn to_ndc(index: u32, jitter: f32, extent: u32) -> f32 {
    (2.0 * (index as f32 + jitter) - extent as f32) / extent as f32
}

/// Render one supersample pass, adding `radiance * weight` to every pixel.
pub fn render_pass(
    camera: &Camera,
    scene: &Scene,
    integrator: &PathIntegrator,
    config: &RenderConfig,
    pass: u32,
    weight: f32,
    image: &mut FrameBuffer,
) -> RenderStats {
    let width = image.width();
    let height = image.height();

    image
        .pixels_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .map(|(j, row)| {
            let j = j as u32;
            let mut rng = row_rng(config.seed, pass, j);
            let mut stats = RenderStats::default();

            for (i, cell) in row.iter_mut().enumerate() {
                // Jitter draws: u first, then v
                let u = to_ndc(i as u32, rng.uniform(), width);
                let v = to_ndc(j, rng.uniform(), height);
                let ray = camera.get_ray(u, v);

                let sample = integrator.trace(scene, &ray, &mut rng);
                *cell += sample.radiance * weight;
                stats.record(&sample);
            }

            stats
        })
        .reduce(RenderStats::default, |a, b| a + b)
}

/// Render the scene, honoring `cancel` between passes.
///
/// If cancelled after `k` of `n` passes the image is rescaled by `n / k`, so
/// it remains an unbiased (noisier) estimate.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> Result<Rendered, RenderError> {
    render_with_progress(camera, scene, config, cancel, |_| {})
}

/// Like [`render`], calling `on_pass` with the number of finished passes
/// after each one.
pub fn render_with_progress<F>(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
    mut on_pass: F,
) -> Result<Rendered, RenderError>
where
    F: FnMut(u32) + Send,
{
    config.validate()?;

    if config.threads == 0 {
        Ok(render_passes(camera, scene, config, cancel, &mut on_pass))
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        Ok(pool.install(|| render_passes(camera, scene, config, cancel, &mut on_pass)))
    }
}

fn render_passes(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
    on_pass: &mut (dyn FnMut(u32) + Send),
) -> Rendered {
    let integrator = PathIntegrator::new(config.integrator);
    let mut image = FrameBuffer::new(config.width, config.height);
    let mut stats = RenderStats::default();
    let weight = 1.0 / config.passes as f32;
    let mut passes_completed = 0;

    log::info!(
        "Rendering {}x{} @ {} passes, {} objects, {} threads",
        config.width,
        config.height,
        config.passes,
        scene.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    for pass in 0..config.passes {
        if cancel.is_cancelled() {
            log::warn!("Render cancelled after {}/{} passes", pass, config.passes);
            break;
        }

        let pass_start = Instant::now();
        stats += render_pass(camera, scene, &integrator, config, pass, weight, &mut image);
        passes_completed += 1;
        log::debug!(
            "Pass {}/{} done in {:?}",
            passes_completed,
            config.passes,
            pass_start.elapsed()
        );
        on_pass(passes_completed);
    }

    if passes_completed > 0 && passes_completed < config.passes {
        image.scale(config.passes as f32 / passes_completed as f32);
    }

    log::info!(
        "Rendered in {:?}: {} samples, {:.2} bounces/sample",
        start.elapsed(),
        stats.samples,
        stats.mean_bounces()
    );
    if stats.truncated > 0 {
        log::warn!(
            "{} paths reached the depth ceiling of {} bounces",
            stats.truncated,
            config.integrator.max_depth
        );
    }

    Rendered {
        image,
        passes_completed,
        stats,
    }
}
