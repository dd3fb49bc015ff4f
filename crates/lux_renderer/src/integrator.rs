//! Monte Carlo path integrator.
//!
//! Estimates the radiance arriving along a ray by following a single path
//! through the scene:
//! - Russian roulette termination with `1/p` reweighting of survivors
//! - Cosine-weighted hemisphere sampling on diffuse surfaces
//! - Perfect specular reflection on mirrors
//!
//! The estimator is recursive by nature (each bounce multiplies the radiance
//! of the next one by a per-bounce factor). It is evaluated here as a loop
//! carrying the running product of those factors, so path length never
//! touches the call stack.

use crate::{random::cosine_hemisphere, Color, Material, RandomSource, Scene, SceneError};
use lux_math::{reflect, Ray};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Integrator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Factor applied to the survival probability after every roulette test
    pub survival_decay: f32,
    /// Radiance of rays that escape the scene
    pub sky: Color,
    /// Offset along the normal for continuation rays
    pub ray_epsilon: f32,
    /// Bounce ceiling; paths still alive past it are dropped
    pub max_depth: u32,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            survival_decay: 0.96,
            sky: Color::ONE,
            ray_epsilon: 1e-3,
            max_depth: 512,
        }
    }
}

impl IntegratorConfig {
    /// Reject settings that would make the estimator negative, biased or
    /// self-intersecting.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.sky.is_finite() || self.sky.min_element() < 0.0 {
            return Err(SceneError::InvalidSky(self.sky));
        }
        if !(self.ray_epsilon.is_finite() && self.ray_epsilon > 0.0) {
            return Err(SceneError::InvalidRayEpsilon(self.ray_epsilon));
        }
        if !(self.survival_decay > 0.0 && self.survival_decay <= 1.0) {
            return Err(SceneError::InvalidSurvivalDecay(self.survival_decay));
        }
        Ok(())
    }
}

/// Result of tracing one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Estimated incoming radiance
    pub radiance: Color,
    /// Number of scattering events along the path
    pub bounces: u32,
    /// Whether the path was cut off at the depth ceiling
    pub truncated: bool,
}

impl PathSample {
    fn terminated(bounces: u32) -> Self {
        Self {
            radiance: Color::ZERO,
            bounces,
            truncated: false,
        }
    }
}

/// Path tracing estimator over a [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct PathIntegrator {
    config: IntegratorConfig,
}

impl PathIntegrator {
    pub fn new(config: IntegratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Estimate the radiance arriving along `ray`.
    pub fn radiance(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RandomSource) -> Color {
        self.trace(scene, ray, rng).radiance
    }

    /// Trace one path and report its radiance and length.
    pub fn trace(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RandomSource) -> PathSample {
        let mut ray = *ray;
        let mut throughput = Color::ONE;
        let mut survival = 1.0_f32;
        let mut bounces = 0;

        loop {
            // Russian roulette. The weight applied below uses the decayed
            // probability, which is the one the next bounce is tested with.
            if rng.uniform() > survival {
                return PathSample::terminated(bounces);
            }
            survival *= self.config.survival_decay;

            let Some(rec) = scene.nearest_hit(&ray) else {
                return PathSample {
                    radiance: throughput * self.config.sky,
                    bounces,
                    truncated: false,
                };
            };

            if bounces >= self.config.max_depth {
                return PathSample {
                    radiance: Color::ZERO,
                    bounces,
                    truncated: true,
                };
            }

            let origin = rec.p + self.config.ray_epsilon * rec.normal;
            match *rec.material() {
                Material::Diffuse { albedo } => {
                    let sample = cosine_hemisphere(rec.normal, rng);
                    if sample.pdf <= 0.0 {
                        return PathSample::terminated(bounces);
                    }
                    // The cosine is applied explicitly even though 1/pdf
                    // cancels it in expectation.
                    let cos_term = sample.direction.dot(rec.normal).max(0.0);
                    throughput *= (1.0 / survival) * (1.0 / sample.pdf) * cos_term * (albedo / PI);
                    ray = Ray::new(origin, sample.direction);
                }
                Material::Mirror => {
                    throughput *= 1.0 / survival;
                    ray = Ray::new(origin, reflect(ray.direction(), rec.normal));
                }
                Material::Absorbing => return PathSample::terminated(bounces),
            }
            bounces += 1;
        }
    }
}
