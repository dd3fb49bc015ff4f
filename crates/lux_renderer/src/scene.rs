//! Scene container and scene configuration errors.

use crate::{
    hittable::{HitRecord, Hittable},
    Color, Sphere,
};
use lux_math::{Interval, Ray, Vec3};
use thiserror::Error;

/// Errors raised while building a scene, a camera or a render configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Invalid sphere radius: {0} (must be positive and finite)")]
    InvalidRadius(f32),

    #[error("Position is not finite: {0}")]
    NonFinitePosition(Vec3),

    #[error("Invalid diffuse albedo: {0} (must be finite and non-negative)")]
    InvalidAlbedo(Color),

    #[error("Degenerate camera direction: {0}")]
    DegenerateDirection(Vec3),

    #[error("Camera forward direction is parallel to up vector {0}")]
    ParallelUpVector(Vec3),

    #[error("Invalid field of view: {0} degrees (must be within (0, 180))")]
    InvalidFieldOfView(f32),

    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f32),

    #[error("Image has no pixels: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("At least one supersample pass is required")]
    NoPasses,

    #[error("Invalid gamma exponent: {0} (must be positive and finite)")]
    InvalidGamma(f32),

    #[error("Invalid sky color: {0} (must be finite and non-negative)")]
    InvalidSky(Color),

    #[error("Invalid ray epsilon: {0} (must be positive and finite)")]
    InvalidRayEpsilon(f32),

    #[error("Invalid survival decay: {0} (must be within (0, 1])")]
    InvalidSurvivalDecay(f32),
}

/// An ordered, append-only collection of spheres.
///
/// Spheres are added during setup through `&mut Scene`; rendering only ever
/// holds `&Scene`, which is what makes unsynchronized concurrent reads safe.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Sphere>,
}

impl Scene {
    /// Lower bound on hit distance, keeps rays from re-hitting their origin.
    pub const HIT_EPSILON: f32 = 1e-3;

    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sphere.
    pub fn add(&mut self, sphere: Sphere) {
        self.objects.push(sphere);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Sphere] {
        &self.objects
    }

    /// Closest hit along `ray` beyond [`Scene::HIT_EPSILON`], if any.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.hit(ray, Interval::new(Self::HIT_EPSILON, f32::INFINITY))
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        // surrounds() is strict, so an exact tie keeps the earlier object
        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
