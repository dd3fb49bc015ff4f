//! Pinhole camera for ray generation.

use crate::SceneError;
use lux_math::{Ray, Vec3};

/// Pinhole camera mapping normalized image-plane coordinates to rays.
///
/// All rays leave the fixed eye point. `u` grows to the right and `v` grows
/// downward, matching pixel column and row order, both spanning `[-1, 1]`
/// across the image.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    eye: Vec3,
    forward: Vec3,
    up: Vec3,

    // Lens settings
    vfov: f32,         // Vertical field of view in degrees
    aspect_ratio: f32, // Image width / height

    // Cached computed values (set by initialize())
    w: Vec3,
    right: Vec3,
    down: Vec3,
}

impl Camera {
    /// Reference eye position.
    pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 0.0, -3.0);
    /// Reference viewing direction.
    pub const DEFAULT_FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    /// A 90 degree field of view puts the unit-distance image plane at [-1, 1].
    pub const DEFAULT_VFOV: f32 = 90.0;

    /// Create a camera at the reference position, ready to generate rays.
    pub fn new() -> Self {
        let mut camera = Self {
            eye: Self::DEFAULT_EYE,
            forward: Self::DEFAULT_FORWARD,
            up: Vec3::Y,
            vfov: Self::DEFAULT_VFOV,
            aspect_ratio: 1.0,
            w: Vec3::Z,
            right: Vec3::ZERO,
            down: Vec3::ZERO,
        };
        camera.update_basis();
        camera
    }

    /// Set camera position and orientation.
    pub fn with_position(mut self, eye: Vec3, forward: Vec3, up: Vec3) -> Self {
        self.eye = eye;
        self.forward = forward;
        self.up = up;
        self.update_basis();
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self.update_basis();
        self
    }

    /// Match the image-plane aspect ratio to an image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.aspect_ratio = width as f32 / height.max(1) as f32;
        self.update_basis();
        self
    }

    /// Validate settings and recompute the cached basis.
    pub fn initialize(&mut self) -> Result<(), SceneError> {
        if !self.eye.is_finite() {
            return Err(SceneError::NonFinitePosition(self.eye));
        }
        if !self.forward.is_finite() || self.forward.length_squared() <= f32::EPSILON {
            return Err(SceneError::DegenerateDirection(self.forward));
        }
        if !self.up.is_finite() || self.up.length_squared() <= f32::EPSILON {
            return Err(SceneError::DegenerateDirection(self.up));
        }
        if self.forward.normalize().cross(self.up.normalize()).length_squared() <= 1e-10 {
            return Err(SceneError::ParallelUpVector(self.up));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidFieldOfView(self.vfov));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(SceneError::InvalidAspectRatio(self.aspect_ratio));
        }

        self.update_basis();
        Ok(())
    }

    fn update_basis(&mut self) {
        let half_height = (self.vfov.to_radians() / 2.0).tan();
        let half_width = half_height * self.aspect_ratio;

        self.w = self.forward.normalize();
        let right = self.w.cross(self.up).normalize();
        let true_up = right.cross(self.w);

        self.right = right * half_width;
        self.down = -true_up * half_height;
    }

    /// Generate the ray through image-plane point `(u, v)`.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let direction = (self.w + u * self.right + v * self.down).normalize();
        Ray::new(self.eye, direction)
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
