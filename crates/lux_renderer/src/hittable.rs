//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Sphere};
use lux_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Lives only as long as the query that produced it; it borrows the
/// primitive that was hit.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// The primitive that was hit
    pub object: &'a Sphere,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` to face the incoming ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, object: &'a Sphere) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            t,
            p: ray.at(t),
            normal,
            front_face,
            object,
        }
    }

    /// Material of the primitive that was hit.
    #[inline]
    pub fn material(&self) -> &'a Material {
        self.object.material()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection whose parameter lies strictly inside
    /// `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}
