//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, SceneError,
};
use lux_math::{Interval, Ray, Vec3};

/// A sphere primitive.
///
/// Created once during scene setup and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Rejects zero, negative and non-finite radii, non-finite centers and
    /// invalid material parameters, so NaNs never reach the integrator.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Result<Self, SceneError> {
        if !center.is_finite() {
            return Err(SceneError::NonFinitePosition(center));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }
        material.validate()?;

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if a <= 0.0 {
            return None;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn grey_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Material::diffuse(Color::splat(0.5))).unwrap()
    }

    #[test]
    fn test_hit_distance_is_origin_distance_minus_radius() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray aimed at center must hit");

        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn test_hit_distance_off_axis() {
        let sphere = grey_sphere(Vec3::ZERO, 2.5);
        let origin = Vec3::new(3.0, 4.0, 12.0);
        let ray = Ray::new(origin, (-origin).normalize());

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();

        assert!((rec.t - (13.0 - 2.5)).abs() < 1e-4);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_hit_outside_interval_is_rejected() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        // Both roots (4 and 6) lie beyond t_max
        assert!(sphere.hit(&ray, Interval::new(0.001, 3.0)).is_none());
        // Near root excluded, far root accepted
        let rec = sphere.hit(&ray, Interval::new(4.5, 10.0)).unwrap();
        assert!((rec.t - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_inside_hit_flips_normal() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();

        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_offset_continuation_does_not_self_intersect() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let rec = sphere
            .hit(&Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z), Interval::new(0.001, f32::INFINITY))
            .unwrap();

        let origin = rec.p + 1e-3 * rec.normal;
        let directions = [
            rec.normal,
            (rec.normal + Vec3::X).normalize(),
            (rec.normal + 10.0 * Vec3::Y).normalize(),
        ];
        for dir in directions {
            let continuation = Ray::new(origin, dir);
            assert!(
                sphere
                    .hit(&continuation, Interval::new(0.001, f32::INFINITY))
                    .is_none(),
                "continuation along {dir} re-hit its own sphere"
            );
        }
    }

    #[test]
    fn test_degenerate_configurations_rejected() {
        let mat = Material::Mirror;
        assert_eq!(
            Sphere::new(Vec3::ZERO, 0.0, mat),
            Err(SceneError::InvalidRadius(0.0))
        );
        assert_eq!(
            Sphere::new(Vec3::ZERO, -1.0, mat),
            Err(SceneError::InvalidRadius(-1.0))
        );
        assert!(matches!(
            Sphere::new(Vec3::ZERO, f32::NAN, mat),
            Err(SceneError::InvalidRadius(_))
        ));
        assert!(matches!(
            Sphere::new(Vec3::new(f32::INFINITY, 0.0, 0.0), 1.0, mat),
            Err(SceneError::NonFinitePosition(_))
        ));
    }

    #[test]
    fn test_zero_direction_never_hits() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO);
        assert!(sphere.hit(&ray, Interval::new(f32::NEG_INFINITY, f32::INFINITY)).is_none());
    }
}
