//! Scene description files.
//!
//! A JSON document describing the camera, the spheres and the render
//! settings. Every field except `spheres` has a default, so a minimal file is
//! just a list of spheres.

use crate::{Camera, Color, Material, RenderConfig, Scene, SceneError, Sphere};
use lux_math::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a scene description.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub eye: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            eye: Camera::DEFAULT_EYE,
            forward: Camera::DEFAULT_FORWARD,
            up: Vec3::Y,
            vfov: Camera::DEFAULT_VFOV,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDescription,
    pub spheres: Vec<SphereDescription>,
    #[serde(default)]
    pub render: RenderConfig,
}

impl SceneDescription {
    /// The built-in scene: a green ball on a white floor flanked by two
    /// smaller green balls, under a white sky.
    pub fn reference() -> Self {
        let green = Material::diffuse(Color::new(0.0, 0.9, 0.0));
        let white = Material::diffuse(Color::splat(0.8));

        Self {
            camera: CameraDescription::default(),
            spheres: vec![
                SphereDescription {
                    center: Vec3::ZERO,
                    radius: 1.0,
                    material: green,
                },
                SphereDescription {
                    center: Vec3::new(0.0, -10001.0, 0.0),
                    radius: 10000.0,
                    material: white,
                },
                SphereDescription {
                    center: Vec3::new(2.5, -0.5, 0.0),
                    radius: 0.5,
                    material: green,
                },
                SphereDescription {
                    center: Vec3::new(-2.5, -0.5, 0.0),
                    radius: 0.5,
                    material: green,
                },
            ],
            render: RenderConfig::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SceneFileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SceneFileError> {
        let json = std::fs::read_to_string(path)?;
        let description = Self::from_json(&json)?;
        log::info!(
            "Loaded {} spheres from {}",
            description.spheres.len(),
            path.display()
        );
        Ok(description)
    }

    /// Validate the description and build the camera and scene.
    ///
    /// The camera aspect ratio follows the render resolution.
    pub fn build(&self) -> Result<(Camera, Scene), SceneError> {
        self.render.validate()?;

        let mut camera = Camera::new()
            .with_position(self.camera.eye, self.camera.forward, self.camera.up)
            .with_fov(self.camera.vfov)
            .with_resolution(self.render.width, self.render.height);
        camera.initialize()?;

        let mut scene = Scene::new();
        for sphere in &self.spheres {
            scene.add(Sphere::new(sphere.center, sphere.radius, sphere.material)?);
        }

        Ok((camera, scene))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scene_builds() {
        let (camera, scene) = SceneDescription::reference().build().unwrap();

        assert_eq!(scene.len(), 4);
        assert_eq!(camera.eye(), Vec3::new(0.0, 0.0, -3.0));
        // The center ray hits the green sphere at z = -1
        let rec = scene.nearest_hit(&camera.get_ray(0.0, 0.0)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let description = SceneDescription::from_json(
            r#"{
                "spheres": [
                    { "center": [0, 0, 0], "radius": 1, "material": { "type": "mirror" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(description.camera, CameraDescription::default());
        assert_eq!(description.render, RenderConfig::default());
        assert_eq!(description.spheres[0].material, Material::Mirror);
    }

    #[test]
    fn test_partial_render_section() {
        let description = SceneDescription::from_json(
            r#"{
                "spheres": [],
                "render": { "width": 64, "passes": 3, "integrator": { "max_depth": 8 } }
            }"#,
        )
        .unwrap();

        assert_eq!(description.render.width, 64);
        assert_eq!(description.render.height, 512);
        assert_eq!(description.render.passes, 3);
        assert_eq!(description.render.integrator.max_depth, 8);
        assert_eq!(description.render.integrator.survival_decay, 0.96);
    }

    #[test]
    fn test_degenerate_sphere_fails_build() {
        let description = SceneDescription::from_json(
            r#"{
                "spheres": [
                    { "center": [0, 0, 0], "radius": 0, "material": { "type": "absorbing" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(description.build().unwrap_err(), SceneError::InvalidRadius(0.0));
    }

    #[test]
    fn test_out_of_range_render_settings_fail_build() {
        let negative_sky = SceneDescription::from_json(
            r#"{ "spheres": [], "render": { "integrator": { "sky": [-1, 0.5, 0.5] } } }"#,
        )
        .unwrap();
        assert_eq!(
            negative_sky.build().unwrap_err(),
            SceneError::InvalidSky(Color::new(-1.0, 0.5, 0.5))
        );

        let bad_epsilon = SceneDescription::from_json(
            r#"{ "spheres": [], "render": { "integrator": { "ray_epsilon": -0.5 } } }"#,
        )
        .unwrap();
        assert_eq!(bad_epsilon.build().unwrap_err(), SceneError::InvalidRayEpsilon(-0.5));

        let bad_gamma = SceneDescription::from_json(r#"{ "spheres": [], "render": { "gamma": -1.0 } }"#)
            .unwrap();
        assert_eq!(bad_gamma.build().unwrap_err(), SceneError::InvalidGamma(-1.0));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = SceneDescription::from_json(r#"{ "spheres": [ { "radius": 1 } ] }"#).unwrap_err();
        assert!(matches!(err, SceneFileError::Parse(_)));
    }

    #[test]
    fn test_reference_roundtrips_through_json() {
        let reference = SceneDescription::reference();
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(SceneDescription::from_json(&json).unwrap(), reference);
    }
}
