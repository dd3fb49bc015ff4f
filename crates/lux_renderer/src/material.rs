//! Surface materials.

use crate::SceneError;
use lux_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB, unbounded during light transport)
pub type Color = Vec3;

/// How a surface interacts with light.
///
/// The set is closed: the integrator matches on it exhaustively, so adding a
/// variant is a compile-time checked change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    /// Lambertian reflector with the given albedo.
    Diffuse { albedo: Color },
    /// Ideal specular reflector. Reflects all incoming light unattenuated.
    Mirror,
    /// Terminates every path that reaches it.
    Absorbing,
}

impl Material {
    /// Create a diffuse material with the given albedo color.
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse { albedo }
    }

    /// Check the material parameters are physically meaningful.
    pub fn validate(&self) -> Result<(), SceneError> {
        match *self {
            Material::Diffuse { albedo } => {
                if !albedo.is_finite() || albedo.min_element() < 0.0 {
                    return Err(SceneError::InvalidAlbedo(albedo));
                }
                Ok(())
            }
            Material::Mirror | Material::Absorbing => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffuse_validation() {
        assert!(Material::diffuse(Color::new(0.0, 0.9, 0.0)).validate().is_ok());
        assert_eq!(
            Material::diffuse(Color::new(-0.1, 0.5, 0.5)).validate(),
            Err(SceneError::InvalidAlbedo(Color::new(-0.1, 0.5, 0.5)))
        );
        assert!(Material::diffuse(Color::new(f32::NAN, 0.5, 0.5))
            .validate()
            .is_err());
    }

    #[test]
    fn test_material_json_tags() {
        let mirror: Material = serde_json::from_str(r#"{"type": "mirror"}"#).unwrap();
        assert_eq!(mirror, Material::Mirror);

        let diffuse: Material =
            serde_json::from_str(r#"{"type": "diffuse", "albedo": [0.8, 0.8, 0.8]}"#).unwrap();
        assert_eq!(diffuse, Material::diffuse(Color::splat(0.8)));

        let absorbing: Material = serde_json::from_str(r#"{"type": "absorbing"}"#).unwrap();
        assert_eq!(absorbing, Material::Absorbing);
    }
}
