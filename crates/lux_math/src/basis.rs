//! Reflection and local frames around a surface normal.

use crate::Vec3;

/// Reflect a vector about a normal.
///
/// `normal` must be unit length. The result has the same length as
/// `incident`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Build two unit vectors that together with `n` form an orthonormal frame.
///
/// Returns `(tangent, bitangent)` with `bitangent = n x tangent`. `n` must be
/// unit length.
pub fn orthonormal_basis(n: Vec3) -> (Vec3, Vec3) {
    // Pick the world axis least aligned with n so the cross product stays
    // well conditioned.
    let helper = if n.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let tangent = helper.cross(n).normalize();
    let bitangent = n.cross(tangent);
    (tangent, bitangent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_reflect_flips_normal_component() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let reflected = reflect(incident, Vec3::Y);

        assert!((reflected - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < EPS);
        assert!((reflected.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reflect_head_on() {
        let reflected = reflect(-Vec3::Z, Vec3::Z);
        assert_eq!(reflected, Vec3::Z);
    }

    #[test]
    fn test_orthonormal_basis_axes_and_diagonals() {
        let normals = [
            Vec3::X,
            -Vec3::X,
            Vec3::Y,
            -Vec3::Y,
            Vec3::Z,
            -Vec3::Z,
            Vec3::new(1.0, 1.0, 1.0).normalize(),
            Vec3::new(-0.3, 0.9, 0.2).normalize(),
        ];

        for n in normals {
            let (t, b) = orthonormal_basis(n);
            assert!((t.length() - 1.0).abs() < EPS, "tangent not unit for {n}");
            assert!((b.length() - 1.0).abs() < EPS, "bitangent not unit for {n}");
            assert!(t.dot(n).abs() < EPS, "tangent not orthogonal to {n}");
            assert!(b.dot(n).abs() < EPS, "bitangent not orthogonal to {n}");
            assert!(t.dot(b).abs() < EPS, "tangent and bitangent not orthogonal for {n}");
        }
    }
}
