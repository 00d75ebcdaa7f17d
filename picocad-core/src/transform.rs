/// Mesh-local / world space transforms and axis rotations
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, Matrix4, Point3};

use crate::error::UnknownAxis;
use crate::geometry::{Mesh, Vec3};

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into a [`Vec3`].
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = UnknownAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(UnknownAxis(s.to_string())),
        }
    }
}

/// Transform builder for mesh space conversions
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(offset: &Vec3) -> Matrix4<f64> {
        Matrix4::new_translation(offset)
    }

    /// Create the right-handed rotation about `axis`
    #[rustfmt::skip]
    pub fn rotation_matrix(axis: Axis, degrees: f64) -> Matrix3<f64> {
        let (sin, cos) = degrees.to_radians().sin_cos();
        match axis {
            Axis::X => Matrix3::new(
                1.0, 0.0, 0.0,
                0.0, cos, -sin,
                0.0, sin, cos,
            ),
            Axis::Y => Matrix3::new(
                cos, 0.0, sin,
                0.0, 1.0, 0.0,
                -sin, 0.0, cos,
            ),
            Axis::Z => Matrix3::new(
                cos, -sin, 0.0,
                sin, cos, 0.0,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Apply an affine matrix to a point
    pub fn apply(matrix: &Matrix4<f64>, point: &Vec3) -> Vec3 {
        matrix.transform_point(&Point3::from(*point)).coords
    }
}

impl Mesh {
    /// Mesh-to-world matrix. Only `pos` contributes.
    pub fn position_matrix(&self) -> Matrix4<f64> {
        Transform::translation_matrix(&self.pos)
    }

    pub fn inverse_position_matrix(&self) -> Matrix4<f64> {
        Transform::translation_matrix(&-self.pos)
    }

    pub fn to_world(&self, local: &Vec3) -> Vec3 {
        Transform::apply(&self.position_matrix(), local)
    }

    pub fn to_local(&self, world: &Vec3) -> Vec3 {
        Transform::apply(&self.inverse_position_matrix(), world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).norm() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_axis_parsing() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!(" Y ".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!("z".parse::<Axis>(), Ok(Axis::Z));
        assert!("w".parse::<Axis>().is_err());
        assert_eq!(Axis::Z.to_string(), "z");
    }

    #[test]
    fn test_world_and_local_are_inverse() {
        let mut mesh = Mesh::new("m");
        mesh.pos = Vec3::new(1.5, -2.0, 0.25);
        let local = Vec3::new(0.5, 0.5, -1.0);

        let world = mesh.to_world(&local);
        assert_eq!(world, Vec3::new(2.0, -1.5, -0.75));
        assert_eq!(mesh.to_local(&world), local);
    }

    #[test]
    fn test_rotation_ignored_by_position_matrix() {
        let mut mesh = Mesh::new("m");
        mesh.rot = Vec3::new(0.25, 0.5, 0.0);
        assert_eq!(mesh.position_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_quarter_turns() {
        let x = Transform::rotation_matrix(Axis::X, 90.0);
        assert_close(x * Vec3::y(), Vec3::z());

        let y = Transform::rotation_matrix(Axis::Y, 90.0);
        assert_close(y * Vec3::z(), Vec3::x());

        let z = Transform::rotation_matrix(Axis::Z, 90.0);
        assert_close(z * Vec3::x(), Vec3::y());
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(Axis::X, 0.0);
        assert!((matrix - Matrix3::identity()).norm() < 1e-12);
    }
}
