use std::ops::Mul;

use super::{Matrix4, SquareMatrix, impl_matrix_common, impl_named_accessors, reciprocal_determinant};
use crate::storage::impl_flat_storage;
use crate::{MathError, Vector2, Vector3, Vector4};

/// 3x3 matrix, column-major
///
/// Layout:
/// ```text
/// [ n00 n01 n02 ]   [ n[0] n[3] n[6] ]
/// [ n10 n11 n12 ] = [ n[1] n[4] n[7] ]
/// [ n20 n21 n22 ]   [ n[2] n[5] n[8] ]
/// ```
///
/// Used both as a 3D linear transform (rotation, scale) and as a 2D affine
/// transform with the translation in the third column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Matrix3 {
    n: [f32; 9],
}

impl_flat_storage!(Matrix3, 9, Matrix3::IDENTITY, "the identity matrix");
impl_matrix_common!(Matrix3, 3, 9, Vector3);
impl_named_accessors!(Matrix3, 3;
    n00 => (0, 0), n01 => (0, 1), n02 => (0, 2),
    n10 => (1, 0), n11 => (1, 1), n12 => (1, 2),
    n20 => (2, 0), n21 => (2, 1), n22 => (2, 2),
);

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3 {
        n: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Builds a matrix from its entries given row by row
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        n00: f32,
        n01: f32,
        n02: f32,
        n10: f32,
        n11: f32,
        n12: f32,
        n20: f32,
        n21: f32,
        n22: f32,
    ) -> Self {
        Self {
            n: [n00, n10, n20, n01, n11, n21, n02, n12, n22],
        }
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(1.0, 0.0, 0.0, 0.0, cos, -sin, 0.0, sin, cos)
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, 0.0, sin, 0.0, 1.0, 0.0, -sin, 0.0, cos)
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation by `angle` radians around `axis`, which does not need to be normalized
    pub fn rotation(axis: Vector3, angle: f32) -> Self {
        Self::from_quaternion(&Vector4::from_axis_angle(axis, angle))
    }

    pub const fn scale(s: Vector3) -> Self {
        Self::new(s.x, 0.0, 0.0, 0.0, s.y, 0.0, 0.0, 0.0, s.z)
    }

    /// 2D homogeneous translation
    pub const fn translation(t: Vector2) -> Self {
        Self::new(1.0, 0.0, t.x, 0.0, 1.0, t.y, 0.0, 0.0, 1.0)
    }

    /// The upper-left 3x3 block of `m`
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let mut out = Self::IDENTITY;
        for col in 0..3 {
            for row in 0..3 {
                out.set(row, col, m.get(row, col));
            }
        }
        out
    }

    /// Applies the 2D affine transform to a point
    pub fn transform_point2(&self, p: Vector2) -> Vector2 {
        let v = *self * p.extend(1.0);
        Vector2::new(v.x, v.y)
    }

    /// CSS `matrix(a, b, c, d, e, f)` of the 2D affine part
    pub fn to_css_2x3(&self) -> String {
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            self.n00(),
            self.n10(),
            self.n01(),
            self.n11(),
            self.n02(),
            self.n12()
        )
    }
}

impl SquareMatrix for Matrix3 {
    fn identity() -> Self {
        Self::IDENTITY
    }

    /// Cofactor expansion along the first row
    fn determinant(&self) -> f32 {
        self.n00() * (self.n11() * self.n22() - self.n12() * self.n21())
            - self.n01() * (self.n10() * self.n22() - self.n12() * self.n20())
            + self.n02() * (self.n10() * self.n21() - self.n11() * self.n20())
    }

    fn transpose(&mut self) {
        self.n.swap(1, 3);
        self.n.swap(2, 6);
        self.n.swap(5, 7);
    }

    /// Adjugate divided by the determinant
    fn invert(&mut self) -> Result<(), MathError> {
        let (a00, a01, a02) = (self.n00(), self.n01(), self.n02());
        let (a10, a11, a12) = (self.n10(), self.n11(), self.n12());
        let (a20, a21, a22) = (self.n20(), self.n21(), self.n22());

        // cofactors of the first row, reused by the determinant
        let c00 = a11 * a22 - a12 * a21;
        let c01 = a12 * a20 - a10 * a22;
        let c02 = a10 * a21 - a11 * a20;

        let det = a00 * c00 + a01 * c01 + a02 * c02;
        let inv_det = reciprocal_determinant(det, "Matrix3")?;

        *self = Self::new(
            c00 * inv_det,
            (a02 * a21 - a01 * a22) * inv_det,
            (a01 * a12 - a02 * a11) * inv_det,
            c01 * inv_det,
            (a00 * a22 - a02 * a20) * inv_det,
            (a02 * a10 - a00 * a12) * inv_det,
            c02 * inv_det,
            (a01 * a20 - a00 * a21) * inv_det,
            (a00 * a11 - a01 * a10) * inv_det,
        );
        Ok(())
    }
}
