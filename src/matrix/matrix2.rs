use std::ops::Mul;

use super::{SquareMatrix, impl_matrix_common, impl_named_accessors, reciprocal_determinant};
use crate::storage::impl_flat_storage;
use crate::{MathError, Vector2};

/// 2x2 matrix, column-major
///
/// Layout:
/// ```text
/// [ n00 n01 ]   [ n[0] n[2] ]
/// [ n10 n11 ] = [ n[1] n[3] ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Matrix2 {
    n: [f32; 4],
}

impl_flat_storage!(Matrix2, 4, Matrix2::IDENTITY, "the identity matrix");
impl_matrix_common!(Matrix2, 2, 4, Vector2);
impl_named_accessors!(Matrix2, 2;
    n00 => (0, 0), n01 => (0, 1),
    n10 => (1, 0), n11 => (1, 1),
);

impl Matrix2 {
    pub const IDENTITY: Matrix2 = Matrix2 {
        n: [1.0, 0.0, 0.0, 1.0],
    };

    /// Builds a matrix from its entries given row by row
    pub const fn new(n00: f32, n01: f32, n10: f32, n11: f32) -> Self {
        Self {
            n: [n00, n10, n01, n11],
        }
    }

    /// Counter-clockwise rotation by `angle` radians
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos)
    }

    pub const fn scale(s: Vector2) -> Self {
        Self::new(s.x, 0.0, 0.0, s.y)
    }
}

impl SquareMatrix for Matrix2 {
    fn identity() -> Self {
        Self::IDENTITY
    }

    fn determinant(&self) -> f32 {
        self.n00() * self.n11() - self.n01() * self.n10()
    }

    fn transpose(&mut self) {
        self.n.swap(1, 2);
    }

    fn invert(&mut self) -> Result<(), MathError> {
        let inv_det = reciprocal_determinant(self.determinant(), "Matrix2")?;
        *self = Self::new(
            self.n11() * inv_det,
            -self.n01() * inv_det,
            -self.n10() * inv_det,
            self.n00() * inv_det,
        );
        Ok(())
    }
}
