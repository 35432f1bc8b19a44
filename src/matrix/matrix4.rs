use std::ops::Mul;

use log::debug;
use tracing::instrument;

use super::{
    Matrix3, SquareMatrix, impl_matrix_common, impl_named_accessors, is_usable_divisor,
    reciprocal_determinant,
};
use crate::storage::impl_flat_storage;
use crate::{MathError, Vector2, Vector3, Vector4};

/// 4x4 matrix, column-major
///
/// Layout:
/// ```text
/// [ n00 n01 n02 n03 ]   [ n[0] n[4] n[8]  n[12] ]
/// [ n10 n11 n12 n13 ] = [ n[1] n[5] n[9]  n[13] ]
/// [ n20 n21 n22 n23 ]   [ n[2] n[6] n[10] n[14] ]
/// [ n30 n31 n32 n33 ]   [ n[3] n[7] n[11] n[15] ]
/// ```
///
/// Translation is stored in the last column (`n[12]`, `n[13]`, `n[14]`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Matrix4 {
    n: [f32; 16],
}

impl_flat_storage!(Matrix4, 16, Matrix4::IDENTITY, "the identity matrix");
impl_matrix_common!(Matrix4, 4, 16, Vector4);
impl_named_accessors!(Matrix4, 4;
    n00 => (0, 0), n01 => (0, 1), n02 => (0, 2), n03 => (0, 3),
    n10 => (1, 0), n11 => (1, 1), n12 => (1, 2), n13 => (1, 3),
    n20 => (2, 0), n21 => (2, 1), n22 => (2, 2), n23 => (2, 3),
    n30 => (3, 0), n31 => (3, 1), n32 => (3, 2), n33 => (3, 3),
);

impl Matrix4 {
    pub const IDENTITY: Matrix4 = Matrix4 {
        n: [
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Builds a matrix from its entries given row by row
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        n00: f32,
        n01: f32,
        n02: f32,
        n03: f32,
        n10: f32,
        n11: f32,
        n12: f32,
        n13: f32,
        n20: f32,
        n21: f32,
        n22: f32,
        n23: f32,
        n30: f32,
        n31: f32,
        n32: f32,
        n33: f32,
    ) -> Self {
        Self {
            n: [
                n00, n10, n20, n30, n01, n11, n21, n31, n02, n12, n22, n32, n03, n13, n23, n33,
            ],
        }
    }

    pub const fn translation(t: Vector3) -> Self {
        Self::new(
            1.0, 0.0, 0.0, t.x, 0.0, 1.0, 0.0, t.y, 0.0, 0.0, 1.0, t.z, 0.0, 0.0, 0.0, 1.0,
        )
    }

    pub const fn scale(s: Vector3) -> Self {
        Self::new(
            s.x, 0.0, 0.0, 0.0, 0.0, s.y, 0.0, 0.0, 0.0, 0.0, s.z, 0.0, 0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_x(angle: f32) -> Self {
        Self::from_matrix3(&Matrix3::rotation_x(angle))
    }

    pub fn rotation_y(angle: f32) -> Self {
        Self::from_matrix3(&Matrix3::rotation_y(angle))
    }

    pub fn rotation_z(angle: f32) -> Self {
        Self::from_matrix3(&Matrix3::rotation_z(angle))
    }

    /// Rotation by `angle` radians around `axis`, which does not need to be normalized
    pub fn rotation(axis: Vector3, angle: f32) -> Self {
        Self::from_quaternion(&Vector4::from_axis_angle(axis, angle))
    }

    /// Embeds `m` as the upper-left block, with no translation
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let mut out = Self::IDENTITY;
        for col in 0..3 {
            for row in 0..3 {
                out.set(row, col, m.get(row, col));
            }
        }
        out
    }

    /// Rotation by the quaternion `q` followed by a translation by `t`
    pub fn from_rotation_translation(q: &Vector4, t: Vector3) -> Self {
        let mut m = Self::from_quaternion(q);
        m.set_translation_part(t);
        m
    }

    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.n[12], self.n[13], self.n[14])
    }

    pub fn set_translation_part(&mut self, t: Vector3) {
        self.n[12] = t.x;
        self.n[13] = t.y;
        self.n[14] = t.z;
    }

    /// Transforms a point, dividing by the resulting `w` unless it is zero
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let v = *self * p.extend(1.0);
        if v.w == 0.0 {
            v.xyz()
        } else {
            v.xyz() / v.w
        }
    }

    /// Transforms a direction, ignoring the translation
    pub fn transform_direction(&self, d: Vector3) -> Vector3 {
        (*self * d.extend(0.0)).xyz()
    }

    /// The twelve 2x2 minors shared by the determinant and the adjugate.
    ///
    /// `b[0..6]` come from columns 0-1, `b[6..12]` from columns 2-3, each
    /// pairing two rows.
    fn block_minors(&self) -> [f32; 12] {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.n;
        [
            a00 * a11 - a01 * a10,
            a00 * a12 - a02 * a10,
            a00 * a13 - a03 * a10,
            a01 * a12 - a02 * a11,
            a01 * a13 - a03 * a11,
            a02 * a13 - a03 * a12,
            a20 * a31 - a21 * a30,
            a20 * a32 - a22 * a30,
            a20 * a33 - a23 * a30,
            a21 * a32 - a22 * a31,
            a21 * a33 - a23 * a31,
            a22 * a33 - a23 * a32,
        ]
    }

    /// Fails on the first NaN or infinite entry within the top `rows` rows
    fn check_finite(&self, rows: usize) -> Result<(), MathError> {
        let found = self
            .n
            .iter()
            .enumerate()
            .find(|&(index, value)| index % 4 < rows && !value.is_finite());
        match found {
            Some((index, &value)) => {
                let (row, column) = (index % 4, index / 4);
                debug!("Matrix4 entry ({row}, {column}) is {value}, not inverting");
                Err(MathError::NonFinite { row, column, value })
            }
            None => Ok(()),
        }
    }

    /// Inverts in place by Gauss-Jordan elimination with partial pivoting.
    ///
    /// Reduces `[M | I]` to `[I | M⁻¹]` in a scratch copy and only writes back on
    /// success, so a [`MathError::ZeroPivot`] or [`MathError::NonFinite`] leaves
    /// `self` unchanged.
    #[instrument(level = "trace", skip(self))]
    pub fn invert_gauss_jordan(&mut self) -> Result<(), MathError> {
        self.check_finite(4)?;
        let mut a = [[0.0f32; 4]; 4];
        for (row, values) in a.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.get(row, col);
            }
        }
        let mut inv = [[0.0f32; 4]; 4];
        for (i, values) in inv.iter_mut().enumerate() {
            values[i] = 1.0;
        }

        for col in 0..4 {
            let mut pivot_row = col;
            for row in col + 1..4 {
                if a[row][col].abs() > a[pivot_row][col].abs() {
                    pivot_row = row;
                }
            }
            let pivot = a[pivot_row][col];
            if !is_usable_divisor(pivot) {
                debug!("Matrix4 is singular, pivot {pivot} in column {col}");
                return Err(MathError::ZeroPivot { column: col, pivot });
            }
            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let inv_pivot = 1.0 / pivot;
            for c in 0..4 {
                a[col][c] *= inv_pivot;
                inv[col][c] *= inv_pivot;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..4 {
                    a[row][c] -= factor * a[col][c];
                    inv[row][c] -= factor * inv[col][c];
                }
            }
        }

        for (row, values) in inv.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                self.set(row, col, *value);
            }
        }
        Ok(())
    }

    /// Inverse by Gauss-Jordan elimination as a new matrix, `None` if singular
    pub fn inverse_gauss_jordan(&self) -> Option<Self> {
        let mut m = *self;
        m.invert_gauss_jordan().ok()?;
        Some(m)
    }

    /// Inverts in place assuming the bottom row is `(0, 0, 0, 1)`.
    ///
    /// Only the upper-left 3x3 block is inverted (its determinant decides
    /// singularity); the translation becomes `-L⁻¹ t`. The bottom row of the
    /// result is always `(0, 0, 0, 1)` whatever it was before, so only the top
    /// three rows have to be finite.
    pub fn invert_affine(&mut self) -> Result<(), MathError> {
        self.check_finite(3)?;
        let mut linear = Matrix3::from_matrix4(self);
        linear.invert()?;
        let translation = -(linear * self.translation_part());
        *self = Self::from_matrix3(&linear);
        self.set_translation_part(translation);
        Ok(())
    }

    /// Affine inverse as a new matrix, `None` if singular
    pub fn inverse_affine(&self) -> Option<Self> {
        let mut m = *self;
        m.invert_affine().ok()?;
        Some(m)
    }

    /// CSS `matrix3d(...)`, which takes the column-major array as is
    pub fn to_css(&self) -> String {
        let values: Vec<String> = self.n.iter().map(f32::to_string).collect();
        format!("matrix3d({})", values.join(", "))
    }

    /// CSS `matrix(a, b, c, d, e, f)` of the xy affine part
    pub fn to_css_2x3(&self) -> String {
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            self.n00(),
            self.n10(),
            self.n01(),
            self.n11(),
            self.n03(),
            self.n13()
        )
    }

    /// The xy translation as a 2D vector
    pub fn translation_part2(&self) -> Vector2 {
        self.translation_part().xy()
    }
}

impl SquareMatrix for Matrix4 {
    fn identity() -> Self {
        Self::IDENTITY
    }

    /// Laplace expansion along the first two columns: six products of
    /// complementary 2x2 minors, `det = Σ ± b(cols 0-1) · b(cols 2-3)`.
    fn determinant(&self) -> f32 {
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = self.block_minors();
        b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06
    }

    fn transpose(&mut self) {
        for (i, j) in [(1, 4), (2, 8), (3, 12), (6, 9), (7, 13), (11, 14)] {
            self.n.swap(i, j);
        }
    }

    /// Adjoint method: the transposed cofactor matrix divided by the determinant.
    ///
    /// Every cofactor is built from the same block minors as the determinant.
    fn invert(&mut self) -> Result<(), MathError> {
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = self.block_minors();
        let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
        let d = reciprocal_determinant(det, "Matrix4")?;

        // aCR is column C, row R
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.n;
        self.n = [
            (a11 * b11 - a12 * b10 + a13 * b09) * d,
            (a02 * b10 - a01 * b11 - a03 * b09) * d,
            (a31 * b05 - a32 * b04 + a33 * b03) * d,
            (a22 * b04 - a21 * b05 - a23 * b03) * d,
            (a12 * b08 - a10 * b11 - a13 * b07) * d,
            (a00 * b11 - a02 * b08 + a03 * b07) * d,
            (a32 * b02 - a30 * b05 - a33 * b01) * d,
            (a20 * b05 - a22 * b02 + a23 * b01) * d,
            (a10 * b10 - a11 * b08 + a13 * b06) * d,
            (a01 * b08 - a00 * b10 - a03 * b06) * d,
            (a30 * b04 - a31 * b02 + a33 * b00) * d,
            (a21 * b02 - a20 * b04 - a23 * b00) * d,
            (a11 * b07 - a10 * b09 - a12 * b06) * d,
            (a00 * b09 - a01 * b07 + a02 * b06) * d,
            (a31 * b01 - a30 * b03 - a32 * b00) * d,
            (a20 * b03 - a21 * b01 + a22 * b00) * d,
        ];
        Ok(())
    }
}
