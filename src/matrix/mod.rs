//! Small square matrices
//!
//! All matrices are stored as a flat **column-major** `f32` array: the element
//! at row `r`, column `c` of an `N×N` matrix lives at index `c * N + r`. This
//! layout is what [`Matrix4::as_array`] hands to a GPU uniform buffer or a CSS
//! `matrix3d()` and must never be transposed implicitly.
//!
//! Named accessors follow the same convention: `n01()` is row 0, column 1.
//!
//! Matrices act on column vectors, `M * v`, and `A * B` applies `B` first.

mod matrix2;
mod matrix3;
mod matrix4;

pub use matrix2::Matrix2;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;

use std::ops::Mul;

use log::debug;

use crate::MathError;

/// Determinant (or pivot) magnitude below which a matrix is treated as singular.
pub const EPSILON: f32 = 1e-10;

/// Whether `value` is safe to divide by: finite and at least [`EPSILON`] in magnitude.
///
/// Written as a positive test so NaN is rejected.
pub(crate) fn is_usable_divisor(value: f32) -> bool {
    value.is_finite() && value.abs() >= EPSILON
}

/// `1 / det`, or [`MathError::Singular`] when `det` is not a usable divisor
pub(crate) fn reciprocal_determinant(det: f32, name: &str) -> Result<f32, MathError> {
    if is_usable_divisor(det) {
        Ok(1.0 / det)
    } else {
        debug!("{name} is singular, determinant {det}");
        Err(MathError::Singular { determinant: det })
    }
}

/// Operations shared by [`Matrix2`], [`Matrix3`] and [`Matrix4`].
///
/// Every mutating method works in place on its receiver. The `*ed`/`inverse`
/// variants copy first and leave the receiver alone.
pub trait SquareMatrix: Copy + Mul<Output = Self> {
    fn identity() -> Self;

    fn determinant(&self) -> f32;

    /// Transposes in place. Applying it twice restores the matrix bit for bit.
    fn transpose(&mut self);

    /// Inverts in place.
    ///
    /// Fails with [`MathError::Singular`] when `|det| < EPSILON` or the
    /// determinant is NaN or infinite, in which case `self` is left unchanged.
    fn invert(&mut self) -> Result<(), MathError>;

    fn transposed(&self) -> Self {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Inverse as a new matrix, `None` if singular.
    fn inverse(&self) -> Option<Self> {
        let mut m = *self;
        m.invert().ok()?;
        Some(m)
    }

    /// `self = self * rhs`
    fn multiply(&mut self, rhs: &Self) {
        *self = *self * *rhs;
    }

    /// `self = lhs * self`
    fn premultiply(&mut self, lhs: &Self) {
        *self = *lhs * *self;
    }
}

/// Storage and element access shared by all matrix sizes.
///
/// Assumes the type is a struct with a single `n: [f32; $len]` field and an
/// inherent `IDENTITY` constant, and that `$vec` is the vector type of the
/// same dimension.
macro_rules! impl_matrix_common {
    ($ty:ident, $dim:literal, $len:literal, $vec:ident) => {
        impl $ty {
            pub const fn from_array(n: [f32; $len]) -> Self {
                Self { n }
            }

            pub const fn to_array(&self) -> [f32; $len] {
                self.n
            }

            /// The column-major backing buffer
            pub const fn as_array(&self) -> &[f32; $len] {
                &self.n
            }

            pub fn as_mut_array(&mut self) -> &mut [f32; $len] {
                &mut self.n
            }

            pub const fn get(&self, row: usize, col: usize) -> f32 {
                self.n[col * $dim + row]
            }

            pub fn set(&mut self, row: usize, col: usize, value: f32) {
                self.n[col * $dim + row] = value;
            }

            pub fn row(&self, row: usize) -> $vec {
                let mut out = [0.0; $dim];
                for (col, value) in out.iter_mut().enumerate() {
                    *value = self.get(row, col);
                }
                $vec::from_array(out)
            }

            pub fn column(&self, col: usize) -> $vec {
                let mut out = [0.0; $dim];
                out.copy_from_slice(&self.n[col * $dim..(col + 1) * $dim]);
                $vec::from_array(out)
            }

            /// Whether every element is within `tolerance` of `other`'s
            pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
                self.n
                    .iter()
                    .zip(other.n.iter())
                    .all(|(a, b)| (a - b).abs() <= tolerance)
            }

            pub fn is_identity(&self, tolerance: f32) -> bool {
                self.approx_eq(&Self::IDENTITY, tolerance)
            }
        }

        impl AsRef<[f32]> for $ty {
            fn as_ref(&self) -> &[f32] {
                &self.n
            }
        }

        impl Mul for $ty {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> $ty {
                let mut out = [0.0f32; $len];
                for col in 0..$dim {
                    for row in 0..$dim {
                        out[col * $dim + row] = (0..$dim)
                            .map(|k| self.get(row, k) * rhs.get(k, col))
                            .sum();
                    }
                }
                $ty { n: out }
            }
        }

        /// Transforms a column vector
        impl Mul<$vec> for $ty {
            type Output = $vec;

            fn mul(self, v: $vec) -> $vec {
                let v = v.to_array();
                let mut out = [0.0f32; $dim];
                for (row, value) in out.iter_mut().enumerate() {
                    *value = (0..$dim).map(|col| self.get(row, col) * v[col]).sum();
                }
                $vec::from_array(out)
            }
        }

        /// Prints rows, e.g. `[[1, 0], [0, 1]]` for the 2×2 identity
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let rows: Vec<String> = (0..$dim)
                    .map(|row| {
                        let cells: Vec<String> =
                            (0..$dim).map(|col| self.get(row, col).to_string()).collect();
                        format!("[{}]", cells.join(", "))
                    })
                    .collect();
                write!(f, "[{}]", rows.join(", "))
            }
        }
    };
}

/// Named read accessors, `nRC()` returning row `R`, column `C`.
macro_rules! impl_named_accessors {
    ($ty:ident, $dim:literal; $($name:ident => ($row:literal, $col:literal)),+ $(,)?) => {
        impl $ty {
            $(
                #[inline]
                pub const fn $name(&self) -> f32 {
                    self.n[$col * $dim + $row]
                }
            )+
        }
    };
}

pub(crate) use impl_matrix_common;
pub(crate) use impl_named_accessors;
