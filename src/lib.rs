//!
//! Smallmat is a small-matrix linear algebra kernel for graphics code.
//!
//! It provides 2, 3 and 4 component vectors, 2x2, 3x3 and 4x4 matrices with
//! determinant and inversion, quaternion and Euler angle conversion, and
//! perspective/orthographic projection builders.
//!
//! All storage is `f32` and matrices are column-major, matching what GPU
//! uniform buffers and CSS `matrix3d()` expect.
//!
//! ```
//! use smallmat::{Matrix4, SquareMatrix, Vector3};
//!
//! let m = Matrix4::translation(Vector3::new(1.0, 2.0, 3.0));
//! let inv = m.inverse().unwrap();
//! assert!((m * inv).is_identity(1e-6));
//! ```

mod error;
pub mod euler;
pub mod matrix;
pub mod projection;
pub mod quaternion;
mod storage;
pub mod vector;

pub use error::MathError;
pub use euler::{EulerOrder, GIMBAL_LOCK_THRESHOLD};
pub use matrix::{EPSILON, Matrix2, Matrix3, Matrix4, SquareMatrix};
pub use projection::{Frustum, FrustumParams, Orthographic, OrthographicParams};
pub use quaternion::Quaternion;
pub use vector::{Vector2, Vector3, Vector4};
