//! Quaternions and rotation-matrix conversion
//!
//! A quaternion is a [`Vector4`] read as `(x, y, z, w)` with `w` the scalar
//! part. Anything that produces a rotation (axis-angle, matrix conversion,
//! slerp) returns a unit quaternion. Non-unit quaternions can be stored but
//! are not meaningful rotations.

use crate::{Matrix3, Matrix4, Vector3, Vector4};

/// `(x, y, z, w)` rotation quaternion, same storage as [`Vector4`]
pub type Quaternion = Vector4;

/// Above this cosine slerp falls back to normalized lerp.
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

impl Vector4 {
    pub const IDENTITY_QUATERNION: Vector4 = Vector4::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation by `angle` radians around `axis`, which does not need to be normalized.
    ///
    /// A zero axis yields the identity rotation.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vector3::ZERO {
            return Self::IDENTITY_QUATERNION;
        }
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos).normalized()
    }

    /// Unit quaternion of the rotation matrix `m`.
    ///
    /// Uses the trace when it is positive. Otherwise the formula is picked by
    /// the largest diagonal entry so the divisor stays well away from zero,
    /// which is what keeps rotations near 180° stable.
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let (m00, m01, m02) = (m.n00(), m.n01(), m.n02());
        let (m10, m11, m12) = (m.n10(), m.n11(), m.n12());
        let (m20, m21, m22) = (m.n20(), m.n21(), m.n22());

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new(
                (m21 - m12) * s,
                (m02 - m20) * s,
                (m10 - m01) * s,
                0.25 / s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self::new(
                0.25 * s,
                (m01 + m10) / s,
                (m02 + m20) / s,
                (m21 - m12) / s,
            )
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self::new(
                (m01 + m10) / s,
                0.25 * s,
                (m12 + m21) / s,
                (m02 - m20) / s,
            )
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self::new(
                (m02 + m20) / s,
                (m12 + m21) / s,
                0.25 * s,
                (m10 - m01) / s,
            )
        };
        q.normalized()
    }

    /// Unit quaternion of the rotation in the upper-left 3x3 block of `m`
    pub fn from_matrix4(m: &Matrix4) -> Self {
        Self::from_matrix3(&Matrix3::from_matrix4(m))
    }

    /// `self = self ⊗ rhs`, the rotation that applies `rhs` first
    pub fn quaternion_multiply(&mut self, rhs: &Self) {
        *self = self.quaternion_product(rhs);
    }

    /// Hamilton product `self ⊗ rhs`
    pub fn quaternion_product(&self, rhs: &Self) -> Self {
        let (x1, y1, z1, w1) = (self.x, self.y, self.z, self.w);
        let (x2, y2, z2, w2) = (rhs.x, rhs.y, rhs.z, rhs.w);
        Self::new(
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
        )
    }

    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse, `None` for the zero quaternion
    pub fn inverse_quaternion(&self) -> Option<Self> {
        let norm_squared = self.length_squared();
        if norm_squared == 0.0 {
            return None;
        }
        Some(self.conjugate() / norm_squared)
    }

    /// Rotates `v` by this unit quaternion
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        let u = self.xyz();
        let t = u.cross(&v) * 2.0;
        v + t * self.w + u.cross(&t)
    }

    /// Spherical interpolation along the shorter arc, `t = 0` yields `self`.
    ///
    /// The cosine between the inputs is clamped to `[-1, 1]` and antipodal
    /// inputs are flipped onto the same hemisphere, so the result is always a
    /// unit quaternion.
    pub fn slerp(&self, to: &Self, t: f32) -> Self {
        let mut to = *to;
        let mut cos = self.dot(&to).clamp(-1.0, 1.0);
        if cos < 0.0 {
            to = -to;
            cos = -cos;
        }
        if cos > SLERP_LINEAR_THRESHOLD {
            return self.lerp(&to, t).normalized();
        }
        let theta = cos.acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        (*self * a + to * b).normalized()
    }

    /// Rotation axis (unit length) and angle in `[0, 2π]`.
    ///
    /// Without a defined axis (identity rotation) the x axis is returned.
    pub fn to_axis_angle(&self) -> (Vector3, f32) {
        let q = self.normalized();
        let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
        let s = (1.0 - q.w * q.w).max(0.0).sqrt();
        if s < 1e-6 {
            (Vector3::UNIT_X, angle)
        } else {
            (q.xyz() / s, angle)
        }
    }
}

impl Matrix3 {
    /// Rotation matrix of `q`, scaled by `2 / |q|²` so non-unit input still
    /// gives a rotation. The zero quaternion gives the identity.
    pub fn from_quaternion(q: &Vector4) -> Self {
        let norm_squared = q.length_squared();
        let s = if norm_squared > 0.0 {
            2.0 / norm_squared
        } else {
            0.0
        };
        let (xs, ys, zs) = (q.x * s, q.y * s, q.z * s);
        let (wx, wy, wz) = (q.w * xs, q.w * ys, q.w * zs);
        let (xx, xy, xz) = (q.x * xs, q.x * ys, q.x * zs);
        let (yy, yz, zz) = (q.y * ys, q.y * zs, q.z * zs);

        Self::new(
            1.0 - (yy + zz),
            xy - wz,
            xz + wy,
            xy + wz,
            1.0 - (xx + zz),
            yz - wx,
            xz - wy,
            yz + wx,
            1.0 - (xx + yy),
        )
    }
}

impl Matrix4 {
    /// Rotation matrix of `q` with no translation, see [`Matrix3::from_quaternion`]
    pub fn from_quaternion(q: &Vector4) -> Self {
        Self::from_matrix3(&Matrix3::from_quaternion(q))
    }
}
